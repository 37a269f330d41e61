use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use hangar_catalog::{Part, PartsFilter};
use hangar_core::identity::parse_uuid;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppJson, AppPath};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct GetPartResponse {
    pub part: Part,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListPartsRequest {
    #[serde(default)]
    pub filter: PartsFilter,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListPartsResponse {
    pub parts: Vec<Part>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/parts/search", post(list_parts))
        .route("/parts/{part_uuid}", get(get_part))
}

/// GET /parts/{part_uuid}
pub async fn get_part(
    State(state): State<AppState>,
    AppPath(part_uuid): AppPath<String>,
) -> Result<AppJson<GetPartResponse>, AppError> {
    let part_uuid = parse_uuid("part_uuid", &part_uuid)?;
    let part = state.catalog.get(part_uuid).await?;
    Ok(AppJson(GetPartResponse { part }))
}

/// POST /parts/search
/// An empty match is a valid, empty response
pub async fn list_parts(
    State(state): State<AppState>,
    AppJson(req): AppJson<ListPartsRequest>,
) -> Result<AppJson<ListPartsResponse>, AppError> {
    let parts = state.catalog.list(&req.filter).await?;
    tracing::debug!("Part search matched {} parts", parts.len());
    Ok(AppJson(ListPartsResponse { parts }))
}
