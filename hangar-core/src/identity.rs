//! Identifier parsing at the service boundary.
//!
//! Every identifier (order, user, part, transaction) travels as a canonical
//! hyphenated UUID string. Anything else is a client error.

use uuid::Uuid;

use crate::{CoreError, CoreResult};

/// Parse a single identifier, naming the offending field on failure
pub fn parse_uuid(field: &str, raw: &str) -> CoreResult<Uuid> {
    // Uuid::parse_str also accepts simple, braced and urn forms
    if raw.len() != 36 {
        return Err(invalid(field, raw, "expected a hyphenated uuid"));
    }

    Uuid::parse_str(raw).map_err(|e| invalid(field, raw, &e.to_string()))
}

/// Parse a list of identifiers, preserving order and duplicates
pub fn parse_uuids<S: AsRef<str>>(field: &str, raw: &[S]) -> CoreResult<Vec<Uuid>> {
    raw.iter().map(|value| parse_uuid(field, value.as_ref())).collect()
}

fn invalid(field: &str, raw: &str, reason: &str) -> CoreError {
    CoreError::ValidationError(format!("invalid {} format {:?}: {}", field, raw, reason))
}
