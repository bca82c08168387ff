// lazyapp-core/src/check/identifier.rs
use lazyapp_common::error::{LazyAppError, Result};

fn invalid(id: &str, reason: impl Into<String>) -> LazyAppError {
    LazyAppError::InvalidIdentifier {
        identifier: id.to_string(),
        reason: reason.into(),
    }
}

/// Checks a dotted identifier (`group.subgroup.leaf`) for structural well-formedness and returns
/// it unchanged. Every segment is checked before anything is returned.
pub fn validate_identifier(id: &str) -> Result<&str> {
    if id.is_empty() {
        return Err(invalid(id, "identifier is empty"));
    }
    if id.starts_with('.') || id.ends_with('.') {
        return Err(invalid(id, "identifier starts or ends with '.'"));
    }
    for segment in id.split('.') {
        if segment.is_empty() {
            return Err(invalid(id, "identifier contains an empty segment"));
        }
        if segment.contains('/') {
            return Err(invalid(id, format!("segment '{segment}' contains '/'")));
        }
        if segment.contains(' ') {
            return Err(invalid(id, format!("segment '{segment}' contains a space")));
        }
        if segment.starts_with('-') {
            return Err(invalid(id, format!("segment '{segment}' starts with '-'")));
        }
    }
    Ok(id)
}
