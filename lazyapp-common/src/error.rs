use std::sync::Arc;

use thiserror::Error;

use crate::model::collision::CollisionReport;

#[derive(Error, Debug, Clone)]
pub enum LazyAppError {
    #[error("I/O Error: {0}")]
    Io(#[from] Arc<std::io::Error>),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] Arc<serde_json::Error>),

    #[error("TOML Parsing Error: {0}")]
    Toml(#[from] Arc<toml::de::Error>),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Manifest Error: {0}")]
    Manifest(String),

    #[error("Repository Error: {0}")]
    Repository(String),

    #[error("Invalid identifier '{identifier}': {reason}")]
    InvalidIdentifier { identifier: String, reason: String },

    #[error("Package '{}' not found in repository (checked: {})", .path.join("."), format_checked(.checked))]
    PackageNotFound {
        path: Vec<String>,
        checked: Vec<String>,
    },

    #[error("Ambiguous reference for '{0}': both a package path and a package object were given")]
    AmbiguousReference(String),

    #[error("Missing reference for '{0}': neither a package path nor a package object was given")]
    MissingReference(String),

    #[error("Package '{0}' has a non-free license; set allow_unfree to build it")]
    UnfreeNotAllowed(String),

    #[error("Terminal command collision:\n{0}")]
    CollisionDetected(CollisionReport),
}

fn format_checked(checked: &[String]) -> String {
    if checked.is_empty() {
        "<repository root>".to_string()
    } else {
        checked.join(" -> ")
    }
}

impl From<std::io::Error> for LazyAppError {
    fn from(err: std::io::Error) -> Self {
        LazyAppError::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for LazyAppError {
    fn from(err: serde_json::Error) -> Self {
        LazyAppError::Json(Arc::new(err))
    }
}

impl From<toml::de::Error> for LazyAppError {
    fn from(err: toml::de::Error) -> Self {
        LazyAppError::Toml(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, LazyAppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_not_found_lists_checked_segments() {
        let err = LazyAppError::PackageNotFound {
            path: vec!["kdePackages".into(), "nope".into()],
            checked: vec!["kdePackages".into(), "nope".into()],
        };
        assert_eq!(
            err.to_string(),
            "Package 'kdePackages.nope' not found in repository (checked: kdePackages -> nope)"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: LazyAppError = io.into();
        assert!(matches!(err, LazyAppError::Io(_)));
    }
}
