use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the exobiology library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Per-body evaluation never fails; these errors come from loading and
/// validating a catalog or from reading snapshot files.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when catalog data fails validation.
    #[error("invalid catalog data: {message}")]
    CatalogValidation { message: String },

    /// Raised when two genera share the same identifier.
    #[error("duplicate genus identifier encountered: {id}")]
    DuplicateGenus { id: String },

    /// Raised when a species identifier or display name appears more than once
    /// across the catalog.
    #[error("duplicate species encountered: {name} (genus {genus})")]
    DuplicateSpecies { name: String, genus: String },

    /// Raised when a ruleset references a region set that does not exist.
    #[error("species {species} references unknown region set {region}")]
    UnknownRegionSet { species: String, region: String },

    /// Raised when a genus name could not be found in the catalog.
    #[error("unknown genus: {name}{}", format_suggestions(.suggestions))]
    UnknownGenus {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a body name could not be found in a system snapshot.
    #[error("unknown body: {name}")]
    UnknownBody { name: String },

    /// Raised when a system snapshot file cannot be parsed.
    #[error("failed to parse system snapshot from {path}: {message}")]
    SnapshotParse { path: PathBuf, message: String },

    /// Wrapper for JSON errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Error::CatalogValidation {
            message: message.into(),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
