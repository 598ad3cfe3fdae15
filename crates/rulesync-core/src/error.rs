use thiserror::Error;

/// Failures that stop a pass before it touches anything.
///
/// Findings (duplicates, contested ownership, unmatched annotations) are not
/// errors; they are returned in the pass reports.
#[derive(Debug, Error)]
pub enum RulesyncError {
    #[error("catalog document must be a JSON object, found {found}")]
    CatalogNotObject { found: &'static str },

    #[error("catalog document has no `{key}` list")]
    MissingCatalogKey { key: String },

    #[error("catalog `{key}` must be an array, found {found}")]
    CatalogNotArray { key: String, found: &'static str },

    #[error("catalog entry {index} is invalid: {source}")]
    InvalidEntry {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize catalog entry `{id}`: {source}")]
    Serialize {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RulesyncError>;
