//! Error types for the query crate.
//!
//! Every variant is a setup-time error: filtering and sorting never fail.

use thiserror::Error;

/// Errors raised while building a schema or validating query state against it.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A facet names a field the schema does not declare.
    #[error("unknown facet '{facet}': no such field in schema")]
    UnknownFacet { facet: String },

    /// The sort state names a field the schema does not declare.
    #[error("unknown sort field '{field}': no such field in schema")]
    UnknownSortField { field: String },

    /// Two descriptors share a name.
    #[error("duplicate field '{field}' in schema")]
    DuplicateField { field: String },

    /// A descriptor has an empty name.
    #[error("field names must not be empty")]
    EmptyFieldName,

    /// A rank order was attached to a field that is not an enum.
    #[error("field '{field}' is {kind}; only enum fields accept a rank order")]
    RankOnNonEnum { field: String, kind: &'static str },

    /// A configured kind is not one of string, number, date, enum.
    #[error("field '{field}' has unknown kind '{kind}'")]
    UnknownKind { field: String, kind: String },

    /// YAML schema configuration could not be parsed.
    #[error("invalid YAML schema: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// JSON schema configuration could not be parsed.
    #[error("invalid JSON schema: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Result type for query setup operations.
pub type Result<T> = std::result::Result<T, QueryError>;
