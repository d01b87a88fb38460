//! Typed errors for the ETL library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to give callers
//! strongly-typed failures they can match on. Three families matter to the
//! pipeline contract: missing collaborator handles (fail fast, nothing is
//! attempted), unrecognized configuration keys (fail before any I/O), and
//! payload/strategy mismatches (fail before any state is touched).

use thiserror::Error;

use crate::types::Source;

/// Errors that can occur while running a social ETL pipeline.
#[derive(Debug, Error)]
pub enum EtlError {
    /// Extract was called without a constructed upstream client.
    ///
    /// The field is named `which` rather than `source` because thiserror
    /// reserves a `source` field for error chaining.
    #[error("{which} client is missing: pass a constructed client")]
    MissingClient { which: Source },

    /// Load was called without a connected database handle.
    #[error("database handle is missing: pass a connected Database")]
    MissingDatabase,

    /// Source name not recognized by the factory.
    #[error("source '{name}' is not supported")]
    UnknownSource { name: String },

    /// Transformation key not recognized by the strategy lookup.
    #[error("transformation '{name}' is not supported")]
    UnknownTransformation { name: String },

    /// A strategy was applied to a payload variant it cannot read.
    #[error("'{transformation}' only applies to {expected} posts, got a {actual} post")]
    PayloadMismatch {
        transformation: &'static str,
        expected: Source,
        actual: Source,
    },

    /// Required environment variable absent at client construction.
    #[error("environment variable {name} is not set")]
    MissingCredential { name: &'static str },

    /// HTTP transport failure talking to an upstream API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream API answered with an unusable status or body.
    #[error("upstream API error: {0}")]
    Api(String),

    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for ETL operations.
pub type Result<T> = std::result::Result<T, EtlError>;
