//! Crate-wide error type for client operations.
//!
//! Query building and URL encoding keep their own focused error enums
//! ([`QueryError`], [`ExploreError`]); this type aggregates them with
//! the transport and configuration failures a client call can hit.

use thiserror::Error;

use crate::config::ConfigError;
use crate::explore::ExploreError;
use crate::query::QueryError;

/// Result alias for client operations.
pub type RillResult<T> = Result<T, RillError>;

/// Error type for client operations.
#[derive(Debug, Error)]
pub enum RillError {
    /// Missing or rejected credentials, or unresolvable org/project.
    #[error("{0}")]
    Auth(String),

    /// The API answered with an error status.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        /// Raw response body, when one was readable.
        body: Option<String>,
    },

    /// The request never produced an API answer.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a payload this crate could not decode.
    #[error("Failed to decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Explore(#[from] ExploreError),
}

impl RillError {
    /// Status code for API errors, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            RillError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
