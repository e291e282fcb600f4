//! mpx Data Service Client Library
//!
//! This crate provides typed access to the mpx data services used to render
//! video players: object types, list queries, an HTTP client speaking the
//! `cjson` wire form, and a per-user client registry.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod data_service;
pub mod factory;
pub mod query;
pub mod service;
pub mod types;

pub use data_service::{DataServiceClient, DataServiceConfig};
pub use factory::{ClientRegistry, DataServiceFactory};
pub use query::{ObjectList, ObjectListQuery, Range, Sort, SortDirection};
pub use service::PlayerDataService;
pub use types::{Account, Media, ObjectUri, Player, User};

/// Result type for mpx data service operations
pub type Result<T> = std::result::Result<T, RemoteFetchError>;

/// Transfer-level failure reaching an mpx data service
///
/// Every variant is recoverable at the call site: callers decide whether to
/// skip a single item or abandon the whole operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteFetchError {
    /// Connection, timeout or body transfer failure
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP error status or an mpx service exception
    #[error("HTTP error {status}: {title} - {description}")]
    Http {
        /// HTTP or mpx response code
        status: u16,
        /// Exception title reported by the service
        title: String,
        /// Exception description reported by the service
        description: String,
    },

    /// Malformed response body
    #[error("Parse error: {0}")]
    Parse(String),

    /// Object URI could not be parsed
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// Requested object does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

impl RemoteFetchError {
    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            RemoteFetchError::Network(_) => "network",
            RemoteFetchError::Http { .. } => "http",
            RemoteFetchError::Parse(_) => "parse",
            RemoteFetchError::InvalidUri(_) => "invalid_uri",
            RemoteFetchError::NotFound(_) => "not_found",
        }
    }

    /// HTTP status associated with the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteFetchError::Http { status, .. } => Some(*status),
            RemoteFetchError::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RemoteFetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RemoteFetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<url::ParseError> for RemoteFetchError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUri(err.to_string())
    }
}
