//! Core mpx object types
//!
//! Objects are deserialized from the data services' `cjson` form, which uses
//! camelCase keys and full object URIs as identifiers.

use crate::RemoteFetchError;
use serde::{Deserialize, Serialize};
use url::Url;

// =============================================================================
// Object URI
// =============================================================================

/// Absolute URI identifying a single mpx object
///
/// # Examples
/// ```
/// use mpx_client::ObjectUri;
///
/// let uri = ObjectUri::parse("https://data.player.theplatform.com/player/data/Player/42").unwrap();
/// assert_eq!(uri.numeric_id(), Some("42"));
/// assert!(ObjectUri::parse("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectUri(Url);

impl ObjectUri {
    /// Parse and validate an object URI
    ///
    /// Only `http` and `https` URIs with a host and a non-root path are
    /// accepted.
    pub fn parse(value: &str) -> crate::Result<Self> {
        let url = Url::parse(value.trim())?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(RemoteFetchError::InvalidUri(format!(
                "unsupported scheme '{}' in {}",
                url.scheme(),
                value
            )));
        }
        if url.host_str().is_none() {
            return Err(RemoteFetchError::InvalidUri(format!("missing host in {}", value)));
        }
        if url.path().trim_matches('/').is_empty() {
            return Err(RemoteFetchError::InvalidUri(format!("missing object path in {}", value)));
        }

        Ok(Self(url))
    }

    /// Get the URI as a string slice
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Get the underlying URL
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Last path segment, which mpx uses as the numeric object id
    pub fn numeric_id(&self) -> Option<&str> {
        self.0
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|segment| !segment.is_empty())
    }
}

impl std::fmt::Display for ObjectUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ObjectUri {
    type Err = RemoteFetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ObjectUri {
    type Error = RemoteFetchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ObjectUri> for String {
    fn from(uri: ObjectUri) -> Self {
        uri.0.into()
    }
}

// =============================================================================
// Account & User
// =============================================================================

/// mpx account that scopes queries and player URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account object URI
    pub id: ObjectUri,
    /// Public identifier used in player URLs
    pub pid: String,
    /// Account title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Account {
    /// Create a new account
    pub fn new(id: ObjectUri, pid: impl Into<String>) -> Self {
        Self {
            id,
            pid: pid.into(),
            title: None,
        }
    }
}

/// mpx user whose credentials authenticate data service requests
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    /// Username, e.g. `mpx/editor@example.com`
    pub username: String,
    /// Issued authentication token
    pub token: String,
}

impl User {
    /// Create a new user
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Player & Media
// =============================================================================

/// Player configuration from the Player Data Service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Player object URI
    pub id: ObjectUri,
    /// Public identifier used in player URLs
    pub pid: String,
    /// Display title
    pub title: String,
    /// Whether the player has been disabled
    #[serde(default)]
    pub disabled: bool,
    /// Globally unique identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning account URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

/// Media object from the Media Data Service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    /// Media object URI
    pub id: ObjectUri,
    /// Public identifier used in player URLs
    pub pid: String,
    /// Display title
    #[serde(default)]
    pub title: String,
    /// Globally unique identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    /// Owning account URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}
