//! mpx data service client implementation
//!
//! This module implements the HTTP side of the mpx data services: client
//! configuration, the `cjson` request conventions, service exception handling
//! and typed object loading and listing.

use crate::query::{ObjectList, ObjectListQuery, Range};
use crate::types::{Account, ObjectUri};
use crate::{RemoteFetchError, Result};
use reqwest::{Client as ReqwestClient, RequestBuilder, Response as ReqwestResponse, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Response form requested from every data service
pub const RESPONSE_FORM: &str = "cjson";

/// Entries requested per page when walking a full listing
pub const DEFAULT_PAGE_SIZE: u32 = 100;

// =============================================================================
// Client Configuration
// =============================================================================

/// Configuration for a data service client
#[derive(Debug, Clone)]
pub struct DataServiceConfig {
    /// Base service URL, without the object type segment
    pub service_url: String,
    /// Schema version requested from the service
    pub schema: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Custom headers to include in all requests
    pub default_headers: HashMap<String, String>,
    /// Entries per page for [`DataServiceClient::select_all`]
    pub page_size: u32,
}

impl Default for DataServiceConfig {
    fn default() -> Self {
        Self {
            service_url: "https://data.player.theplatform.com/player/data".to_string(),
            schema: "1.6".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("mpx-player-embed/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl DataServiceConfig {
    /// Create a new config with a service URL
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
            ..Default::default()
        }
    }

    /// Set the schema version
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a default header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set the page size used when walking listings, at least 1
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

// =============================================================================
// Error Response Format
// =============================================================================

/// Exception body returned by mpx data services
///
/// mpx may deliver this with HTTP 200 when `httpError` is not requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceException {
    /// Always true for exception bodies
    pub is_exception: bool,
    /// HTTP-equivalent response code
    pub response_code: u16,
    /// Exception title, e.g. `ObjectNotFoundException`
    #[serde(default)]
    pub title: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
}

impl From<ServiceException> for RemoteFetchError {
    fn from(exception: ServiceException) -> Self {
        if exception.response_code == 404 {
            RemoteFetchError::NotFound(exception.description)
        } else {
            RemoteFetchError::Http {
                status: exception.response_code,
                title: exception.title,
                description: exception.description,
            }
        }
    }
}

// =============================================================================
// Data Service Client
// =============================================================================

/// HTTP client for one mpx data service
///
/// # Examples
/// ```
/// use mpx_client::{DataServiceClient, DataServiceConfig, ObjectListQuery, Sort};
/// use mpx_client::{Account, Player};
///
/// async fn example(account: &Account) -> Result<(), Box<dyn std::error::Error>> {
///     let client = DataServiceClient::new(DataServiceConfig::default())?.with_token("token");
///
///     let query = ObjectListQuery::new().with_sort(Sort::new().add_sort("title"));
///     let players = client.select::<Player>("Player", &query, account).await?;
///
///     for player in players.entries {
///         println!("{}: {}", player.id, player.title);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DataServiceClient {
    /// HTTP client
    client: ReqwestClient,
    /// Configuration
    config: DataServiceConfig,
    /// Authentication token appended to every request
    token: Option<String>,
}

impl DataServiceClient {
    /// Create a new data service client
    pub fn new(config: DataServiceConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| RemoteFetchError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            token: None,
        })
    }

    /// Authenticate requests with an issued token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Load a single object by its URI
    pub async fn load<T>(&self, uri: &ObjectUri) -> Result<T>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(uri = %uri, "Loading mpx object");

        let request = self.client.get(uri.as_url().clone());
        let response = self.execute(request, Vec::new()).await?;
        self.parse_response(response).await
    }

    /// Select a list of objects of the given type
    ///
    /// The sort in `query` is passed through to the service; entries are
    /// returned in the order the service produced them.
    pub async fn select<T>(
        &self,
        object_type: &str,
        query: &ObjectListQuery,
        account: &Account,
    ) -> Result<ObjectList<T>>
    where
        T: DeserializeOwned,
    {
        let url = format!(
            "{}/{}",
            self.config.service_url.trim_end_matches('/'),
            object_type
        );
        tracing::debug!(url = %url, account = %account.id, "Selecting mpx objects");

        let mut params = vec![("account".to_string(), account.id.to_string())];
        params.extend(query.to_params());

        let request = self.client.get(&url);
        let response = self.execute(request, params).await?;
        self.parse_response(response).await
    }

    /// Select every object of the given type, one page at a time
    ///
    /// Pages of [`DataServiceConfig::page_size`] entries are requested until
    /// one comes back short. A query that already carries a range is sent
    /// once, as-is.
    pub async fn select_all<T>(
        &self,
        object_type: &str,
        query: &ObjectListQuery,
        account: &Account,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        if query.range.is_some() {
            return Ok(self.select(object_type, query, account).await?.entries);
        }

        let page_size = self.config.page_size.max(1);
        let mut entries = Vec::new();
        let mut start = 1u32;

        loop {
            let page_query = query
                .clone()
                .with_range(Range::new(start, start.saturating_add(page_size - 1)));
            let page: ObjectList<T> = self.select(object_type, &page_query, account).await?;
            let received = page.entries.len();
            entries.extend(page.entries);

            tracing::trace!(start, received, "Fetched mpx list page");
            if received < page_size as usize || start.checked_add(page_size).is_none() {
                break;
            }
            start += page_size;
        }

        Ok(entries)
    }

    /// Add shared parameters and headers, then send
    async fn execute(
        &self,
        mut req: RequestBuilder,
        params: Vec<(String, String)>,
    ) -> Result<ReqwestResponse> {
        let mut query = vec![
            ("schema".to_string(), self.config.schema.clone()),
            ("form".to_string(), RESPONSE_FORM.to_string()),
        ];
        if let Some(token) = &self.token {
            query.push(("token".to_string(), token.clone()));
        }
        query.extend(params);
        req = req.query(&query);

        for (key, value) in &self.config.default_headers {
            req = req.header(key, value);
        }

        req.send()
            .await
            .map_err(|e| RemoteFetchError::Network(format!("Request failed: {}", e)))
    }

    /// Parse a response, mapping error statuses and exception bodies
    async fn parse_response<T>(&self, response: ReqwestResponse) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let url = response.url().to_string();

        let body = response.text().await.map_err(|e| {
            RemoteFetchError::Network(format!("Failed to read response: {}", e))
        })?;

        if !status.is_success() {
            if let Ok(exception) = serde_json::from_str::<ServiceException>(&body) {
                return Err(exception.into());
            }
            if status == StatusCode::NOT_FOUND {
                return Err(RemoteFetchError::NotFound(url));
            }
            return Err(RemoteFetchError::Http {
                status: status.as_u16(),
                title: status.canonical_reason().unwrap_or("Unknown").to_string(),
                description: format!("HTTP {} for {}: {}", status.as_u16(), url, body),
            });
        }

        let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            RemoteFetchError::Parse(format!("Failed to parse JSON: {}", e))
        })?;

        if value.get("isException").and_then(|v| v.as_bool()) == Some(true) {
            let exception: ServiceException = serde_json::from_value(value)?;
            return Err(exception.into());
        }

        serde_json::from_value(value)
            .map_err(|e| RemoteFetchError::Parse(format!("Unexpected response shape: {}", e)))
    }

    /// Get the client configuration
    pub fn config(&self) -> &DataServiceConfig {
        &self.config
    }

    /// Get the service URL
    pub fn service_url(&self) -> &str {
        &self.config.service_url
    }

    /// Get the token requests are authenticated with
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

// =============================================================================
// Tests
// =============================================================================
