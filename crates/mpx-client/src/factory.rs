//! Per-user data service clients
//!
//! Each mpx user authenticates with its own token, so clients are created
//! per user and reused while that user's token stays the same.

use crate::data_service::{DataServiceClient, DataServiceConfig};
use crate::service::PlayerDataService;
use crate::types::User;
use crate::Result;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Creates Player Data Service clients authenticated as a given user
pub trait DataServiceFactory: Send + Sync {
    /// Get a client for `user`
    fn for_user(&self, user: &User) -> Result<Arc<dyn PlayerDataService>>;
}

/// Registry caching one HTTP client per username
pub struct ClientRegistry {
    config: DataServiceConfig,
    clients: RwLock<HashMap<String, Arc<DataServiceClient>>>,
}

impl ClientRegistry {
    /// Create a registry building clients from `config`
    pub fn new(config: DataServiceConfig) -> Self {
        Self {
            config,
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// Number of cached clients
    pub fn len(&self) -> usize {
        self.clients.read().len()
    }

    /// Check if no client has been created yet
    pub fn is_empty(&self) -> bool {
        self.clients.read().is_empty()
    }

    /// Drop the cached client of a user, e.g. when the user logs out
    pub fn evict(&self, username: &str) -> bool {
        self.clients.write().remove(username).is_some()
    }
}

impl DataServiceFactory for ClientRegistry {
    fn for_user(&self, user: &User) -> Result<Arc<dyn PlayerDataService>> {
        if let Some(client) = self.clients.read().get(&user.username) {
            if client.token() == Some(user.token.as_str()) {
                return Ok(client.clone());
            }
        }

        let mut clients = self.clients.write();
        let reissued = match clients.get(&user.username) {
            Some(client) if client.token() == Some(user.token.as_str()) => {
                return Ok(client.clone());
            }
            Some(_) => true,
            None => false,
        };

        let client = Arc::new(DataServiceClient::new(self.config.clone())?.with_token(&user.token));
        tracing::debug!(username = %user.username, reissued, "Created data service client");
        clients.insert(user.username.clone(), client.clone());

        Ok(client)
    }
}
