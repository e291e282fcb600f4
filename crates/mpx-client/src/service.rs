//! Player Data Service seam
//!
//! Consumers depend on [`PlayerDataService`] rather than on the HTTP client so
//! the transport can be replaced in tests.

use crate::data_service::DataServiceClient;
use crate::query::ObjectListQuery;
use crate::types::{Account, ObjectUri, Player};
use crate::Result;
use async_trait::async_trait;

/// Object type name of players in the Player Data Service
pub const PLAYER_OBJECT_TYPE: &str = "Player";

/// Access to player objects of the mpx Player Data Service
#[async_trait]
pub trait PlayerDataService: Send + Sync {
    /// Load a single player by its object URI
    async fn load_player(&self, uri: &ObjectUri) -> Result<Player>;

    /// Select all players visible to `account`, in service order
    async fn select_players(&self, query: &ObjectListQuery, account: &Account) -> Result<Vec<Player>>;
}

#[async_trait]
impl PlayerDataService for DataServiceClient {
    async fn load_player(&self, uri: &ObjectUri) -> Result<Player> {
        self.load(uri).await
    }

    async fn select_players(&self, query: &ObjectListQuery, account: &Account) -> Result<Vec<Player>> {
        self.select_all::<Player>(PLAYER_OBJECT_TYPE, query, account).await
    }
}
