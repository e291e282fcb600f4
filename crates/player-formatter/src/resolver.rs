//! Player lookup and listing
//!
//! Wraps the Player Data Service for the formatter: one-off loads of the
//! configured player and the sorted list of players a user may pick.

use crate::collaborators::AccountContext;
use mpx_client::{DataServiceFactory, ObjectListQuery, ObjectUri, Player, RemoteFetchError, Sort};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Field the service sorts player listings by
pub const PLAYER_SORT_FIELD: &str = "title";

/// Selectable player, as `(id, title)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerOption {
    /// Player object URI
    pub id: String,
    /// Display title
    pub title: String,
}

impl From<&Player> for PlayerOption {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.to_string(),
            title: player.title.clone(),
        }
    }
}

/// Resolves players through per-user data service clients
#[derive(Clone)]
pub struct PlayerResolver {
    factory: Arc<dyn DataServiceFactory>,
}

impl PlayerResolver {
    /// Create a new resolver
    pub fn new(factory: Arc<dyn DataServiceFactory>) -> Self {
        Self { factory }
    }

    /// Load a single player by its object URI
    ///
    /// An empty or malformed `player_uri` fails with
    /// [`RemoteFetchError::InvalidUri`] before any request is made.
    pub async fn load_player(
        &self,
        context: &AccountContext,
        player_uri: &str,
    ) -> Result<Player, RemoteFetchError> {
        let uri = ObjectUri::parse(player_uri)?;
        let service = self.factory.for_user(context.user())?;

        service.load_player(&uri).await
    }

    /// List enabled players, sorted by title on the service side
    ///
    /// Disabled players are dropped; the remaining entries keep exactly the
    /// order the service returned.
    pub async fn list_enabled_players(
        &self,
        context: &AccountContext,
    ) -> Result<Vec<PlayerOption>, RemoteFetchError> {
        let service = self.factory.for_user(context.user())?;
        let query = ObjectListQuery::new().with_sort(Sort::new().add_sort(PLAYER_SORT_FIELD));

        let players = service.select_players(&query, context.account()).await?;
        tracing::debug!(count = players.len(), "Fetched mpx players");

        Ok(players
            .iter()
            .filter(|player| !player.disabled)
            .map(PlayerOption::from)
            .collect())
    }
}
