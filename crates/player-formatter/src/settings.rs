//! Formatter settings and the player selection form
//!
//! The only persisted setting is the object URI of the player. The settings
//! form offers every enabled player of the account; options are fetched at
//! most once per form render pass.

use crate::collaborators::{AccountContext, ExceptionLogger, MediaSource, Messenger};
use crate::resolver::{PlayerOption, PlayerResolver};
use mpx_client::RemoteFetchError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Title of the player select element
pub const PLAYER_SELECT_TITLE: &str = "mpx Player";

/// Description of the player select element
pub const PLAYER_SELECT_DESCRIPTION: &str = "Select the mpx player to use for playing videos.";

// =============================================================================
// Settings
// =============================================================================

/// Persisted formatter settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatterSettings {
    /// Object URI of the selected player, empty when unset
    #[serde(default)]
    pub player: String,
}

impl FormatterSettings {
    /// Create settings selecting a player
    pub fn new(player: impl Into<String>) -> Self {
        Self {
            player: player.into(),
        }
    }

    /// One-line summaries shown in the display overview
    pub fn summary(&self) -> Vec<String> {
        vec![format!("{}: {}", PLAYER_SELECT_TITLE, self.player)]
    }
}

// =============================================================================
// Options
// =============================================================================

/// Selectable players in service order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerOptions(Vec<PlayerOption>);

impl PlayerOptions {
    /// Number of options
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no options
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Title of the player with the given id
    pub fn get(&self, id: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|option| option.id == id)
            .map(|option| option.title.as_str())
    }

    /// Iterate over `(id, title)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|option| (option.id.as_str(), option.title.as_str()))
    }
}

impl From<Vec<PlayerOption>> for PlayerOptions {
    fn from(options: Vec<PlayerOption>) -> Self {
        Self(options)
    }
}

/// State of one settings form render pass
///
/// Hosts create a fresh pass per form render and pass it to every call made
/// while building that form.
#[derive(Debug, Default)]
pub struct FormRenderPass {
    options: Option<PlayerOptions>,
}

impl FormRenderPass {
    /// Start a new pass
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if player options were already fetched in this pass
    pub fn has_options(&self) -> bool {
        self.options.is_some()
    }
}

/// Select element offered to the form layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSelectElement {
    /// Element title
    pub title: String,
    /// Help text
    pub description: String,
    /// Selectable players
    pub options: PlayerOptions,
    /// Currently configured player
    pub default_value: String,
}

// =============================================================================
// Form Provider
// =============================================================================

/// Supplies player options to the settings form
#[derive(Clone)]
pub struct SettingsFormProvider {
    resolver: PlayerResolver,
    logger: Arc<dyn ExceptionLogger>,
    messenger: Arc<dyn Messenger>,
}

impl SettingsFormProvider {
    /// Create a new provider
    pub fn new(
        resolver: PlayerResolver,
        logger: Arc<dyn ExceptionLogger>,
        messenger: Arc<dyn Messenger>,
    ) -> Self {
        Self {
            resolver,
            logger,
            messenger,
        }
    }

    /// Enabled players for `context`, fetched at most once per pass
    ///
    /// On failure the error is logged, an error message is queued for the
    /// user and empty options are returned.
    pub async fn get_player_options(
        &self,
        context: &AccountContext,
        pass: &mut FormRenderPass,
    ) -> PlayerOptions {
        self.options_or_report(context, pass).await.unwrap_or_default()
    }

    /// Build the player select element
    ///
    /// Returns `None` when the options could not be fetched.
    pub async fn settings_form(
        &self,
        source: &dyn MediaSource,
        settings: &FormatterSettings,
        pass: &mut FormRenderPass,
    ) -> Option<PlayerSelectElement> {
        let options = self.options_or_report(source.account_context(), pass).await?;

        Some(PlayerSelectElement {
            title: PLAYER_SELECT_TITLE.to_string(),
            description: PLAYER_SELECT_DESCRIPTION.to_string(),
            options,
            default_value: settings.player.clone(),
        })
    }

    async fn options_or_report(
        &self,
        context: &AccountContext,
        pass: &mut FormRenderPass,
    ) -> Option<PlayerOptions> {
        if let Some(options) = &pass.options {
            return Some(options.clone());
        }

        match self.resolver.list_enabled_players(context).await {
            Ok(players) => {
                let options = PlayerOptions::from(players);
                pass.options = Some(options.clone());
                Some(options)
            }
            Err(e) => {
                self.report(&e);
                None
            }
        }
    }

    fn report(&self, error: &RemoteFetchError) {
        self.logger.log_exception(error);
        self.messenger.add_error(format!(
            "An unexpected error occurred. The full error has been logged. {}",
            error
        ));
    }
}
