//! Field rendering
//!
//! Turns the values of a media field into embed iframes, one per value whose
//! media object resolves. Fragments are keyed by delta so a failed value never
//! shifts the ones after it.

use crate::collaborators::{ExceptionLogger, FieldValue, MediaSource};
use crate::embed_url::{EmbedUrl, EmbedUrlBuilder};
use crate::resolver::PlayerResolver;
use crate::settings::FormatterSettings;
use mpx_client::Player;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Kind of render fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FragmentKind {
    /// Iframe loading an embed URL
    EmbedIframe,
}

impl FragmentKind {
    /// Get the kind as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            FragmentKind::EmbedIframe => "embed-iframe",
        }
    }
}

/// Render fragment for one field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderFragment {
    /// Fragment kind
    #[serde(rename = "type")]
    pub kind: FragmentKind,
    /// Embed URL loaded by the iframe
    pub url: EmbedUrl,
}

impl RenderFragment {
    /// Create an iframe fragment
    pub fn embed_iframe(url: EmbedUrl) -> Self {
        Self {
            kind: FragmentKind::EmbedIframe,
            url,
        }
    }
}

/// Fragments keyed by field delta, the position of the value in the field
pub type RenderedElements = BTreeMap<usize, RenderFragment>;

/// Renders field values as player iframes
#[derive(Clone)]
pub struct FieldRenderer {
    resolver: PlayerResolver,
    url_builder: EmbedUrlBuilder,
    logger: Arc<dyn ExceptionLogger>,
}

impl FieldRenderer {
    /// Create a new renderer
    pub fn new(
        resolver: PlayerResolver,
        url_builder: EmbedUrlBuilder,
        logger: Arc<dyn ExceptionLogger>,
    ) -> Self {
        Self {
            resolver,
            url_builder,
            logger,
        }
    }

    /// Render all values with the player configured in `settings`
    ///
    /// If the player cannot be loaded nothing is rendered and no value is
    /// looked up; the failure is logged once.
    pub async fn view_elements(
        &self,
        source: &dyn MediaSource,
        items: &[FieldValue],
        settings: &FormatterSettings,
    ) -> RenderedElements {
        let player = match self
            .resolver
            .load_player(source.account_context(), &settings.player)
            .await
        {
            Ok(player) => player,
            Err(e) => {
                self.logger.log_exception(&e);
                return RenderedElements::new();
            }
        };

        self.render(source, items, &player).await
    }

    /// Render each value with an already loaded player
    ///
    /// Values whose media object fails to resolve are logged and skipped.
    pub async fn render(
        &self,
        source: &dyn MediaSource,
        items: &[FieldValue],
        player: &Player,
    ) -> RenderedElements {
        let account = source.account_context().account();
        let mut elements = RenderedElements::new();

        for (delta, item) in items.iter().enumerate() {
            let media = match source.mpx_object(item).await {
                Ok(media) => media,
                Err(e) => {
                    self.logger.log_exception(&e);
                    tracing::debug!(delta, "Skipping field value without media");
                    continue;
                }
            };

            let url = self.url_builder.build(account, player, &media);
            elements.insert(delta, RenderFragment::embed_iframe(url));
        }

        elements
    }
}
