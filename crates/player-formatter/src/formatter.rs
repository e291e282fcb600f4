//! The mpx video player field formatter
//!
//! Ties the renderer and the settings form together behind the operations a
//! content framework calls on a field formatter.

use crate::collaborators::{ExceptionLogger, FieldValue, MediaSource, Messenger};
use crate::embed_url::EmbedUrlBuilder;
use crate::renderer::{FieldRenderer, RenderedElements};
use crate::resolver::PlayerResolver;
use crate::settings::{FormRenderPass, FormatterSettings, PlayerSelectElement, SettingsFormProvider};
use mpx_client::DataServiceFactory;
use std::sync::Arc;

/// Formatter id registered with the content framework
pub const FORMATTER_ID: &str = "media_mpx_video";

/// Human-readable formatter label
pub const FORMATTER_LABEL: &str = "mpx Video player";

/// Renders string fields of mpx media as embedded players
///
/// # Example
///
/// ```rust,no_run
/// use mpx_client::{ClientRegistry, DataServiceConfig};
/// use player_formatter::{FormatterSettings, MessageQueue, PlayerFormatter, TracingExceptionLogger};
/// use std::sync::Arc;
///
/// let formatter = PlayerFormatter::new(
///     Arc::new(ClientRegistry::new(DataServiceConfig::default())),
///     Arc::new(TracingExceptionLogger),
///     Arc::new(MessageQueue::new()),
/// )
/// .with_settings(FormatterSettings::new(
///     "http://data.player.theplatform.com/player/data/Player/1",
/// ));
///
/// assert_eq!(formatter.settings_summary().len(), 1);
/// ```
#[derive(Clone)]
pub struct PlayerFormatter {
    settings: FormatterSettings,
    renderer: FieldRenderer,
    form: SettingsFormProvider,
}

impl PlayerFormatter {
    /// Create a formatter with default settings and embed options
    pub fn new(
        factory: Arc<dyn DataServiceFactory>,
        logger: Arc<dyn ExceptionLogger>,
        messenger: Arc<dyn Messenger>,
    ) -> Self {
        Self::with_url_builder(factory, logger, messenger, EmbedUrlBuilder::default())
    }

    /// Create a formatter with a custom embed URL builder
    pub fn with_url_builder(
        factory: Arc<dyn DataServiceFactory>,
        logger: Arc<dyn ExceptionLogger>,
        messenger: Arc<dyn Messenger>,
        url_builder: EmbedUrlBuilder,
    ) -> Self {
        let resolver = PlayerResolver::new(factory);

        Self {
            settings: Self::default_settings(),
            renderer: FieldRenderer::new(resolver.clone(), url_builder, logger.clone()),
            form: SettingsFormProvider::new(resolver, logger, messenger),
        }
    }

    /// Replace the settings
    pub fn with_settings(mut self, settings: FormatterSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Settings a new formatter starts with
    pub fn default_settings() -> FormatterSettings {
        FormatterSettings::default()
    }

    /// Current settings
    pub fn settings(&self) -> &FormatterSettings {
        &self.settings
    }

    /// Update the settings, e.g. after the settings form was submitted
    pub fn set_settings(&mut self, settings: FormatterSettings) {
        self.settings = settings;
    }

    /// Render the values of a field
    pub async fn view_elements(&self, source: &dyn MediaSource, items: &[FieldValue]) -> RenderedElements {
        self.renderer.view_elements(source, items, &self.settings).await
    }

    /// Build the settings form for the media type's source
    pub async fn settings_form(
        &self,
        source: &dyn MediaSource,
        pass: &mut FormRenderPass,
    ) -> Option<PlayerSelectElement> {
        self.form.settings_form(source, &self.settings, pass).await
    }

    /// Summary of the current settings
    pub fn settings_summary(&self) -> Vec<String> {
        self.settings.summary()
    }
}
