//! mpx video player field formatter
//!
//! This crate renders the values of a media field as embedded mpx players:
//! it resolves the configured player, builds one embed URL per resolvable
//! value and supplies the player options for the formatter settings form.
//!
//! # Modules
//!
//! - [`collaborators`] - Traits implemented by the hosting framework
//! - [`resolver`] - Player lookup and sorted listing
//! - [`embed_url`] - Embed URL construction
//! - [`renderer`] - Per-value iframe rendering
//! - [`settings`] - Settings, summary and the player select element
//! - [`formatter`] - The formatter tying everything together

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collaborators;
pub mod embed_url;
pub mod formatter;
pub mod renderer;
pub mod resolver;
pub mod settings;

#[cfg(test)]
mod test_support;

pub use collaborators::{
    AccountContext, ExceptionLogger, FieldValue, MediaSource, MessageQueue, Messenger,
    TracingExceptionLogger,
};
pub use embed_url::{EmbedOptions, EmbedUrl, EmbedUrlBuilder};
pub use formatter::PlayerFormatter;
pub use renderer::{FieldRenderer, FragmentKind, RenderFragment, RenderedElements};
pub use resolver::{PlayerOption, PlayerResolver};
pub use settings::{FormRenderPass, FormatterSettings, PlayerOptions, PlayerSelectElement, SettingsFormProvider};
