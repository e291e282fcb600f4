//! Player embed URLs
//!
//! An embed URL plays one media object with one player configuration for one
//! account:
//!
//! `https://player.theplatform.com/p/{account pid}/{player pid}/embed/select/media/{media pid}`

use mpx_client::{Account, Media, Player};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Characters escaped inside a single URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Default base URL of the mpx player service
pub const DEFAULT_PLAYER_BASE_URL: &str = "https://player.theplatform.com/p";

/// Constructed embed URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmbedUrl(String);

impl EmbedUrl {
    /// Get the URL as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmbedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmbedUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmbedUrl> for String {
    fn from(url: EmbedUrl) -> Self {
        url.0
    }
}

/// Options applied to every URL a builder produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedOptions {
    /// Player service base URL
    pub base_url: String,
    /// Start playback automatically
    pub autoplay: Option<bool>,
    /// Continue with the next item of a playlist
    pub play_all: Option<bool>,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PLAYER_BASE_URL.to_string(),
            autoplay: None,
            play_all: None,
        }
    }
}

impl EmbedOptions {
    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the autoplay flag
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = Some(autoplay);
        self
    }

    /// Set the play-all flag
    pub fn with_play_all(mut self, play_all: bool) -> Self {
        self.play_all = Some(play_all);
        self
    }
}

/// Builds embed URLs from an account, a player and a media object
///
/// # Examples
/// ```
/// use mpx_client::{Account, Media, ObjectUri, Player};
/// use player_formatter::EmbedUrlBuilder;
///
/// let account = Account::new(ObjectUri::parse("http://access.auth.theplatform.com/data/Account/1").unwrap(), "acct");
/// let player = Player {
///     id: ObjectUri::parse("http://data.player.theplatform.com/player/data/Player/2").unwrap(),
///     pid: "player".to_string(),
///     title: "Main Player".to_string(),
///     disabled: false,
///     guid: None,
///     description: None,
///     owner_id: None,
/// };
/// let media = Media {
///     id: ObjectUri::parse("http://data.media.theplatform.com/media/data/Media/3").unwrap(),
///     pid: "media".to_string(),
///     title: String::new(),
///     guid: None,
///     owner_id: None,
/// };
///
/// let url = EmbedUrlBuilder::default().build(&account, &player, &media);
/// assert_eq!(url.as_str(), "https://player.theplatform.com/p/acct/player/embed/select/media/media");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmbedUrlBuilder {
    options: EmbedOptions,
}

impl EmbedUrlBuilder {
    /// Create a builder with the given options
    pub fn new(options: EmbedOptions) -> Self {
        Self { options }
    }

    /// Get the builder options
    pub fn options(&self) -> &EmbedOptions {
        &self.options
    }

    /// Build the embed URL for a media object
    pub fn build(&self, account: &Account, player: &Player, media: &Media) -> EmbedUrl {
        let mut url = format!(
            "{}/{}/{}/embed/select/media/{}",
            self.options.base_url.trim_end_matches('/'),
            encode_segment(&account.pid),
            encode_segment(&player.pid),
            encode_segment(&media.pid),
        );

        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(autoplay) = self.options.autoplay {
            query.append_pair("autoPlay", bool_param(autoplay));
        }
        if let Some(play_all) = self.options.play_all {
            query.append_pair("playAll", bool_param(play_all));
        }

        let query = query.finish();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        EmbedUrl(url)
    }
}

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

fn bool_param(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
