//! End-to-end formatter tests
//!
//! A wiremock server stands in for the Player and Media Data Services; the
//! formatter talks to it through the real HTTP client registry.

use async_trait::async_trait;
use mpx_player_embed::mpx_client::{
    Account, DataServiceClient, DataServiceConfig, Media, ObjectUri, User,
};
use mpx_player_embed::player_formatter::{
    AccountContext, FieldValue, MediaSource, MessageQueue, TracingExceptionLogger,
};
use mpx_player_embed::{ClientRegistry, FormRenderPass, FormatterSettings, PlayerFormatter, RemoteFetchError};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Media source whose field values store media object URIs
struct HttpMediaSource {
    context: AccountContext,
    client: DataServiceClient,
}

impl HttpMediaSource {
    fn new(server: &MockServer) -> Self {
        let account = Account::new(
            ObjectUri::parse("http://access.auth.theplatform.com/data/Account/2700").unwrap(),
            "acctPid",
        );
        let user = User::new("mpx/editor@example.com", "secret");
        let config = DataServiceConfig::new(format!("{}/media/data", server.uri())).with_schema("1.10");
        let client = DataServiceClient::new(config).unwrap().with_token(&user.token);

        Self {
            context: AccountContext::new(account, user),
            client,
        }
    }
}

#[async_trait]
impl MediaSource for HttpMediaSource {
    fn account_context(&self) -> &AccountContext {
        &self.context
    }

    async fn mpx_object(&self, item: &FieldValue) -> Result<Media, RemoteFetchError> {
        let uri = ObjectUri::parse(&item.value)?;
        self.client.load(&uri).await
    }
}

fn formatter_for(server: &MockServer, messages: Arc<MessageQueue>) -> PlayerFormatter {
    let registry = ClientRegistry::new(DataServiceConfig::new(format!("{}/player/data", server.uri())));
    PlayerFormatter::new(Arc::new(registry), Arc::new(TracingExceptionLogger), messages)
}

async fn mount_media(server: &MockServer, id: u32) {
    Mock::given(method("GET"))
        .and(path(format!("/media/data/Media/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": format!("{}/media/data/Media/{}", server.uri(), id),
            "pid": format!("media{}", id),
            "title": format!("Video {}", id)
        })))
        .mount(server)
        .await;
}

// =============================================================================
// Rendering
// =============================================================================

#[tokio::test]
async fn test_render_with_missing_media() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/player/data/Player/1"))
        .and(query_param("token", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": format!("{}/player/data/Player/1", server.uri()),
            "pid": "mainPlayer",
            "title": "Main Player",
            "disabled": false
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_media(&server, 10).await;
    mount_media(&server, 12).await;
    Mock::given(method("GET"))
        .and(path("/media/data/Media/11"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let formatter = formatter_for(&server, Arc::new(MessageQueue::new())).with_settings(
        FormatterSettings::new(format!("{}/player/data/Player/1", server.uri())),
    );
    let source = HttpMediaSource::new(&server);
    let items = FieldValue::from_values((10..13).map(|id| format!("{}/media/data/Media/{}", server.uri(), id)));

    let elements = formatter.view_elements(&source, &items).await;

    let keys: Vec<usize> = elements.keys().copied().collect();
    assert_eq!(keys, vec![0, 2]);
    assert_eq!(
        elements[&0].url.as_str(),
        "https://player.theplatform.com/p/acctPid/mainPlayer/embed/select/media/media10"
    );
    assert_eq!(
        elements[&2].url.as_str(),
        "https://player.theplatform.com/p/acctPid/mainPlayer/embed/select/media/media12"
    );
}

#[tokio::test]
async fn test_render_player_unavailable() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/player/data/Player/1"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    // No media lookups may happen once the player failed
    Mock::given(method("GET"))
        .and(path("/media/data/Media/10"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let formatter = formatter_for(&server, Arc::new(MessageQueue::new())).with_settings(
        FormatterSettings::new(format!("{}/player/data/Player/1", server.uri())),
    );
    let source = HttpMediaSource::new(&server);
    let items = FieldValue::from_values([format!("{}/media/data/Media/10", server.uri())]);

    assert!(formatter.view_elements(&source, &items).await.is_empty());
}

// =============================================================================
// Settings Form
// =============================================================================

#[tokio::test]
async fn test_settings_form_lists_enabled_players_once_per_pass() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/player/data/Player"))
        .and(query_param("sort", "title"))
        .and(query_param("form", "cjson"))
        .and(query_param("schema", "1.6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entryCount": 3,
            "entries": [
                { "id": "http://data.player.theplatform.com/player/data/Player/b", "pid": "b", "title": "Beta", "disabled": false },
                { "id": "http://data.player.theplatform.com/player/data/Player/a", "pid": "a", "title": "Alpha", "disabled": true },
                { "id": "http://data.player.theplatform.com/player/data/Player/c", "pid": "c", "title": "Gamma", "disabled": false }
            ]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let messages = Arc::new(MessageQueue::new());
    let formatter = formatter_for(&server, messages.clone());
    let source = HttpMediaSource::new(&server);

    let mut pass = FormRenderPass::new();
    let element = formatter.settings_form(&source, &mut pass).await.unwrap();
    formatter.settings_form(&source, &mut pass).await.unwrap();

    let pairs: Vec<(&str, &str)> = element.options.iter().collect();
    assert_eq!(
        pairs,
        vec![
            ("http://data.player.theplatform.com/player/data/Player/b", "Beta"),
            ("http://data.player.theplatform.com/player/data/Player/c", "Gamma"),
        ]
    );

    // A new pass fetches again; the mock expects exactly two requests
    formatter.settings_form(&source, &mut FormRenderPass::new()).await.unwrap();
    assert!(messages.is_empty());
}

#[tokio::test]
async fn test_settings_form_failure_shows_message() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/player/data/Player"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isException": true,
            "responseCode": 401,
            "title": "InvalidTokenException",
            "description": "Invalid security token."
        })))
        .mount(&server)
        .await;

    let messages = Arc::new(MessageQueue::new());
    let formatter = formatter_for(&server, messages.clone());
    let source = HttpMediaSource::new(&server);

    let element = formatter.settings_form(&source, &mut FormRenderPass::new()).await;

    assert!(element.is_none());
    let drained = messages.drain();
    assert_eq!(drained.len(), 1);
    assert!(drained[0].starts_with("An unexpected error occurred."));
    assert!(drained[0].contains("Invalid security token."));
}
