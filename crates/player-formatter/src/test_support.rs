//! Fixtures and fake collaborators for unit tests

use crate::collaborators::{AccountContext, FieldValue, MediaSource};
use async_trait::async_trait;
use mpx_client::{
    Account, DataServiceFactory, Media, ObjectListQuery, ObjectUri, Player, PlayerDataService,
    RemoteFetchError, User,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const PLAYER_BASE: &str = "http://data.player.theplatform.com/player/data/Player";

pub fn account_context() -> AccountContext {
    let account = Account::new(
        ObjectUri::parse("http://access.auth.theplatform.com/data/Account/2700").unwrap(),
        "acctPid",
    );
    AccountContext::new(account, User::new("mpx/editor@example.com", "token"))
}

pub fn player(id: &str, title: &str, disabled: bool) -> Player {
    Player {
        id: ObjectUri::parse(&format!("{}/{}", PLAYER_BASE, id)).unwrap(),
        pid: format!("pid-{}", id),
        title: title.to_string(),
        disabled,
        guid: None,
        description: None,
        owner_id: None,
    }
}

pub fn media(pid: &str) -> Media {
    Media {
        id: ObjectUri::parse(&format!("http://data.media.theplatform.com/media/data/Media/{}", pid))
            .unwrap(),
        pid: pid.to_string(),
        title: format!("Video {}", pid),
        guid: None,
        owner_id: None,
    }
}

/// Player service answering from a fixed list
pub struct FakePlayerService {
    players: Vec<Player>,
    failure: Option<RemoteFetchError>,
    load_calls: AtomicUsize,
    select_calls: AtomicUsize,
    last_query: Mutex<Option<ObjectListQuery>>,
}

impl FakePlayerService {
    pub fn with_players(players: Vec<Player>) -> Self {
        Self {
            players,
            failure: None,
            load_calls: AtomicUsize::new(0),
            select_calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    pub fn failing(error: RemoteFetchError) -> Self {
        Self {
            failure: Some(error),
            ..Self::with_players(Vec::new())
        }
    }

    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    pub fn select_calls(&self) -> usize {
        self.select_calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<ObjectListQuery> {
        self.last_query.lock().clone()
    }
}

#[async_trait]
impl PlayerDataService for FakePlayerService {
    async fn load_player(&self, uri: &ObjectUri) -> mpx_client::Result<Player> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.players
            .iter()
            .find(|player| &player.id == uri)
            .cloned()
            .ok_or_else(|| RemoteFetchError::NotFound(uri.to_string()))
    }

    async fn select_players(
        &self,
        query: &ObjectListQuery,
        _account: &Account,
    ) -> mpx_client::Result<Vec<Player>> {
        self.select_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock() = Some(query.clone());
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self.players.clone())
    }
}

/// Factory handing out the same fake service for every user
pub struct FakeFactory {
    service: Arc<FakePlayerService>,
}

impl FakeFactory {
    pub fn new(service: Arc<FakePlayerService>) -> Self {
        Self { service }
    }
}

impl DataServiceFactory for FakeFactory {
    fn for_user(&self, _user: &User) -> mpx_client::Result<Arc<dyn PlayerDataService>> {
        Ok(self.service.clone())
    }
}

/// Media source resolving field values by their stored value
pub struct FakeMediaSource {
    context: AccountContext,
    media: HashMap<String, Result<Media, RemoteFetchError>>,
    lookups: AtomicUsize,
}

impl FakeMediaSource {
    pub fn new() -> Self {
        Self {
            context: account_context(),
            media: HashMap::new(),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn with_media(mut self, value: &str, media: Media) -> Self {
        self.media.insert(value.to_string(), Ok(media));
        self
    }

    pub fn with_failure(mut self, value: &str, error: RemoteFetchError) -> Self {
        self.media.insert(value.to_string(), Err(error));
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaSource for FakeMediaSource {
    fn account_context(&self) -> &AccountContext {
        &self.context
    }

    async fn mpx_object(&self, item: &FieldValue) -> Result<Media, RemoteFetchError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.media
            .get(&item.value)
            .cloned()
            .unwrap_or_else(|| Err(RemoteFetchError::NotFound(item.value.clone())))
    }
}
