use crate::api::client::AniApi;
use crate::api::types::{BookmarkedTitle, Card, HomePageResponse, LastEpisodeInfo};
use crate::core::parallel_map;
use crate::store::{get_typed, KeyValueStore, BOOKMARK_KEY, VIEW_LST_KEY};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Clone)]
pub enum HomeEvent {
    Fetched(Arc<HomePageResponse>),
    /// `fatal` means the session itself is gone and needs a full re-init.
    Error { fatal: bool },
}

/// What the last failed load needs to recover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    Token,
    Home,
}

/// Last good home page, served from memory until invalidated.
pub struct HomeCache {
    api: Arc<AniApi>,
    store: Arc<dyn KeyValueStore>,
    cached: Mutex<Option<Arc<HomePageResponse>>>,
    full_bookmarks: Arc<Mutex<HashMap<String, Card>>>,
    load_error: Mutex<Option<LoadError>>,
    events: broadcast::Sender<HomeEvent>,
}

impl HomeCache {
    pub fn new(api: Arc<AniApi>, store: Arc<dyn KeyValueStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            api,
            store,
            cached: Mutex::new(None),
            full_bookmarks: Arc::new(Mutex::new(HashMap::new())),
            load_error: Mutex::new(None),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HomeEvent> {
        self.events.subscribe()
    }

    pub fn emit(&self, event: HomeEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    pub async fn load_error(&self) -> Option<LoadError> {
        *self.load_error.lock().await
    }

    pub async fn set_load_error(&self, error: LoadError) {
        *self.load_error.lock().await = Some(error);
    }

    pub async fn cached(&self) -> Option<Arc<HomePageResponse>> {
        self.cached.lock().await.clone()
    }

    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }

    /// Bookmarked titles hydrated to full cards, keyed by anilist id.
    pub async fn full_bookmarks(&self) -> HashMap<String, Card> {
        self.full_bookmarks.lock().await.clone()
    }

    pub async fn clear_bookmarks(&self) {
        self.full_bookmarks.lock().await.clear();
    }

    /// Returns the home page, from memory when allowed and present.
    ///
    /// Without a session this returns `None` immediately. The slot stays
    /// locked for the whole call, so concurrent refreshes run one at a time.
    pub async fn get(&self, can_use_cache: bool, force_favorites_refresh: bool) -> Option<Arc<HomePageResponse>> {
        if self.api.session().await.is_none() {
            return None;
        }

        let mut slot = self.cached.lock().await;
        if can_use_cache {
            if let Some(home) = slot.clone() {
                self.emit(HomeEvent::Fetched(home.clone()));
                if !force_favorites_refresh {
                    return Some(home);
                }
                let mut updated = (*home).clone();
                updated.favorites = self.favorites();
                let updated = Arc::new(updated);
                *slot = Some(updated.clone());
                return Some(updated);
            }
        }

        match self.api.home().await {
            Ok(mut home) => {
                home.favorites = self.favorites();
                home.recently_seen = self.recently_seen();
                let home = Arc::new(home);
                *slot = Some(home.clone());
                *self.load_error.lock().await = None;
                info!(
                    "home page loaded: {} cards, {} favorites",
                    home.anime_data.cards.len(),
                    home.favorites.len()
                );
                self.emit(HomeEvent::Fetched(home.clone()));
                Some(home)
            }
            Err(e) => {
                warn!("home page fetch failed: {}", e);
                *self.load_error.lock().await = Some(LoadError::Home);
                self.emit(HomeEvent::Error { fatal: false });
                None
            }
        }
    }

    /// Bookmarks from the store; full cards are hydrated in the background.
    fn favorites(&self) -> Vec<BookmarkedTitle> {
        self.spawn_hydration();
        self.store
            .list_keys(BOOKMARK_KEY)
            .iter()
            .filter_map(|key| get_typed(self.store.as_ref(), key))
            .collect()
    }

    fn recently_seen(&self) -> Vec<LastEpisodeInfo> {
        self.store
            .list_keys(VIEW_LST_KEY)
            .iter()
            .filter_map(|key| get_typed(self.store.as_ref(), key))
            .collect()
    }

    pub fn spawn_hydration(&self) -> JoinHandle<usize> {
        let api = Arc::clone(&self.api);
        let store = Arc::clone(&self.store);
        let bookmarks = Arc::clone(&self.full_bookmarks);
        tokio::spawn(hydrate_bookmarks(api, store, bookmarks))
    }
}

/// Resolves every bookmark to its card and replaces `target` wholesale.
async fn hydrate_bookmarks(
    api: Arc<AniApi>,
    store: Arc<dyn KeyValueStore>,
    target: Arc<Mutex<HashMap<String, Card>>>,
) -> usize {
    let keys = store.list_keys(BOOKMARK_KEY);
    let cards = parallel_map(keys, |key| {
        let api = Arc::clone(&api);
        let store = Arc::clone(&store);
        async move {
            let bookmark: BookmarkedTitle = get_typed(store.as_ref(), &key)?;
            match api.card_by_id(&bookmark.id).await {
                Ok(response) => Some(response.anime),
                Err(e) => {
                    debug!("bookmark {} not hydrated: {}", bookmark.id, e);
                    None
                }
            }
        }
    })
    .await;

    let mut map = target.lock().await;
    map.clear();
    for card in cards.into_iter().flatten().flatten() {
        map.insert(card.anilist_id.clone(), card);
    }
    map.len()
}
