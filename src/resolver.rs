use crate::api::{AniApi, HomeCache, HomeEvent, HomePageResponse, LoadError, ScrapedSessionSource, SearchResponse, SessionSource};
use crate::config::Config;
use crate::core::{ApiError, HttpClient, ReqwestClient, ResolveOptions};
use crate::extractors::{builtin_registry, Resolution, Vidstream};
use crate::store::{FileStore, KeyValueStore, MemoryStore};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Owns the session, the home cache and the stream orchestrator.
pub struct AniResolver {
    api: Arc<AniApi>,
    source: Arc<dyn SessionSource>,
    home: Arc<HomeCache>,
    vidstream: Arc<Vidstream>,
    options: ResolveOptions,
    init_lock: Mutex<()>,
}

impl AniResolver {
    pub fn from_config(config: &Config) -> Result<Self> {
        let http: Arc<dyn HttpClient> = Arc::new(ReqwestClient::new(&config.user_agent, config.timeout())?);
        let store: Arc<dyn KeyValueStore> = match &config.store_path {
            Some(path) => Arc::new(FileStore::open(path)?),
            None => Arc::new(MemoryStore::new()),
        };

        let api = Arc::new(AniApi::new(http.clone()));
        let source = Arc::new(ScrapedSessionSource::new(http.clone(), config.user_agent.clone()));
        let registry = Arc::new(builtin_registry(http.clone()));
        let vidstream = Arc::new(Vidstream::new(http, registry, config.alternative_mirror));

        Ok(Self::new(api, source, store, vidstream, config.resolve_options()))
    }

    pub fn new(
        api: Arc<AniApi>,
        source: Arc<dyn SessionSource>,
        store: Arc<dyn KeyValueStore>,
        vidstream: Arc<Vidstream>,
        options: ResolveOptions,
    ) -> Self {
        let home = Arc::new(HomeCache::new(api.clone(), store));
        Self {
            api,
            source,
            home,
            vidstream,
            options,
            init_lock: Mutex::new(()),
        }
    }

    pub fn api(&self) -> &Arc<AniApi> {
        &self.api
    }

    pub fn home(&self) -> &Arc<HomeCache> {
        &self.home
    }

    /// Establishes a session unless one exists, then loads the home page.
    /// Returns whether a session is available afterwards.
    pub async fn init(&self) -> bool {
        let _guard = self.init_lock.lock().await;
        if self.api.session().await.is_some() {
            return true;
        }

        match self.source.bootstrap().await {
            Ok(session) => {
                self.api.set_session(session).await;
                self.home.get(true, false).await;
                true
            }
            Err(e) => {
                error!("session bootstrap failed: {}", e);
                self.home.set_load_error(LoadError::Token).await;
                self.home.emit(HomeEvent::Error { fatal: true });
                false
            }
        }
    }

    /// Forgets the session and everything loaded with it.
    pub async fn reset_session(&self) {
        let _guard = self.init_lock.lock().await;
        self.api.clear_session().await;
        self.home.invalidate().await;
        self.home.clear_bookmarks().await;
        info!("session reset");
    }

    pub async fn request_home(&self, can_use_cache: bool, force_favorites_refresh: bool) -> Option<Arc<HomePageResponse>> {
        self.home.get(can_use_cache, force_favorites_refresh).await
    }

    pub async fn search(&self, query: &str, page: u32) -> Result<SearchResponse, ApiError> {
        self.api.search(query, page).await
    }

    /// Starts resolving an episode with the configured provider filter.
    pub fn resolve(&self, id: &str) -> Resolution {
        self.resolve_with(id, self.options.clone())
    }

    pub fn resolve_with(&self, id: &str, options: ResolveOptions) -> Resolution {
        self.vidstream.spawn(id, options)
    }
}
