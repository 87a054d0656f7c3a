use crate::api::session::{Session, LANDING_URL};
use crate::api::types::{EpisodeResponse, HomePageResponse, SearchResponse};
use crate::core::{ApiError, HttpClient};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// The aggregator's JSON API plus the session it is called with.
pub struct AniApi {
    http: Arc<dyn HttpClient>,
    base_url: String,
    session: RwLock<Option<Arc<Session>>>,
}

impl AniApi {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self::with_base_url(http, LANDING_URL)
    }

    pub fn with_base_url(http: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: RwLock::new(None),
        }
    }

    pub async fn session(&self) -> Option<Arc<Session>> {
        self.session.read().await.clone()
    }

    pub async fn set_session(&self, session: Session) {
        *self.session.write().await = Some(Arc::new(session));
    }

    pub async fn clear_session(&self) {
        *self.session.write().await = None;
    }

    /// First page of catalog search results.
    pub async fn search(&self, query: &str, page: u32) -> Result<SearchResponse, ApiError> {
        let url = format!(
            "{}/api/data?page={}&animes=1&search={}&tags=&years=",
            self.base_url,
            page,
            urlencoding::encode(query)
        );
        self.get_json(&url).await
    }

    /// Full card for one title.
    pub async fn card_by_id(&self, id: &str) -> Result<EpisodeResponse, ApiError> {
        let url = format!("{}/api/data/anime/{}", self.base_url, urlencoding::encode(id));
        self.get_json(&url).await
    }

    pub async fn home(&self) -> Result<HomePageResponse, ApiError> {
        let url = format!("{}/api/data", self.base_url);
        self.get_json(&url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        // Snapshot, so a concurrent reset cannot mix sessions within one call.
        let session = self.session().await.ok_or(ApiError::NoSession)?;
        let body = self.http.get_text(url, &session.request_headers()).await?;
        debug!("{} returned {} bytes", url, body.len());
        Ok(serde_json::from_str(&body)?)
    }
}
