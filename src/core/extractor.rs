use crate::core::ExtractorLink;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Turns one hoster's links into playable streams.
#[async_trait]
pub trait Extractor: Send + Sync {
    fn name(&self) -> &'static str;

    /// Prefix every link this extractor understands starts with.
    fn main_url(&self) -> &str;

    /// Whether the produced streams only play with a referer attached.
    fn requires_referer(&self) -> bool;

    /// Canonical page for an episode id on this hoster.
    fn extractor_url(&self, id: &str) -> String;

    async fn extract(&self, url: &str, referer: Option<&str>) -> Result<Vec<ExtractorLink>>;

    /// `extract` with failures absorbed: errors and empty results are `None`.
    async fn get_url(&self, url: &str, referer: Option<&str>) -> Option<Vec<ExtractorLink>> {
        match self.extract(url, referer).await {
            Ok(links) if links.is_empty() => {
                debug!("{} found no streams at {}", self.name(), url);
                None
            }
            Ok(links) => Some(links),
            Err(e) => {
                warn!("{} failed on {}: {:#}", self.name(), url, e);
                None
            }
        }
    }
}

/// Per-request filter applied before any extractor runs.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Empty means every provider is enabled.
    pub active_providers: HashSet<String>,
    /// Cast receivers cannot send a referer header.
    pub is_casting: bool,
}

impl ResolveOptions {
    pub fn is_active(&self, extractor: &dyn Extractor) -> bool {
        self.active_providers.is_empty() || self.active_providers.contains(extractor.name())
    }

    pub fn allows(&self, extractor: &dyn Extractor) -> bool {
        self.is_active(extractor) && !(self.is_casting && extractor.requires_referer())
    }
}

/// The fixed set of known extractors.
#[derive(Clone, Default)]
pub struct ExtractorRegistry {
    direct: Vec<Arc<dyn Extractor>>,
    linked: Vec<Arc<dyn Extractor>>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extractors that only need an episode id.
    pub fn register_direct(&mut self, extractor: Arc<dyn Extractor>) {
        self.direct.push(extractor);
    }

    /// Extractors that run against scraped hoster links.
    pub fn register_linked(&mut self, extractor: Arc<dyn Extractor>) {
        self.linked.push(extractor);
    }

    pub fn active_direct(&self, options: &ResolveOptions) -> Vec<Arc<dyn Extractor>> {
        self.direct
            .iter()
            .filter(|&e| options.is_active(e.as_ref()))
            .cloned()
            .collect()
    }

    /// Every permitted linked extractor whose `main_url` prefixes `link`.
    /// Several may match; all of them are returned.
    pub fn matching(&self, link: &str, options: &ResolveOptions) -> Vec<Arc<dyn Extractor>> {
        self.linked
            .iter()
            .filter(|&e| options.allows(e.as_ref()))
            .filter(|e| link.starts_with(e.main_url()))
            .cloned()
            .collect()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.direct.iter().chain(&self.linked).map(|e| e.name()).collect()
    }
}
