use crate::core::{
    parallel_map, Extractor, ExtractorLink, ExtractorRegistry, HttpClient, ProviderLink,
    ResolveOptions,
};
use crate::utils::fix_url;
use anyhow::{anyhow, Result};
use scraper::{Html, Selector};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub const PRIMARY_MIRROR: &str = "https://gogo-stream.com";
pub const ALTERNATIVE_MIRROR: &str = "https://streamani.net";

/// Links arriving from an in-flight resolution.
pub struct Resolution {
    pub links: UnboundedReceiver<ExtractorLink>,
    /// Resolves to whether the server list could be fetched and parsed.
    pub done: JoinHandle<bool>,
}

/// Fans an episode id out to the direct extractors and to every hoster
/// listed on the mirror's server page.
pub struct Vidstream {
    http: Arc<dyn HttpClient>,
    registry: Arc<ExtractorRegistry>,
    main_url: String,
}

impl Vidstream {
    pub fn new(http: Arc<dyn HttpClient>, registry: Arc<ExtractorRegistry>, alternative_mirror: bool) -> Self {
        let main_url = if alternative_mirror {
            ALTERNATIVE_MIRROR
        } else {
            PRIMARY_MIRROR
        };
        Self::with_main_url(http, registry, main_url)
    }

    pub fn with_main_url(
        http: Arc<dyn HttpClient>,
        registry: Arc<ExtractorRegistry>,
        main_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            registry,
            main_url: main_url.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        "Vidstream"
    }

    pub fn main_url(&self) -> &str {
        &self.main_url
    }

    pub fn extractor_url(&self, id: &str) -> String {
        format!("{}/streaming.php?id={}", self.main_url, id)
    }

    /// Reads `ul.list-server-items > li.linkserver[data-video]` entries.
    pub fn parse_server_list(html: &str, base: &str) -> Result<Vec<ProviderLink>> {
        let document = Html::parse_document(html);
        let selector = Selector::parse("ul.list-server-items > li.linkserver")
            .map_err(|e| anyhow!("bad selector: {}", e))?;

        Ok(document
            .select(&selector)
            .filter_map(|item| {
                let raw = item.value().attr("data-video")?.trim();
                if raw.is_empty() {
                    return None;
                }
                let name = item.text().collect::<String>().trim().to_string();
                Some(ProviderLink {
                    url: fix_url(raw, base),
                    source_name: (!name.is_empty()).then_some(name),
                })
            })
            .collect())
    }

    /// Sends every link found for `id` into `sink` and reports whether the
    /// server list path succeeded. Extractor failures never affect the result.
    pub async fn resolve(&self, id: &str, options: &ResolveOptions, sink: &UnboundedSender<ExtractorLink>) -> bool {
        let direct = self.registry.active_direct(options);
        let direct_batch = {
            let id = id.to_string();
            let sink = sink.clone();
            tokio::spawn(async move {
                parallel_map(direct, |extractor| {
                    let url = extractor.extractor_url(&id);
                    let sink = sink.clone();
                    async move {
                        if let Some(links) = extractor.get_url(&url, None).await {
                            forward(&sink, links);
                        }
                    }
                })
                .await;
            })
        };

        let outcome = self.resolve_server_list(id, options, sink).await;

        if let Err(e) = direct_batch.await {
            warn!("direct extractor batch aborted: {}", e);
        }

        match outcome {
            Ok(count) => {
                info!("{}: {} hoster links dispatched for {}", self.name(), count, id);
                true
            }
            Err(e) => {
                warn!("{}: server list for {} failed: {:#}", self.name(), id, e);
                false
            }
        }
    }

    /// Runs `resolve` on its own task.
    pub fn spawn(self: &Arc<Self>, id: impl Into<String>, options: ResolveOptions) -> Resolution {
        let (sink, links) = mpsc::unbounded_channel();
        let this = Arc::clone(self);
        let id = id.into();
        let done = tokio::spawn(async move { this.resolve(&id, &options, &sink).await });
        Resolution { links, done }
    }

    async fn resolve_server_list(
        &self,
        id: &str,
        options: &ResolveOptions,
        sink: &UnboundedSender<ExtractorLink>,
    ) -> Result<usize> {
        let page_url = self.extractor_url(id);
        let html = self.http.get_text(&page_url, &[]).await?;
        let links = Self::parse_server_list(&html, &self.main_url)?;
        debug!("{}: {} server entries at {}", self.name(), links.len(), page_url);

        let pairs: Vec<(ProviderLink, Arc<dyn Extractor>)> = links
            .into_iter()
            .flat_map(|link| {
                self.registry
                    .matching(&link.url, options)
                    .into_iter()
                    .map(move |extractor| (link.clone(), extractor))
            })
            .collect();
        let dispatched = pairs.len();

        parallel_map(pairs, |(link, extractor)| {
            let referer = page_url.clone();
            let sink = sink.clone();
            async move {
                debug!("resolving {} with {}", link.url, extractor.name());
                if let Some(links) = extractor.get_url(&link.url, Some(&referer)).await {
                    forward(&sink, links);
                }
            }
        })
        .await;

        Ok(dispatched)
    }
}

fn forward(sink: &UnboundedSender<ExtractorLink>, links: Vec<ExtractorLink>) {
    for link in links {
        if sink.send(link).is_err() {
            debug!("link receiver dropped");
            return;
        }
    }
}
