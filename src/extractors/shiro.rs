use crate::core::{Extractor, ExtractorLink, HttpClient};
use crate::utils::{fix_url, quality_from_label};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::sync::Arc;
use tracing::debug;

/// Self-hosted player page serving `<video><source>` tags.
pub struct Shiro {
    http: Arc<dyn HttpClient>,
}

impl Shiro {
    pub const MAIN_URL: &'static str = "https://cherry.subsplea.se";

    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    /// `(src, label)` of every `<source>` inside a `<video>`.
    pub fn parse_sources(html: &str) -> Result<Vec<(String, String)>> {
        let document = Html::parse_document(html);
        let selector =
            Selector::parse("video source").map_err(|e| anyhow!("bad selector: {}", e))?;

        Ok(document
            .select(&selector)
            .filter_map(|source| {
                let src = source.value().attr("src")?.trim();
                if src.is_empty() {
                    return None;
                }
                let label = source
                    .value()
                    .attr("size")
                    .or_else(|| source.value().attr("label"))
                    .unwrap_or_default();
                Some((src.to_string(), label.to_string()))
            })
            .collect())
    }
}

#[async_trait]
impl Extractor for Shiro {
    fn name(&self) -> &'static str {
        "Shiro"
    }

    fn main_url(&self) -> &str {
        Self::MAIN_URL
    }

    fn requires_referer(&self) -> bool {
        false
    }

    fn extractor_url(&self, id: &str) -> String {
        format!("{}/vidstreaming/{}", Self::MAIN_URL, id)
    }

    async fn extract(&self, url: &str, _referer: Option<&str>) -> Result<Vec<ExtractorLink>> {
        let html = self.http.get_text(url, &[]).await?;
        let sources = Self::parse_sources(&html)?;
        debug!("Shiro: {} sources at {}", sources.len(), url);

        Ok(sources
            .into_iter()
            .map(|(src, label)| {
                ExtractorLink::new(self.name(), fix_url(&src, Self::MAIN_URL), quality_from_label(&label))
            })
            .collect())
    }
}
