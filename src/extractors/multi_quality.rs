use crate::core::{Extractor, ExtractorLink, HttpClient};
use crate::utils::{fix_url, quality_from_label};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::sync::Arc;

/// The mirror's download page, which lists one file per quality.
pub struct MultiQuality {
    http: Arc<dyn HttpClient>,
}

impl MultiQuality {
    pub const MAIN_URL: &'static str = "https://gogo-play.net";

    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    pub fn parse_downloads(html: &str) -> Result<Vec<(String, String)>> {
        let document = Html::parse_document(html);
        let selector = Selector::parse("div.dowload > a[href]")
            .map_err(|e| anyhow!("bad selector: {}", e))?;

        Ok(document
            .select(&selector)
            .filter_map(|a| {
                let href = a.value().attr("href")?.trim().to_string();
                let label = a.text().collect::<Vec<_>>().join(" ");
                Some((href, label))
            })
            // Other entries point to external hosters, not files.
            .filter(|(_, label)| label.to_lowercase().contains("mp4"))
            .collect())
    }
}

#[async_trait]
impl Extractor for MultiQuality {
    fn name(&self) -> &'static str {
        "MultiQuality"
    }

    fn main_url(&self) -> &str {
        Self::MAIN_URL
    }

    fn requires_referer(&self) -> bool {
        false
    }

    fn extractor_url(&self, id: &str) -> String {
        format!("{}/download?id={}", Self::MAIN_URL, id)
    }

    async fn extract(&self, url: &str, _referer: Option<&str>) -> Result<Vec<ExtractorLink>> {
        let html = self.http.get_text(url, &[]).await?;

        Ok(Self::parse_downloads(&html)?
            .into_iter()
            .map(|(href, label)| {
                ExtractorLink::new(self.name(), fix_url(&href, Self::MAIN_URL), quality_from_label(&label))
            })
            .collect())
    }
}
