use crate::core::{Extractor, ExtractorLink, HttpClient, Quality};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use regex::Regex;
use std::sync::Arc;

pub struct Vidoza {
    http: Arc<dyn HttpClient>,
}

impl Vidoza {
    pub const MAIN_URL: &'static str = "https://vidoza.net";

    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    pub fn parse_sources(html: &str) -> Result<Vec<(String, Quality)>> {
        let re = Regex::new(r#"(?s)sourcesCode:\s*\[(.*?)\]"#)?;
        let block = re
            .captures(html)
            .and_then(|c| c.get(1))
            .ok_or_else(|| anyhow!("Failed to retrieve sources."))?
            .as_str();

        let entry = Regex::new(r#"\{([^}]*)\}"#)?;
        let src_re = Regex::new(r#"src:\s*"([^"]+)""#)?;
        let res_re = Regex::new(r#"res:\s*"?(\d+)"#)?;
        Ok(entry
            .captures_iter(block)
            .filter_map(|c| {
                let body = c.get(1)?.as_str();
                let src = src_re.captures(body)?.get(1)?.as_str().to_string();
                let quality = res_re
                    .captures(body)
                    .and_then(|r| r.get(1))
                    .and_then(|m| m.as_str().parse::<u32>().ok())
                    .map(Quality::from_height)
                    .unwrap_or(Quality::Unknown);
                Some((src, quality))
            })
            .collect())
    }
}

#[async_trait]
impl Extractor for Vidoza {
    fn name(&self) -> &'static str {
        "Vidoza"
    }

    fn main_url(&self) -> &str {
        Self::MAIN_URL
    }

    fn requires_referer(&self) -> bool {
        false
    }

    fn extractor_url(&self, id: &str) -> String {
        format!("{}/embed-{}.html", Self::MAIN_URL, id)
    }

    async fn extract(&self, url: &str, _referer: Option<&str>) -> Result<Vec<ExtractorLink>> {
        let html = self.http.get_text(url, &[]).await?;
        Ok(Self::parse_sources(&html)?
            .into_iter()
            .map(|(src, quality)| ExtractorLink::new(self.name(), src, quality))
            .collect())
    }
}
