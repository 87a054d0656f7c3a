use crate::core::{Extractor, ExtractorLink, HttpClient, Quality};
use crate::extractors::packer;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use regex::Regex;
use std::sync::Arc;

/// Embed pages hide the player setup in a packed script; the file server
/// checks the referer.
pub struct Mp4Upload {
    http: Arc<dyn HttpClient>,
}

impl Mp4Upload {
    pub const MAIN_URL: &'static str = "https://www.mp4upload.com";

    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    pub fn find_video_url(html: &str) -> Result<String> {
        let script = if packer::is_packed(html) {
            packer::unpack(html)?
        } else {
            html.to_string()
        };

        let patterns = [
            r#"player\.src\(\s*"([^"]+)"\s*\)"#,
            r#"src:\s*"([^"]+\.mp4[^"]*)""#,
        ];
        for pattern in &patterns {
            let re = Regex::new(pattern)?;
            if let Some(m) = re.captures(&script).and_then(|c| c.get(1)) {
                return Ok(m.as_str().to_string());
            }
        }

        Err(anyhow!("no player source in mp4upload page"))
    }
}

#[async_trait]
impl Extractor for Mp4Upload {
    fn name(&self) -> &'static str {
        "Mp4Upload"
    }

    fn main_url(&self) -> &str {
        Self::MAIN_URL
    }

    fn requires_referer(&self) -> bool {
        true
    }

    fn extractor_url(&self, id: &str) -> String {
        format!("{}/embed-{}.html", Self::MAIN_URL, id)
    }

    async fn extract(&self, url: &str, referer: Option<&str>) -> Result<Vec<ExtractorLink>> {
        let headers: Vec<(String, String)> = referer
            .map(|r| vec![("Referer".to_string(), r.to_string())])
            .unwrap_or_default();
        let html = self.http.get_text(url, &headers).await?;
        let video = Self::find_video_url(&html)?;

        Ok(vec![ExtractorLink::new(self.name(), video, Quality::Unknown).with_referer(url)])
    }
}
