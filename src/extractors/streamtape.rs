use crate::core::{Extractor, ExtractorLink, HttpClient, Quality};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use regex::Regex;
use std::sync::Arc;

pub struct StreamTape {
    http: Arc<dyn HttpClient>,
}

impl StreamTape {
    pub const MAIN_URL: &'static str = "https://streamtape.com";

    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    /// The page assembles the video link from two string halves in a script.
    pub fn find_video_url(html: &str) -> Result<String> {
        let re = Regex::new(
            r#"document\.getElementById\('[^']*'\)\.innerHTML\s*=\s*["']([^"']*)["']\s*\+\s*\(?\s*'([^']*)'"#,
        )?;
        let captures = re
            .captures(html)
            .ok_or_else(|| anyhow!("Unable to extract video url"))?;

        let head = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        let tail = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
        let joined = format!("{}{}", head, tail);

        match joined.strip_prefix("//") {
            Some(rest) => Ok(format!("https://{}", rest)),
            None => Ok(joined),
        }
    }
}

#[async_trait]
impl Extractor for StreamTape {
    fn name(&self) -> &'static str {
        "StreamTape"
    }

    fn main_url(&self) -> &str {
        Self::MAIN_URL
    }

    fn requires_referer(&self) -> bool {
        false
    }

    fn extractor_url(&self, id: &str) -> String {
        format!("{}/e/{}", Self::MAIN_URL, id)
    }

    async fn extract(&self, url: &str, _referer: Option<&str>) -> Result<Vec<ExtractorLink>> {
        let html = self.http.get_text(url, &[]).await?;
        let video = Self::find_video_url(&html)?;
        Ok(vec![ExtractorLink::new(self.name(), video, Quality::Unknown)])
    }
}
