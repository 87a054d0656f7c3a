use crate::core::{Extractor, ExtractorLink, HttpClient, Quality};
use crate::utils::origin;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use regex::Regex;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

const TOKEN_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Two-step hoster: the embed page names a `pass_md5` endpoint whose body is
/// the link prefix, which is then completed with a token and expiry.
pub struct DoodStream {
    http: Arc<dyn HttpClient>,
}

impl DoodStream {
    pub const MAIN_URL: &'static str = "https://dood.la";

    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    pub fn find_pass_path(html: &str) -> Option<String> {
        let re = Regex::new(r#"\$\.get\('(/pass_md5/[^']+)'"#).ok()?;
        re.captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Builds the final link from the `pass_md5` body.
    pub fn build_video_url(prefix: &str, pass_path: &str, expiry_ms: u128) -> String {
        let token = pass_path.rsplit('/').next().unwrap_or_default();
        let mut seed = expiry_ms;
        let padding: String = (0..10)
            .map(|_| {
                let ch = TOKEN_CHARS[(seed % TOKEN_CHARS.len() as u128) as usize] as char;
                seed /= 7;
                ch
            })
            .collect();

        format!("{}{}?token={}&expiry={}", prefix.trim(), padding, token, expiry_ms)
    }
}

#[async_trait]
impl Extractor for DoodStream {
    fn name(&self) -> &'static str {
        "DoodStream"
    }

    fn main_url(&self) -> &str {
        Self::MAIN_URL
    }

    fn requires_referer(&self) -> bool {
        true
    }

    fn extractor_url(&self, id: &str) -> String {
        format!("{}/e/{}", Self::MAIN_URL, id)
    }

    async fn extract(&self, url: &str, _referer: Option<&str>) -> Result<Vec<ExtractorLink>> {
        let html = self.http.get_text(url, &[]).await?;
        let pass_path =
            Self::find_pass_path(&html).ok_or_else(|| anyhow!("no pass_md5 endpoint in page"))?;

        let host = origin(url);
        let headers = vec![("Referer".to_string(), url.to_string())];
        let prefix = self
            .http
            .get_text(&format!("{}{}", host, pass_path), &headers)
            .await?;
        if prefix.trim().is_empty() {
            return Ok(Vec::new());
        }

        let expiry = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let video = Self::build_video_url(&prefix, &pass_path, expiry);

        Ok(vec![ExtractorLink::new(self.name(), video, Quality::Unknown).with_referer(format!("{}/", host))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_pass_path() {
        let html = r#"$.get('/pass_md5/123-45-678/abcdef', function(data) {"#;
        assert_eq!(DoodStream::find_pass_path(html).as_deref(), Some("/pass_md5/123-45-678/abcdef"));
        assert!(DoodStream::find_pass_path("<html/>").is_none());
    }

    #[test]
    fn test_build_video_url() {
        let url = DoodStream::build_video_url("https://x.cloud/abc~\n", "/pass_md5/1-2/tok", 1000);
        assert!(url.starts_with("https://x.cloud/abc~"));
        assert!(url.ends_with("?token=tok&expiry=1000"));
        let padding = &url["https://x.cloud/abc~".len()..url.find('?').unwrap()];
        assert_eq!(padding.len(), 10);
    }
}
