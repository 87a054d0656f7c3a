use crate::core::{HttpClient, SessionError};
use async_trait::async_trait;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, info};

pub const LANDING_URL: &str = "https://fastani.net";

/// Auth header pair plus the cookies handed out with the landing page.
/// Only ever built complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    headers: Vec<(String, String)>,
    cookies: Vec<(String, String)>,
}

impl Session {
    pub fn new(headers: Vec<(String, String)>, cookies: Vec<(String, String)>) -> Self {
        Self { headers, cookies }
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn cookies(&self) -> &[(String, String)] {
        &self.cookies
    }

    pub fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{}={};", name, value))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Headers for a data API call: auth pair, user agent, then `Cookie`.
    pub fn request_headers(&self) -> Vec<(String, String)> {
        let mut headers = self.headers.clone();
        if !self.cookies.is_empty() {
            headers.push(("Cookie".to_string(), self.cookie_header()));
        }
        headers
    }
}

/// Anything able to produce a fresh session.
#[async_trait]
pub trait SessionSource: Send + Sync {
    async fn bootstrap(&self) -> Result<Session, SessionError>;
}

/// Derives the session by scraping the landing page and its main bundle.
pub struct ScrapedSessionSource {
    http: Arc<dyn HttpClient>,
    landing_url: String,
    user_agent: String,
}

impl ScrapedSessionSource {
    pub fn new(http: Arc<dyn HttpClient>, user_agent: impl Into<String>) -> Self {
        Self::with_landing_url(http, user_agent, LANDING_URL)
    }

    pub fn with_landing_url(
        http: Arc<dyn HttpClient>,
        user_agent: impl Into<String>,
        landing_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            landing_url: landing_url.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Path of the main script bundle referenced by the landing page.
    pub fn find_bundle_path(html: &str) -> Option<String> {
        let re = Regex::new(r#"src="(/static/js/main.*?)""#).ok()?;
        re.captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// `(header name, token)` baked into the bundle's GET request setup.
    pub fn find_token(js: &str) -> Option<(String, String)> {
        let re = Regex::new(r#"method:"GET".*?"(.*?)".*?"(.*?)""#).ok()?;
        let captures = re.captures(js)?;
        let name = captures.get(1)?.as_str();
        let token = captures.get(2)?.as_str();
        if name.is_empty() {
            return None;
        }
        Some((name.to_string(), token.to_string()))
    }

    fn user_agent_header(&self) -> Vec<(String, String)> {
        vec![("User-Agent".to_string(), self.user_agent.clone())]
    }
}

#[async_trait]
impl SessionSource for ScrapedSessionSource {
    async fn bootstrap(&self) -> Result<Session, SessionError> {
        let headers = self.user_agent_header();

        let landing = self
            .http
            .get(&self.landing_url, &headers)
            .await
            .map_err(SessionError::Landing)?;

        let bundle_path = Self::find_bundle_path(&landing.body).ok_or(SessionError::BundleNotFound)?;
        let bundle_url = format!("{}{}", self.landing_url.trim_end_matches('/'), bundle_path);
        debug!("session bundle at {}", bundle_url);

        let bundle = self
            .http
            .get_text(&bundle_url, &headers)
            .await
            .map_err(SessionError::Bundle)?;
        let (name, token) = Self::find_token(&bundle).ok_or(SessionError::TokenNotFound)?;

        info!("session established with auth header {}", name);
        Ok(Session::new(
            vec![(name, token), ("User-Agent".to_string(), self.user_agent.clone())],
            landing.cookies,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_bundle_path() {
        let html = r#"<script src="/static/js/2.abc.chunk.js"></script><script src="/static/js/main.9f1e.chunk.js"></script>"#;
        assert_eq!(
            ScrapedSessionSource::find_bundle_path(html).as_deref(),
            Some("/static/js/main.9f1e.chunk.js")
        );
        assert!(ScrapedSessionSource::find_bundle_path("<html></html>").is_none());
    }

    #[test]
    fn test_find_token() {
        let js = r#"fetch(e,{method:"GET",headers:{"x-access-key":"d0c2a9"}}).then(r=>r.json())"#;
        assert_eq!(
            ScrapedSessionSource::find_token(js),
            Some(("x-access-key".to_string(), "d0c2a9".to_string()))
        );
        assert!(ScrapedSessionSource::find_token(r#"method:"POST""#).is_none());
    }

    #[test]
    fn test_session_headers() {
        let session = Session::new(
            vec![("x-key".into(), "t".into()), ("User-Agent".into(), "ua".into())],
            vec![("sid".into(), "abc".into()), ("lang".into(), "en".into())],
        );
        assert_eq!(session.cookie_header(), "sid=abc; lang=en;");
        assert_eq!(
            session.request_headers(),
            vec![
                ("x-key".to_string(), "t".to_string()),
                ("User-Agent".to_string(), "ua".to_string()),
                ("Cookie".to_string(), "sid=abc; lang=en;".to_string()),
            ]
        );
    }
}
