use crate::core::error::FetchError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Ordered request headers.
pub type Headers = Vec<(String, String)>;

#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
    /// `(name, value)` of every cookie the response set, attributes dropped.
    pub cookies: Vec<(String, String)>,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            cookies: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The GET-only network surface everything else is built on.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse, FetchError>;

    /// GET that treats non-2xx answers as failures.
    async fn get_text(&self, url: &str, headers: &[(String, String)]) -> Result<String, FetchError> {
        let response = self.get(url, headers).await?;
        if !response.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }
        Ok(response.body)
    }
}

pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| FetchError::Network {
                url: String::new(),
                reason: e.to_string(),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse, FetchError> {
        let network = |e: reqwest::Error| FetchError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let mut request = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml,application/json;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.5");
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await.map_err(network)?;
        let status = response.status().as_u16();
        let cookies = response
            .cookies()
            .map(|c| (c.name().to_string(), c.value().to_string()))
            .collect();
        let body = response.text().await.map_err(network)?;

        debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(HttpResponse {
            status,
            body,
            cookies,
        })
    }
}
