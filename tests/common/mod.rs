#![allow(dead_code)]

use ani_resolver::core::{Extractor, ExtractorLink, FetchError, HttpClient, HttpResponse, Quality};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Clone)]
pub enum Route {
    Respond(HttpResponse),
    Fail,
}

/// In-memory HTTP: answers from a route table and records every request.
#[derive(Default)]
pub struct FakeHttp {
    routes: Mutex<HashMap<String, Route>>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl FakeHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self, url: &str, body: &str) {
        self.set(url, Route::Respond(HttpResponse::ok(body)));
    }

    pub fn route_response(&self, url: &str, response: HttpResponse) {
        self.set(url, Route::Respond(response));
    }

    pub fn fail(&self, url: &str) {
        self.set(url, Route::Fail);
    }

    fn set(&self, url: &str, route: Route) {
        self.routes.lock().unwrap().insert(url.to_string(), route);
    }

    pub fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, url: &str) -> usize {
        self.calls().iter().filter(|(u, _)| u == url).count()
    }
}

#[async_trait]
impl HttpClient for FakeHttp {
    async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse, FetchError> {
        self.calls.lock().unwrap().push((url.to_string(), headers.to_vec()));
        let route = self.routes.lock().unwrap().get(url).cloned();
        match route {
            Some(Route::Respond(response)) => Ok(response),
            Some(Route::Fail) | None => Err(FetchError::Network {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            }),
        }
    }
}

/// Extractor that returns canned links and counts its invocations.
pub struct FakeExtractor {
    pub name: &'static str,
    pub main_url: &'static str,
    pub requires_referer: bool,
    pub links: Vec<&'static str>,
    pub delay: Duration,
    pub calls: AtomicUsize,
    pub referers: Mutex<Vec<Option<String>>>,
}

impl FakeExtractor {
    pub fn new(name: &'static str, main_url: &'static str) -> Self {
        Self {
            name,
            main_url,
            requires_referer: false,
            links: vec!["https://cdn.example/video.mp4"],
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            referers: Mutex::new(Vec::new()),
        }
    }

    pub fn needing_referer(mut self) -> Self {
        self.requires_referer = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing(mut self) -> Self {
        self.links = Vec::new();
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Extractor for FakeExtractor {
    fn name(&self) -> &'static str {
        self.name
    }

    fn main_url(&self) -> &str {
        self.main_url
    }

    fn requires_referer(&self) -> bool {
        self.requires_referer
    }

    fn extractor_url(&self, id: &str) -> String {
        format!("{}/v/{}", self.main_url, id)
    }

    async fn extract(&self, _url: &str, referer: Option<&str>) -> anyhow::Result<Vec<ExtractorLink>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.referers.lock().unwrap().push(referer.map(str::to_string));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.links.is_empty() {
            anyhow::bail!("{} is down", self.name);
        }
        Ok(self
            .links
            .iter()
            .map(|url| ExtractorLink::new(self.name, *url, Quality::P720))
            .collect())
    }
}
