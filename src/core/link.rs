use serde::{Deserialize, Serialize};
use std::fmt;

/// Playback quality of a resolved stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quality {
    Unknown,
    P360,
    P480,
    P720,
    P1080,
    P2160,
}

impl Quality {
    /// Maps a pixel height to the nearest known bucket at or below it.
    pub fn from_height(height: u32) -> Self {
        match height {
            h if h >= 2160 => Quality::P2160,
            h if h >= 1080 => Quality::P1080,
            h if h >= 720 => Quality::P720,
            h if h >= 480 => Quality::P480,
            h if h >= 360 => Quality::P360,
            _ => Quality::Unknown,
        }
    }

    pub fn height(&self) -> Option<u32> {
        match self {
            Quality::Unknown => None,
            Quality::P360 => Some(360),
            Quality::P480 => Some(480),
            Quality::P720 => Some(720),
            Quality::P1080 => Some(1080),
            Quality::P2160 => Some(2160),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.height() {
            Some(h) => write!(f, "{}p", h),
            None => write!(f, "unknown"),
        }
    }
}

/// A playable stream produced by an extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorLink {
    pub source: String,
    pub url: String,
    pub quality: Quality,
    /// Referer the player has to send when fetching `url`.
    pub referer: Option<String>,
    /// HLS/DASH manifest rather than a progressive file.
    pub is_m3u8: bool,
}

impl ExtractorLink {
    pub fn new(source: impl Into<String>, url: impl Into<String>, quality: Quality) -> Self {
        let url = url.into();
        let is_m3u8 = url.contains(".m3u8");
        Self {
            source: source.into(),
            url,
            quality,
            referer: None,
            is_m3u8,
        }
    }

    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }
}

/// A hoster link scraped from a mirror's server list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderLink {
    pub url: String,
    pub source_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_buckets() {
        assert_eq!(Quality::from_height(1080), Quality::P1080);
        assert_eq!(Quality::from_height(1079), Quality::P720);
        assert_eq!(Quality::from_height(240), Quality::Unknown);
        assert_eq!(Quality::P480.to_string(), "480p");
        assert_eq!(Quality::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_m3u8_detection() {
        let hls = ExtractorLink::new("X", "https://cdn.example/master.m3u8?t=1", Quality::P720);
        assert!(hls.is_m3u8);
        let mp4 = ExtractorLink::new("X", "https://cdn.example/ep1.mp4", Quality::P720)
            .with_referer("https://mirror.example/");
        assert!(!mp4.is_m3u8);
        assert_eq!(mp4.referer.as_deref(), Some("https://mirror.example/"));
    }
}
