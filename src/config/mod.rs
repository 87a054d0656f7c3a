use crate::core::{ConfigError, ResolveOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "ani-resolver.toml";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; rv:68.0) Gecko/20100101 Firefox/68.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub user_agent: String,
    /// Seconds per HTTP request.
    pub timeout: u64,
    /// Use the second Vidstream host.
    pub alternative_mirror: bool,
    /// Provider names to run; empty runs all of them.
    pub active_providers: Vec<String>,
    pub casting: bool,
    /// RON file holding bookmarks and watch progress.
    pub store_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: 30,
            alternative_mirror: false,
            active_providers: Vec::new(),
            casting: false,
            store_path: None,
        }
    }
}

impl Config {
    /// Reads `ani-resolver.toml` from the working directory when present.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::from_path(path)
        } else {
            debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
            Ok(Self::default())
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            active_providers: self.active_providers.iter().cloned().collect(),
            is_casting: self.casting,
        }
    }
}
