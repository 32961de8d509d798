use crate::error::{Error, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
pub const DEFAULT_MAX_REPOS: u32 = 100;
pub const DEFAULT_TOP_REPOS_COUNT: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub api_url: String,
    pub cache_ttl_secs: u64,
    pub max_repos: u32,
    pub top_repos_count: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // The token is optional; without it GitHub allows 60 requests per hour.
        let github_token = env::var("GITHUB_TOKEN")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let api_url = env::var("GITHUB_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let cache_ttl_secs = parse_var("CACHE_TTL_SECONDS", DEFAULT_CACHE_TTL_SECS)?;
        let max_repos = parse_var("MAX_REPOS", DEFAULT_MAX_REPOS)?;
        let top_repos_count = parse_var("TOP_REPOS_COUNT", DEFAULT_TOP_REPOS_COUNT)?;

        Ok(Self {
            github_token,
            api_url,
            cache_ttl_secs,
            max_repos,
            top_repos_count,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            api_url: DEFAULT_API_URL.to_string(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            max_repos: DEFAULT_MAX_REPOS,
            top_repos_count: DEFAULT_TOP_REPOS_COUNT,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{} must be a non-negative integer, got {:?}", name, raw))),
        Err(_) => Ok(default),
    }
}

/// The values the stats core consumes.
#[derive(Debug, Clone)]
pub struct StatsConfig {
    pub cache_ttl: Duration,
    pub max_repos: u32,
    pub top_repos_count: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for StatsConfig {
    fn from(config: &Config) -> Self {
        Self {
            cache_ttl: Duration::from_secs(config.cache_ttl_secs),
            max_repos: config.max_repos,
            top_repos_count: config.top_repos_count,
        }
    }
}
