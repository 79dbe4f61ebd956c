//! Startup configuration.
//!
//! Everything the pipeline needs is collected into [`GitfolioConfig`] once,
//! before any work starts. A missing account fails here rather than on the
//! first fetch.

use crate::cache::DEFAULT_TTL;
use crate::error::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct GitfolioConfig {
    pub(crate) account: String,
    pub(crate) token: Option<String>,
    pub(crate) api_url: String,
    pub(crate) user_agent: String,
    pub(crate) cache_path: PathBuf,
    pub(crate) cache_ttl: Duration,
    pub(crate) timeout: Option<Duration>,
}

impl GitfolioConfig {
    /// Build a configuration for `account`.
    ///
    /// Fails with [`Error::MissingConfiguration`] when no account is given or
    /// it is blank.
    pub fn new(account: Option<String>) -> Result<Self> {
        let account = account
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .ok_or_else(|| {
                Error::MissingConfiguration(
                    "GITHUB_USERNAME is not set. Pass --account or add GITHUB_USERNAME to your environment or .env file."
                        .to_string(),
                )
            })?;

        Ok(Self {
            account,
            token: None,
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: concat!("gitfolio/", env!("CARGO_PKG_VERSION")).to_string(),
            cache_path: Self::default_cache_path(),
            cache_ttl: DEFAULT_TTL,
            timeout: Some(DEFAULT_TIMEOUT),
        })
    }

    /// Set an optional access token. Blank tokens are ignored.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = path.into();
        self
    }

    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Set the overall fetch deadline. `None` waits forever.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn cache_path(&self) -> &PathBuf {
        &self.cache_path
    }

    pub fn default_cache_path() -> PathBuf {
        let base = std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".cache"))
            .unwrap_or_else(std::env::temp_dir);
        base.join("gitfolio").join("projects.json")
    }
}
