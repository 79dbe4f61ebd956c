//! GitHub REST client and the paginated repository fetch.

use crate::config::GitfolioConfig;
use crate::error::FetchError;
use crate::types::GitHubRepo;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::StatusCode;
use std::time::{Duration, Instant};
use tracing::debug;

/// GitHub's maximum page size.
pub const PER_PAGE: usize = 100;

const ACCEPT_V3: &str = "application/vnd.github.v3+json";

/// Something that can serve one page of an account's repositories.
pub trait RepoSource {
    /// Fetch page `page` (1-based). `timeout` bounds this single request.
    fn fetch_page(
        &self,
        account: &str,
        page: u32,
        per_page: usize,
        timeout: Option<Duration>,
    ) -> Result<Vec<GitHubRepo>, FetchError>;
}

/// Pull every repository of `account`, one page at a time.
///
/// Stops on an empty page or a short page. The first error aborts the fetch
/// and nothing collected so far is returned.
pub fn fetch_all<S: RepoSource + ?Sized>(
    source: &S,
    account: &str,
    deadline: Option<Instant>,
) -> Result<Vec<GitHubRepo>, FetchError> {
    let mut repos = Vec::new();
    let mut page = 1u32;

    loop {
        let timeout = match deadline {
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    return Err(FetchError::TimedOut);
                }
                Some(remaining)
            }
            None => None,
        };

        let items = source.fetch_page(account, page, PER_PAGE, timeout)?;
        debug!(account, page, count = items.len(), "Fetched repository page");

        if items.is_empty() {
            break;
        }

        let short_page = items.len() < PER_PAGE;
        repos.extend(items);
        if short_page {
            break;
        }
        page += 1;
    }

    Ok(repos)
}

/// Map a non-success status to the error callers see.
pub fn error_for_status(status: StatusCode, account: &str) -> FetchError {
    match status {
        StatusCode::NOT_FOUND => FetchError::AccountNotFound {
            account: account.to_string(),
        },
        StatusCode::FORBIDDEN => FetchError::RateLimited,
        other => FetchError::Upstream {
            status: other.as_u16(),
            status_text: other.canonical_reason().unwrap_or("").to_string(),
        },
    }
}

pub struct GitHubClient {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(config: &GitfolioConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT_V3));

        // Per-request timeouts come from the fetch deadline instead.
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(None::<Duration>)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            token: config.token.clone(),
        })
    }

    fn repos_url(&self, account: &str, page: u32, per_page: usize) -> String {
        format!(
            "{}/users/{}/repos?page={}&per_page={}&sort=updated&direction=desc",
            self.api_url,
            urlencoding::encode(account),
            page,
            per_page
        )
    }

    fn build_request(&self, url: &str, timeout: Option<Duration>) -> RequestBuilder {
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.header(header::AUTHORIZATION, format!("token {}", token));
        }
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        request
    }
}

impl RepoSource for GitHubClient {
    fn fetch_page(
        &self,
        account: &str,
        page: u32,
        per_page: usize,
        timeout: Option<Duration>,
    ) -> Result<Vec<GitHubRepo>, FetchError> {
        let url = self.repos_url(account, page, per_page);
        let resp = self.build_request(&url, timeout).send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(error_for_status(status, account));
        }

        Ok(resp.json::<Vec<GitHubRepo>>()?)
    }
}
