//! The "get projects" pipeline: cache, fetch, convert, store.

use crate::cache::ProjectCache;
use crate::config::GitfolioConfig;
use crate::convert::to_project;
use crate::error::Result;
use crate::github::{fetch_all, GitHubClient, RepoSource};
use crate::types::Project;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct ProjectService<S: RepoSource = GitHubClient> {
    source: S,
    cache: ProjectCache,
    account: String,
    timeout: Option<Duration>,
}

impl ProjectService<GitHubClient> {
    /// Build the service against the real GitHub API.
    pub fn new(config: &GitfolioConfig) -> Result<Self> {
        let client = GitHubClient::new(config)?;
        Ok(Self::with_source(config, client))
    }
}

impl<S: RepoSource> ProjectService<S> {
    pub fn with_source(config: &GitfolioConfig, source: S) -> Self {
        Self {
            source,
            cache: ProjectCache::new(&config.cache_path, config.cache_ttl),
            account: config.account.clone(),
            timeout: config.timeout,
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    /// Return the account's projects, from the cache when it is fresh.
    ///
    /// On failure the cache is left as it was.
    pub fn get_projects(&self) -> Result<Vec<Project>> {
        if let Some(projects) = self.cache.read(&self.account) {
            debug!(account = %self.account, count = projects.len(), "Serving projects from cache");
            return Ok(projects);
        }

        let deadline = self.timeout.map(|t| Instant::now() + t);
        let repos = fetch_all(&self.source, &self.account, deadline)?;
        let projects: Vec<Project> = repos
            .into_iter()
            .map(|repo| to_project(repo, &self.account))
            .collect();

        info!(account = %self.account, count = projects.len(), "Fetched projects from GitHub");
        self.cache.write(&self.account, &projects);
        Ok(projects)
    }

    /// Drop the cached list and fetch again.
    pub fn refresh_projects(&self) -> Result<Vec<Project>> {
        self.clear_cache();
        self.get_projects()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, FetchError};
    use crate::github::testing::FakeSource;
    use tempfile::{tempdir, TempDir};

    fn test_config(dir: &TempDir) -> GitfolioConfig {
        GitfolioConfig::new(Some("octo".to_string()))
            .unwrap()
            .with_cache_path(dir.path().join("projects.json"))
    }

    #[test]
    fn test_second_call_is_served_from_cache() {
        let dir = tempdir().unwrap();
        let service = ProjectService::with_source(&test_config(&dir), FakeSource::with_page_sizes(&[3]));

        let first = service.get_projects().unwrap();
        let second = service.get_projects().unwrap();

        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
        assert_eq!(service.source.call_count(), 1);
    }

    #[test]
    fn test_projects_are_converted_for_account() {
        let dir = tempdir().unwrap();
        let service = ProjectService::with_source(&test_config(&dir), FakeSource::with_page_sizes(&[1]));

        let projects = service.get_projects().unwrap();
        assert_eq!(projects[0].name, "repo-1");
        assert_eq!(projects[0].description, "No description available");
        assert_eq!(projects[0].pages_url.as_deref(), Some("https://octo.github.io/repo-1/"));
    }

    #[test]
    fn test_clear_cache_forces_refetch() {
        let dir = tempdir().unwrap();
        let service = ProjectService::with_source(&test_config(&dir), FakeSource::with_page_sizes(&[2]));

        service.get_projects().unwrap();
        service.clear_cache();
        service.get_projects().unwrap();

        assert_eq!(service.source.call_count(), 2);
    }

    #[test]
    fn test_refresh_refetches() {
        let dir = tempdir().unwrap();
        let service = ProjectService::with_source(&test_config(&dir), FakeSource::with_page_sizes(&[2]));

        service.get_projects().unwrap();
        let refreshed = service.refresh_projects().unwrap();

        assert_eq!(refreshed.len(), 2);
        assert_eq!(service.source.call_count(), 2);
    }

    #[test]
    fn test_failure_propagates_and_leaves_cache_empty() {
        let dir = tempdir().unwrap();
        let config = test_config(&dir);
        let source = FakeSource::failing_after(
            &[],
            FetchError::AccountNotFound {
                account: "octo".to_string(),
            },
        );
        let service = ProjectService::with_source(&config, source);

        let err = service.get_projects().unwrap_err();
        assert!(matches!(err, Error::Fetch(FetchError::AccountNotFound { .. })));
        assert!(!config.cache_path.exists());
    }

    #[test]
    fn test_failure_keeps_previous_cache() {
        let dir = tempdir().unwrap();
        let config = test_config(&dir);

        let other = GitfolioConfig::new(Some("hubot".to_string()))
            .unwrap()
            .with_cache_path(&config.cache_path);
        let cached = ProjectService::with_source(&other, FakeSource::with_page_sizes(&[4]))
            .get_projects()
            .unwrap();

        let failing = ProjectService::with_source(
            &config,
            FakeSource::failing_after(&[], FetchError::RateLimited),
        );
        assert!(failing.get_projects().is_err());

        let reader = ProjectCache::new(&config.cache_path, config.cache_ttl);
        assert_eq!(reader.read("hubot"), Some(cached));
    }
}
