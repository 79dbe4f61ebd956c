//! Short-lived on-disk cache of the last fetched project list.
//!
//! The cache is an optimization only. Every failure in here is logged and
//! reported to the caller as a miss.

use crate::types::Project;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Why a stored entry could not be loaded.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("corrupt cache entry: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CacheEntry {
    pub account: String,
    pub data: Vec<Project>,
    /// Epoch milliseconds at write time.
    pub timestamp: i64,
}

/// Single-slot project cache backed by one JSON file.
#[derive(Debug, Clone)]
pub struct ProjectCache {
    path: PathBuf,
    ttl: Duration,
}

impl ProjectCache {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
        }
    }

    pub fn read(&self, account: &str) -> Option<Vec<Project>> {
        self.read_at(account, now_millis())
    }

    /// Read the cached list as of `now` (epoch millis).
    ///
    /// Expired entries are removed. Entries written for another account are
    /// left in place but not served.
    pub fn read_at(&self, account: &str, now: i64) -> Option<Vec<Project>> {
        let entry = match self.load() {
            Ok(Some(entry)) => entry,
            Ok(None) => return None,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Ignoring unreadable project cache");
                return None;
            }
        };

        let ttl_ms = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
        if now.saturating_sub(entry.timestamp) >= ttl_ms {
            debug!(path = %self.path.display(), "Project cache expired");
            self.clear();
            return None;
        }

        if entry.account != account {
            debug!(
                cached = %entry.account,
                requested = %account,
                "Project cache belongs to another account"
            );
            return None;
        }

        Some(entry.data)
    }

    pub fn write(&self, account: &str, projects: &[Project]) {
        self.write_at(account, projects, now_millis());
    }

    /// Store `projects` stamped with `now` (epoch millis).
    pub fn write_at(&self, account: &str, projects: &[Project], now: i64) {
        let entry = CacheEntry {
            account: account.to_string(),
            data: projects.to_vec(),
            timestamp: now,
        };
        if let Err(e) = self.store(&entry) {
            warn!(path = %self.path.display(), error = %e, "Failed to write project cache");
        }
    }

    pub fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Project cache cleared"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "Failed to clear project cache"),
        }
    }

    fn load(&self) -> Result<Option<CacheEntry>, CacheError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn store(&self, entry: &CacheEntry) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string(entry)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const NOW: i64 = 1_700_000_000_000;

    fn project(id: u64, name: &str) -> Project {
        Project {
            id,
            name: name.to_string(),
            full_name: format!("octo/{}", name),
            description: "A project".to_string(),
            github_url: format!("https://github.com/octo/{}", name),
            homepage_url: None,
            topics: vec!["demo".to_string()],
            language: Some("Rust".to_string()),
            stars: 3,
            updated_at: "2024-02-02T10:00:00Z".parse().unwrap(),
            pages_url: Some(format!("https://octo.github.io/{}/", name)),
        }
    }

    #[test]
    fn test_read_after_write_within_ttl() {
        let dir = tempdir().unwrap();
        let cache = ProjectCache::new(dir.path().join("projects.json"), DEFAULT_TTL);
        let projects = vec![project(1, "one"), project(2, "two")];

        cache.write_at("octo", &projects, NOW);

        assert_eq!(cache.read_at("octo", NOW + 299_999), Some(projects));
    }

    #[test]
    fn test_expired_entry_is_absent_and_purged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("projects.json");
        let cache = ProjectCache::new(&path, DEFAULT_TTL);

        cache.write_at("octo", &[project(1, "one")], NOW);
        assert!(path.exists());

        assert_eq!(cache.read_at("octo", NOW + 300_000), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_file_is_absent() {
        let dir = tempdir().unwrap();
        let cache = ProjectCache::new(dir.path().join("nope.json"), DEFAULT_TTL);
        assert_eq!(cache.read_at("octo", NOW), None);
    }

    #[test]
    fn test_corrupt_file_is_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("projects.json");
        fs::write(&path, "{ not json").unwrap();

        let cache = ProjectCache::new(&path, DEFAULT_TTL);
        assert_eq!(cache.read_at("octo", NOW), None);
    }

    #[test]
    fn test_load_distinguishes_corrupt_from_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("projects.json");
        let cache = ProjectCache::new(&path, DEFAULT_TTL);

        assert!(matches!(cache.load(), Ok(None)));
        fs::write(&path, "[]").unwrap();
        assert!(matches!(cache.load(), Err(CacheError::Json(_))));
    }

    #[test]
    fn test_other_account_is_a_miss() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("projects.json");
        let cache = ProjectCache::new(&path, DEFAULT_TTL);

        cache.write_at("octo", &[project(1, "one")], NOW);

        assert_eq!(cache.read_at("hubot", NOW + 1), None);
        assert!(path.exists());
        assert!(cache.read_at("octo", NOW + 1).is_some());
    }

    #[test]
    fn test_clear_removes_entry() {
        let dir = tempdir().unwrap();
        let cache = ProjectCache::new(dir.path().join("projects.json"), DEFAULT_TTL);

        cache.write_at("octo", &[project(1, "one")], NOW);
        cache.clear();
        assert_eq!(cache.read_at("octo", NOW), None);

        // clearing an empty slot is fine
        cache.clear();
    }

    #[test]
    fn test_write_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("cache").join("projects.json");
        let cache = ProjectCache::new(&path, DEFAULT_TTL);

        cache.write_at("octo", &[project(1, "one")], NOW);
        assert!(path.exists());
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();

        // parent "directory" is a regular file, so the write must fail quietly
        let cache = ProjectCache::new(blocker.join("projects.json"), DEFAULT_TTL);
        cache.write_at("octo", &[project(1, "one")], NOW);
        assert_eq!(cache.read_at("octo", NOW), None);
    }

    #[test]
    fn test_record_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("projects.json");
        let cache = ProjectCache::new(&path, DEFAULT_TTL);

        cache.write_at("octo", &[project(1, "one")], NOW);

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["timestamp"], NOW);
        assert_eq!(value["account"], "octo");
        assert_eq!(value["data"][0]["fullName"], "octo/one");
    }
}
