use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository as returned by `GET /users/{account}/repos`.
#[derive(Deserialize, Debug, Clone)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub homepage: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub language: Option<String>,
    pub stargazers_count: u32,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub default_branch: String,
}

/// Display-ready view of a repository.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub github_url: String,
    pub homepage_url: Option<String>,
    pub topics: Vec<String>,
    pub language: Option<String>,
    pub stars: u32,
    pub updated_at: DateTime<Utc>,
    pub pages_url: Option<String>,
}
