//! Conversion from GitHub API records to [`Project`]s.

use crate::types::{GitHubRepo, Project};

pub const DEFAULT_DESCRIPTION: &str = "No description available";

const PAGES_DOMAIN: &str = "github.io";

/// Convert a raw repository into a project for `account`.
///
/// Empty description and homepage strings are treated as missing.
pub fn to_project(repo: GitHubRepo, account: &str) -> Project {
    let homepage_url = repo.homepage.filter(|h| !h.is_empty());
    let pages_url = pages_url(homepage_url.as_deref(), account, &repo.name);

    Project {
        id: repo.id,
        name: repo.name,
        full_name: repo.full_name,
        description: repo
            .description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        github_url: repo.html_url,
        homepage_url,
        topics: repo.topics,
        language: repo.language,
        stars: repo.stargazers_count,
        updated_at: repo.updated_at,
        pages_url: Some(pages_url),
    }
}

/// Guess where the repository's pages site lives. Nothing is checked over the
/// network, so the guessed URL may not exist.
fn pages_url(homepage: Option<&str>, account: &str, repo_name: &str) -> String {
    match homepage {
        Some(url) if url.contains(PAGES_DOMAIN) => url.to_string(),
        _ => format!("https://{}.{}/{}/", account, PAGES_DOMAIN, repo_name),
    }
}
