//! Fetch a GitHub account's repositories and browse them locally.
//!
//! [`ProjectService`] pulls every repository of the configured account,
//! converts each into a [`Project`] and keeps the list in a short-lived cache.
//! The [`filter`] module derives searchable, sorted views from that list.

pub mod cache;
pub mod config;
pub mod convert;
pub mod error;
pub mod filter;
pub mod github;
pub mod logging;
pub mod service;
pub mod types;

pub use config::GitfolioConfig;
pub use error::{Error, FetchError, Result};
pub use filter::{FilterConfig, ProjectStats, SortMode};
pub use service::ProjectService;
pub use types::{GitHubRepo, Project};
