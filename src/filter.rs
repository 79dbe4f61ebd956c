//! Local search, filtering and sorting over a project list.

use crate::types::Project;
use clap::ValueEnum;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortMode {
    /// Most stars first
    Stars,
    /// Alphabetical by name
    Name,
    /// Most recently updated first
    #[default]
    Updated,
}

#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    pub search: String,
    pub language: Option<String>,
    pub topic: Option<String>,
    pub sort: SortMode,
}

/// Filter and sort `projects` according to `config`.
///
/// Every filter that is set must pass. Ties keep their input order.
pub fn apply<'a>(projects: &'a [Project], config: &FilterConfig) -> Vec<&'a Project> {
    let query = config.search.trim().to_lowercase();

    let mut filtered: Vec<&Project> = projects
        .iter()
        .filter(|p| {
            query.is_empty()
                || p.name.to_lowercase().contains(&query)
                || p.description.to_lowercase().contains(&query)
        })
        .filter(|p| match &config.language {
            Some(language) => p.language.as_ref() == Some(language),
            None => true,
        })
        .filter(|p| match &config.topic {
            Some(topic) => p.topics.contains(topic),
            None => true,
        })
        .collect();

    match config.sort {
        SortMode::Stars => filtered.sort_by(|a, b| b.stars.cmp(&a.stars)),
        SortMode::Name => filtered.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortMode::Updated => filtered.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
    }

    filtered
}

/// ASCII punctuation and symbols in root collation order. Whitespace first.
const SYMBOL_ORDER: &str = "\t\n\u{b}\u{c}\r _-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Root-locale collation for repository names.
///
/// Characters are compared by primary weight first: whitespace, then
/// punctuation and symbols (`_` before `-` before `.`), then digits, then
/// letters with case ignored. Punctuation is not ignorable, so `a_b` sorts
/// before `ab`. Names that are equal at that level put lowercase before
/// uppercase at the first position where case differs.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(primary_weight)
        .cmp(b.chars().map(primary_weight))
        .then_with(|| a.chars().map(char::is_uppercase).cmp(b.chars().map(char::is_uppercase)))
        .then_with(|| a.cmp(b))
}

fn primary_weight(c: char) -> u32 {
    let folded = c.to_lowercase().next().unwrap_or(c);
    if let Some(position) = SYMBOL_ORDER.find(folded) {
        return position as u32;
    }
    match folded {
        '0'..='9' => 0x100 + (folded as u32 - '0' as u32),
        'a'..='z' => 0x200 + (folded as u32 - 'a' as u32),
        // Non-ASCII has no table entry and falls after the Latin letters.
        other => 0x300 + other as u32,
    }
}

/// Every language in use, sorted. Projects without one are skipped.
pub fn unique_languages(projects: &[Project]) -> Vec<String> {
    projects
        .iter()
        .filter_map(|p| p.language.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Every topic across all projects, sorted.
pub fn unique_topics(projects: &[Project]) -> Vec<String> {
    projects
        .iter()
        .flat_map(|p| p.topics.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectStats {
    pub total_projects: usize,
    pub total_stars: u64,
    /// Project count per language.
    pub languages: BTreeMap<String, usize>,
    pub topics: Vec<String>,
}

impl ProjectStats {
    pub fn from_projects(projects: &[Project]) -> Self {
        let mut languages = BTreeMap::new();
        for language in projects.iter().filter_map(|p| p.language.as_ref()) {
            *languages.entry(language.clone()).or_insert(0) += 1;
        }

        Self {
            total_projects: projects.len(),
            total_stars: projects.iter().map(|p| u64::from(p.stars)).sum(),
            languages,
            topics: unique_topics(projects),
        }
    }
}
