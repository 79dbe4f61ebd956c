use super::{load_projects, open_service};
use crate::SourceArgs;
use chrono::{DateTime, Utc};
use clap::Args;
use gitfolio::filter::{self, FilterConfig, SortMode};
use gitfolio::Project;

const MAX_TOPICS_SHOWN: usize = 5;

#[derive(Args)]
pub struct ListArgs {
    /// Only projects whose name or description contains this text
    #[arg(long, short = 'q', default_value = "")]
    search: String,
    /// Only projects written in this language (exact match)
    #[arg(long, short = 'l')]
    language: Option<String>,
    /// Only projects tagged with this topic
    #[arg(long, short = 't')]
    topic: Option<String>,
    /// Sort order
    #[arg(long, short = 's', value_enum, default_value_t = SortMode::Updated)]
    sort: SortMode,
    /// Ignore the cache and fetch again
    #[arg(long, short = 'r')]
    refresh: bool,
    /// Print the matching projects as JSON
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    fn filter_config(&self) -> FilterConfig {
        FilterConfig {
            search: self.search.clone(),
            language: self.language.clone(),
            topic: self.topic.clone(),
            sort: self.sort,
        }
    }
}

pub fn list_projects(source: &SourceArgs, args: &ListArgs) {
    let service = open_service(source);
    let projects = load_projects(&service, args.refresh);
    let shown = filter::apply(&projects, &args.filter_config());

    if args.json {
        match serde_json::to_string_pretty(&shown) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize projects: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    if projects.is_empty() {
        println!("No projects found.");
        return;
    }

    println!("Showing {} of {} projects\n", shown.len(), projects.len());
    if shown.is_empty() {
        println!("No projects found matching your filters.");
        return;
    }

    for project in shown {
        print_card(project);
    }
}

fn print_card(project: &Project) {
    match &project.language {
        Some(language) => println!("  {}  [{}]", project.name, language),
        None => println!("  {}", project.name),
    }
    println!("    {}", project.description);
    if !project.topics.is_empty() {
        println!("    {}", topic_line(&project.topics));
    }
    println!(
        "    ⭐ {}  Updated {}",
        project.stars,
        format_date(&project.updated_at)
    );
    println!("    {}", project.github_url);
    if let Some(pages) = &project.pages_url {
        println!("    {}", pages);
    }
    println!();
}

fn topic_line(topics: &[String]) -> String {
    let mut line = topics
        .iter()
        .take(MAX_TOPICS_SHOWN)
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ");
    if topics.len() > MAX_TOPICS_SHOWN {
        line.push_str(&format!(" +{} more", topics.len() - MAX_TOPICS_SHOWN));
    }
    line
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}
