use super::{load_projects, open_service};
use crate::SourceArgs;
use gitfolio::filter::{unique_languages, unique_topics};
use gitfolio::ProjectStats;

pub fn list_languages(source: &SourceArgs) {
    let projects = load_projects(&open_service(source), false);
    for language in unique_languages(&projects) {
        println!("{}", language);
    }
}

pub fn list_topics(source: &SourceArgs) {
    let projects = load_projects(&open_service(source), false);
    for topic in unique_topics(&projects) {
        println!("{}", topic);
    }
}

pub fn show_stats(source: &SourceArgs) {
    let service = open_service(source);
    let stats = ProjectStats::from_projects(&load_projects(&service, false));

    println!("Account:  {}", service.account());
    println!("Projects: {}", stats.total_projects);
    println!("Stars:    {}", stats.total_stars);
    println!("Topics:   {}", stats.topics.len());

    if !stats.languages.is_empty() {
        println!("\nLanguages:");
        let mut languages: Vec<_> = stats.languages.iter().collect();
        languages.sort_by(|a, b| b.1.cmp(a.1));
        for (language, count) in languages {
            println!("  {:<16} {}", language, count);
        }
    }
}
