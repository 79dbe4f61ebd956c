pub mod cache;
pub mod facets;
pub mod list;
pub mod misc;

pub use cache::clear_cache;
pub use facets::{list_languages, list_topics, show_stats};
pub use list::{list_projects, ListArgs};
pub use misc::{display_banner, generate_completions};

use crate::SourceArgs;
use gitfolio::{Error, Project, ProjectService};

/// Build the service or bail out with a readable message.
pub fn open_service(source: &SourceArgs) -> ProjectService {
    match source.to_config().and_then(|config| ProjectService::new(&config)) {
        Ok(service) => service,
        Err(e) => exit_with(&e),
    }
}

/// Fetch (or read from cache) the configured account's projects.
pub fn load_projects(service: &ProjectService, refresh: bool) -> Vec<Project> {
    let result = if refresh {
        service.refresh_projects()
    } else {
        service.get_projects()
    };
    result.unwrap_or_else(|e| exit_with(&e))
}

fn exit_with(error: &Error) -> ! {
    eprintln!("Error: {}", error);
    if let Error::MissingConfiguration(_) = error {
        eprintln!("See .env.example for configuration details.");
    }
    std::process::exit(1);
}
