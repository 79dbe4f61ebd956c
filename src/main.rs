use clap::{Args, Parser, Subcommand, ValueHint};
use clap_complete::Shell;
use gitfolio::cache::{ProjectCache, DEFAULT_TTL};
use gitfolio::{logging, GitfolioConfig};
use std::path::PathBuf;
use std::time::Duration;

mod commands;

use commands::{
    clear_cache, display_banner, generate_completions, list_languages, list_projects,
    list_topics, show_stats, ListArgs,
};

#[derive(Parser)]
#[command(name = "gitfolio")]
#[command(about = "Browse a GitHub account's repositories from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    /// Print debug logs to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Where projects come from and where they are cached.
#[derive(Args)]
pub struct SourceArgs {
    /// GitHub account whose repositories are listed
    #[arg(long, short = 'a', env = "GITHUB_USERNAME", global = true)]
    account: Option<String>,

    /// Access token; raises the API rate limit
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITFOLIO_API_URL", value_hint = ValueHint::Url, global = true)]
    api_url: Option<String>,

    /// Cache file location
    #[arg(long, env = "GITFOLIO_CACHE_PATH", value_hint = ValueHint::FilePath, global = true)]
    cache_path: Option<PathBuf>,

    /// Give up on the fetch after this many seconds (0 waits forever)
    #[arg(long, value_name = "SECS", default_value_t = 30, global = true)]
    timeout: u64,
}

impl SourceArgs {
    pub fn to_config(&self) -> gitfolio::Result<GitfolioConfig> {
        let mut config = GitfolioConfig::new(self.account.clone())?
            .with_token(self.token.clone())
            .with_timeout((self.timeout > 0).then(|| Duration::from_secs(self.timeout)));
        if let Some(url) = &self.api_url {
            config = config.with_api_url(url.as_str());
        }
        if let Some(path) = &self.cache_path {
            config = config.with_cache_path(path);
        }
        Ok(config)
    }

    /// The cache file alone. Needs no account.
    pub fn project_cache(&self) -> ProjectCache {
        let path = self
            .cache_path
            .clone()
            .unwrap_or_else(GitfolioConfig::default_cache_path);
        ProjectCache::new(path, DEFAULT_TTL)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List projects, optionally searched, filtered and sorted
    #[command(visible_alias = "ls")]
    List(ListArgs),
    /// Print every language used across the projects
    Languages,
    /// Print every topic used across the projects
    Topics,
    /// Print project, star, language and topic totals
    Stats,
    /// Forget the cached project list so the next run refetches it
    ClearCache,
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        None => display_banner(),
        Some(Commands::List(args)) => list_projects(&cli.source, &args),
        Some(Commands::Languages) => list_languages(&cli.source),
        Some(Commands::Topics) => list_topics(&cli.source),
        Some(Commands::Stats) => show_stats(&cli.source),
        Some(Commands::ClearCache) => clear_cache(&cli.source),
        Some(Commands::Completions { shell }) => generate_completions(shell),
    }
}
