//! Command line options for the gitlab-mirror tool
use clap::Parser;
use std::path::PathBuf;

use crate::config::MirrorConfig;
use crate::errors::MirrorError;
use crate::github::platform::GithubClient;
use crate::gitlab::platform::GitlabClient;
use crate::mirror::mirror_projects;
use crate::runner::GitRunner;

/// gitlab-mirror - Mirror GitLab projects to a GitHub organization
#[derive(Parser, Default, Clone, Debug)]
pub struct MirrorCli {
    /// Local cache root for bare mirrors (overrides CLONE_BASE)
    #[arg(long)]
    pub clone_base: Option<PathBuf>,

    /// Pause between projects, in milliseconds
    #[arg(long = "delay-ms")]
    pub delay_ms: Option<u64>,

    /// Verbose mode (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Run the gitlab-mirror tool with the provided command line options.
/// # Errors
/// Error if configuration is missing or the source listing fails;
/// per-project failures are logged and never returned.
pub async fn mirror_main() -> Result<(), MirrorError> {
    let args = MirrorCli::parse();
    let level = match args.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::builder()
        .filter_level(level)
        .format_target(false)
        .format_timestamp(None)
        .init();
    dotenv::dotenv().ok();

    let config = MirrorConfig::from_env(&args)?;
    config.ensure_clone_base()?;

    let gitlab = GitlabClient::new(&config);
    let github = GithubClient::new(&config);
    let runner = GitRunner;

    // The full project set is a prerequisite for any work.
    let projects = gitlab.list_all_projects().await?;
    log::info!("found {} gitlab projects", projects.len());

    mirror_projects(&config, &projects, &github, &runner).await;
    Ok(())
}
