//! Configuration handling
//!
//! All configuration is read from the environment once at startup and
//! carried in an immutable [`MirrorConfig`] passed explicitly to every
//! component.
use std::{env, path::PathBuf, time::Duration};

use url::Url;

use crate::cli::MirrorCli;
use crate::errors::{MirrorError, MirrorErrorKind};

/// Default local cache root for bare mirrors.
const DEFAULT_CLONE_BASE: &str = "./gitlab-mirror";

/// Default pause between projects in milliseconds.
const DEFAULT_DELAY_MS: u64 = 1000;

/// Configuration data
#[derive(Debug, Clone)]
pub struct MirrorConfig {
    /// GitLab base URL, trailing slashes stripped.
    pub gitlab_url: String,

    /// GitLab private token.
    pub gitlab_token: String,

    /// GitHub organization receiving the mirrors.
    pub github_org: String,

    /// GitHub token.
    pub github_token: String,

    /// Local cache root holding the bare mirrors.
    pub clone_base: PathBuf,

    /// Pause between projects.
    pub delay: Duration,
}

impl MirrorConfig {
    /// Create a new config from the process environment.
    /// # Errors
    /// Error if a required environment variable is missing or invalid
    pub fn from_env(cli: &MirrorCli) -> Result<Self, MirrorError> {
        Self::from_lookup(cli, |name| env::var(name).ok())
    }

    /// Create a new config from an injectable variable lookup.
    pub(crate) fn from_lookup(
        cli: &MirrorCli,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, MirrorError> {
        let gitlab_url = required(&lookup, "GITLAB_URL")?
            .trim_end_matches('/')
            .to_string();
        if let Err(e) = Url::parse(&gitlab_url) {
            return Err(MirrorError::new(MirrorErrorKind::Config)
                .with_text(&format!("GITLAB_URL is not a valid URL: {e}")));
        }
        let gitlab_token = required(&lookup, "GITLAB_TOKEN")?;
        let github_org = required(&lookup, "GITHUB_ORG")?;
        let github_token = required(&lookup, "GITHUB_TOKEN")?;
        let clone_base = match &cli.clone_base {
            Some(path) => path.clone(),
            None => PathBuf::from(
                lookup("CLONE_BASE").unwrap_or_else(|| DEFAULT_CLONE_BASE.to_string()),
            ),
        };
        let delay = Duration::from_millis(cli.delay_ms.unwrap_or(DEFAULT_DELAY_MS));
        Ok(Self {
            gitlab_url,
            gitlab_token,
            github_org,
            github_token,
            clone_base,
            delay,
        })
    }

    /// Create the local cache root if it does not exist yet.
    /// # Errors
    /// Error if the directory can't be created
    pub fn ensure_clone_base(&self) -> Result<(), MirrorError> {
        std::fs::create_dir_all(&self.clone_base)?;
        Ok(())
    }
}

/// Look up a required variable, rejecting empty values.
fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, MirrorError> {
    match lookup(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(MirrorError::new(MirrorErrorKind::Config)
            .with_text(&format!("missing required environment variable {name}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a lookup closure over a fixed variable set.
    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_string())
        }
    }

    /// A complete variable set for tests.
    const FULL_ENV: &[(&str, &str)] = &[
        ("GITLAB_URL", "https://gitlab.example.com/"),
        ("GITLAB_TOKEN", "glpat-xyz"),
        ("GITHUB_ORG", "test-org"),
        ("GITHUB_TOKEN", "ghp-xyz"),
    ];

    #[test]
    fn full_env_builds_config() {
        let cli = MirrorCli::default();
        let config = MirrorConfig::from_lookup(&cli, lookup_from(FULL_ENV)).unwrap();
        assert_eq!(config.gitlab_url, "https://gitlab.example.com");
        assert_eq!(config.github_org, "test-org");
        assert_eq!(config.clone_base, PathBuf::from("./gitlab-mirror"));
        assert_eq!(config.delay, Duration::from_millis(1000));
    }

    #[test]
    fn trailing_slashes_are_stripped() {
        let vars = [
            ("GITLAB_URL", "https://gitlab.example.com///"),
            ("GITLAB_TOKEN", "t"),
            ("GITHUB_ORG", "o"),
            ("GITHUB_TOKEN", "t"),
        ];
        let cli = MirrorCli::default();
        let config = MirrorConfig::from_lookup(&cli, lookup_from(&vars)).unwrap();
        assert_eq!(config.gitlab_url, "https://gitlab.example.com");
    }

    #[test]
    fn missing_variable_names_it() {
        let vars = [
            ("GITLAB_URL", "https://gitlab.example.com"),
            ("GITHUB_ORG", "o"),
            ("GITHUB_TOKEN", "t"),
        ];
        let cli = MirrorCli::default();
        let err = MirrorConfig::from_lookup(&cli, lookup_from(&vars)).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("GITLAB_TOKEN"));
    }

    #[test]
    fn empty_variable_is_missing() {
        let vars = [
            ("GITLAB_URL", "https://gitlab.example.com"),
            ("GITLAB_TOKEN", ""),
            ("GITHUB_ORG", "o"),
            ("GITHUB_TOKEN", "t"),
        ];
        let cli = MirrorCli::default();
        let err = MirrorConfig::from_lookup(&cli, lookup_from(&vars)).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn invalid_url_is_rejected() {
        let vars = [
            ("GITLAB_URL", "not a url"),
            ("GITLAB_TOKEN", "t"),
            ("GITHUB_ORG", "o"),
            ("GITHUB_TOKEN", "t"),
        ];
        let cli = MirrorCli::default();
        let err = MirrorConfig::from_lookup(&cli, lookup_from(&vars)).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn clone_base_env_and_cli_override() {
        let vars = [
            ("GITLAB_URL", "https://gitlab.example.com"),
            ("GITLAB_TOKEN", "t"),
            ("GITHUB_ORG", "o"),
            ("GITHUB_TOKEN", "t"),
            ("CLONE_BASE", "/var/cache/mirrors"),
        ];
        let cli = MirrorCli::default();
        let config = MirrorConfig::from_lookup(&cli, lookup_from(&vars)).unwrap();
        assert_eq!(config.clone_base, PathBuf::from("/var/cache/mirrors"));

        let cli = MirrorCli {
            clone_base: Some(PathBuf::from("/tmp/elsewhere")),
            ..Default::default()
        };
        let config = MirrorConfig::from_lookup(&cli, lookup_from(&vars)).unwrap();
        assert_eq!(config.clone_base, PathBuf::from("/tmp/elsewhere"));
    }
}
