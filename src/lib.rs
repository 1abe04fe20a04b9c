//! # gitlab-mirror
//!
//! Mirror GitLab projects to a GitHub organization
//!
//! ## Usage
//!
//! ```txt
//! Usage: gitlab-mirror [OPTIONS]
//!
//! Options:
//!       --clone-base <CLONE_BASE>  Local cache root for bare mirrors (overrides CLONE_BASE)
//!       --delay-ms <DELAY_MS>      Pause between projects, in milliseconds
//!   -v, --verbose...               Verbose mode (-v, -vv, -vvv)
//!   -h, --help                     Print help
//! ```
//!
//! Required environment variables: `GITLAB_URL`, `GITLAB_TOKEN`,
//! `GITHUB_ORG`, `GITHUB_TOKEN`. Optional: `CLONE_BASE` (local cache
//! root, default `./gitlab-mirror`). A `.env` file is honored.

#![warn(clippy::all, rust_2018_idioms)]
#![deny(
    missing_docs,
    clippy::all,
    clippy::missing_docs_in_private_items,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![warn(clippy::multiple_crate_versions)]

pub(crate) mod cli;
pub(crate) mod config;
pub(crate) mod errors;
pub(crate) mod mirror;
pub(crate) mod runner;

mod github;
mod gitlab;

pub use cli::{mirror_main, MirrorCli};
pub use config::MirrorConfig;
pub use errors::MirrorError;
