//! GitLab API module.
pub(crate) mod platform;
pub(crate) mod repo;
