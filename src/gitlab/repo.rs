//! GitLab project descriptor.
use serde::{Deserialize, Serialize};

/// A project as returned by the GitLab listing API.
///
/// Snapshot taken once per run; the only state persisted between runs
/// is the local mirror directory derived from `path_with_namespace`.
#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct GitlabProject {
    /// Project identifier.
    pub id: u64,

    /// Leaf name of the project.
    pub path: String,

    /// Full namespace path, e.g. `group/subgroup/project`.
    pub path_with_namespace: String,

    /// HTTPS clone URL.
    pub http_url_to_repo: String,

    /// Project description, if any.
    #[serde(default)]
    pub description: Option<String>,

    /// Whether the project is archived.
    #[serde(default)]
    pub archived: bool,

    /// Whether the project is public. Absent means private.
    #[serde(default)]
    pub public: bool,
}
