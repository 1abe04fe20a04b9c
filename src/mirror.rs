//! Per-project mirroring workflow.
//!
//! Drives the clone-or-fetch, create-or-reuse, remote-and-push sequence
//! for each project, strictly one project at a time. A project's
//! failure never affects any other project.
use std::collections::HashSet;
use std::fmt;

use tokio::time::sleep;

use crate::config::MirrorConfig;
use crate::github::platform::{Destination, RepoCreation};
use crate::gitlab::repo::GitlabProject;
use crate::runner::CommandRunner;

/// Name of the git remote pointing at the destination repository.
const DESTINATION_REMOTE: &str = "github";

/// Why a project was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The project is archived on the source.
    Archived,

    /// The initial bare clone failed.
    Clone,

    /// Fetching updates into the existing mirror failed.
    Fetch,

    /// Creating (or reusing) the destination repository failed.
    RepoCreation,

    /// Registering the destination remote failed.
    Remote,

    /// The mirror push failed.
    Push,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Archived => write!(f, "archived"),
            SkipReason::Clone => write!(f, "clone error"),
            SkipReason::Fetch => write!(f, "fetch error"),
            SkipReason::RepoCreation => write!(f, "destination repo creation error"),
            SkipReason::Remote => write!(f, "remote registration error"),
            SkipReason::Push => write!(f, "mirror push error"),
        }
    }
}

/// Terminal state of one project within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorStatus {
    /// Cloned/fetched, destination ensured, mirror pushed.
    Completed,

    /// Skipped with a logged reason.
    Skipped(SkipReason),
}

/// Outcome of one project within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOutcome {
    /// Full namespace path of the project.
    pub path: String,

    /// Terminal state.
    pub status: MirrorStatus,
}

/// Flat directory name for a project's bare mirror.
///
/// `group/sub/project` maps to `group__sub__project.git`, so the cache
/// stays a single flat directory with no nested namespaces.
pub(crate) fn mirror_dir_name(path_with_namespace: &str) -> String {
    format!("{}.git", path_with_namespace.replace('/', "__"))
}

/// Mirror every project, one at a time, in the given order.
///
/// Returns one outcome per project, in the same order. Never fails as
/// a whole; individual failures are isolated into skip outcomes.
pub(crate) async fn mirror_projects(
    config: &MirrorConfig,
    projects: &[GitlabProject],
    destination: &dyn Destination,
    runner: &dyn CommandRunner,
) -> Vec<ProjectOutcome> {
    let mut seen_names: HashSet<String> = HashSet::new();
    let mut outcomes = Vec::with_capacity(projects.len());
    for project in projects {
        if project.archived {
            log::info!("skipping archived project {}", project.path_with_namespace);
            outcomes.push(ProjectOutcome {
                path: project.path_with_namespace.clone(),
                status: MirrorStatus::Skipped(SkipReason::Archived),
            });
            continue;
        }
        if !seen_names.insert(project.path.clone()) {
            // Two namespaces mapping to one destination name: the later
            // mirror push overwrites the earlier repository.
            log::warn!(
                "destination name '{}' is already used by another namespace; '{}' will overwrite it",
                project.path,
                project.path_with_namespace
            );
        }
        log::info!("=== processing {} ===", project.path_with_namespace);
        let status = mirror_one(config, project, destination, runner).await;
        match &status {
            MirrorStatus::Completed => {
                log::info!("{}: mirrored", project.path_with_namespace);
                sleep(config.delay).await;
            }
            MirrorStatus::Skipped(reason) => {
                log::warn!("skipping {}: {}", project.path_with_namespace, reason);
            }
        }
        outcomes.push(ProjectOutcome {
            path: project.path_with_namespace.clone(),
            status,
        });
    }
    let completed = outcomes
        .iter()
        .filter(|o| o.status == MirrorStatus::Completed)
        .count();
    log::info!(
        "run finished: {} mirrored, {} skipped",
        completed,
        outcomes.len() - completed
    );
    outcomes
}

/// Run the sync/create/push sequence for a single non-archived project.
async fn mirror_one(
    config: &MirrorConfig,
    project: &GitlabProject,
    destination: &dyn Destination,
    runner: &dyn CommandRunner,
) -> MirrorStatus {
    let local_dir = config
        .clone_base
        .join(mirror_dir_name(&project.path_with_namespace));

    // Directory existence is the sole signal distinguishing first sync
    // from resync.
    if !local_dir.exists() {
        let dir = local_dir.to_string_lossy().into_owned();
        let clone = runner
            .run(
                "git",
                &[
                    "-c",
                    "http.sslVerify=false",
                    "clone",
                    "--mirror",
                    &project.http_url_to_repo,
                    &dir,
                ],
                None,
            )
            .await;
        if !matches!(clone, Ok(0)) {
            return MirrorStatus::Skipped(SkipReason::Clone);
        }
    } else {
        log::info!(
            "local mirror exists for {}, fetching updates",
            project.path_with_namespace
        );
        let fetch = runner
            .run("git", &["fetch", "--all", "--prune"], Some(&local_dir))
            .await;
        if !matches!(fetch, Ok(0)) {
            return MirrorStatus::Skipped(SkipReason::Fetch);
        }
    }

    let description = project
        .description
        .clone()
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| {
            format!(
                "Mirror of {} from {}",
                project.path_with_namespace, config.gitlab_url
            )
        });
    let creation = match destination
        .create_repo(&project.path, &description, !project.public)
        .await
    {
        Ok(creation) => creation,
        Err(e) => {
            log::warn!(
                "failed to create destination repo for {}: {}",
                project.path_with_namespace,
                e
            );
            return MirrorStatus::Skipped(SkipReason::RepoCreation);
        }
    };
    match &creation {
        RepoCreation::Created(url) => log::info!("created destination repo {url}"),
        RepoCreation::Reused(url) => {
            log::info!("destination repo already exists, reusing {url}");
        }
    }
    let destination_url = creation.clone_url().to_string();

    // The remote may not exist yet, so the removal result is ignored.
    let _ = runner
        .run(
            "git",
            &["remote", "remove", DESTINATION_REMOTE],
            Some(&local_dir),
        )
        .await;
    let add = runner
        .run(
            "git",
            &["remote", "add", DESTINATION_REMOTE, &destination_url],
            Some(&local_dir),
        )
        .await;
    if !matches!(add, Ok(0)) {
        return MirrorStatus::Skipped(SkipReason::Remote);
    }
    let push = runner
        .run(
            "git",
            &["push", "--mirror", DESTINATION_REMOTE],
            Some(&local_dir),
        )
        .await;
    if !matches!(push, Ok(0)) {
        return MirrorStatus::Skipped(SkipReason::Push);
    }
    MirrorStatus::Completed
}
