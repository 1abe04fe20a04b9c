//! Subprocess execution for the external git tool.
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;

use crate::errors::MirrorError;

/// Future returned by [`CommandRunner::run`].
pub type RunFuture<'a> =
    Pin<Box<dyn std::future::Future<Output = Result<i32, MirrorError>> + Send + 'a>>;

/// Capability boundary around subprocess execution.
///
/// A non-zero exit status is reported through the returned code, not as
/// an error; only failing to spawn the process is an error. Output is
/// streamed to the console, never captured.
pub trait CommandRunner: Send + Sync {
    /// Run a program with arguments, optionally in a working directory.
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> RunFuture<'_>;
}

/// Production runner invoking real subprocesses.
#[derive(Debug, Default)]
pub struct GitRunner;

impl CommandRunner for GitRunner {
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> RunFuture<'_> {
        let program = program.to_string();
        let args: Vec<String> = args.iter().map(|a| (*a).to_string()).collect();
        let cwd: Option<PathBuf> = cwd.map(Path::to_path_buf);
        Box::pin(async move {
            log::info!(">> {} {}", program, args.join(" "));
            let mut command = Command::new(&program);
            command
                .args(&args)
                .stdin(Stdio::null())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
            if let Some(dir) = &cwd {
                command.current_dir(dir);
            }
            let status = command.status().await?;
            let code = status.code().unwrap_or(-1);
            if code != 0 {
                log::warn!("command failed with code {code}");
            }
            Ok(code)
        })
    }
}
