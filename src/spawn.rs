// src/spawn.rs

//! Spawning the target and the child-process seam the supervisor waits on.

use std::ffi::OsString;
use std::future::Future;
use std::io;
use std::pin::Pin;

use tokio::process::{Child, Command};
use tracing::info;

use crate::activation::Activator;
use crate::errors::{LaunchError, Result};
use crate::types::{Target, WaitStatus};

/// A spawned child as seen by the supervisor.
///
/// Production code uses [`SpawnedChild`]; tests can script wait results.
pub trait ChildProcess: Send {
    fn id(&self) -> u32;

    /// Non-blocking poll. `Ok(None)` means the child is still running.
    fn try_wait(&mut self) -> io::Result<Option<WaitStatus>>;

    /// Block until the child changes state.
    fn wait(&mut self) -> Pin<Box<dyn Future<Output = io::Result<WaitStatus>> + Send + '_>>;
}

#[derive(Debug)]
pub struct SpawnedChild {
    child: Child,
    pid: u32,
}

impl ChildProcess for SpawnedChild {
    fn id(&self) -> u32 {
        self.pid
    }

    fn try_wait(&mut self) -> io::Result<Option<WaitStatus>> {
        Ok(self.child.try_wait()?.map(WaitStatus::from))
    }

    fn wait(&mut self) -> Pin<Box<dyn Future<Output = io::Result<WaitStatus>> + Send + '_>> {
        Box::pin(async move { Ok(WaitStatus::from(self.child.wait().await?)) })
    }
}

/// Spawn `target.executable` with `forwarded` as its arguments.
///
/// `argv[0]` is the executable path; environment and stdio are inherited. The
/// child is never killed on drop: it outlives the launcher.
pub fn spawn(
    target: &Target,
    forwarded: &[OsString],
    activator: &mut dyn Activator,
) -> Result<SpawnedChild> {
    activator.yield_activation(&target.identifier);

    let mut cmd = Command::new(&target.executable);
    cmd.args(forwarded).kill_on_drop(false);

    let child = cmd
        .spawn()
        .map_err(|err| LaunchError::spawn_failed(target.executable.clone(), &err))?;

    // `id()` is only `None` once the child has been reaped.
    let pid = child.id().unwrap_or_default();
    info!(
        pid,
        path = %target.executable.display(),
        args = ?forwarded,
        "spawned target"
    );

    Ok(SpawnedChild { child, pid })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::NoActivation;
    use std::path::PathBuf;

    fn target(path: &str) -> Target {
        Target {
            identifier: "org.example.app".to_string(),
            bundle: PathBuf::from(path),
            executable: PathBuf::from(path),
        }
    }

    #[tokio::test]
    async fn missing_executable_is_spawn_failure() {
        let err = spawn(&target("/nonexistent/app"), &[], &mut NoActivation).unwrap_err();
        match &err {
            LaunchError::SpawnFailed { errno, .. } => assert_eq!(*errno, 2),
            other => panic!("expected SpawnFailed, got {other:?}"),
        }
        assert_eq!(err.exit_code(), 69);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn reports_exit_status() {
        let args = [OsString::from("-c"), OsString::from("exit 7")];
        let mut child = spawn(&target("/bin/sh"), &args, &mut NoActivation).unwrap();
        assert_ne!(child.id(), 0);
        assert_eq!(child.wait().await.unwrap(), WaitStatus::Exited(7));
    }
}
