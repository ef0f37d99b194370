// src/errors.rs

//! Launcher error taxonomy and the exit codes each kind maps to.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::WaitStatus;

/// `sysexits.h` codes used by the launcher.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    /// `EX_UNAVAILABLE`
    pub const UNAVAILABLE: i32 = 69;
    /// `EX_SOFTWARE`
    pub const SOFTWARE: i32 = 70;
    /// `EX_OSFILE`
    pub const OSFILE: i32 = 72;
}

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Cannot find application with identifier {0}.")]
    TargetNotFound(String),

    #[error("Could not {reason} in bundle {}.", bundle.display())]
    TargetUnreadable { bundle: PathBuf, reason: String },

    #[error("exec {} failed: [{errno}: {symbolic}]", path.display())]
    SpawnFailed {
        path: PathBuf,
        errno: i32,
        symbolic: String,
    },

    #[error("{} {}", path.display(), WaitStatus::Exited(*code))]
    ChildEarlyExit { path: PathBuf, code: i32 },

    #[error("{} {}", path.display(), WaitStatus::Signaled(*signal))]
    ChildSignaled { path: PathBuf, signal: i32 },

    #[error("{} {}", path.display(), WaitStatus::Stopped(*signal))]
    ChildStopped { path: PathBuf, signal: i32 },

    #[error("{} {}", path.display(), WaitStatus::Unknown(*raw))]
    ChildUnknownStatus { path: PathBuf, raw: i32 },
}

impl LaunchError {
    /// Build the error describing a child that stopped with a non-clean status.
    pub fn from_child_status(path: PathBuf, status: WaitStatus) -> Self {
        match status {
            WaitStatus::Exited(code) => LaunchError::ChildEarlyExit { path, code },
            WaitStatus::Signaled(signal) => LaunchError::ChildSignaled { path, signal },
            WaitStatus::Stopped(signal) => LaunchError::ChildStopped { path, signal },
            WaitStatus::Unknown(raw) => LaunchError::ChildUnknownStatus { path, raw },
        }
    }

    /// Build a `SpawnFailed` from the error `spawn` returned.
    ///
    /// The symbolic part is the errno name and description, e.g.
    /// `ENOEXEC: Exec format error`.
    pub fn spawn_failed(path: PathBuf, err: &std::io::Error) -> Self {
        match err.raw_os_error() {
            Some(errno) => LaunchError::SpawnFailed {
                path,
                errno,
                symbolic: errno_name(errno),
            },
            None => LaunchError::SpawnFailed {
                path,
                errno: -1,
                symbolic: err.kind().to_string(),
            },
        }
    }

    /// Process exit status the launcher terminates with for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::TargetNotFound(_) | LaunchError::SpawnFailed { .. } => {
                exit_code::UNAVAILABLE
            }
            LaunchError::TargetUnreadable { .. } => exit_code::OSFILE,
            LaunchError::ChildEarlyExit { code, .. } => *code,
            LaunchError::ChildSignaled { .. }
            | LaunchError::ChildStopped { .. }
            | LaunchError::ChildUnknownStatus { .. } => exit_code::SOFTWARE,
        }
    }
}

#[cfg(unix)]
fn errno_name(errno: i32) -> String {
    nix::errno::Errno::from_raw(errno).to_string()
}

#[cfg(not(unix))]
fn errno_name(errno: i32) -> String {
    std::io::Error::from_raw_os_error(errno).kind().to_string()
}

pub type Result<T> = std::result::Result<T, LaunchError>;
