// src/types.rs

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Bundle identifier used when `NEOVIDE_START_BUNDLE_ID` is not set.
pub const DEFAULT_BUNDLE_ID: &str = "com.neovide.neovide";

/// A resolved launch target.
///
/// Produced once by the resolver and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Identifier the target was looked up by (e.g. `com.neovide.neovide`).
    pub identifier: String,
    /// Location the registry returned: an `.app` directory or a `.desktop` file.
    pub bundle: PathBuf,
    /// Absolute path of the executable to spawn.
    pub executable: PathBuf,
}

/// Result of partitioning the raw command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchArgs {
    /// `true` when `--fork` won over `--no-fork`.
    pub detach: bool,
    /// Arguments handed to the child verbatim, after flag removal.
    pub forwarded: Vec<OsString>,
}

/// A definite outcome reported by `wait`, mirroring POSIX wait-status macros.
///
/// "Still running" is not a variant: non-blocking polls return
/// `Option<WaitStatus>` and use `None` for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStatus {
    Exited(i32),
    Signaled(i32),
    Stopped(i32),
    Unknown(i32),
}

impl WaitStatus {
    /// Whether the child exited normally with status 0.
    pub fn is_clean(&self) -> bool {
        matches!(self, WaitStatus::Exited(0))
    }
}

impl fmt::Display for WaitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitStatus::Exited(code) => write!(f, "exited with status {code}"),
            WaitStatus::Signaled(sig) => write!(f, "terminated on signal {sig}"),
            WaitStatus::Stopped(sig) => write!(f, "stopped on signal {sig}"),
            WaitStatus::Unknown(raw) => write!(f, "unknown status value {raw}"),
        }
    }
}

impl From<ExitStatus> for WaitStatus {
    #[cfg(unix)]
    fn from(status: ExitStatus) -> Self {
        use std::os::unix::process::ExitStatusExt;

        if let Some(code) = status.code() {
            WaitStatus::Exited(code)
        } else if let Some(sig) = status.signal() {
            WaitStatus::Signaled(sig)
        } else if let Some(sig) = status.stopped_signal() {
            WaitStatus::Stopped(sig)
        } else {
            WaitStatus::Unknown(status.into_raw())
        }
    }

    #[cfg(not(unix))]
    fn from(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => WaitStatus::Exited(code),
            None => WaitStatus::Unknown(-1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptions_match_wait_macros() {
        assert_eq!(WaitStatus::Exited(3).to_string(), "exited with status 3");
        assert_eq!(WaitStatus::Signaled(9).to_string(), "terminated on signal 9");
        assert_eq!(WaitStatus::Stopped(19).to_string(), "stopped on signal 19");
        assert_eq!(WaitStatus::Unknown(-1).to_string(), "unknown status value -1");
    }

    #[cfg(unix)]
    #[test]
    fn converts_raw_exit_status() {
        use std::os::unix::process::ExitStatusExt;

        assert_eq!(WaitStatus::from(ExitStatus::from_raw(3 << 8)), WaitStatus::Exited(3));
        assert_eq!(WaitStatus::from(ExitStatus::from_raw(9)), WaitStatus::Signaled(9));
        assert!(WaitStatus::from(ExitStatus::from_raw(0)).is_clean());
    }
}
