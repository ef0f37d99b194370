// src/activation.rs

//! Foreground activation of the launched application.
//!
//! Activation is advisory. Every implementation swallows its own failures and
//! reports them as [`ActivationResult::Declined`]; nothing here can fail a
//! launch.
//!
//! - [`NoActivation`] never activates anything.
//! - [`SystemEventsActivator`] (macOS) talks to System Events via `osascript`.
//! - [`XdotoolActivator`] (X11) uses `xdotool` to find and raise the window
//!   owned by the child's pid.

use std::future::Future;
use std::pin::Pin;

use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::debug;

/// What happened when the supervisor asked for the child to be activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationResult {
    /// The child is not (yet) known as a running application. Worth asking again.
    ProcessNotFound,
    /// The child was brought to the foreground.
    Activated,
    /// The request was made and refused, or the service is unavailable.
    Declined,
}

/// Collaborator that talks to the platform's application-switching layer.
pub trait Activator: Send {
    /// Hint, before spawning, that the application registered as `identifier`
    /// may take focus from us.
    fn yield_activation(&mut self, identifier: &str);

    /// Locate the process `pid` as a running application and bring it to the
    /// foreground.
    fn activate(&mut self, pid: u32) -> Pin<Box<dyn Future<Output = ActivationResult> + Send + '_>>;
}

/// Activator that never activates; supervision then stays non-blocking.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActivation;

impl Activator for NoActivation {
    fn yield_activation(&mut self, _identifier: &str) {}

    fn activate(&mut self, _pid: u32) -> Pin<Box<dyn Future<Output = ActivationResult> + Send + '_>> {
        Box::pin(async { ActivationResult::Declined })
    }
}

/// Run `program args...` and return trimmed stdout, or `None` on a non-zero exit.
async fn capture(program: &str, args: &[String]) -> Result<Option<String>> {
    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .with_context(|| format!("running {program}"))?;

    if !output.status.success() {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&output.stdout).trim().to_string()))
}

/// macOS activation through the System Events scripting interface.
#[derive(Debug, Clone, Default)]
pub struct SystemEventsActivator;

impl SystemEventsActivator {
    async fn try_activate(pid: u32) -> Result<ActivationResult> {
        let process = format!("(first process whose unix id is {pid})");
        let exists = capture(
            "osascript",
            &[
                "-e".to_string(),
                format!("tell application \"System Events\" to exists {process}"),
            ],
        )
        .await?;

        if exists.as_deref() != Some("true") {
            return Ok(ActivationResult::ProcessNotFound);
        }

        let raised = capture(
            "osascript",
            &[
                "-e".to_string(),
                format!("tell application \"System Events\" to set frontmost of {process} to true"),
            ],
        )
        .await?;

        Ok(match raised {
            Some(_) => ActivationResult::Activated,
            None => ActivationResult::Declined,
        })
    }
}

impl Activator for SystemEventsActivator {
    fn yield_activation(&mut self, identifier: &str) {
        // System Events has no yield call; focus is handed over by `activate`.
        debug!(identifier, "yielding activation");
    }

    fn activate(&mut self, pid: u32) -> Pin<Box<dyn Future<Output = ActivationResult> + Send + '_>> {
        Box::pin(async move {
            Self::try_activate(pid).await.unwrap_or_else(|err| {
                debug!(pid, error = %err, "activation unavailable");
                ActivationResult::Declined
            })
        })
    }
}

/// X11 activation through `xdotool`.
#[derive(Debug, Clone, Default)]
pub struct XdotoolActivator;

impl XdotoolActivator {
    async fn try_activate(pid: u32) -> Result<ActivationResult> {
        let windows = capture(
            "xdotool",
            &["search".to_string(), "--pid".to_string(), pid.to_string()],
        )
        .await?;

        let Some(window) = windows.as_deref().and_then(|out| out.lines().next()) else {
            return Ok(ActivationResult::ProcessNotFound);
        };

        let raised = capture(
            "xdotool",
            &["windowactivate".to_string(), window.trim().to_string()],
        )
        .await?;

        Ok(match raised {
            Some(_) => ActivationResult::Activated,
            None => ActivationResult::Declined,
        })
    }
}

impl Activator for XdotoolActivator {
    fn yield_activation(&mut self, identifier: &str) {
        debug!(identifier, "yielding activation");
    }

    fn activate(&mut self, pid: u32) -> Pin<Box<dyn Future<Output = ActivationResult> + Send + '_>> {
        Box::pin(async move {
            Self::try_activate(pid).await.unwrap_or_else(|err| {
                debug!(pid, error = %err, "activation unavailable");
                ActivationResult::Declined
            })
        })
    }
}

/// The activator native to the current platform.
pub fn system_activator() -> Box<dyn Activator> {
    if cfg!(target_os = "macos") {
        Box::new(SystemEventsActivator)
    } else if cfg!(unix) {
        Box::new(XdotoolActivator)
    } else {
        Box::new(NoActivation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_tool_is_capture_error() {
        let res = capture("/nonexistent/tool", &[]).await;
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn no_activation_declines() {
        let mut a = NoActivation;
        a.yield_activation("com.neovide.neovide");
        assert_eq!(a.activate(1).await, ActivationResult::Declined);
    }
}
