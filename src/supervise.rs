// src/supervise.rs

//! Bounded supervision of the freshly spawned child.
//!
//! A GUI application can launch fine and then die a moment later (bad
//! arguments, missing libraries, crash on startup). The supervisor watches
//! for that for a short window so the failure reaches the caller's terminal
//! and exit status.
//!
//! State machine:
//!
//! ```text
//! Polling{1} -> Polling{2} -> ... -> Polling{attempts} -> Done(StillRunning)
//!     |                                   |
//!     +-- child changed state ------------+--> Done(Clean | Failed)
//!     |
//!     +-- activated && !detach --> WaitingIndefinitely --> Done(Clean | Failed)
//! ```

use std::time::Duration;

use tracing::{debug, info, trace};

use crate::activation::{ActivationResult, Activator};
use crate::spawn::ChildProcess;
use crate::types::WaitStatus;

/// Number of polls before the child is left to run on its own.
pub const DEFAULT_ATTEMPTS: u32 = 5;
/// Delay before each poll.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupervisorOptions {
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for SupervisorOptions {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            interval: DEFAULT_INTERVAL,
        }
    }
}

/// Whether the child has been brought to the foreground yet.
///
/// Activation is requested on every attempt until it succeeds once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Pending,
    Activated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Polling budget exhausted; the child keeps running independently.
    StillRunning,
    /// The child exited with status 0.
    Clean,
    /// The child exited non-zero, was signalled, or stopped.
    Failed(WaitStatus),
}

impl From<WaitStatus> for Outcome {
    fn from(status: WaitStatus) -> Self {
        if status.is_clean() {
            Outcome::Clean
        } else {
            Outcome::Failed(status)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    Polling { attempt: u32, activation: Activation },
    WaitingIndefinitely,
    Done(Outcome),
}

#[derive(Debug, Clone, Copy)]
pub struct Supervisor {
    options: SupervisorOptions,
    detach: bool,
}

impl Supervisor {
    pub fn new(options: SupervisorOptions, detach: bool) -> Self {
        Self { options, detach }
    }

    /// Drive the state machine until the child produces an outcome or the
    /// polling budget runs out. The child is never signalled.
    pub async fn supervise(
        &self,
        child: &mut dyn ChildProcess,
        activator: &mut dyn Activator,
    ) -> Outcome {
        let pid = child.id();
        let mut state = SupervisorState::Polling {
            attempt: 1,
            activation: Activation::Pending,
        };

        loop {
            trace!(pid, ?state, "supervisor step");
            state = match state {
                SupervisorState::Polling { attempt, .. } if attempt > self.options.attempts => {
                    info!(pid, "child still running; leaving it be");
                    SupervisorState::Done(Outcome::StillRunning)
                }
                SupervisorState::Polling {
                    attempt,
                    activation,
                } => self.poll(attempt, activation, child, activator).await,
                SupervisorState::WaitingIndefinitely => {
                    debug!(pid, "waiting for child to exit");
                    match child.wait().await {
                        Ok(status) => SupervisorState::Done(status.into()),
                        Err(err) => {
                            debug!(pid, error = %err, "wait failed");
                            SupervisorState::Done(Outcome::Clean)
                        }
                    }
                }
                SupervisorState::Done(outcome) => return outcome,
            };
        }
    }

    async fn poll(
        &self,
        attempt: u32,
        mut activation: Activation,
        child: &mut dyn ChildProcess,
        activator: &mut dyn Activator,
    ) -> SupervisorState {
        let pid = child.id();

        if activation == Activation::Pending {
            activation = match activator.activate(pid).await {
                ActivationResult::Activated => Activation::Activated,
                ActivationResult::ProcessNotFound | ActivationResult::Declined => {
                    Activation::Pending
                }
            };
            debug!(pid, attempt, ?activation, "activation requested");
        }

        tokio::time::sleep(self.options.interval).await;

        if activation == Activation::Activated && !self.detach {
            return SupervisorState::WaitingIndefinitely;
        }

        let next = SupervisorState::Polling {
            attempt: attempt + 1,
            activation,
        };
        match child.try_wait() {
            Ok(None) => next,
            Ok(Some(status)) => {
                debug!(pid, attempt, %status, "child changed state");
                SupervisorState::Done(status.into())
            }
            Err(err) => {
                debug!(pid, attempt, error = %err, "poll failed");
                next
            }
        }
    }
}
