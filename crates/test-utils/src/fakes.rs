//! Fakes for the launcher's collaborators.

use std::collections::VecDeque;
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use neovide_start::activation::{ActivationResult, Activator};
use neovide_start::resolve::BundleRegistry;
use neovide_start::spawn::ChildProcess;
use neovide_start::types::WaitStatus;

/// What a [`FakeActivator`] was asked to do.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ActivationLog {
    pub yielded: Vec<String>,
    pub activated: Vec<u32>,
}

/// An activator that replays scripted results and records every call.
///
/// Once the script runs out, further requests are declined.
#[derive(Debug, Clone, Default)]
pub struct FakeActivator {
    script: Arc<Mutex<VecDeque<ActivationResult>>>,
    log: Arc<Mutex<ActivationLog>>,
}

impl FakeActivator {
    pub fn new(script: impl IntoIterator<Item = ActivationResult>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into_iter().collect())),
            log: Arc::default(),
        }
    }

    /// Snapshot of the calls made so far (shared across clones).
    pub fn log(&self) -> ActivationLog {
        self.log.lock().unwrap().clone()
    }
}

impl Activator for FakeActivator {
    fn yield_activation(&mut self, identifier: &str) {
        self.log.lock().unwrap().yielded.push(identifier.to_string());
    }

    fn activate(&mut self, pid: u32) -> Pin<Box<dyn Future<Output = ActivationResult> + Send + '_>> {
        self.log.lock().unwrap().activated.push(pid);
        let result = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ActivationResult::Declined);
        Box::pin(async move { result })
    }
}

/// Calls a [`ScriptedChild`] received.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChildLog {
    pub polls: usize,
    pub blocking_waits: usize,
}

/// A child whose non-blocking polls replay a script.
///
/// Polls past the end of the script report "still running"; a blocking wait
/// returns `wait_status`.
#[derive(Debug, Clone)]
pub struct ScriptedChild {
    pid: u32,
    polls: VecDeque<Option<WaitStatus>>,
    wait_status: WaitStatus,
    log: Arc<Mutex<ChildLog>>,
}

impl ScriptedChild {
    pub fn new(pid: u32) -> Self {
        Self {
            pid,
            polls: VecDeque::new(),
            wait_status: WaitStatus::Exited(0),
            log: Arc::default(),
        }
    }

    /// Report `status` on poll number `after_polls + 1`.
    pub fn exits_on_poll(mut self, after_polls: usize, status: WaitStatus) -> Self {
        self.polls = std::iter::repeat_n(None, after_polls).collect();
        self.polls.push_back(Some(status));
        self
    }

    pub fn wait_returns(mut self, status: WaitStatus) -> Self {
        self.wait_status = status;
        self
    }

    pub fn log(&self) -> ChildLog {
        *self.log.lock().unwrap()
    }
}

impl ChildProcess for ScriptedChild {
    fn id(&self) -> u32 {
        self.pid
    }

    fn try_wait(&mut self) -> io::Result<Option<WaitStatus>> {
        self.log.lock().unwrap().polls += 1;
        Ok(self.polls.pop_front().flatten())
    }

    fn wait(&mut self) -> Pin<Box<dyn Future<Output = io::Result<WaitStatus>> + Send + '_>> {
        self.log.lock().unwrap().blocking_waits += 1;
        let status = self.wait_status;
        Box::pin(async move { Ok(status) })
    }
}

/// Registry with a fixed identifier → location table.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    entries: Vec<(String, PathBuf)>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, identifier: &str, location: impl Into<PathBuf>) -> Self {
        self.entries.push((identifier.to_string(), location.into()));
        self
    }
}

impl BundleRegistry for StaticRegistry {
    fn locate(&self, identifier: &str) -> Option<PathBuf> {
        self.entries
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, path)| path.clone())
    }
}
