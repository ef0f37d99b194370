// src/lib.rs

pub mod activation;
pub mod args;
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod resolve;
pub mod spawn;
pub mod supervise;
pub mod types;

use std::ffi::OsString;
use std::sync::Arc;

use tracing::{debug, info};

use crate::activation::{system_activator, Activator};
use crate::config::Settings;
use crate::errors::{LaunchError, Result};
use crate::fs::{FileSystem, RealFileSystem};
use crate::resolve::{search_path_from, system_registry, Resolver};
use crate::spawn::spawn;
use crate::supervise::{Outcome, Supervisor, SupervisorOptions};
use crate::types::LaunchArgs;

/// Resolve, spawn, and supervise one target.
///
/// Holds the collaborators so tests can swap the registry and the activation
/// layer for fakes.
pub struct Launcher {
    resolver: Resolver,
    activator: Box<dyn Activator>,
    options: SupervisorOptions,
}

impl Launcher {
    pub fn new(
        resolver: Resolver,
        activator: Box<dyn Activator>,
        options: SupervisorOptions,
    ) -> Self {
        Self {
            resolver,
            activator,
            options,
        }
    }

    /// Launcher wired to the platform registry and activation layer.
    pub fn system() -> Self {
        let lookup = |key: &str| std::env::var(key).ok();
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        let resolver = Resolver::new(system_registry(Arc::clone(&fs), lookup), fs)
            .with_search_path(search_path_from(lookup));
        Self::new(resolver, system_activator(), SupervisorOptions::default())
    }

    /// Launch the target registered as `identifier`.
    ///
    /// `Ok` covers a child that exited cleanly and one still running when
    /// supervision ended. A child failing inside the window is an error
    /// carrying its status.
    pub async fn launch(&mut self, identifier: &str, args: LaunchArgs) -> Result<Outcome> {
        let target = self.resolver.resolve(identifier)?;
        let mut child = spawn(&target, &args.forwarded, &mut *self.activator)?;

        let supervisor = Supervisor::new(self.options, args.detach);
        let outcome = supervisor
            .supervise(&mut child, &mut *self.activator)
            .await;
        debug!(?outcome, detach = args.detach, "supervision finished");

        match outcome {
            Outcome::Failed(status) => Err(LaunchError::from_child_status(target.executable, status)),
            other => Ok(other),
        }
    }
}

/// High-level entry point used by `main.rs`.
pub async fn run<I>(settings: &Settings, raw_args: I) -> Result<Outcome>
where
    I: IntoIterator<Item = OsString>,
{
    let args = args::partition(raw_args);
    info!(bundle_id = %settings.bundle_id, detach = args.detach, "launching");
    Launcher::system().launch(&settings.bundle_id, args).await
}
