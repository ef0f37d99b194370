// src/resolve/mod.rs

//! Target resolution: identifier → bundle location → executable path.
//!
//! - [`BundleRegistry`] is the system-wide lookup (Spotlight on macOS,
//!   freedesktop desktop entries elsewhere).
//! - [`Resolver`] turns whatever the registry returned into an executable,
//!   reading bundle metadata through the [`FileSystem`] trait.

pub mod app_bundle;
pub mod desktop;
pub mod spotlight;

use std::env;
use std::ffi::OsStr;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::errors::{LaunchError, Result};
use crate::fs::FileSystem;
use crate::types::Target;

pub use desktop::DesktopEntryRegistry;
pub use spotlight::SpotlightRegistry;

/// Identifier-to-location lookup provided by the operating system.
pub trait BundleRegistry: Send + Sync + Debug {
    /// Location of the bundle registered under `identifier`, if any.
    fn locate(&self, identifier: &str) -> Option<PathBuf>;
}

/// The registry native to the current platform.
#[cfg(target_os = "macos")]
pub fn system_registry(
    _fs: Arc<dyn FileSystem>,
    _lookup: impl Fn(&str) -> Option<String>,
) -> Box<dyn BundleRegistry> {
    Box::new(SpotlightRegistry::default())
}

/// The registry native to the current platform.
#[cfg(not(target_os = "macos"))]
pub fn system_registry(
    fs: Arc<dyn FileSystem>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Box<dyn BundleRegistry> {
    Box::new(DesktopEntryRegistry::from_lookup(fs, lookup))
}

/// Directories named by `PATH`, used for desktop entries with a bare `Exec`.
pub fn search_path_from(lookup: impl Fn(&str) -> Option<String>) -> Vec<PathBuf> {
    lookup("PATH")
        .map(|p| env::split_paths(&p).collect())
        .unwrap_or_default()
}

#[derive(Debug)]
pub struct Resolver {
    registry: Box<dyn BundleRegistry>,
    fs: Arc<dyn FileSystem>,
    search_path: Vec<PathBuf>,
}

impl Resolver {
    pub fn new(registry: Box<dyn BundleRegistry>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            registry,
            fs,
            search_path: Vec::new(),
        }
    }

    pub fn with_search_path(mut self, search_path: Vec<PathBuf>) -> Self {
        self.search_path = search_path;
        self
    }

    /// Resolve `identifier` to the executable that should be spawned.
    pub fn resolve(&self, identifier: &str) -> Result<Target> {
        let bundle = self
            .registry
            .locate(identifier)
            .ok_or_else(|| LaunchError::TargetNotFound(identifier.to_string()))?;
        debug!(identifier, bundle = %bundle.display(), "registry located bundle");

        let executable = self.executable_in(&bundle)?;
        debug!(executable = %executable.display(), "resolved executable");

        Ok(Target {
            identifier: identifier.to_string(),
            bundle,
            executable,
        })
    }

    fn executable_in(&self, bundle: &Path) -> Result<PathBuf> {
        if self.fs.is_dir(bundle) {
            return app_bundle::executable(self.fs.as_ref(), bundle);
        }
        if bundle.extension() == Some(OsStr::new("desktop")) {
            return desktop::executable(self.fs.as_ref(), bundle, &self.search_path);
        }
        if self.fs.is_file(bundle) {
            // Registry handed back the executable itself.
            return Ok(bundle.to_path_buf());
        }
        Err(LaunchError::TargetUnreadable {
            bundle: bundle.to_path_buf(),
            reason: "read bundle".to_string(),
        })
    }
}
