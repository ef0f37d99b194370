#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use neovide_start::fs::{FileSystem, RealFileSystem};
use neovide_start::resolve::Resolver;
use neovide_start::supervise::SupervisorOptions;
use neovide_start::Launcher;

pub use neovide_start_test_utils::fakes::{FakeActivator, ScriptedChild, StaticRegistry};
pub use neovide_start_test_utils::{init_tracing, with_timeout};

pub const TEST_ID: &str = "org.example.Test";

/// Supervision short enough to keep scripted tests quick.
pub fn fast_options() -> SupervisorOptions {
    SupervisorOptions {
        attempts: 5,
        interval: Duration::from_millis(1),
    }
}

/// Launcher over the real filesystem with `TEST_ID` registered at `location`.
pub fn launcher_for(location: impl Into<PathBuf>, activator: FakeActivator) -> Launcher {
    let registry = StaticRegistry::new().with(TEST_ID, location);
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    Launcher::new(
        Resolver::new(Box::new(registry), fs),
        Box::new(activator),
        SupervisorOptions::default(),
    )
}
