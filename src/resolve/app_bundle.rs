// src/resolve/app_bundle.rs

//! macOS `.app` bundles.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::errors::{LaunchError, Result};
use crate::fs::FileSystem;

/// Find the executable of the `.app` bundle at `bundle`.
///
/// `CFBundleExecutable` from `Contents/Info.plist` names the binary inside
/// `Contents/MacOS`. When the plist carries no such key (or is binary), a
/// `Contents/MacOS` holding exactly one file is accepted instead.
pub fn executable(fs: &dyn FileSystem, bundle: &Path) -> Result<PathBuf> {
    let contents = bundle.join("Contents");
    let macos = contents.join("MacOS");

    let plist = fs
        .read_to_string(&contents.join("Info.plist"))
        .map_err(|err| {
            debug!(bundle = %bundle.display(), error = %err, "cannot read Info.plist");
            unreadable(bundle, "read Info.plist")
        })?;

    let candidate = match bundle_executable_name(&plist) {
        Some(name) => Some(macos.join(name)),
        None => sole_file(fs, &macos),
    };

    candidate
        .filter(|path| fs.is_file(path))
        .ok_or_else(|| unreadable(bundle, "find executable"))
}

static BUNDLE_EXECUTABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<key>\s*CFBundleExecutable\s*</key>\s*<string>\s*([^<]+?)\s*</string>")
        .expect("valid CFBundleExecutable pattern")
});

/// Value of `CFBundleExecutable` in an XML property list.
pub fn bundle_executable_name(plist: &str) -> Option<String> {
    BUNDLE_EXECUTABLE
        .captures(plist)
        .map(|caps| caps[1].to_string())
}

fn sole_file(fs: &dyn FileSystem, dir: &Path) -> Option<PathBuf> {
    let mut files = fs.read_dir(dir).ok()?.into_iter().filter(|p| fs.is_file(p));
    match (files.next(), files.next()) {
        (Some(only), None) => Some(only),
        _ => None,
    }
}

fn unreadable(bundle: &Path, reason: &str) -> LaunchError {
    LaunchError::TargetUnreadable {
        bundle: bundle.to_path_buf(),
        reason: reason.to_string(),
    }
}
