// src/resolve/desktop.rs

//! freedesktop.org desktop entries as the application registry.
//!
//! An application with identifier `org.example.App` installs
//! `org.example.App.desktop` into one of the XDG `applications` directories;
//! its `Exec` key names the program to run.

use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{debug, trace};

use super::BundleRegistry;
use crate::errors::{LaunchError, Result};
use crate::fs::FileSystem;

const DEFAULT_DATA_DIRS: &str = "/usr/local/share:/usr/share";

#[derive(Debug)]
pub struct DesktopEntryRegistry {
    fs: Arc<dyn FileSystem>,
    data_dirs: Vec<PathBuf>,
}

impl DesktopEntryRegistry {
    /// Registry searching `<dir>/applications` for each of `data_dirs`, in order.
    pub fn new(fs: Arc<dyn FileSystem>, data_dirs: Vec<PathBuf>) -> Self {
        Self { fs, data_dirs }
    }

    /// Build the XDG search order from `XDG_DATA_HOME` and `XDG_DATA_DIRS`.
    ///
    /// Unset or empty variables fall back to `~/.local/share` and
    /// `/usr/local/share:/usr/share`.
    pub fn from_lookup(fs: Arc<dyn FileSystem>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let mut data_dirs = Vec::new();
        match non_empty("XDG_DATA_HOME") {
            Some(home) => data_dirs.push(PathBuf::from(home)),
            None => {
                if let Some(home) = non_empty("HOME") {
                    data_dirs.push(Path::new(&home).join(".local/share"));
                }
            }
        }

        let system = non_empty("XDG_DATA_DIRS").unwrap_or_else(|| DEFAULT_DATA_DIRS.to_string());
        data_dirs.extend(
            system
                .split(':')
                .filter(|d| !d.is_empty())
                .map(PathBuf::from),
        );

        Self::new(fs, data_dirs)
    }

    pub fn data_dirs(&self) -> &[PathBuf] {
        &self.data_dirs
    }
}

impl BundleRegistry for DesktopEntryRegistry {
    fn locate(&self, identifier: &str) -> Option<PathBuf> {
        let file_name = format!("{identifier}.desktop");
        self.data_dirs
            .iter()
            .map(|dir| dir.join("applications").join(&file_name))
            .inspect(|candidate| trace!(candidate = %candidate.display(), "checking desktop entry"))
            .find(|candidate| self.fs.is_file(candidate))
    }
}

/// Find the program a desktop entry launches.
///
/// Absolute `Exec` programs must exist; bare names are looked up in
/// `search_path`.
pub fn executable(fs: &dyn FileSystem, entry: &Path, search_path: &[PathBuf]) -> Result<PathBuf> {
    let unreadable = |reason: &str| LaunchError::TargetUnreadable {
        bundle: entry.to_path_buf(),
        reason: reason.to_string(),
    };

    let contents = fs.read_to_string(entry).map_err(|err| {
        debug!(entry = %entry.display(), error = %err, "cannot read desktop entry");
        unreadable("read desktop entry")
    })?;

    let program = exec_program(&contents).ok_or_else(|| unreadable("find Exec key"))?;
    let program = PathBuf::from(program);

    let found = if program.is_absolute() {
        fs.is_file(&program).then_some(program)
    } else {
        search_path
            .iter()
            .map(|dir| dir.join(&program))
            .find(|candidate| fs.is_file(candidate))
    };

    found.ok_or_else(|| unreadable("find executable"))
}

/// Program named by the `[Desktop Entry]` group's `Exec` (or `TryExec`) key.
pub fn exec_program(contents: &str) -> Option<String> {
    let mut in_entry = false;
    let mut exec = None;
    let mut try_exec = None;

    for line in contents.lines().map(str::trim) {
        if line.starts_with('[') {
            in_entry = line == "[Desktop Entry]";
            continue;
        }
        if !in_entry || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            match key.trim() {
                "Exec" => exec = Some(value.trim().to_string()),
                "TryExec" => try_exec = Some(value.trim().to_string()),
                _ => {}
            }
        }
    }

    let line = exec.or(try_exec)?;
    first_token(&line).filter(|p| !p.is_empty())
}

/// Leading quoted (group 1) or bare (group 2) word of an `Exec` value.
static EXEC_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(?:"((?:[^"\\]|\\.)*)"|(\S+))"#).expect("valid Exec token pattern")
});

/// First word of an `Exec` value, unquoted, with field codes removed.
fn first_token(exec: &str) -> Option<String> {
    let caps = EXEC_TOKEN.captures(exec)?;
    let raw = match (caps.get(1), caps.get(2)) {
        (Some(quoted), _) => unescape(quoted.as_str()),
        (None, Some(bare)) => bare.as_str().to_string(),
        (None, None) => return None,
    };
    Some(strip_field_codes(&raw))
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn strip_field_codes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '%' {
            // `%%` is a literal percent; any other `%x` is a field code.
            if chars.next() == Some('%') {
                out.push('%');
            }
        } else {
            out.push(c);
        }
    }
    out
}
