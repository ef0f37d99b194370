// src/args.rs

//! Command-line partitioning.
//!
//! The launcher owns exactly two flags, `--fork` and `--no-fork`. Everything
//! else is forwarded to the child untouched, so no general-purpose parser is
//! involved here: a `--help` on our command line belongs to the child.

use std::ffi::{OsStr, OsString};

use crate::types::LaunchArgs;

pub const FORK: &str = "--fork";
pub const NO_FORK: &str = "--no-fork";
pub const SEPARATOR: &str = "--";

fn is_fork_option(arg: &OsStr) -> bool {
    arg == FORK || arg == NO_FORK
}

/// Split `args` (program name already removed) into launcher flags and the
/// arguments forwarded to the child.
///
/// Only the group before the first `--` is scanned for fork options; the last
/// one present decides, and every occurrence is stripped. The `--` and the
/// nested group are re-appended only when the nested group is non-empty.
pub fn partition<I, S>(args: I) -> LaunchArgs
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut primary: Vec<OsString> = Vec::new();
    let mut nested: Vec<OsString> = Vec::new();
    let mut seen_separator = false;

    for arg in args {
        let arg = arg.into();
        if seen_separator {
            nested.push(arg);
        } else if arg == SEPARATOR {
            seen_separator = true;
        } else {
            primary.push(arg);
        }
    }

    let detach = primary
        .iter()
        .rev()
        .find(|a| is_fork_option(a))
        .is_some_and(|a| a == FORK);
    primary.retain(|a| !is_fork_option(a));

    if !nested.is_empty() {
        primary.push(OsString::from(SEPARATOR));
        primary.append(&mut nested);
    }

    LaunchArgs {
        detach,
        forwarded: primary,
    }
}
