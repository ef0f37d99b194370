// src/resolve/spotlight.rs

//! Spotlight (`mdfind`) lookup of `.app` bundles by bundle identifier.

use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context, Result};
use tracing::debug;

use super::BundleRegistry;

#[derive(Debug, Clone)]
pub struct SpotlightRegistry {
    program: PathBuf,
}

impl Default for SpotlightRegistry {
    fn default() -> Self {
        Self {
            program: PathBuf::from("/usr/bin/mdfind"),
        }
    }
}

impl SpotlightRegistry {
    fn query(&self, identifier: &str) -> Result<Vec<PathBuf>> {
        let output = Command::new(&self.program)
            .arg(bundle_query(identifier)?)
            .output()
            .with_context(|| format!("running {}", self.program.display()))?;

        if !output.status.success() {
            bail!("{} exited with {}", self.program.display(), output.status);
        }

        Ok(bundle_paths(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl BundleRegistry for SpotlightRegistry {
    fn locate(&self, identifier: &str) -> Option<PathBuf> {
        match self.query(identifier) {
            Ok(paths) => paths.into_iter().next(),
            Err(err) => {
                debug!(identifier, error = %err, "spotlight query failed");
                None
            }
        }
    }
}

/// The `mdfind` query matching `identifier` exactly.
///
/// Bundle identifiers are limited to ASCII letters, digits, `.`, `-` and `_`;
/// anything else could change the meaning of the quoted query and is refused.
fn bundle_query(identifier: &str) -> Result<String> {
    let valid = !identifier.is_empty()
        && identifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    if !valid {
        bail!("invalid bundle identifier {identifier:?}");
    }
    Ok(format!("kMDItemCFBundleIdentifier == '{identifier}'"))
}

/// `.app` paths in `mdfind` output, one per line.
fn bundle_paths(stdout: &str) -> Vec<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| line.ends_with(".app"))
        .map(PathBuf::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_app_bundles() {
        let out = "/Applications/Neovide.app\n/Users/u/Downloads/neovide.dmg\n\n/Volumes/N/Neovide.app\n";
        assert_eq!(
            bundle_paths(out),
            [
                PathBuf::from("/Applications/Neovide.app"),
                PathBuf::from("/Volumes/N/Neovide.app")
            ]
        );
    }

    #[test]
    fn query_quotes_plain_identifiers() {
        assert_eq!(
            bundle_query("com.neovide.neovide").unwrap(),
            "kMDItemCFBundleIdentifier == 'com.neovide.neovide'"
        );
        assert!(bundle_query("org.example-app_2").is_ok());
    }

    #[test]
    fn identifiers_that_break_the_query_are_refused() {
        for id in ["org.example'x", "a' || kMDItemFSName == '*", "a b", "*", ""] {
            assert!(bundle_query(id).is_err(), "{id:?} accepted");
        }
    }

    #[test]
    fn refused_identifier_never_reaches_the_tool() {
        // `echo` would print the query back; a refused identifier must not run it.
        let reg = SpotlightRegistry {
            program: PathBuf::from("/bin/echo"),
        };
        assert_eq!(reg.locate("x' || kMDItemFSName == 'Evil.app"), None);
        assert!(reg.query("x' || kMDItemFSName == 'Evil.app").is_err());
    }

    #[test]
    fn missing_tool_means_not_found() {
        let reg = SpotlightRegistry {
            program: PathBuf::from("/nonexistent/mdfind"),
        };
        assert_eq!(reg.locate("com.neovide.neovide"), None);
    }
}
