// src/diagnostics.rs

//! User-facing diagnostics on standard error.
//!
//! These are not log records: each failure produces exactly one line here,
//! independent of the `tracing` level. When stderr is a terminal and
//! `NO_COLOR` is unset the line is printed in red.

use std::io::{self, IsTerminal, Write};

const SGR_RED: &str = "\x1b[31m";
const SGR_NORMAL: &str = "\x1b[0m";

pub struct Diagnostics<W> {
    out: W,
    color: bool,
}

impl Diagnostics<io::Stderr> {
    /// Diagnostics on the process' stderr. `no_color` is whether `NO_COLOR`
    /// is set.
    pub fn stderr(no_color: bool) -> Self {
        let err = io::stderr();
        let color = !no_color && err.is_terminal();
        Self::new(err, color)
    }
}

impl<W: Write> Diagnostics<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn report(&mut self, message: impl std::fmt::Display) {
        let line = if self.color {
            format!("{SGR_RED}{message}{SGR_NORMAL}\n")
        } else {
            format!("{message}\n")
        };
        // Nowhere left to report a failing stderr.
        let _ = self.out.write_all(line.as_bytes());
        let _ = self.out.flush();
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
