//! Terminal dimensions.
//!
//! Sizes come from the controlling terminal when there is one, then from the
//! `COLUMNS` / `ROWS` environment variables, then from fixed defaults.

use std::env;

use tracing::debug;

/// Width used when neither the terminal nor `COLUMNS` provide one.
pub const DEFAULT_WIDTH: usize = 80;

/// Height used when neither the terminal nor `ROWS` provide one.
pub const DEFAULT_HEIGHT: usize = 25;

fn detect_terminal_size() -> Option<(usize, usize)> {
    terminal_size::terminal_size().map(|(w, h)| (w.0 as usize, h.0 as usize))
}

fn env_dimension(name: &str) -> Option<usize> {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
}

fn resolve(detected: Option<usize>, var: &str, default: usize) -> usize {
    if let Some(n) = detected.filter(|&n| n > 0) {
        return n;
    }
    match env_dimension(var) {
        Some(n) => n,
        None => {
            debug!(var, default, "terminal size unavailable, using default");
            default
        }
    }
}

/// The width of the terminal window in columns, defaulting to 80.
pub fn width() -> usize {
    resolve(detect_terminal_size().map(|(w, _)| w), "COLUMNS", DEFAULT_WIDTH)
}

/// The height of the terminal window in rows, defaulting to 25.
pub fn height() -> usize {
    resolve(detect_terminal_size().map(|(_, h)| h), "ROWS", DEFAULT_HEIGHT)
}

/// Source of the terminal width for components that lay text out.
pub trait TerminalWidth {
    fn current_width(&self) -> usize;
}

/// Reads the live terminal width on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct LiveTerminal;

impl TerminalWidth for LiveTerminal {
    fn current_width(&self) -> usize {
        width()
    }
}

/// A width that never changes, useful for tests and non-interactive output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedWidth(pub usize);

impl TerminalWidth for FixedWidth {
    fn current_width(&self) -> usize {
        self.0
    }
}
