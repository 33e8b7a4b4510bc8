//! Colorized call traces and error chains.
//!
//! A trace is a list of call sites, each a [`TraceEntry`] (`path`, `line`,
//! `label`) or a raw string in the form `path:line:in 'label'`. The
//! [`TraceFormatter`] renders them one per line with the file name and line
//! number highlighted, and renders errors together with their traces and
//! causes.
//!
//! ```rust
//! use mb_util::ansi::strip_ansi;
//! use mb_util::trace::{TraceFormatter, TraceLine};
//!
//! let formatter = TraceFormatter::new().home(None::<String>);
//! let text = formatter
//!     .format_entries([TraceLine::from("src/main.rs:12:in 'run'")])
//!     .unwrap();
//! assert_eq!(strip_ansi(&text), "src/main.rs:12:in 'run'");
//! ```

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TraceFormatError};

/// Placeholder shown for an error that carries no trace.
pub const NO_TRACE: &str = "[no trace]";

static TRACE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<path>.*):(?P<line>\d+):in [`'](?P<label>.*)'$")
        .expect("trace line pattern is valid")
});

/// One call site.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraceEntry {
    pub path: String,
    pub line: u32,
    pub label: String,
}

impl TraceEntry {
    pub fn new(path: impl Into<String>, line: u32, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line,
            label: label.into(),
        }
    }

    /// Parses `path:line:in 'label'`. The older `` in `label' `` quoting is
    /// also accepted.
    pub fn parse(s: &str) -> std::result::Result<Self, TraceFormatError> {
        let caps = TRACE_LINE
            .captures(s)
            .ok_or_else(|| TraceFormatError::new(s))?;
        let line = caps["line"]
            .parse()
            .map_err(|_| TraceFormatError::new(s))?;
        Ok(Self::new(&caps["path"], line, &caps["label"]))
    }
}

impl FromStr for TraceEntry {
    type Err = TraceFormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:in '{}'", self.path, self.line, self.label)
    }
}

/// A trace line, either already structured or still raw text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceLine {
    Entry(TraceEntry),
    Raw(String),
}

impl TraceLine {
    /// The text matched against exclude patterns.
    pub fn raw_text(&self) -> String {
        match self {
            TraceLine::Entry(entry) => entry.to_string(),
            TraceLine::Raw(raw) => raw.clone(),
        }
    }

    pub fn to_entry(&self) -> std::result::Result<TraceEntry, TraceFormatError> {
        match self {
            TraceLine::Entry(entry) => Ok(entry.clone()),
            TraceLine::Raw(raw) => TraceEntry::parse(raw),
        }
    }
}

impl From<TraceEntry> for TraceLine {
    fn from(entry: TraceEntry) -> Self {
        TraceLine::Entry(entry)
    }
}

impl From<&str> for TraceLine {
    fn from(raw: &str) -> Self {
        TraceLine::Raw(raw.to_string())
    }
}

impl From<String> for TraceLine {
    fn from(raw: String) -> Self {
        TraceLine::Raw(raw)
    }
}

/// An error that can be shown with its trace and cause chain.
pub trait TracedError {
    /// Short name of the error's kind, e.g. `ParseError`.
    fn type_name(&self) -> &str;
    fn message(&self) -> String;
    /// `None` when the error was never given a trace.
    fn trace(&self) -> Option<&[TraceLine]>;
    fn cause(&self) -> Option<&dyn TracedError>;
}

/// An owned error description implementing [`TracedError`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorReport {
    type_name: String,
    message: String,
    trace: Option<Vec<TraceLine>>,
    cause: Option<Box<ErrorReport>>,
}

impl ErrorReport {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            trace: None,
            cause: None,
        }
    }

    /// Describes `err` and its `source()` chain.
    ///
    /// The outer error is named after its Rust type; sources are only known
    /// as `dyn Error` and are named `Error`.
    pub fn from_error<E: std::error::Error + 'static>(err: &E) -> Self {
        let full_name = std::any::type_name::<E>();
        let base = full_name.split('<').next().unwrap_or(full_name);
        let name = base.rsplit("::").next().unwrap_or(base);

        let mut sources = Vec::new();
        let mut next = err.source();
        while let Some(source) = next {
            sources.push(source.to_string());
            next = source.source();
        }

        let cause = sources
            .into_iter()
            .rev()
            .fold(None, |inner: Option<ErrorReport>, message| {
                let mut report = ErrorReport::new("Error", message);
                report.cause = inner.map(Box::new);
                Some(report)
            });

        let mut report = ErrorReport::new(name, err.to_string());
        report.cause = cause.map(Box::new);
        report
    }

    pub fn with_trace<T: Into<TraceLine>>(mut self, trace: impl IntoIterator<Item = T>) -> Self {
        self.trace = Some(trace.into_iter().map(Into::into).collect());
        self
    }

    pub fn caused_by(mut self, cause: ErrorReport) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}

impl TracedError for ErrorReport {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn trace(&self) -> Option<&[TraceLine]> {
        self.trace.as_deref()
    }

    fn cause(&self) -> Option<&dyn TracedError> {
        self.cause.as_deref().map(|c| c as &dyn TracedError)
    }
}

/// Renders traces and errors as colorized text.
#[derive(Clone, Debug)]
pub struct TraceFormatter {
    exclude: Option<Regex>,
    prefix: String,
    home: Option<String>,
    include_causes: bool,
}

impl Default for TraceFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceFormatter {
    /// A formatter that keeps every line, adds no prefix, follows causes, and
    /// abbreviates the `HOME` directory to `~`.
    pub fn new() -> Self {
        Self {
            exclude: None,
            prefix: String::new(),
            home: std::env::var("HOME")
                .ok()
                .filter(|h| !h.is_empty() && h != "/"),
            include_causes: true,
        }
    }

    /// Drops lines whose raw text matches `pattern`.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// Text placed before every trace line.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Directory shown as `~`, or `None` to show paths unchanged.
    pub fn home(mut self, home: Option<impl Into<String>>) -> Self {
        self.home = home.map(Into::into);
        self
    }

    /// Whether [`format_error`](Self::format_error) follows error causes.
    pub fn include_causes(mut self, include: bool) -> Self {
        self.include_causes = include;
        self
    }

    /// One colorized line per call site, joined by newlines.
    pub fn format_entries<T: Into<TraceLine>>(
        &self,
        lines: impl IntoIterator<Item = T>,
    ) -> std::result::Result<String, TraceFormatError> {
        let mut out = Vec::new();
        for line in lines {
            let line = line.into();
            if let Some(exclude) = &self.exclude {
                if exclude.is_match(&line.raw_text()) {
                    continue;
                }
            }
            out.push(self.format_entry(&line.to_entry()?));
        }
        Ok(out.join("\n"))
    }

    fn format_entry(&self, entry: &TraceEntry) -> String {
        let (dir, sep, name) = match entry.path.rfind('/') {
            Some(idx) => (&entry.path[..idx], "/", &entry.path[idx + 1..]),
            None => ("", "", entry.path.as_str()),
        };
        let dir = self.abbreviate_home(dir);

        format!(
            "{}\x1b[38;5;240m{}{}\x1b[36m{}\x1b[38;5;240m:\x1b[1;34m{}\x1b[0;38;5;240m:\x1b[33min '\x1b[1;35m{}\x1b[0;33m'\x1b[0m",
            self.prefix, dir, sep, name, entry.line, entry.label
        )
    }

    fn abbreviate_home(&self, dir: &str) -> String {
        if let Some(home) = &self.home {
            if dir == home {
                return "~".to_string();
            }
            if let Some(rest) = dir.strip_prefix(home.as_str()) {
                if rest.starts_with('/') {
                    return format!("~{rest}");
                }
            }
        }
        dir.to_string()
    }

    /// Renders an error's type, message and trace, followed by its causes.
    ///
    /// Each cause is introduced by `...caused by` and indented one tab deeper
    /// than the error it caused. A cause already shown is not shown again,
    /// so cyclic chains terminate. Errors are identified by address and type
    /// name together, since a cause stored inline at the start of its parent
    /// shares the parent's address.
    pub fn format_error(
        &self,
        error: &dyn TracedError,
    ) -> std::result::Result<String, TraceFormatError> {
        let mut seen = HashSet::new();
        self.format_error_inner(error, &mut seen)
    }

    fn format_error_inner(
        &self,
        error: &dyn TracedError,
        seen: &mut HashSet<ErrorIdentity>,
    ) -> std::result::Result<String, TraceFormatError> {
        seen.insert(identity(error));

        let trace = match error.trace() {
            Some(lines) => self.format_entries(lines.iter().cloned())?,
            None => NO_TRACE.to_string(),
        };

        let mut out = format!(
            "\x1b[31m#<{}: \x1b[1m{}\x1b[22m:\n\t{}\n\x1b[0;31m>\x1b[0m",
            error.type_name(),
            error.message(),
            trace.replace('\n', "\n\t")
        );

        if self.include_causes {
            if let Some(cause) = error.cause() {
                if !seen.contains(&identity(cause)) {
                    let inner = self.format_error_inner(cause, seen)?;
                    out.push_str("\n\t\x1b[33m...caused by\x1b[0m ");
                    out.push_str(&inner.replace('\n', "\n\t"));
                }
            }
        }

        Ok(out)
    }
}

type ErrorIdentity = (*const (), String);

fn identity(error: &dyn TracedError) -> ErrorIdentity {
    (
        std::ptr::from_ref(error).cast::<()>(),
        error.type_name().to_string(),
    )
}
