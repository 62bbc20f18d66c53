//! Pipeline progress on stderr.
//!
//! Stdout carries command output (`insights summary`, `insights parse`), so
//! progress never goes there. Each pipeline step opens with a [`Stage`]
//! header; the lines that follow are indented under it:
//!
//! ```text
//! 📖 Reading catalogue
//!    ✓ Detected encoding: utf-8
//!    ✓ Read 8807 rows
//! 🔄 Aggregating
//!    ⚠️ 3 rows skipped (unparseable release year)
//!       Row 12, field 'release_year' (value 'n/a'): not an integer (...)
//! ```
//!
//! [`set_quiet`] silences everything except errors.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);

/// Pipeline steps, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Aggregate,
    Render,
    Summarise,
    Write,
}

impl Stage {
    fn icon(self) -> &'static str {
        match self {
            Stage::Load => "📖",
            Stage::Aggregate => "🔄",
            Stage::Render => "📊",
            Stage::Summarise => "📝",
            Stage::Write => "💾",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Stage::Load => "Reading catalogue",
            Stage::Aggregate => "Aggregating",
            Stage::Render => "Rendering charts",
            Stage::Summarise => "Building summary",
            Stage::Write => "Writing artifacts",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon(), self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// One progress line under the current stage.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Extra nesting below the stage header
    pub indent: u8,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            indent: 0,
        }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.level {
            LogLevel::Info => "",
            LogLevel::Success => "✓ ",
            LogLevel::Warning => "⚠️ ",
            LogLevel::Error => "❌ ",
        };
        let indent = "   ".repeat(self.indent as usize + 1);
        write!(f, "{}{}{}", indent, marker, self.message)
    }
}

/// Silence progress output. Errors are still printed.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

fn should_print(level: LogLevel, quiet: bool) -> bool {
    !quiet || level == LogLevel::Error
}

fn emit(entry: LogEntry) {
    if should_print(entry.level, is_quiet()) {
        eprintln!("{}", entry);
    }
}

/// Open a pipeline stage.
pub fn log_stage(stage: Stage) {
    if !is_quiet() {
        eprintln!("{}", stage);
    }
}

pub fn log_info(msg: impl Into<String>) {
    emit(LogEntry::new(LogLevel::Info, msg));
}

pub fn log_success(msg: impl Into<String>) {
    emit(LogEntry::new(LogLevel::Success, msg));
}

pub fn log_warning(msg: impl Into<String>) {
    emit(LogEntry::new(LogLevel::Warning, msg));
}

/// Top-level failure, printed without stage indentation.
pub fn log_error(msg: impl Into<String>) {
    if should_print(LogLevel::Error, is_quiet()) {
        eprintln!("❌ {}", msg.into());
    }
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    emit(LogEntry::new(LogLevel::Info, msg).with_indent(indent));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_header() {
        assert_eq!(Stage::Load.to_string(), "📖 Reading catalogue");
        assert_eq!(Stage::Write.to_string(), "💾 Writing artifacts");
    }

    #[test]
    fn test_entry_nests_under_stage() {
        let entry = LogEntry::new(LogLevel::Success, "Read 4 rows");
        assert_eq!(entry.to_string(), "   ✓ Read 4 rows");

        let nested = LogEntry::new(LogLevel::Info, "out/top_genres.svg").with_indent(1);
        assert_eq!(nested.to_string(), "      out/top_genres.svg");
    }

    #[test]
    fn test_warning_marker() {
        let entry = LogEntry::new(LogLevel::Warning, "2 rows skipped");
        assert_eq!(entry.to_string(), "   ⚠️ 2 rows skipped");
    }

    #[test]
    fn test_quiet_keeps_errors() {
        assert!(should_print(LogLevel::Info, false));
        assert!(!should_print(LogLevel::Success, true));
        assert!(!should_print(LogLevel::Warning, true));
        assert!(should_print(LogLevel::Error, true));
    }
}
