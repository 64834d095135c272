//! Diagnostics for the scenario4d front end.
//!
//! Provides [`Diagnostic`], [`Severity`], [`Span`], and [`LineIndex`] types
//! used to report lexical and syntax failures from the scenario parser.
//! Diagnostic codes are defined in the [`codes`] module.

#![warn(missing_docs)]

pub mod codes;

pub use codes::explain;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// ── LineIndex ────────────────────────────────────────────────────────────

/// Maps byte offsets in a source string to line and column positions.
///
/// Lines are **1-indexed** and columns **0-indexed**, matching the positions
/// the scenario tooling has always printed (`L3:12`). The index is built in
/// O(n) and each lookup is O(log n) via binary search.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of the start of each line; `line_starts[0]` is always 0.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Build a `LineIndex` from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0usize];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset to a `(line, column)` pair (1-indexed line,
    /// 0-indexed column).
    ///
    /// Offsets past the end of the source land on the last line with the
    /// column clamped to the remaining distance.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next.saturating_sub(1),
        };
        let col = offset.saturating_sub(self.line_starts[line]);
        (line + 1, col)
    }

    /// Total number of lines (at least 1, even for empty input).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

// ── Severity / Span ──────────────────────────────────────────────────────

/// Severity level for a diagnostic or validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocking error — the scenario cannot be used.
    Error,
    /// Advisory only — the scenario is usable but suspicious.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Byte span in the source input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first character (0-based).
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }

    /// Create a zero-width span at the given position.
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }
}

// ── Diagnostic ───────────────────────────────────────────────────────────

/// A diagnostic message produced by the lexer or parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Diagnostic code (e.g. `"SCN1002"`), see [`codes`].
    pub code: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Byte span in the source input this diagnostic points at.
    pub span: Span,
}

impl Diagnostic {
    /// Shorthand for an `Error` diagnostic.
    pub fn error(code: impl Into<Cow<'static, str>>, message: impl Into<String>, span: Span) -> Self {
        Self {
            code: code.into(),
            severity: Severity::Error,
            message: message.into(),
            span,
        }
    }

    /// Shorthand for a `Warning` diagnostic.
    pub fn warning(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            code: code.into(),
            severity: Severity::Warning,
            message: message.into(),
            span,
        }
    }

    /// `true` when this diagnostic was produced by the lexer (codes `SCN01xx`).
    pub fn is_lexical(&self) -> bool {
        self.code.starts_with("SCN01")
    }

    /// Render this diagnostic with its line/column position, in the
    /// `L{line}:{col} ({stage}) – {message}` form printed by the tooling.
    pub fn located(&self, index: &LineIndex) -> String {
        let (line, col) = index.line_col(self.span.start);
        let stage = if self.is_lexical() { "lexer" } else { "parser" };
        format!("L{line}:{col} ({stage}) – {}", self.message)
    }

    /// Returns the human-readable explanation for this diagnostic's code, if known.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.code)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── LineIndex ────────────────────────────────────────────────────────

    #[test]
    fn line_index_single_line() {
        let idx = LineIndex::new("hello");
        assert_eq!(idx.line_count(), 1);
        assert_eq!(idx.line_col(0), (1, 0));
        assert_eq!(idx.line_col(4), (1, 4));
    }

    #[test]
    fn line_index_two_lines() {
        let idx = LineIndex::new("ab\ncd");
        assert_eq!(idx.line_count(), 2);
        assert_eq!(idx.line_col(1), (1, 1)); // 'b'
        assert_eq!(idx.line_col(3), (2, 0)); // 'c'
        assert_eq!(idx.line_col(4), (2, 1)); // 'd'
    }

    #[test]
    fn line_index_empty_input() {
        let idx = LineIndex::new("");
        assert_eq!(idx.line_count(), 1);
        assert_eq!(idx.line_col(0), (1, 0));
    }

    #[test]
    fn line_index_multibyte_utf8() {
        // 'é' is 2 bytes in UTF-8
        let idx = LineIndex::new("é\na");
        assert_eq!(idx.line_count(), 2);
        assert_eq!(idx.line_col(0), (1, 0));
        assert_eq!(idx.line_col(3), (2, 0)); // 'a'
    }

    #[test]
    fn line_index_offset_past_end() {
        let idx = LineIndex::new("hi");
        let (line, col) = idx.line_col(100);
        assert_eq!(line, 1);
        assert_eq!(col, 100);
    }

    // ── Span ────────────────────────────────────────────────────────────

    #[test]
    fn span_empty() {
        let s = Span::empty(7);
        assert_eq!(s.start, 7);
        assert_eq!(s.end, 7);
    }

    #[test]
    #[should_panic(expected = "Span end (3) < start (5)")]
    fn span_new_inverted_panics() {
        Span::new(5, 3);
    }

    // ── Diagnostic ──────────────────────────────────────────────────────

    #[test]
    fn diagnostic_error_constructor() {
        let d = Diagnostic::error(codes::PARSER_BAD_ARITY, "too many args", Span::new(0, 5));
        assert_eq!(d.code, "SCN1003");
        assert_eq!(d.severity, Severity::Error);
        assert_eq!(d.message, "too many args");
    }

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic::error(codes::PARSER_UNKNOWN_COMMAND, "unknown command", Span::empty(0));
        assert_eq!(format!("{d}"), "error[SCN1002]: unknown command");
    }

    #[test]
    fn diagnostic_located_lexer_stage() {
        let src = "#comment,\"oops\n";
        let idx = LineIndex::new(src);
        let d = Diagnostic::error(codes::LEX_UNTERMINATED_STRING, "unterminated string", Span::new(9, 14));
        assert_eq!(d.located(&idx), "L1:9 (lexer) – unterminated string");
    }

    #[test]
    fn diagnostic_located_parser_stage() {
        let idx = LineIndex::new("#foo");
        let d = Diagnostic::error(codes::PARSER_UNKNOWN_COMMAND, "unknown command 'foo'", Span::new(1, 4));
        assert_eq!(d.located(&idx), "L1:1 (parser) – unknown command 'foo'");
    }

    #[test]
    fn all_codes_have_explanations() {
        let all = [
            codes::LEX_UNTERMINATED_STRING,
            codes::LEX_UNEXPECTED_CHAR,
            codes::PARSER_EXPECTED_COMMAND,
            codes::PARSER_UNKNOWN_COMMAND,
            codes::PARSER_BAD_ARITY,
            codes::PARSER_BAD_ARGUMENT,
            codes::PARSER_BAD_VARIANT,
            codes::PARSER_EMPTY_INPUT,
        ];
        for code in &all {
            assert!(
                explain(code).is_some(),
                "diagnostic code {code} has no explain() entry"
            );
        }
        assert!(explain("SCN9999").is_none());
    }

    #[test]
    fn diagnostic_serde_roundtrip() {
        let d = Diagnostic::error(codes::LEX_UNEXPECTED_CHAR, "unexpected character", Span::new(10, 11));
        let json = serde_json::to_string(&d).unwrap();
        let d2: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(d, d2);
    }
}
