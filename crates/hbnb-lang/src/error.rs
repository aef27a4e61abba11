//! Error types for parsing.

use crate::span::Span;
use thiserror::Error;

/// Kinds of parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Neither a known command nor a method call.
    UnknownSyntax,
    /// A quoted word was never closed.
    UnclosedQuote,
    /// A backslash ended the line.
    DanglingEscape,
}

/// Error during lexing/parsing.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// Source span where the error occurred.
    pub span: Span,
    /// Error kind for programmatic handling.
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(message: impl Into<String>, span: Span, kind: ParseErrorKind) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
        }
    }

    /// The whole line is unrecognized.
    pub fn unknown_syntax(line: &str) -> Self {
        Self::new(
            format!("Unknown syntax: {}", line.trim()),
            Span::new(0, line.len()),
            ParseErrorKind::UnknownSyntax,
        )
    }

    /// A lexing failure at `span`, classified by the offending text.
    pub fn lexical(source: &str, span: Span) -> Self {
        let text = span.slice(source);
        if text.starts_with('\\') {
            Self::new("no escaped character", span, ParseErrorKind::DanglingEscape)
        } else {
            Self::new("no closing quotation", span, ParseErrorKind::UnclosedQuote)
        }
    }

    /// Format the error with the offending line and a caret under the span.
    pub fn format_with_source(&self, source: &str) -> String {
        let start = self.span.start.min(source.len());
        let width = if self.span.is_empty() { 1 } else { self.span.len() };
        let mut result = format!("error[{:?}]: {}\n", self.kind, self.message);
        result.push_str(&format!("   |\n  1| {}\n   | ", source));
        result.push_str(&" ".repeat(source[..start].chars().count()));
        result.push('^');
        result.push_str(&"~".repeat(width - 1));
        result.push('\n');
        result
    }
}
