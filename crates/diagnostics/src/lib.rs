//! Diagnostics for the enumstr generator.
//!
//! Provides [`Diagnostic`], [`Severity`] and [`Span`] used to report fatal
//! errors and skipped constructs from the grammar adapter and the enum
//! walker. Diagnostic codes are defined in the [`codes`] module.

#![warn(missing_docs)]

/// Diagnostic ID constants.
pub mod codes;

use std::borrow::Cow;
use std::collections::BTreeMap;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Severity {
    /// Hard error; generation stops.
    Error,
    /// The construct was skipped and generation continued.
    Warn,
    /// Informational note.
    Info,
}

/// Byte span in the source input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
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

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A diagnostic message produced while generating enum strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Unique diagnostic code (e.g., `"ENUM2004"`).
    pub id: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable diagnostic message.
    pub message: String,
    /// Optional byte span in the source input that this diagnostic relates to.
    pub span: Option<Span>,
    /// Free-form key/value details, e.g. the offending node's rule and
    /// position. `BTreeMap` keeps rendering order deterministic.
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    /// Create a diagnostic with the given fields.
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        severity: Severity,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// Shorthand for an `Error` diagnostic.
    pub fn error(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Error, message, span)
    }

    /// Shorthand for a `Warn` diagnostic.
    pub fn warn(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Warn, message, span)
    }

    /// Shorthand for an `Info` diagnostic.
    pub fn info(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Info, message, span)
    }

    /// Attach context metadata (builder pattern).
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Returns the human-readable explanation for this diagnostic's code, if available.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.id)
    }

    /// Whether this diagnostic aborts generation.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warn => write!(f, "warn"),
            Severity::Info => write!(f, "info"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.id, self.message)
    }
}

/// Returns the human-readable explanation for a diagnostic code, if known.
pub fn explain(id: &str) -> Option<&'static str> {
    let text = match id {
        codes::GRAMMAR_INVALID => {
            "The grammar file could not be compiled. Check the PEG syntax and that every referenced rule is defined."
        }
        codes::GRAMMAR_NO_ROOT => {
            "Grammars must define a `root` rule; it is the entry point used for every source file."
        }
        codes::PARSE_FAILED => {
            "The source file does not match the grammar. With the bundled grammar this usually means the file is not text."
        }
        codes::MISSING_OPEN_BRACE => "An enum construct must open its member list with `{`.",
        codes::MISSING_CLOSE_BRACE => "An enum construct must close its member list with `}`.",
        codes::MISSING_TYPE_NAME => {
            "`typedef enum { ... } Name;` needs the type alias after the closing brace; generated symbols are named after it."
        }
        codes::MISSING_SEMICOLON => "An enum construct must be terminated by `;`.",
        codes::MEMBER_WITHOUT_NAME => "Every enum member must start with an identifier.",
        codes::MISSING_MEMBER_VALUE => "An `=` inside an enum member must be followed by an integer literal.",
        codes::UNEXPECTED_NODE => {
            "The grammar produced a node the enum walker does not understand. The grammar and the walker disagree about the shape of enum constructs."
        }
        codes::UNNAMED_ENUM => {
            "Plain `enum { ... };` declarations without a tag have no name to build symbols from, so they are skipped."
        }
        codes::EMPTY_ENUM => "Enum constructs without members produce no lookup table and are skipped.",
        _ => return None,
    };
    Some(text)
}
