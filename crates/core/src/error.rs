//! Error type for grammar loading, parsing and enum walking.

use std::collections::BTreeMap;

use enumstr_diagnostics::{Diagnostic, Span, codes};

use crate::grammar::node::Node;

/// Fatal conditions raised by the core library.
///
/// Every variant stops generation for the current run. Recoverable
/// situations (unnamed or empty enums) are reported as warning
/// [`Diagnostic`]s instead.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The grammar text could not be compiled.
    #[error("invalid grammar: {message}")]
    Grammar {
        /// Messages reported by the grammar compiler.
        message: String,
    },

    /// The grammar compiled but has no entry rule.
    #[error("grammar has no `{rule}` rule")]
    MissingEntryRule {
        /// The rule that was looked for.
        rule: String,
    },

    /// The source text does not match the grammar.
    #[error("parse error at {line}:{col}: {message}")]
    Parse {
        /// Message from the parser.
        message: String,
        /// Where parsing failed.
        span: Span,
        /// 1-based line.
        line: usize,
        /// 1-based column.
        col: usize,
    },

    /// The grammar matched an enum construct whose node shape the walker
    /// does not accept.
    #[error("{message} at {line}:{col} <{node}>")]
    Structure {
        /// Diagnostic code identifying the mismatch.
        code: &'static str,
        /// What was wrong.
        message: String,
        /// Offending region.
        span: Span,
        /// 1-based line.
        line: usize,
        /// 1-based column.
        col: usize,
        /// Formatted offending node (see [`Node::describe`]).
        node: String,
    },
}

impl Error {
    /// Build a structural error pointing at `node`.
    pub(crate) fn structure(code: &'static str, message: impl Into<String>, node: &Node<'_>) -> Self {
        Error::Structure {
            code,
            message: message.into(),
            span: node.span,
            line: node.line,
            col: node.col,
            node: node.describe(),
        }
    }

    /// Diagnostic code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Grammar { .. } => codes::GRAMMAR_INVALID,
            Error::MissingEntryRule { .. } => codes::GRAMMAR_NO_ROOT,
            Error::Parse { .. } => codes::PARSE_FAILED,
            Error::Structure { code, .. } => *code,
        }
    }

    /// Source span of the error, when it refers to the parsed source.
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::Parse { span, .. } | Error::Structure { span, .. } => Some(*span),
            Error::Grammar { .. } | Error::MissingEntryRule { .. } => None,
        }
    }

    /// Convert into an error [`Diagnostic`] for rendering.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (message, context) = match self {
            Error::Structure { message, node, .. } => (
                message.clone(),
                Some(BTreeMap::from([("node".to_string(), node.clone())])),
            ),
            Error::Parse { message, .. } => (message.clone(), None),
            other => (other.to_string(), None),
        };
        let diag = Diagnostic::error(self.code(), message, self.span());
        match context {
            Some(ctx) => diag.with_context(ctx),
            None => diag,
        }
    }
}
