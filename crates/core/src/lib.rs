//! enumstr core library.
//!
//! Finds `enum` and `typedef enum` declarations in C/C++ source text with a
//! PEG grammar, resolves their member values with C semantics and generates
//! string tables plus bounds-checked accessor functions. The main entry
//! points are [`Grammar`] for loading a grammar, [`process_source`] for one
//! source file and [`emit_start`]/[`emit_end`] for the document frame.

#![warn(missing_docs)]

/// Generation settings and output mode.
pub mod context;
/// Per-file processing.
pub mod driver;
/// Array and accessor emission.
pub mod emit;
/// Library error type.
pub mod error;
/// Document header and footer.
pub mod frame;
/// Grammar loading, parsing and parse-tree nodes.
pub mod grammar;
/// Member value resolution.
pub mod resolve;
/// Bundled demonstration source.
pub mod sample;
/// Enum construct validation and extraction.
pub mod walk;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Configuration
pub use context::{EmitContext, OutputMode};

// Pipeline
pub use driver::{FileReport, process_source, process_tree};
pub use frame::{FrameOptions, emit_end, emit_start};
pub use grammar::node::{Node, NodeKind};
pub use grammar::parser::{BUNDLED_GRAMMAR, Grammar};
pub use walk::ResolvedEnum;

// Values
pub use resolve::{Member, parse_int_literal};

// Errors and diagnostics (re-exported from the diagnostics crate)
pub use enumstr_diagnostics::{Diagnostic, Severity, Span, codes};
pub use error::Error;
