//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection.
//! Every code listed here has an entry in [`crate::explain`].

// ── Configuration (ENUM0xxx) ────────────────────────────────────────────

/// The grammar text was rejected by the PEG engine.
pub const GRAMMAR_INVALID: &str = "ENUM0001";
/// The grammar has no `root` entry rule.
pub const GRAMMAR_NO_ROOT: &str = "ENUM0002";

// ── Parsing (ENUM1xxx) ──────────────────────────────────────────────────

/// The source text does not match the grammar.
pub const PARSE_FAILED: &str = "ENUM1001";

// ── Enum construct shape (ENUM2xxx) ─────────────────────────────────────

/// An enum construct has no `{` after its name.
pub const MISSING_OPEN_BRACE: &str = "ENUM2001";
/// An enum construct has no `}` after its member list.
pub const MISSING_CLOSE_BRACE: &str = "ENUM2002";
/// A `typedef enum` has no type alias after its closing brace.
pub const MISSING_TYPE_NAME: &str = "ENUM2003";
/// An enum construct is not terminated by `;`.
pub const MISSING_SEMICOLON: &str = "ENUM2004";
/// An enum member does not start with an identifier.
pub const MEMBER_WITHOUT_NAME: &str = "ENUM2005";
/// An enum member has `=` but no integer literal.
pub const MISSING_MEMBER_VALUE: &str = "ENUM2006";
/// A node the walker does not understand appeared inside an enum construct.
pub const UNEXPECTED_NODE: &str = "ENUM2007";

// ── Skipped constructs (ENUM3xxx) ───────────────────────────────────────

/// A plain `enum` without a tag name was skipped.
pub const UNNAMED_ENUM: &str = "ENUM3001";
/// An enum construct without members was skipped.
pub const EMPTY_ENUM: &str = "ENUM3002";
