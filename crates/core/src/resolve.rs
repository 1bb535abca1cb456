//! Member value resolution with C enum semantics.

/// A member as written in the source: its name and optional literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberDecl<'a> {
    /// Member identifier.
    pub name: &'a str,
    /// Literal text after `=`, if any.
    pub literal: Option<&'a str>,
}

impl<'a> MemberDecl<'a> {
    /// Member without an explicit value.
    pub fn implicit(name: &'a str) -> Self {
        Self {
            name,
            literal: None,
        }
    }

    /// Member with an explicit literal.
    pub fn explicit(name: &'a str, literal: &'a str) -> Self {
        Self {
            name,
            literal: Some(literal),
        }
    }
}

/// A member with its final value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Member identifier.
    pub name: String,
    /// Resolved value.
    pub value: i64,
}

/// Resolve member values left to right.
///
/// An explicit literal sets the value and becomes the baseline; any other
/// member is one more than its predecessor, the first one being 0.
/// Duplicates and out-of-order values are kept as written.
pub fn resolve(members: &[MemberDecl<'_>]) -> Vec<Member> {
    let mut next = 0i64;
    members
        .iter()
        .map(|m| {
            let value = m.literal.map_or(next, parse_int_literal);
            next = value.saturating_add(1);
            Member {
                name: m.name.to_string(),
                value,
            }
        })
        .collect()
}

/// Parse a C integer literal the way `strtol(s, NULL, 0)` does.
///
/// Accepts surrounding whitespace, an optional sign, `0x` hex, leading-`0`
/// octal and decimal digits. Parsing stops at the first character that is
/// not a digit of the base (so `10u` is 10). No digits yields 0; overflow
/// saturates.
pub fn parse_int_literal(text: &str) -> i64 {
    let s = text.trim();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if hex.starts_with(|c: char| c.is_ascii_hexdigit()) {
            (16, hex)
        } else {
            (8, "0")
        }
    } else if s.len() > 1 && s.starts_with('0') {
        (8, &s[1..])
    } else {
        (10, s)
    };

    let mut value: i64 = 0;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else {
            break;
        };
        value = value.saturating_mul(radix as i64).saturating_add(d as i64);
    }
    if negative { value.saturating_neg() } else { value }
}
