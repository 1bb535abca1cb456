//! Generation settings shared by every emitted enum.

/// Default prefix of the per-enum string arrays.
pub const DEFAULT_ARRAY_PREFIX: &str = "_str_";
/// Default prefix of the per-enum accessor functions.
pub const DEFAULT_FN_PREFIX: &str = "EnumStr_";
/// Default name of the shared lookup helper.
pub const DEFAULT_HELPER: &str = "_EnumStr";
/// Default exclusive upper bound of emitted enum values.
pub const DEFAULT_MAX_ENUM_VALUE: i64 = 1024;

/// Output shape, chosen once per run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Full definitions: arrays, accessor bodies and the shared helper.
    #[default]
    Body,
    /// Declarations only, wrapped in an include guard derived from `name`.
    Header {
        /// Name the include guard is derived from (usually the header path).
        name: String,
    },
}

impl OutputMode {
    /// Whether only declarations are emitted.
    pub fn is_header(&self) -> bool {
        matches!(self, OutputMode::Header { .. })
    }
}

/// Immutable configuration passed down to the walker, emitter and framer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitContext {
    /// Prefix of the string arrays (`_str_Hello`).
    pub array_prefix: String,
    /// Prefix of the accessor functions (`EnumStr_Hello`).
    pub fn_prefix: String,
    /// Name of the shared bounds-checked lookup helper.
    pub helper: String,
    /// Values outside `[0, max_enum_value)` are left out of the arrays.
    pub max_enum_value: i64,
    /// Header or body output.
    pub mode: OutputMode,
    /// Copy each construct's source text into the output as a comment.
    pub dump_enums: bool,
    /// The helper is defined elsewhere; do not emit its definition.
    pub reuse_helper: bool,
}

impl Default for EmitContext {
    fn default() -> Self {
        Self {
            array_prefix: DEFAULT_ARRAY_PREFIX.to_string(),
            fn_prefix: DEFAULT_FN_PREFIX.to_string(),
            helper: DEFAULT_HELPER.to_string(),
            max_enum_value: DEFAULT_MAX_ENUM_VALUE,
            mode: OutputMode::Body,
            dump_enums: false,
            reuse_helper: false,
        }
    }
}

impl EmitContext {
    /// Whether `value` gets an entry in the string array.
    pub fn in_range(&self, value: i64) -> bool {
        (0..self.max_enum_value).contains(&value)
    }

    /// Name of the string array generated for `enum_name`.
    pub fn array_name(&self, enum_name: &str) -> String {
        format!("{}{}", self.array_prefix, enum_name)
    }

    /// Name of the accessor generated for `enum_name`.
    pub fn accessor_name(&self, enum_name: &str) -> String {
        format!("{}{}", self.fn_prefix, enum_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let ctx = EmitContext::default();
        assert_eq!(ctx.array_name("Hello"), "_str_Hello");
        assert_eq!(ctx.accessor_name("Hello"), "EnumStr_Hello");
        assert_eq!(ctx.helper, "_EnumStr");
        assert_eq!(ctx.max_enum_value, 1024);
        assert!(!ctx.mode.is_header());
    }

    #[test]
    fn range_is_half_open() {
        let ctx = EmitContext {
            max_enum_value: 10,
            ..Default::default()
        };
        assert!(ctx.in_range(0));
        assert!(ctx.in_range(9));
        assert!(!ctx.in_range(10));
        assert!(!ctx.in_range(-1));
    }
}
