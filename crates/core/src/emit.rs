//! Per-enum text emission: the string array and its accessor.
//!
//! Output is a pure function of the [`EmitContext`] and the
//! [`ResolvedEnum`]; nothing carries over between enums.

use crate::context::EmitContext;
use crate::walk::ResolvedEnum;

/// Emit everything generated for one enum.
///
/// Body mode writes the array followed by the accessor definition. Header
/// mode writes the accessor declaration only.
pub fn emit_enum(out: &mut String, e: &ResolvedEnum, ctx: &EmitContext) {
    if ctx.mode.is_header() {
        emit_accessor_decl(out, e, ctx);
    } else {
        emit_array(out, e, ctx);
        emit_accessor_def(out, e, ctx);
    }
}

/// `char *_str_Name[] = { [v] "member (v)", ... };`
///
/// Members are indexed by value, so holes and duplicates are expressed by
/// designated initializers. Out-of-range values are left out.
pub fn emit_array(out: &mut String, e: &ResolvedEnum, ctx: &EmitContext) {
    let array = ctx.array_name(&e.name);
    let mut in_range = e.members.iter().filter(|m| ctx.in_range(m.value)).peekable();

    if in_range.peek().is_none() {
        // An empty initializer list is not valid C.
        out.push_str(&format!("char *{array}[] = {{ 0 }}; \t// {array}\n\n"));
        return;
    }
    out.push_str(&format!("char *{array}[] = {{\n"));
    for m in in_range {
        out.push_str(&format!("\t[{v}] \"{} ({v})\",\n", m.name, v = m.value));
    }
    out.push_str(&format!("}}; \t// {array}\n\n"));
}

/// `char *EnumStr_Name(enum Name val)`
pub fn accessor_signature(e: &ResolvedEnum, ctx: &EmitContext) -> String {
    format!("char *{}({} val)", ctx.accessor_name(&e.name), e.param_type())
}

/// Accessor prototype terminated by `;`.
pub fn emit_accessor_decl(out: &mut String, e: &ResolvedEnum, ctx: &EmitContext) {
    out.push_str(&accessor_signature(e, ctx));
    out.push_str(";\n");
}

/// Accessor forwarding to the shared helper.
pub fn emit_accessor_def(out: &mut String, e: &ResolvedEnum, ctx: &EmitContext) {
    let array = ctx.array_name(&e.name);
    out.push_str(&format!(
        "{} {{ return {}({array}, (int)val, sizeof({array}) / sizeof(char*)); }}\n\n",
        accessor_signature(e, ctx),
        ctx.helper,
    ));
}

/// Copy a construct's source text into the output as line comments.
pub fn emit_source_comment(out: &mut String, source: &str) {
    out.push_str("// Source text section:\n");
    for line in source.lines() {
        if line.is_empty() {
            out.push_str("//\n");
        } else {
            out.push_str(&format!("// {line}\n"));
        }
    }
    out.push_str("// End of source section\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::OutputMode;
    use crate::resolve::Member;

    fn member(name: &str, value: i64) -> Member {
        Member {
            name: name.to_string(),
            value,
        }
    }

    fn hello() -> ResolvedEnum {
        ResolvedEnum {
            name: "Hello".to_string(),
            members: vec![member("Zero", 0), member("One", 1), member("Two", 5)],
            is_typedef: false,
        }
    }

    #[test]
    fn array_uses_designated_initializers() {
        let mut out = String::new();
        emit_array(&mut out, &hello(), &EmitContext::default());
        assert_eq!(
            out,
            "char *_str_Hello[] = {\n\
             \t[0] \"Zero (0)\",\n\
             \t[1] \"One (1)\",\n\
             \t[5] \"Two (5)\",\n\
             }; \t// _str_Hello\n\n"
        );
    }

    #[test]
    fn out_of_range_members_are_omitted() {
        let e = ResolvedEnum {
            name: "R".to_string(),
            members: vec![member("neg", -1), member("ok", 3), member("big", 10)],
            is_typedef: false,
        };
        let ctx = EmitContext {
            max_enum_value: 10,
            ..Default::default()
        };
        let mut out = String::new();
        emit_array(&mut out, &e, &ctx);
        assert!(out.contains("[3] \"ok (3)\""));
        assert!(!out.contains("neg"));
        assert!(!out.contains("big"));
    }

    #[test]
    fn array_without_members_in_range_is_still_valid() {
        let e = ResolvedEnum {
            name: "Neg".to_string(),
            members: vec![member("a", -5)],
            is_typedef: true,
        };
        let mut out = String::new();
        emit_array(&mut out, &e, &EmitContext::default());
        assert_eq!(out, "char *_str_Neg[] = { 0 }; \t// _str_Neg\n\n");
    }

    #[test]
    fn duplicates_are_kept() {
        let e = ResolvedEnum {
            name: "D".to_string(),
            members: vec![member("a", 1), member("b", 1)],
            is_typedef: false,
        };
        let mut out = String::new();
        emit_array(&mut out, &e, &EmitContext::default());
        assert!(out.contains("\t[1] \"a (1)\",\n\t[1] \"b (1)\",\n"));
    }

    #[test]
    fn accessor_parameter_type_follows_declaration_form() {
        let ctx = EmitContext::default();
        assert_eq!(
            accessor_signature(&hello(), &ctx),
            "char *EnumStr_Hello(enum Hello val)"
        );
        let kiki = ResolvedEnum {
            name: "Kiki".to_string(),
            members: vec![member("single", 0)],
            is_typedef: true,
        };
        assert_eq!(accessor_signature(&kiki, &ctx), "char *EnumStr_Kiki(Kiki val)");
    }

    #[test]
    fn body_accessor_forwards_to_helper() {
        let ctx = EmitContext {
            helper: "lookup".to_string(),
            fn_prefix: "Str".to_string(),
            array_prefix: "names_".to_string(),
            ..Default::default()
        };
        let mut out = String::new();
        emit_accessor_def(&mut out, &hello(), &ctx);
        assert_eq!(
            out,
            "char *StrHello(enum Hello val) { return lookup(names_Hello, (int)val, sizeof(names_Hello) / sizeof(char*)); }\n\n"
        );
    }

    #[test]
    fn header_mode_emits_declaration_only() {
        let ctx = EmitContext {
            mode: OutputMode::Header {
                name: "x.h".to_string(),
            },
            ..Default::default()
        };
        let mut out = String::new();
        emit_enum(&mut out, &hello(), &ctx);
        assert_eq!(out, "char *EnumStr_Hello(enum Hello val);\n");
    }

    #[test]
    fn source_comment_prefixes_every_line() {
        let mut out = String::new();
        emit_source_comment(&mut out, "enum E {\n\n  A\n};");
        assert_eq!(
            out,
            "// Source text section:\n// enum E {\n//\n//   A\n// };\n// End of source section\n\n"
        );
    }
}
