//! Document framing: what goes before the first enum and after the last.

use crate::context::{EmitContext, OutputMode};

/// Per-run inputs of the framer that are not part of [`EmitContext`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameOptions {
    /// Source files to `#include`, in processing order. Empty when
    /// include emission is suppressed.
    pub includes: Vec<String>,
    /// Previously generated header to `#include` (body mode only).
    pub use_header: Option<String>,
}

/// Derive an include-guard identifier from `name`: ASCII letters are
/// upper-cased, digits kept and every run of other characters becomes a
/// single `_`.
pub fn normalize_guard(name: &str) -> String {
    let mut guard = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            guard.push(c.to_ascii_uppercase());
            in_run = false;
        } else if !in_run {
            guard.push('_');
            in_run = true;
        }
    }
    guard
}

/// Prototype of the shared lookup helper.
pub fn helper_declaration(ctx: &EmitContext) -> String {
    format!("char *{}(char **arr, int val, int max);\n", ctx.helper)
}

/// Definition of the shared lookup helper. Out-of-range values give
/// `<ERROR>`, holes in the array give `<?>`.
pub fn helper_definition(ctx: &EmitContext) -> String {
    format!(
        "\nchar *{}(char **arr, int val, int max) {{\n\
         \x20   if (val < 0 || val >= max) {{\n\
         \x20       return \"<ERROR>\";\n\
         \x20   }}\n\
         \x20   if (arr[val] == (void*)0) {{\n\
         \x20       return \"<?>\";\n\
         \x20   }}\n\
         \x20   return arr[val];\n\
         }}\n\n",
        ctx.helper
    )
}

/// Text preceding the first enum.
pub fn emit_start(out: &mut String, ctx: &EmitContext, opts: &FrameOptions) {
    match &ctx.mode {
        OutputMode::Header { name } => {
            let guard = normalize_guard(name);
            out.push_str("// Auto generated header for enum strings\n");
            out.push_str(&format!("#ifndef __{guard}\n#define __{guard}\n\n"));
            emit_includes(out, &opts.includes);
            out.push_str(&helper_declaration(ctx));
            out.push('\n');
        }
        OutputMode::Body => {
            out.push_str("// Start of generated enum strings section\n");
            if let Some(header) = &opts.use_header {
                out.push_str(&format!("#include \"{header}\"\n"));
            }
            emit_includes(out, &opts.includes);
            out.push_str(&helper_declaration(ctx));
            if ctx.reuse_helper {
                out.push('\n');
            } else {
                out.push_str(&helper_definition(ctx));
            }
        }
    }
}

/// Text following the last enum.
pub fn emit_end(out: &mut String, ctx: &EmitContext) {
    match &ctx.mode {
        OutputMode::Header { name } => {
            out.push_str(&format!("#endif   // __{}\n", normalize_guard(name)));
        }
        OutputMode::Body => out.push_str("// End of generated enum strings section\n"),
    }
}

fn emit_includes(out: &mut String, includes: &[String]) {
    for inc in includes {
        out.push_str(&format!("#include \"{inc}\"\n"));
    }
}
