//! Shared test helpers for `enumstr_core` integration tests.

#![allow(unreachable_pub)]

use enumstr_core::{EmitContext, Error, FileReport, FrameOptions, Grammar, emit_end, emit_start, process_source};

/// Bundled grammar; compiled per call since the VM is cheap to build.
pub fn grammar() -> Grammar {
    Grammar::bundled().expect("bundled grammar compiles")
}

/// Run one source through the full pipeline (frame + enums) and return the
/// document text.
#[allow(dead_code)]
pub fn generate(src: &str, ctx: &EmitContext, opts: &FrameOptions) -> Result<String, Error> {
    let grammar = grammar();
    let mut out = String::new();
    emit_start(&mut out, ctx, opts);
    process_source(&grammar, src, ctx, &mut out)?;
    emit_end(&mut out, ctx);
    Ok(out)
}

/// Process one source without framing.
#[allow(dead_code)]
pub fn enums_only(src: &str, ctx: &EmitContext) -> Result<(FileReport, String), Error> {
    let mut out = String::new();
    let report = process_source(&grammar(), src, ctx, &mut out)?;
    Ok((report, out))
}

/// Lines of `text` that start with `prefix`, in order.
#[allow(dead_code)]
pub fn lines_starting_with<'a>(text: &'a str, prefix: &str) -> Vec<&'a str> {
    text.lines().filter(|l| l.starts_with(prefix)).collect()
}
