//! Root driver: dispatches every top-level enum construct of one parsed
//! file to the walker and the emitter.

use log::{debug, info};

use enumstr_diagnostics::Diagnostic;

use crate::context::EmitContext;
use crate::emit::{emit_enum, emit_source_comment};
use crate::error::Error;
use crate::grammar::node::Node;
use crate::grammar::parser::Grammar;
use crate::walk::{ResolvedEnum, Walked, walk_construct};

/// What one source file produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Enums emitted, in source order.
    pub enums: Vec<ResolvedEnum>,
    /// Soft skips (unnamed or empty enums).
    pub diagnostics: Vec<Diagnostic>,
}

/// Walk the direct children of `root`, appending generated text to `out`.
///
/// Children that are not enum constructs are ignored. The first structural
/// error stops the walk; `out` may then hold text for the constructs that
/// preceded it, so callers should discard it.
pub fn process_tree(root: &Node<'_>, ctx: &EmitContext, out: &mut String) -> Result<FileReport, Error> {
    let mut report = FileReport::default();
    for child in root.children.iter().filter(|c| c.is_construct()) {
        match walk_construct(child)? {
            Walked::Enum { resolved, source } => {
                if ctx.dump_enums {
                    emit_source_comment(out, source);
                }
                emit_enum(out, &resolved, ctx);
                report.enums.push(resolved);
            }
            Walked::Skipped(diag) => {
                debug!("{diag}");
                report.diagnostics.push(diag);
            }
        }
    }
    Ok(report)
}

/// Parse `input` with `grammar` and process the resulting tree.
pub fn process_source(
    grammar: &Grammar,
    input: &str,
    ctx: &EmitContext,
    out: &mut String,
) -> Result<FileReport, Error> {
    let root = grammar.parse(input)?;
    debug!("parsed {} bytes into {} nodes", input.len(), root.size());
    let report = process_tree(&root, ctx, out)?;
    info!(
        "generated {} enum(s), skipped {}",
        report.enums.len(),
        report.diagnostics.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use enumstr_diagnostics::codes;

    fn run(src: &str, ctx: &EmitContext) -> Result<(FileReport, String), Error> {
        let grammar = Grammar::bundled().unwrap();
        let mut out = String::new();
        let report = process_source(&grammar, src, ctx, &mut out)?;
        Ok((report, out))
    }

    #[test]
    fn non_enum_code_is_ignored() {
        let (report, out) = run("int main(void) { return 0; }\n", &EmitContext::default()).unwrap();
        assert!(report.enums.is_empty());
        assert!(report.diagnostics.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn enums_are_emitted_in_source_order() {
        let src = "enum B { x };\nstatic int v;\ntypedef enum { y } A;\n";
        let (report, out) = run(src, &EmitContext::default()).unwrap();
        let names: Vec<&str> = report.enums.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
        let b = out.find("_str_B").unwrap();
        let a = out.find("_str_A").unwrap();
        assert!(b < a);
    }

    #[test]
    fn skips_are_collected_and_processing_continues() {
        let src = "enum { a };\nenum Fwd;\nenum E { };\nenum Ok { b };\n";
        let (report, out) = run(src, &EmitContext::default()).unwrap();
        let ids: Vec<&str> = report.diagnostics.iter().map(|d| d.id.as_ref()).collect();
        assert_eq!(ids, [codes::UNNAMED_ENUM, codes::EMPTY_ENUM]);
        assert_eq!(report.enums.len(), 1);
        assert!(out.contains("_str_Ok"));
        assert!(!out.contains("_str_E[]"));
    }

    #[test]
    fn first_structural_error_stops_the_file() {
        let src = "enum A { x };\nenum B { y }\nenum C { z };\n";
        let grammar = Grammar::bundled().unwrap();
        let mut out = String::new();
        let err = process_source(&grammar, src, &EmitContext::default(), &mut out).unwrap_err();
        assert_eq!(err.code(), codes::MISSING_SEMICOLON);
        assert!(out.contains("_str_A"));
        assert!(!out.contains("_str_C"));
    }

    #[test]
    fn dump_enums_precedes_each_array() {
        let ctx = EmitContext {
            dump_enums: true,
            ..Default::default()
        };
        let (_, out) = run("enum E { A };", &ctx).unwrap();
        let dump = out.find("// enum E { A };").unwrap();
        let array = out.find("char *_str_E[]").unwrap();
        assert!(dump < array);
    }
}
