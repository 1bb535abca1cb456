//! Pretty diagnostic rendering using ariadne.
//!
//! Converts [`Diagnostic`]s into ariadne [`Report`]s with source excerpts on
//! stderr. Stdout is reserved for generated code.

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use enumstr_diagnostics::{Diagnostic, Severity};

// ── Severity mapping ────────────────────────────────────────────────────

fn report_kind(severity: Severity) -> ReportKind<'static> {
    match severity {
        Severity::Error => ReportKind::Error,
        Severity::Warn => ReportKind::Warning,
        Severity::Info => ReportKind::Advice,
        _ => ReportKind::Warning,
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warn => Color::Yellow,
        Severity::Info => Color::Blue,
        _ => Color::White,
    }
}

// ── Rendering ───────────────────────────────────────────────────────────

/// Render diagnostics for `filename` to stderr.
///
/// Diagnostics with a span are shown against `source`; the others as a
/// single line with optional note and help.
pub(crate) fn render_diagnostics(source: &str, filename: &str, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    // Spans are byte offsets into `source`.
    let config = Config::default()
        .with_compact(false)
        .with_index_type(IndexType::Byte);
    let mut cache = (filename, Source::from(source));

    for diag in diagnostics {
        let Some(span) = &diag.span else {
            render_standalone(filename, diag);
            continue;
        };
        // Clamp to the source; an empty span at EOF still gets a caret.
        let start = span.start.min(source.len());
        let end = span.end.min(source.len()).max(start);

        let mut builder = Report::build(report_kind(diag.severity), (filename, start..end))
            .with_code(diag.id.as_ref())
            .with_message(&diag.message)
            .with_config(config)
            .with_label(
                Label::new((filename, start..end))
                    .with_message(label_message(diag))
                    .with_color(severity_color(diag.severity)),
            );

        if let Some(note) = context_note(diag) {
            builder = builder.with_note(note);
        }
        if let Some(explanation) = diag.explain() {
            builder = builder.with_help(explanation);
        }

        builder.finish().eprint(&mut cache).ok();
    }
}

fn render_standalone(filename: &str, diag: &Diagnostic) {
    let kind_str = match diag.severity {
        Severity::Error => "error",
        Severity::Warn => "warning",
        Severity::Info => "info",
        _ => "diagnostic",
    };
    eprintln!("{kind_str}[{}]: {filename}: {}", diag.id, diag.message);
    if let Some(note) = context_note(diag) {
        eprintln!("  = note: {note}");
    }
    if let Some(explanation) = diag.explain() {
        eprintln!("  = help: {explanation}");
    }
}

/// `key=value, ...` from the diagnostic context.
fn context_note(diag: &Diagnostic) -> Option<String> {
    let ctx = diag.context.as_ref().filter(|c| !c.is_empty())?;
    Some(
        ctx.iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// The message already heads the report; the label only points.
fn label_message(diag: &Diagnostic) -> String {
    match diag.severity {
        Severity::Error => "here".to_string(),
        _ => diag.message.clone(),
    }
}

/// Print a coloured `N errors, M warnings` line.
pub(crate) fn print_summary(diagnostics: &[Diagnostic]) {
    use ariadne::Fmt;

    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    let warnings = diagnostics.len() - errors;
    if diagnostics.is_empty() {
        return;
    }

    let mut parts = Vec::new();
    if errors > 0 {
        let s = if errors == 1 { "" } else { "s" };
        parts.push(format!("{}", format!("{errors} error{s}").fg(Color::Red)));
    }
    if warnings > 0 {
        let s = if warnings == 1 { "" } else { "s" };
        parts.push(format!("{}", format!("{warnings} warning{s}").fg(Color::Yellow)));
    }
    eprintln!("{}", parts.join(", "));
}
