mod config;
mod render;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::{Level, LevelFilter, debug, info, log_enabled};

use enumstr_core::sample::{SAMPLE_NAME, SAMPLE_SOURCE, emit_sample_main};
use enumstr_core::{
    BUNDLED_GRAMMAR, EmitContext, FrameOptions, Grammar, emit_end, emit_start, process_source,
};
use enumstr_diagnostics as diag;

use crate::config::{FileConfig, RunConfig};
use crate::render::{print_summary, render_diagnostics};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "enumstr",
    version,
    about = "Generate string tables and accessor functions for C/C++ enums"
)]
struct Cli {
    /// Source files to scan, processed in the order given.
    #[arg(value_name = "SOURCE")]
    sources: Vec<PathBuf>,

    /// Prefix of the generated string arrays [default: _str_].
    #[arg(short = 'A', long)]
    array_prefix: Option<String>,

    /// Prefix of the generated accessor functions [default: EnumStr_].
    #[arg(short = 'F', long)]
    fn_prefix: Option<String>,

    /// Name of the shared lookup helper [default: _EnumStr].
    #[arg(short = 'S', long)]
    helper: Option<String>,

    /// Values at or above this bound are left out of the arrays [default: 1024].
    #[arg(short = 'M', long, value_name = "N")]
    max_enum: Option<i64>,

    /// Emit a header with declarations only; NAME is used for the include guard.
    #[arg(short = 'H', long, value_name = "NAME")]
    header: Option<String>,

    /// Copy each enum's source text into the output as a comment.
    #[arg(short = 'E', long)]
    dump_enums: bool,

    /// Reuse a lookup helper defined elsewhere instead of defining it.
    #[arg(short = 'R', long)]
    reuse: bool,

    /// Do not emit `#include` lines for the source files.
    #[arg(long)]
    skip_includes: bool,

    /// Include a previously generated header.
    #[arg(short = 'U', long, value_name = "FILE")]
    use_header: Option<String>,

    /// Load the PEG grammar from FILE instead of the bundled one.
    #[arg(short = 'G', long, value_name = "FILE")]
    grammar: Option<PathBuf>,

    /// Verbosity of log output on stderr.
    #[arg(short = 'd', long, value_enum, default_value_t = DebugLevel::Min)]
    debug: DebugLevel,

    /// JSON configuration file; flags override its values.
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the generated code to FILE instead of stdout.
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Process the bundled sample source instead of files.
    #[arg(long, conflicts_with = "sources")]
    sample: bool,

    /// Explain a diagnostic code (e.g. ENUM2004) and exit.
    #[arg(long, value_name = "CODE", exclusive = true)]
    explain: Option<String>,
}

/// Log verbosity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DebugLevel {
    /// Nothing.
    None,
    /// Errors only.
    Crit,
    /// Warnings and errors.
    Min,
    /// Progress per file.
    Info,
    /// Walk details.
    Verb,
    /// Everything, including parse-tree dumps.
    Max,
}

impl From<DebugLevel> for LevelFilter {
    fn from(level: DebugLevel) -> Self {
        match level {
            DebugLevel::None => LevelFilter::Off,
            DebugLevel::Crit => LevelFilter::Error,
            DebugLevel::Min => LevelFilter::Warn,
            DebugLevel::Info => LevelFilter::Info,
            DebugLevel::Verb => LevelFilter::Debug,
            DebugLevel::Max => LevelFilter::Trace,
        }
    }
}

/// One source, read up front.
struct Input {
    name: String,
    text: String,
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Some(id) = &cli.explain {
        cmd_explain(id);
        return Ok(());
    }

    let file_config = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let run = RunConfig::resolve(&cli, file_config);
    debug!("run configuration: {run:?}");

    if !cli.sample && cli.sources.is_empty() {
        bail!("at least one source file must be specified (or use --sample)");
    }

    let inputs = read_inputs(&cli)?;
    let grammar = load_grammar(&run)?;
    let opts = FrameOptions {
        includes: if run.skip_includes || cli.sample {
            Vec::new()
        } else {
            inputs.iter().map(|i| i.name.clone()).collect()
        },
        use_header: run.use_header.clone(),
    };

    let mut writer = open_output(cli.output.as_ref())?;
    let result = generate(&mut writer, &grammar, &inputs, &run.ctx, &opts, cli.sample);
    writer.flush().context("failed to flush output")?;
    if !result? {
        process::exit(1);
    }
    Ok(())
}

// ── Generation ──────────────────────────────────────────────────────────

/// Write the whole document. Returns `Ok(false)` after rendering a fatal
/// diagnostic; the output then ends after the last complete file.
fn generate(
    writer: &mut dyn Write,
    grammar: &Grammar,
    inputs: &[Input],
    ctx: &EmitContext,
    opts: &FrameOptions,
    sample: bool,
) -> Result<bool> {
    let with_sample_program = sample && !ctx.mode.is_header();
    let mut head = String::new();
    if with_sample_program {
        head.push_str(SAMPLE_SOURCE);
        head.push('\n');
    }
    emit_start(&mut head, ctx, opts);
    write_chunk(writer, &head)?;

    let mut skipped = Vec::new();
    for input in inputs {
        info!("processing {}", input.name);
        let mut chunk = String::new();
        match process_source(grammar, &input.text, ctx, &mut chunk) {
            Ok(report) => {
                if log_enabled!(Level::Warn) {
                    render_diagnostics(&input.text, &input.name, &report.diagnostics);
                }
                skipped.extend(report.diagnostics);
                write_chunk(writer, &chunk)?;
            }
            Err(err) => {
                let diag = err.to_diagnostic();
                render_diagnostics(&input.text, &input.name, std::slice::from_ref(&diag));
                print_summary(&[diag]);
                return Ok(false);
            }
        }
    }

    let mut tail = String::new();
    emit_end(&mut tail, ctx);
    if with_sample_program {
        emit_sample_main(&mut tail, ctx);
    }
    write_chunk(writer, &tail)?;

    if log_enabled!(Level::Warn) {
        print_summary(&skipped);
    }
    Ok(true)
}

fn write_chunk(writer: &mut dyn Write, chunk: &str) -> Result<()> {
    writer
        .write_all(chunk.as_bytes())
        .context("failed to write output")
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn init_logging(level: DebugLevel) {
    env_logger::Builder::new()
        .filter_level(level.into())
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Read every source before anything is written.
fn read_inputs(cli: &Cli) -> Result<Vec<Input>> {
    if cli.sample {
        return Ok(vec![Input {
            name: SAMPLE_NAME.to_string(),
            text: SAMPLE_SOURCE.to_string(),
        }]);
    }
    cli.sources
        .iter()
        .map(|path| {
            let text = fs::read_to_string(path)
                .with_context(|| format!("can't read source file '{}'", path.display()))?;
            Ok(Input {
                name: path.display().to_string(),
                text,
            })
        })
        .collect()
}

/// Compile the bundled grammar or the one named by the configuration.
fn load_grammar(run: &RunConfig) -> Result<Grammar> {
    let (name, text) = match &run.grammar {
        Some(path) => (
            path.display().to_string(),
            fs::read_to_string(path)
                .with_context(|| format!("can't read grammar file '{}'", path.display()))?,
        ),
        None => ("<bundled grammar>".to_string(), BUNDLED_GRAMMAR.to_string()),
    };
    match Grammar::from_source(&text) {
        Ok(grammar) => {
            debug!("loaded {name} ({} rules)", grammar.rule_count());
            Ok(grammar)
        }
        Err(err) => {
            render_diagnostics(&text, &name, &[err.to_diagnostic()]);
            bail!("invalid grammar '{name}'");
        }
    }
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("can't create output file '{}'", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn cmd_explain(id: &str) {
    use ariadne::Fmt;

    match diag::explain(id) {
        Some(text) => println!("{}: {}", id.fg(ariadne::Color::Cyan), text),
        None => println!("{id}: (no explanation available)"),
    }
}
