//! Run configuration: command-line flags layered over an optional JSON
//! configuration file, layered over the built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use enumstr_core::{EmitContext, OutputMode};

use crate::Cli;

/// Contents of a `--config` file. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub(crate) array_prefix: Option<String>,
    pub(crate) fn_prefix: Option<String>,
    pub(crate) helper: Option<String>,
    pub(crate) max_enum: Option<i64>,
    pub(crate) header: Option<String>,
    pub(crate) dump_enums: Option<bool>,
    pub(crate) reuse: Option<bool>,
    pub(crate) skip_includes: Option<bool>,
    pub(crate) use_header: Option<String>,
    pub(crate) grammar: Option<PathBuf>,
}

impl FileConfig {
    /// Read and parse a configuration file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))
    }
}

/// Everything one run needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunConfig {
    pub(crate) ctx: EmitContext,
    pub(crate) skip_includes: bool,
    pub(crate) use_header: Option<String>,
    pub(crate) grammar: Option<PathBuf>,
}

impl RunConfig {
    /// Merge flags over `file` over defaults.
    pub(crate) fn resolve(cli: &Cli, file: FileConfig) -> Self {
        let defaults = EmitContext::default();
        let header = cli.header.clone().or(file.header);
        let ctx = EmitContext {
            array_prefix: cli
                .array_prefix
                .clone()
                .or(file.array_prefix)
                .unwrap_or(defaults.array_prefix),
            fn_prefix: cli
                .fn_prefix
                .clone()
                .or(file.fn_prefix)
                .unwrap_or(defaults.fn_prefix),
            helper: cli.helper.clone().or(file.helper).unwrap_or(defaults.helper),
            max_enum_value: cli
                .max_enum
                .or(file.max_enum)
                .unwrap_or(defaults.max_enum_value),
            mode: match header {
                Some(name) => OutputMode::Header { name },
                None => OutputMode::Body,
            },
            dump_enums: cli.dump_enums || file.dump_enums.unwrap_or(defaults.dump_enums),
            reuse_helper: cli.reuse || file.reuse.unwrap_or(defaults.reuse_helper),
        };
        RunConfig {
            ctx,
            skip_includes: cli.skip_includes || file.skip_includes.unwrap_or(false),
            use_header: cli.use_header.clone().or(file.use_header),
            grammar: cli.grammar.clone().or(file.grammar),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("enumstr").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_without_flags_or_file() {
        let run = RunConfig::resolve(&cli(&["a.h"]), FileConfig::default());
        assert_eq!(run.ctx, EmitContext::default());
        assert!(!run.skip_includes);
        assert_eq!(run.use_header, None);
        assert_eq!(run.grammar, None);
    }

    #[test]
    fn file_overrides_defaults_and_flags_override_file() {
        let file: FileConfig = serde_json::from_str(
            r#"{ "array_prefix": "names_", "helper": "lookup", "max_enum": 64,
                 "header": "from_file.h", "skip_includes": true }"#,
        )
        .unwrap();
        let run = RunConfig::resolve(&cli(&["-S", "flag_lookup", "a.h"]), file);
        assert_eq!(run.ctx.array_prefix, "names_");
        assert_eq!(run.ctx.fn_prefix, "EnumStr_");
        assert_eq!(run.ctx.helper, "flag_lookup");
        assert_eq!(run.ctx.max_enum_value, 64);
        assert_eq!(
            run.ctx.mode,
            OutputMode::Header {
                name: "from_file.h".to_string()
            }
        );
        assert!(run.skip_includes);
    }

    #[test]
    fn boolean_flag_wins_over_file_false() {
        let file = FileConfig {
            dump_enums: Some(false),
            reuse: Some(true),
            ..Default::default()
        };
        let run = RunConfig::resolve(&cli(&["-E", "a.h"]), file);
        assert!(run.ctx.dump_enums);
        assert!(run.ctx.reuse_helper);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = serde_json::from_str::<FileConfig>(r#"{ "arry_prefix": "x" }"#).unwrap_err();
        assert!(err.to_string().contains("unknown field"), "{err}");
    }
}
