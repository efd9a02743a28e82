//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dq",
    version,
    about = "Standardize and validate customer contact records",
    long_about = "Normalize names, national ids, phones, emails, postal codes and \
                  addresses into canonical per-locale forms and validate them \
                  against structural and check-digit rules."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Allow raw field values (PII) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize and validate a batch of records.
    Check(CheckArgs),

    /// List the registered locale rules.
    Rules(RulesArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Input file: CSV with `kind` or `kind:COUNTRY` headers, or JSON
    /// lines of records.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Input format (inferred from the extension by default).
    #[arg(long = "format", value_enum, default_value = "auto")]
    pub format: InputFormatArg,

    /// Comma-separated mandatory field kinds (e.g. "personal_name,email").
    #[arg(long = "require", value_name = "KINDS")]
    pub require: Option<String>,

    /// Extra rule set (TOML) overlaid on the built-in rules.
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Write the full JSON reports to a file.
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Scan normalized personal names for likely duplicates.
    #[arg(long = "find-duplicates")]
    pub find_duplicates: bool,

    /// Similarity threshold for the duplicate scan.
    #[arg(long = "threshold", default_value_t = 0.9)]
    pub threshold: f64,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Extra rule set (TOML) overlaid on the built-in rules.
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormatArg {
    Auto,
    Csv,
    Jsonl,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
