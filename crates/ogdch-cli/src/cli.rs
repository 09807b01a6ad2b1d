//! CLI argument definitions for the catalog canonicalizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ogdch-canon",
    version,
    about = "Canonicalize open-data catalog metadata",
    long_about = "Canonicalize open-data catalog metadata.\n\n\
                  Normalizes dates, resolves multilingual values, classifies resource\n\
                  formats, and aggregates terms of use for datasets given as JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -vvv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// TOML file with canonicalization options.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding format_mapping.toml and media_type_mapping.toml
    /// (default: $OGDCH_MAPPINGS_DIR, else the bundled tables).
    #[arg(long = "mappings", value_name = "DIR", global = true)]
    pub mappings: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize date values.
    Date(DateArgs),

    /// Resolve a multilingual value or record to one language.
    Localize(LocalizeArgs),

    /// Classify a resource's format and media type.
    Format(FormatArgs),

    /// Compute the terms of use of a dataset.
    Rights(InputArgs),

    /// Build the resource fields of a dataset's index document.
    Index(InputArgs),

    /// List the loaded synonym tables.
    Mappings(MappingsArgs),
}

#[derive(Parser)]
pub struct DateArgs {
    /// Raw date values.
    #[arg(value_name = "VALUE", required = true)]
    pub values: Vec<String>,

    /// Target form.
    #[arg(long = "form", value_enum, default_value = "storage")]
    pub form: DateFormArg,

    /// Display pattern (only with --form display; default from config).
    #[arg(long = "pattern", value_name = "STRFTIME")]
    pub pattern: Option<String>,

    /// Print only the latest of the values.
    #[arg(long = "latest")]
    pub latest: bool,
}

#[derive(Parser)]
pub struct LocalizeArgs {
    /// JSON file to read (default: stdin).
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Requested language code.
    #[arg(long = "lang", default_value = "de")]
    pub lang: String,

    /// Treat the input as a flat record and localize every field.
    #[arg(long = "record")]
    pub record: bool,
}

#[derive(Parser)]
pub struct FormatArgs {
    /// Dataset JSON file; prints the deduplicated formats of its resources.
    #[arg(long = "dataset", value_name = "FILE", conflicts_with_all = ["media_type", "format", "download_url"])]
    pub dataset: Option<PathBuf>,

    /// Only report linked-data formats (with --dataset).
    #[arg(long = "linked-data", requires = "dataset")]
    pub linked_data: bool,

    /// Declared media type.
    #[arg(long = "media-type")]
    pub media_type: Option<String>,

    /// Declared format.
    #[arg(long = "format")]
    pub format: Option<String>,

    /// Download URL.
    #[arg(long = "download-url")]
    pub download_url: Option<String>,
}

#[derive(Parser)]
pub struct InputArgs {
    /// Dataset JSON file (default: stdin).
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,
}

#[derive(Parser)]
pub struct MappingsArgs {
    /// Table to list.
    #[arg(long = "table", value_enum, default_value = "format")]
    pub table: TableArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DateFormArg {
    Storage,
    Index,
    Display,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TableArg {
    Format,
    MediaType,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
