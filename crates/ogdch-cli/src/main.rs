//! Catalog canonicalizer CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use ogdch_cli::commands::{
    DateForm, run_dataset_formats, run_date, run_format, run_index, run_latest_date,
    run_localize, run_mappings, run_rights,
};
use ogdch_cli::config::build_canonicalizer;
use ogdch_cli::input::{read_dataset, read_json};
use ogdch_cli::logging::{LogConfig, LogFormat, init_logging};
use ogdch_normalization::Canonicalizer;
use ogdch_standards::TableKind;
use serde::Serialize;
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, Command, DateFormArg, LogFormatArg, LogLevelArg, TableArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    // Tables and options are loaded before any command runs.
    let canon = match build_canonicalizer(cli.config.as_deref(), cli.mappings.as_deref()) {
        Ok(canon) => canon,
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    };
    let exit_code = match run(&cli.command, &canon) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(command: &Command, canon: &Canonicalizer) -> Result<()> {
    match command {
        Command::Date(args) => {
            let form = match args.form {
                DateFormArg::Storage => DateForm::Storage,
                DateFormArg::Index => DateForm::Index,
                DateFormArg::Display => DateForm::Display,
            };
            let pattern = args.pattern.as_deref();
            if args.latest {
                println!("{}", run_latest_date(canon, &args.values, form, pattern)?);
            } else {
                print_json(&run_date(canon, &args.values, form, pattern))?;
            }
        }
        Command::Localize(args) => {
            let input = read_json(args.input.as_deref())?;
            print_json(&run_localize(&input, &args.lang, args.record)?)?;
        }
        Command::Format(args) => {
            if let Some(path) = &args.dataset {
                let dataset = read_dataset(Some(path.as_path()))?;
                print_json(&run_dataset_formats(canon, &dataset, args.linked_data))?;
            } else {
                print_json(&run_format(
                    canon,
                    args.media_type.as_deref(),
                    args.format.as_deref(),
                    args.download_url.as_deref(),
                ))?;
            }
        }
        Command::Rights(args) => {
            let dataset = read_dataset(args.input.as_deref())?;
            print_json(&run_rights(&dataset))?;
        }
        Command::Index(args) => {
            let dataset = read_dataset(args.input.as_deref())?;
            print_json(&run_index(canon, &dataset))?;
        }
        Command::Mappings(args) => {
            let kind = match args.table {
                TableArg::Format => TableKind::Format,
                TableArg::MediaType => TableKind::MediaType,
            };
            println!("{}", run_mappings(canon, kind));
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
