//! Startup configuration: options file and synonym tables.

use std::path::Path;

use anyhow::{Context, Result};
use ogdch_model::CanonOptions;
use ogdch_normalization::Canonicalizer;
use ogdch_standards::{FormatMappings, load_default_mappings, load_mappings_from_dir};
use tracing::info;

/// Read options from a TOML file, or use the defaults.
pub fn load_options(path: Option<&Path>) -> Result<CanonOptions> {
    let Some(path) = path else {
        return Ok(CanonOptions::default());
    };
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let options =
        parse_options(&source).with_context(|| format!("parse config {}", path.display()))?;
    info!(path = %path.display(), "loaded options");
    Ok(options)
}

pub fn parse_options(source: &str) -> Result<CanonOptions> {
    Ok(toml::from_str(source)?)
}

/// Load the synonym tables from `dir`, or from the default location.
pub fn load_mappings(dir: Option<&Path>) -> Result<FormatMappings> {
    let mappings = match dir {
        Some(dir) => load_mappings_from_dir(dir),
        None => load_default_mappings(),
    };
    mappings.context("load synonym tables")
}

/// Everything a command needs, built before any command runs.
pub fn build_canonicalizer(
    config: Option<&Path>,
    mappings: Option<&Path>,
) -> Result<Canonicalizer> {
    let options = load_options(config)?;
    let mappings = load_mappings(mappings)?;
    Canonicalizer::new(&options, mappings).context("invalid date options")
}
