//! Reading JSON input from files or stdin.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use ogdch_model::Dataset;
use serde_json::Value;

/// Read the whole input: the file at `path`, or stdin for `None` or `-`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display())),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("read stdin")?;
            Ok(buffer)
        }
    }
}

pub fn read_json(path: Option<&Path>) -> Result<Value> {
    let source = read_input(path)?;
    serde_json::from_str(&source).context("parse JSON input")
}

pub fn read_dataset(path: Option<&Path>) -> Result<Dataset> {
    let source = read_input(path)?;
    parse_dataset(&source)
}

pub fn parse_dataset(source: &str) -> Result<Dataset> {
    serde_json::from_str(source).context("parse dataset")
}
