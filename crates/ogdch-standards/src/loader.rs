//! Synonym table loading.
//!
//! Tables are TOML documents whose top-level keys are canonical codes and
//! whose values are arrays of synonyms. They are read once at startup; any
//! failure here is meant to stop the process before it serves requests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::StandardsError;
use crate::paths::mappings_dir_override;
use crate::synonyms::{FormatMappings, SynonymTable, TableKind};

const BUNDLED_FORMAT_MAPPING: &str = include_str!("../../../standards/format_mapping.toml");
const BUNDLED_MEDIA_TYPE_MAPPING: &str =
    include_str!("../../../standards/media_type_mapping.toml");

/// Parse a synonym table from TOML source. `origin` is used in error messages.
pub fn parse_synonym_table(
    source: &str,
    kind: TableKind,
    origin: &Path,
) -> Result<SynonymTable, StandardsError> {
    let raw: BTreeMap<String, Vec<String>> =
        toml::from_str(source).map_err(|source| StandardsError::Toml {
            path: origin.to_path_buf(),
            source,
        })?;
    SynonymTable::from_entries(kind, raw, origin)
}

/// Read and parse a single synonym table file.
pub fn load_synonym_table(path: &Path, kind: TableKind) -> Result<SynonymTable, StandardsError> {
    if !path.is_file() {
        return Err(StandardsError::MissingTable {
            path: path.to_path_buf(),
        });
    }
    let source = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    parse_synonym_table(&source, kind, path)
}

/// Load both tables from a directory. Both files must be present.
pub fn load_mappings_from_dir(dir: &Path) -> Result<FormatMappings, StandardsError> {
    let formats = load_synonym_table(
        &dir.join(TableKind::Format.file_name()),
        TableKind::Format,
    )?;
    let media_types = load_synonym_table(
        &dir.join(TableKind::MediaType.file_name()),
        TableKind::MediaType,
    )?;
    let mappings = FormatMappings {
        formats,
        media_types,
        source: Some(dir.to_path_buf()),
    };
    log_loaded(&mappings);
    Ok(mappings)
}

/// The tables compiled into the binary.
pub fn bundled_mappings() -> Result<FormatMappings, StandardsError> {
    let formats = parse_synonym_table(
        BUNDLED_FORMAT_MAPPING,
        TableKind::Format,
        &bundled_origin(TableKind::Format),
    )?;
    let media_types = parse_synonym_table(
        BUNDLED_MEDIA_TYPE_MAPPING,
        TableKind::MediaType,
        &bundled_origin(TableKind::MediaType),
    )?;
    let mappings = FormatMappings::new(formats, media_types);
    log_loaded(&mappings);
    Ok(mappings)
}

/// Load the tables from `OGDCH_MAPPINGS_DIR` when set, else the bundled copies.
pub fn load_default_mappings() -> Result<FormatMappings, StandardsError> {
    match mappings_dir_override() {
        Some(dir) => load_mappings_from_dir(&dir),
        None => bundled_mappings(),
    }
}

fn bundled_origin(kind: TableKind) -> PathBuf {
    PathBuf::from("<bundled>").join(kind.file_name())
}

fn log_loaded(mappings: &FormatMappings) {
    let source = mappings
        .source
        .as_ref()
        .map_or_else(|| "bundled".to_string(), |dir| dir.display().to_string());
    info!(
        source = %source,
        formats = mappings.formats.len(),
        format_synonyms = mappings.formats.synonym_count(),
        media_types = mappings.media_types.len(),
        media_type_synonyms = mappings.media_types.synonym_count(),
        "loaded synonym tables"
    );
}
