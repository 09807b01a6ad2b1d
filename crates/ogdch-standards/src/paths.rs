//! Synonym table path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the directory holding the synonym tables.
pub const MAPPINGS_ENV_VAR: &str = "OGDCH_MAPPINGS_DIR";

/// File name of the format synonym table.
pub const FORMAT_MAPPING_FILE: &str = "format_mapping.toml";

/// File name of the media type synonym table.
pub const MEDIA_TYPE_MAPPING_FILE: &str = "media_type_mapping.toml";

/// Directory named by `OGDCH_MAPPINGS_DIR`, if set.
pub fn mappings_dir_override() -> Option<PathBuf> {
    std::env::var_os(MAPPINGS_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// The `standards/` directory shipped with the workspace.
pub fn bundled_mappings_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}
