//! Immutable synonym tables.
//!
//! A table maps a canonical code to the set of alternate strings that should
//! resolve to it. Lookups are bidirectional: both the canonical code itself
//! and any registered synonym resolve to the canonical code. Matching is exact;
//! callers decide how to clean their input before looking it up.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::StandardsError;
use crate::paths::{FORMAT_MAPPING_FILE, MEDIA_TYPE_MAPPING_FILE};

/// Which of the two classification tables a [`SynonymTable`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Format,
    MediaType,
}

impl TableKind {
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Format => FORMAT_MAPPING_FILE,
            Self::MediaType => MEDIA_TYPE_MAPPING_FILE,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format => f.write_str("format"),
            Self::MediaType => f.write_str("media type"),
        }
    }
}

/// Canonical code -> synonyms, with a prebuilt reverse index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymTable {
    kind: TableKind,
    entries: BTreeMap<String, BTreeSet<String>>,
    /// Synonym -> canonical code.
    reverse: BTreeMap<String, String>,
}

impl SynonymTable {
    /// Build a table from raw entries.
    ///
    /// `origin` names the source in error messages. Blank synonyms are dropped
    /// and a synonym equal to its own canonical code is not indexed twice.
    /// Every string must resolve to one canonical code: codes that coincide
    /// after trimming, a synonym listed under two codes, and a synonym equal
    /// to another code are all rejected.
    pub fn from_entries(
        kind: TableKind,
        raw: BTreeMap<String, Vec<String>>,
        origin: &Path,
    ) -> Result<Self, StandardsError> {
        let conflict = |synonym: &str, first: &str, second: &str| {
            StandardsError::ConflictingSynonym {
                path: origin.to_path_buf(),
                synonym: synonym.to_string(),
                first: first.to_string(),
                second: second.to_string(),
            }
        };

        // Trimmed code -> key as written.
        let mut canonicals: BTreeMap<String, String> = BTreeMap::new();
        for key in raw.keys() {
            let canonical = key.trim();
            if canonical.is_empty() {
                return Err(StandardsError::EmptyCanonical {
                    path: origin.to_path_buf(),
                });
            }
            if let Some(first) = canonicals.insert(canonical.to_string(), key.clone()) {
                return Err(conflict(canonical, first.as_str(), key.as_str()));
            }
        }

        let mut entries = BTreeMap::new();
        let mut reverse: BTreeMap<String, String> = BTreeMap::new();

        for (key, synonyms) in raw {
            let canonical = key.trim();
            let mut set = BTreeSet::new();
            for synonym in &synonyms {
                let synonym = synonym.trim();
                if synonym.is_empty() || synonym == canonical {
                    continue;
                }
                if canonicals.contains_key(synonym) {
                    return Err(conflict(synonym, synonym, canonical));
                }
                if let Some(existing) = reverse.get(synonym)
                    && existing != canonical
                {
                    return Err(conflict(synonym, existing.as_str(), canonical));
                }
                reverse.insert(synonym.to_string(), canonical.to_string());
                set.insert(synonym.to_string());
            }
            entries.insert(canonical.to_string(), set);
        }

        Ok(Self {
            kind,
            entries,
            reverse,
        })
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Returns true if `code` is a canonical code of this table.
    pub fn contains_canonical(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Canonical code registered for `synonym`.
    pub fn canonical_for(&self, synonym: &str) -> Option<&str> {
        self.reverse.get(synonym).map(String::as_str)
    }

    /// Resolve a value given either as a canonical code or as a synonym.
    pub fn resolve(&self, value: &str) -> Option<&str> {
        if let Some((canonical, _)) = self.entries.get_key_value(value) {
            return Some(canonical.as_str());
        }
        self.canonical_for(value)
    }

    pub fn synonyms(&self, canonical: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(canonical)
    }

    /// Canonical codes with their synonyms, in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn synonym_count(&self) -> usize {
        self.reverse.len()
    }
}

/// The pair of tables the resource classifier needs, loaded together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatMappings {
    pub formats: SynonymTable,
    pub media_types: SynonymTable,
    /// Directory the tables were read from; `None` for the compiled-in copies.
    pub source: Option<PathBuf>,
}

impl FormatMappings {
    pub fn new(formats: SynonymTable, media_types: SynonymTable) -> Self {
        Self {
            formats,
            media_types,
            source: None,
        }
    }
}
