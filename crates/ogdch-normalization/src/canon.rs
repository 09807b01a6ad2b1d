//! Process-wide canonicalization context.

use ogdch_model::CanonOptions;
use ogdch_standards::FormatMappings;

use crate::datetime::DateNormalizer;
use crate::error::DateParseError;
use crate::format::ResourceFormatClassifier;
use crate::index::IndexProjector;

/// Options and synonym tables, built once at startup and shared read-only
/// by every caller.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    dates: DateNormalizer,
    mappings: FormatMappings,
}

impl Canonicalizer {
    pub fn new(options: &CanonOptions, mappings: FormatMappings) -> Result<Self, DateParseError> {
        Ok(Self {
            dates: DateNormalizer::new(options.dates.clone())?,
            mappings,
        })
    }

    pub fn dates(&self) -> &DateNormalizer {
        &self.dates
    }

    pub fn mappings(&self) -> &FormatMappings {
        &self.mappings
    }

    pub fn classifier(&self) -> ResourceFormatClassifier<'_> {
        ResourceFormatClassifier::new(&self.mappings)
    }

    pub fn index_projector(&self) -> IndexProjector<'_> {
        IndexProjector::new(&self.dates, self.classifier())
    }
}
