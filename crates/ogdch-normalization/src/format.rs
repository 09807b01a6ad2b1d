//! Resource format classification.
//!
//! A resource's format is derived from its declared media type, declared
//! format, and download URL, in that order; see [`FormatRule::CHAIN`]. The
//! media type is separately mapped onto its IANA code.

use std::collections::BTreeSet;
use std::fmt;

use ogdch_model::{Resource, ResourceFormat};
use ogdch_standards::FormatMappings;
use tracing::debug;

/// Format of a resource without a download URL: a live API or service.
pub const SERVICE_FORMAT: &str = "SERVICE";

/// Facet value for resources whose format could not be determined.
pub const UNKNOWN_FORMAT: &str = "N/A";

/// Canonical codes of the linked-data formats.
pub const LINKED_DATA_FORMATS: [&str; 6] = [
    "JSON-LD",
    "N3",
    "RDF N-Triples",
    "RDF Turtle",
    "RDF XML",
    "SPARQL",
];

pub fn is_linked_data_format(format: &str) -> bool {
    LINKED_DATA_FORMATS.contains(&format)
}

/// The part after the last `/`, lowercased: `"text/HTML"` becomes `"html"`.
pub fn clean_format(value: &str) -> String {
    value.rsplit('/').next().unwrap_or_default().to_lowercase()
}

/// Lowercased file extension of the URL's path, without the dot. Query
/// string and fragment are ignored, as are dot-files like `/.hidden`.
pub fn url_extension(url: &str) -> Option<String> {
    let without_query = url.split(['?', '#']).next().unwrap_or_default();
    let path = match without_query.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("", |i| &rest[i..]),
        None => without_query,
    };
    let file_name = path.rsplit('/').next().unwrap_or_default();
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();
    let dot = file_name.rfind('.')?;
    if dot <= stem_start {
        return None;
    }
    let ext = &file_name[dot + 1..];
    (!ext.is_empty()).then(|| ext.to_lowercase())
}

/// The raw inputs to classification. Blank strings count as absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatInputs<'a> {
    pub media_type: Option<&'a str>,
    pub format: Option<&'a str>,
    pub download_url: Option<&'a str>,
}

impl<'a> FormatInputs<'a> {
    pub fn new(
        media_type: Option<&'a str>,
        format: Option<&'a str>,
        download_url: Option<&'a str>,
    ) -> Self {
        let present = |v: Option<&'a str>| v.filter(|s| !s.trim().is_empty());
        Self {
            media_type: present(media_type),
            format: present(format),
            download_url: present(download_url),
        }
    }

    pub fn from_resource(resource: &'a Resource) -> Self {
        Self::new(
            resource.media_type(),
            resource.format(),
            resource.download_url(),
        )
    }
}

/// One step of format resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatRule {
    /// The cleaned media type names a known format.
    MediaType,
    /// The declared format, as given or cleaned, names a known format.
    DeclaredFormat,
    /// A download URL exists: use its extension, else the cleaned media
    /// type, else `""`.
    DownloadUrl,
    /// No download URL: the resource is a service.
    Service,
}

impl FormatRule {
    /// Rules in the order they are tried.
    pub const CHAIN: [Self; 4] = [
        Self::MediaType,
        Self::DeclaredFormat,
        Self::DownloadUrl,
        Self::Service,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::MediaType => "media_type",
            Self::DeclaredFormat => "format",
            Self::DownloadUrl => "download_url",
            Self::Service => "service",
        }
    }
}

impl fmt::Display for FormatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classifies resources against a pair of loaded synonym tables.
#[derive(Debug, Clone, Copy)]
pub struct ResourceFormatClassifier<'a> {
    mappings: &'a FormatMappings,
}

impl<'a> ResourceFormatClassifier<'a> {
    pub fn new(mappings: &'a FormatMappings) -> Self {
        Self { mappings }
    }

    pub fn mappings(&self) -> &'a FormatMappings {
        self.mappings
    }

    /// Canonical format code, `"SERVICE"`, or `""`; and the IANA media type.
    pub fn classify(
        &self,
        media_type: Option<&str>,
        format: Option<&str>,
        download_url: Option<&str>,
    ) -> ResourceFormat {
        self.classify_inputs(FormatInputs::new(media_type, format, download_url))
    }

    pub fn classify_resource(&self, resource: &Resource) -> ResourceFormat {
        self.classify_inputs(FormatInputs::from_resource(resource))
    }

    pub fn classify_inputs(&self, inputs: FormatInputs<'_>) -> ResourceFormat {
        let (rule, format) = self.resolve_format(inputs);
        debug!(rule = %rule, format = %format, "classified resource format");
        ResourceFormat {
            format,
            media_type: self.resolve_media_type(inputs.media_type),
        }
    }

    /// Run the format rules; the first that yields a value wins.
    pub fn resolve_format(&self, inputs: FormatInputs<'_>) -> (FormatRule, String) {
        for rule in FormatRule::CHAIN {
            if let Some(format) = self.apply(rule, inputs) {
                return (rule, format);
            }
        }
        (FormatRule::Service, SERVICE_FORMAT.to_string())
    }

    fn apply(&self, rule: FormatRule, inputs: FormatInputs<'_>) -> Option<String> {
        match rule {
            FormatRule::MediaType => {
                let cleaned = clean_format(inputs.media_type?);
                self.known_format(&cleaned)
            }
            FormatRule::DeclaredFormat => {
                let format = inputs.format?;
                self.known_format(format)
                    .or_else(|| self.known_format(&clean_format(format)))
            }
            FormatRule::DownloadUrl => {
                let url = inputs.download_url?;
                let from_extension = url_extension(url).and_then(|ext| self.known_format(&ext));
                Some(
                    from_extension
                        .or_else(|| inputs.media_type.map(clean_format))
                        .unwrap_or_default(),
                )
            }
            FormatRule::Service => Some(SERVICE_FORMAT.to_string()),
        }
    }

    fn known_format(&self, value: &str) -> Option<String> {
        self.mappings.formats.resolve(value).map(str::to_string)
    }

    /// IANA code for `media_type`. Absent input yields `""`; an unknown
    /// media type is returned unchanged.
    pub fn resolve_media_type(&self, media_type: Option<&str>) -> String {
        let Some(media_type) = media_type.filter(|m| !m.trim().is_empty()) else {
            return String::new();
        };
        let table = &self.mappings.media_types;
        table
            .resolve(&clean_format(media_type))
            .or_else(|| table.resolve(&media_type.trim().to_lowercase()))
            .unwrap_or(media_type)
            .to_string()
    }

    /// Write the classified format and media type back into `resource`.
    pub fn prepare_resource(&self, resource: &mut Resource) {
        let ResourceFormat { format, media_type } = self.classify_resource(resource);
        resource.format = Some(format);
        resource.media_type = Some(media_type);
    }

    /// The distinct formats of `resources`, with `"N/A"` standing in for
    /// undetermined ones. With `linked_data_only`, other formats are dropped.
    pub fn dedup_formats(&self, resources: &[Resource], linked_data_only: bool) -> BTreeSet<String> {
        resources
            .iter()
            .map(|resource| self.classify_resource(resource).format)
            .filter(|format| !linked_data_only || is_linked_data_format(format))
            .map(|format| {
                if format.is_empty() {
                    UNKNOWN_FORMAT.to_string()
                } else {
                    format
                }
            })
            .collect()
    }
}
