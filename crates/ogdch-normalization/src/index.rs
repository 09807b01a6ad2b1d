//! Search-index projection.
//!
//! Builds the resource-derived fields of a dataset's index document and
//! brings date and multilingual fields of a search record into the shapes
//! the index accepts.

use std::collections::BTreeMap;

use ogdch_model::{Resource, TermOfUse};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::codec::decode_value;
use crate::datetime::DateNormalizer;
use crate::format::ResourceFormatClassifier;
use crate::localize::{INDEX_LANGUAGES, flatten_fluent_fields, join_languages, resolve_to_string};
use crate::terms::resource_term;

/// Record fields the index stores as UTC dates.
pub const INDEXED_DATE_FIELDS: [&str; 4] = [
    "modified",
    "issued",
    "res_latest_modified",
    "res_latest_issued",
];

/// Resource-derived fields of an index document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceIndexFields {
    pub res_name: Vec<String>,
    pub res_description: Vec<String>,
    /// `res_name_<lang>` and `res_description_<lang>` for each index language.
    #[serde(flatten)]
    pub localized: BTreeMap<String, Vec<String>>,
    pub res_format: Vec<String>,
    pub linked_data: Vec<String>,
    pub res_license: Vec<TermOfUse>,
    pub res_latest_issued: String,
    pub res_latest_modified: String,
    pub suggest_res_license: Vec<String>,
    pub suggest_res_format: Vec<String>,
}

/// Projects datasets onto index documents.
#[derive(Debug, Clone, Copy)]
pub struct IndexProjector<'a> {
    dates: &'a DateNormalizer,
    formats: ResourceFormatClassifier<'a>,
}

impl<'a> IndexProjector<'a> {
    pub fn new(dates: &'a DateNormalizer, formats: ResourceFormatClassifier<'a>) -> Self {
        Self { dates, formats }
    }

    pub fn project_resources(&self, resources: &[Resource]) -> ResourceIndexFields {
        let titles: Vec<Value> = resources.iter().map(|r| decoded(r.title.as_ref())).collect();
        let descriptions: Vec<Value> = resources
            .iter()
            .map(|r| decoded(r.description.as_ref()))
            .collect();

        let mut localized = BTreeMap::new();
        for lang in INDEX_LANGUAGES {
            let code = lang.code();
            localized.insert(
                format!("res_name_{code}"),
                titles.iter().map(|t| resolve_to_string(t, code)).collect(),
            );
            localized.insert(
                format!("res_description_{code}"),
                descriptions.iter().map(|d| resolve_to_string(d, code)).collect(),
            );
        }

        let res_format: Vec<String> = self
            .formats
            .dedup_formats(resources, false)
            .into_iter()
            .collect();
        let linked_data: Vec<String> = self
            .formats
            .dedup_formats(resources, true)
            .into_iter()
            .collect();
        let res_license: Vec<TermOfUse> = resources.iter().map(resource_term).collect();

        ResourceIndexFields {
            res_name: titles.iter().map(join_languages).collect(),
            res_description: descriptions.iter().map(join_languages).collect(),
            localized,
            suggest_res_license: res_license
                .iter()
                .map(|term| clean_suggestion(term.as_str()))
                .collect(),
            suggest_res_format: res_format.iter().map(|f| clean_suggestion(f)).collect(),
            res_format,
            linked_data,
            res_license,
            res_latest_issued: self
                .latest_index_date(resources.iter().filter_map(|r| r.issued.as_deref())),
            res_latest_modified: self
                .latest_index_date(resources.iter().filter_map(|r| r.modified.as_deref())),
        }
    }

    /// Flatten leftover multilingual objects and convert the date fields of
    /// `record` to index form. Dates that cannot be converted become null.
    pub fn prepare_search_record(&self, record: &mut Map<String, Value>) {
        flatten_fluent_fields(record);
        for field in INDEXED_DATE_FIELDS {
            let Some(value) = record.get_mut(field) else {
                continue;
            };
            let raw = match &*value {
                Value::String(s) => s.clone(),
                Value::Null => continue,
                other => other.to_string(),
            };
            *value = match self.dates.to_index_form(&raw) {
                Ok(date) => Value::String(date.into_string()),
                Err(err) => {
                    warn!(field, error = %err, "date not indexable");
                    Value::Null
                }
            };
        }
    }

    fn latest_index_date<'r>(&self, dates: impl Iterator<Item = &'r str>) -> String {
        let latest = self.dates.latest(dates);
        match self.dates.to_index_form(&latest) {
            Ok(date) => date.into_string(),
            Err(err) => {
                warn!(error = %err, "latest resource date not indexable");
                String::new()
            }
        }
    }
}

fn decoded(value: Option<&Value>) -> Value {
    value.map(decode_value).unwrap_or(Value::Null)
}

/// Suggestion terms drop dashes.
fn clean_suggestion(term: &str) -> String {
    term.replace('-', "")
}
