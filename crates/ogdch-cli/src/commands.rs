use anyhow::{Result, bail};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, ContentArrangement, Table};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use ogdch_model::{Dataset, DatasetRights, ResourceFormat};
use ogdch_normalization::{
    Canonicalizer, DateNormalizer, DateParseError, ResourceIndexFields, dataset_rights,
    localize_record, resolve, resolve_from_encoded,
};
use ogdch_standards::{SynonymTable, TableKind};

/// Which form `date` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateForm {
    Storage,
    Index,
    Display,
}

/// Outcome for one date value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateReport {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<&'static str>,
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn run_date(
    canon: &Canonicalizer,
    values: &[String],
    form: DateForm,
    pattern: Option<&str>,
) -> Vec<DateReport> {
    let dates = canon.dates();
    values
        .iter()
        .map(|raw| {
            let rule = dates.classify(raw).map(|(rule, _)| rule.name());
            match convert_date(dates, raw, form, pattern) {
                Ok(value) => DateReport {
                    input: raw.clone(),
                    rule,
                    value: Some(value),
                    error: None,
                },
                Err(err) => {
                    debug!(error = %err, "date not converted");
                    DateReport {
                        input: raw.clone(),
                        rule,
                        value: None,
                        error: Some(err.to_string()),
                    }
                }
            }
        })
        .collect()
}

/// The latest of `values`, converted to `form`.
pub fn run_latest_date(
    canon: &Canonicalizer,
    values: &[String],
    form: DateForm,
    pattern: Option<&str>,
) -> Result<String> {
    let dates = canon.dates();
    let latest = dates.latest(values);
    debug!(latest = %latest, candidates = values.len(), "latest date");
    Ok(convert_date(dates, &latest, form, pattern)?)
}

fn convert_date(
    dates: &DateNormalizer,
    raw: &str,
    form: DateForm,
    pattern: Option<&str>,
) -> Result<String, DateParseError> {
    match form {
        DateForm::Storage => dates.normalize_to_storage(raw).map(|d| d.into_string()),
        DateForm::Index => dates.to_index_form(raw).map(|d| d.into_string()),
        DateForm::Display => {
            let pattern = pattern.unwrap_or(&dates.options().display_format);
            Ok(dates.to_display_form(raw, pattern))
        }
    }
}

/// Resolve `input` for `lang`. With `record`, every field of an object is
/// resolved separately.
pub fn run_localize(input: &Value, lang: &str, record: bool) -> Result<Value> {
    if record {
        let Some(fields) = input.as_object() else {
            bail!("--record expects a JSON object");
        };
        return Ok(Value::Object(localize_record(fields, lang)));
    }
    Ok(match input {
        Value::String(raw) => resolve_from_encoded(raw, lang, ""),
        other => resolve(other, lang, ""),
    })
}

pub fn run_format(
    canon: &Canonicalizer,
    media_type: Option<&str>,
    format: Option<&str>,
    download_url: Option<&str>,
) -> ResourceFormat {
    canon.classifier().classify(media_type, format, download_url)
}

pub fn run_dataset_formats(
    canon: &Canonicalizer,
    dataset: &Dataset,
    linked_data: bool,
) -> Vec<String> {
    canon
        .classifier()
        .dedup_formats(&dataset.resources, linked_data)
        .into_iter()
        .collect()
}

pub fn run_rights(dataset: &Dataset) -> DatasetRights {
    dataset_rights(dataset)
}

pub fn run_index(canon: &Canonicalizer, dataset: &Dataset) -> ResourceIndexFields {
    canon.index_projector().project_resources(&dataset.resources)
}

pub fn run_mappings(canon: &Canonicalizer, kind: TableKind) -> Table {
    let mappings = canon.mappings();
    let table = match kind {
        TableKind::Format => &mappings.formats,
        TableKind::MediaType => &mappings.media_types,
    };
    synonym_table(table)
}

fn synonym_table(synonyms: &SynonymTable) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Canonical", "Synonyms"]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    for (canonical, entries) in synonyms.iter() {
        let joined = entries
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![Cell::new(canonical), Cell::new(joined)]);
    }
    table
}
