//! Resolution of multilingual values to a single language.

use ogdch_model::{Language, MultilingualText};
use serde_json::{Map, Value};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::codec::{as_multilingual, decode_or_keep, decode_value};

/// Languages that get their own search-index fields, in index order.
pub const INDEX_LANGUAGES: [Language; 4] = Language::INDEX_ORDER;

/// Pick the `lang` entry of `text`, falling back to the first non-empty
/// entry in [`Language::FALLBACK_ORDER`], then to `default`.
///
/// The fallback order does not depend on `lang`.
pub fn resolve_text(text: &MultilingualText, lang: &str, default: &str) -> String {
    if let Some(value) = text.non_empty(lang) {
        return value.to_string();
    }
    Language::FALLBACK_ORDER
        .iter()
        .map(|fallback| fallback.code())
        .filter(|code| *code != lang)
        .find_map(|code| text.non_empty(code))
        .unwrap_or(default)
        .to_string()
}

/// Resolve a decoded value for `lang`.
///
/// Values that are not multilingual text (scalars, arrays, objects without
/// all four primary languages) are returned unchanged.
pub fn resolve(value: &Value, lang: &str, default: &str) -> Value {
    match as_multilingual(value) {
        Some(text) => Value::String(resolve_text(&text, lang, default)),
        None => value.clone(),
    }
}

/// Like [`resolve`], for a value still in its stored JSON encoding.
/// Text that does not decode is returned as is.
pub fn resolve_from_encoded(raw: &str, lang: &str, default: &str) -> Value {
    resolve(&decode_or_keep(raw), lang, default)
}

/// Resolve to a plain string. Pass-through values that are not strings
/// render as their JSON text.
pub fn resolve_to_string(value: &Value, lang: &str) -> String {
    match resolve(value, lang, "") {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// All four primary languages joined as `"<de> - <fr> - <it> - <en>"`.
///
/// A string attribute is returned as is; a missing or otherwise typed one
/// yields `""`.
pub fn lang_to_string(record: &Map<String, Value>, attribute: &str) -> String {
    record.get(attribute).map(join_languages).unwrap_or_default()
}

/// [`lang_to_string`] for a single value.
pub fn join_languages(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => Language::PRIMARY
            .iter()
            .map(|lang| map.get(lang.code()).and_then(Value::as_str).unwrap_or(""))
            .collect::<Vec<_>>()
            .join(" - "),
        _ => String::new(),
    }
}

/// Decode and resolve every field of a flat record such as a group,
/// organization, or resource.
pub fn localize_record(record: &Map<String, Value>, lang: &str) -> Map<String, Value> {
    record
        .iter()
        .map(|(key, value)| (key.clone(), resolve(&decode_value(value), lang, "")))
        .collect()
}

/// Replace every non-empty object whose keys are all language codes by its
/// fallback-order value. Index backends would otherwise read the language
/// keys as field operations.
pub fn flatten_fluent_fields(record: &mut Map<String, Value>) {
    for (key, value) in record.iter_mut() {
        let Value::Object(map) = value else {
            continue;
        };
        if map.is_empty() || !map.keys().all(|code| Language::is_known_code(code)) {
            continue;
        }
        let text: MultilingualText = map
            .iter()
            .filter_map(|(code, entry)| entry.as_str().map(|s| (code.clone(), s.to_string())))
            .collect();
        debug!(field = %key, "flattening fluent field");
        *value = Value::String(resolve_text(&text, "", ""));
    }
}

/// Remove accents, cedillas, and umlauts so words sort by their base letters.
pub fn strip_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}
