//! The storage encoding of structured field values.
//!
//! The catalog stores multilingual and other structured fields as JSON text.
//! Decoding happens here and nowhere else; the rest of the crate works on
//! decoded [`Value`]s and [`MultilingualText`].

use ogdch_model::{Language, MultilingualText};
use serde_json::Value;

use crate::error::DecodeError;

/// Strictly decode a stored JSON value.
pub fn decode_json(raw: &str) -> Result<Value, DecodeError> {
    Ok(serde_json::from_str(raw)?)
}

/// Decode a stored value, keeping the original text when decoding does not
/// yield a structure.
///
/// Text that is not JSON stays a string. So does text that decodes to a
/// number, boolean, or null: `"6"` is the string `"6"`, not the number 6.
pub fn decode_or_keep(raw: &str) -> Value {
    match decode_json(raw) {
        Ok(value @ (Value::Object(_) | Value::Array(_) | Value::String(_))) => value,
        Ok(_) | Err(_) => Value::String(raw.to_string()),
    }
}

/// Decode `value` if it is a string; other values are already decoded.
pub fn decode_value(value: &Value) -> Value {
    match value {
        Value::String(raw) => decode_or_keep(raw),
        other => other.clone(),
    }
}

/// Read a decoded value as multilingual text.
///
/// Only objects carrying all four primary language keys qualify; anything
/// else is not localizable and yields `None`. Null entries read as empty.
pub fn as_multilingual(value: &Value) -> Option<MultilingualText> {
    let object = value.as_object()?;
    if !Language::PRIMARY
        .iter()
        .all(|lang| object.contains_key(lang.code()))
    {
        return None;
    }
    object
        .iter()
        .map(|(code, entry)| {
            let text = match entry {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                Value::Bool(_) | Value::Number(_) => entry.to_string(),
                Value::Array(_) | Value::Object(_) => return None,
            };
            Some((code.clone(), text))
        })
        .collect()
}

/// Encode multilingual text for storage.
pub fn encode_multilingual(text: &MultilingualText) -> String {
    // A map of strings always serializes.
    serde_json::to_string(text.as_map()).unwrap_or_default()
}
