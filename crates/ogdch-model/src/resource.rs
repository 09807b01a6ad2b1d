//! Resource and dataset records as they reach the canonicalization layer.
//!
//! Only the fields the core reads are typed; everything else is kept in
//! `extra` so records can be passed back to the catalog untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::terms::TermOfUse;

/// A single distribution of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(
        deserialize_with = "term_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub license: Option<String>,
    #[serde(
        deserialize_with = "term_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub rights: Option<String>,
    #[serde(
        deserialize_with = "date_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub issued: Option<String>,
    #[serde(
        deserialize_with = "date_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub modified: Option<String>,
    /// Multilingual title, possibly still JSON-encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    /// Multilingual description, possibly still JSON-encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Resource {
    pub fn media_type(&self) -> Option<&str> {
        non_blank(self.media_type.as_deref())
    }

    pub fn format(&self) -> Option<&str> {
        non_blank(self.format.as_deref())
    }

    pub fn download_url(&self) -> Option<&str> {
        non_blank(self.download_url.as_deref())
    }

    /// The license field when it names an open term.
    pub fn open_license(&self) -> Option<TermOfUse> {
        self.license.as_deref().and_then(TermOfUse::open_term)
    }

    /// The rights field when it names an open term.
    pub fn open_rights(&self) -> Option<TermOfUse> {
        self.rights.as_deref().and_then(TermOfUse::open_term)
    }
}

/// A dataset with its resources already loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub resources: Vec<Resource>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Dataset {
    pub fn with_resources(resources: Vec<Resource>) -> Self {
        Self {
            resources,
            ..Self::default()
        }
    }
}

/// Result object of the dataset rights lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRights {
    pub dataset_rights: TermOfUse,
}

/// Canonical format and media type of a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceFormat {
    pub format: String,
    pub media_type: String,
}

/// A time range attached to a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Temporal {
    #[serde(deserialize_with = "date_value")]
    pub start_date: Option<String>,
    #[serde(deserialize_with = "date_value")]
    pub end_date: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Accepts the shapes date fields arrive in: strings, integer timestamps, and
/// the boolean `false` some stored records carry in place of a date.
fn date_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(false)) => Some("False".to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// Terms of use are identifier strings; any other shape names no open term.
fn term_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_inputs_count_as_absent() {
        let resource = Resource {
            media_type: Some(String::new()),
            format: Some("  ".to_string()),
            download_url: Some("http://download.url".to_string()),
            ..Resource::default()
        };
        assert_eq!(resource.media_type(), None);
        assert_eq!(resource.format(), None);
        assert_eq!(resource.download_url(), Some("http://download.url"));
    }

    #[test]
    fn date_fields_accept_numbers_and_false() {
        let resource: Resource =
            serde_json::from_str(r#"{"issued": 1604534400, "modified": false}"#).unwrap();
        assert_eq!(resource.issued.as_deref(), Some("1604534400"));
        assert_eq!(resource.modified.as_deref(), Some("False"));
    }

    #[test]
    fn non_string_terms_are_not_open() {
        let resource: Resource = serde_json::from_str(
            r#"{"license": 5, "rights": "NonCommercialAllowed-CommercialAllowed-ReferenceNotRequired"}"#,
        )
        .unwrap();
        assert_eq!(resource.license, None);
        assert_eq!(resource.open_license(), None);
        assert_eq!(resource.open_rights(), Some(TermOfUse::Open));

        let resource: Resource =
            serde_json::from_str(r#"{"license": {"id": "x"}, "rights": [1]}"#).unwrap();
        assert_eq!(resource.license, None);
        assert_eq!(resource.rights, None);
    }

    #[test]
    fn unknown_fields_are_preserved() {
        let resource: Resource =
            serde_json::from_str(r#"{"format": "CSV", "byte_size": 12}"#).unwrap();
        assert_eq!(resource.extra.get("byte_size"), Some(&Value::from(12)));
        let round = serde_json::to_value(&resource).unwrap();
        assert_eq!(round["byte_size"], Value::from(12));
    }

    #[test]
    fn null_resources_become_empty() {
        let dataset: Dataset = serde_json::from_str(r#"{"resources": null}"#).unwrap();
        assert!(dataset.resources.is_empty());
    }
}
