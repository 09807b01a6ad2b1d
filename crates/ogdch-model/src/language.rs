//! Language codes and the multilingual text value.
//!
//! Every user-facing text field of the catalog is stored as a mapping from
//! language code to string. Records produced by the catalog carry the four
//! primary codes (`de`, `fr`, `it`, `en`), possibly with empty strings. Some
//! harvested resources additionally (or only) carry Rumantsch (`rm`).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A language code known to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    De,
    Fr,
    It,
    En,
    /// Legacy fallback code, never required.
    Rm,
}

impl Language {
    /// Codes a mapping must carry to count as multilingual text.
    pub const PRIMARY: [Self; 4] = [Self::De, Self::Fr, Self::It, Self::En];

    /// Order in which languages are tried when the requested one is empty.
    pub const FALLBACK_ORDER: [Self; 5] = [Self::De, Self::Fr, Self::En, Self::It, Self::Rm];

    /// Order of the per-language fields written to the search index.
    pub const INDEX_ORDER: [Self; 4] = [Self::En, Self::De, Self::Fr, Self::It];

    /// Every known code, primary codes first.
    pub const ALL: [Self; 5] = [Self::De, Self::Fr, Self::It, Self::En, Self::Rm];

    pub const fn code(self) -> &'static str {
        match self {
            Self::De => "de",
            Self::Fr => "fr",
            Self::It => "it",
            Self::En => "en",
            Self::Rm => "rm",
        }
    }

    pub const fn is_primary(self) -> bool {
        !matches!(self, Self::Rm)
    }

    /// Returns true if `code` is exactly one of the known language codes.
    /// Unlike parsing, case and surrounding whitespace are significant.
    pub fn is_known_code(code: &str) -> bool {
        Self::ALL.iter().any(|language| language.code() == code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "de" => Ok(Self::De),
            "fr" => Ok(Self::Fr),
            "it" => Ok(Self::It),
            "en" => Ok(Self::En),
            "rm" => Ok(Self::Rm),
            _ => Err(ModelError::UnknownLanguage(s.to_string())),
        }
    }
}

/// A language-keyed text value.
///
/// Keys are kept as plain strings so that codes outside [`Language`] survive a
/// decode/encode cycle untouched. The map is ordered, which keeps the encoded
/// form stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultilingualText(BTreeMap<String, String>);

impl MultilingualText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a value carrying exactly the four primary languages.
    pub fn from_primary(
        de: impl Into<String>,
        fr: impl Into<String>,
        it: impl Into<String>,
        en: impl Into<String>,
    ) -> Self {
        let mut text = Self::new();
        text.insert(Language::De, de);
        text.insert(Language::Fr, fr);
        text.insert(Language::It, it);
        text.insert(Language::En, en);
        text
    }

    #[must_use]
    pub fn with(mut self, language: Language, value: impl Into<String>) -> Self {
        self.insert(language, value);
        self
    }

    pub fn insert(&mut self, language: Language, value: impl Into<String>) {
        self.0.insert(language.code().to_string(), value.into());
    }

    /// Raw lookup by code; the code is not required to be a known language.
    pub fn get(&self, code: &str) -> Option<&str> {
        self.0.get(code).map(String::as_str)
    }

    /// Lookup that treats an empty string like a missing entry.
    pub fn non_empty(&self, code: &str) -> Option<&str> {
        self.get(code).filter(|value| !value.is_empty())
    }

    /// True when all four primary codes are present (values may be empty).
    pub fn has_primary_languages(&self) -> bool {
        Language::PRIMARY
            .iter()
            .all(|language| self.0.contains_key(language.code()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

impl From<BTreeMap<String, String>> for MultilingualText {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, String)> for MultilingualText {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("DE".parse::<Language>().unwrap(), Language::De);
        assert_eq!(" rm ".parse::<Language>().unwrap(), Language::Rm);
        assert!("es".parse::<Language>().is_err());
    }

    #[test]
    fn known_codes_match_exactly() {
        assert!(Language::is_known_code("de"));
        assert!(Language::is_known_code("rm"));
        assert!(!Language::is_known_code("DE"));
        assert!(!Language::is_known_code(" fr"));
        assert!(!Language::is_known_code("es"));
    }

    #[test]
    fn fallback_order_puts_english_before_italian() {
        let codes: Vec<&str> = Language::FALLBACK_ORDER.iter().map(|l| l.code()).collect();
        assert_eq!(codes, ["de", "fr", "en", "it", "rm"]);
    }

    #[test]
    fn primary_languages_required() {
        let text = MultilingualText::from_primary("a", "", "", "");
        assert!(text.has_primary_languages());

        let partial = MultilingualText::new().with(Language::De, "a").with(Language::Rm, "b");
        assert!(!partial.has_primary_languages());
    }

    #[test]
    fn non_empty_skips_blank_entries() {
        let text = MultilingualText::from_primary("", "Titre", "", "");
        assert_eq!(text.non_empty("de"), None);
        assert_eq!(text.non_empty("fr"), Some("Titre"));
        assert_eq!(text.non_empty("xx"), None);
    }
}
