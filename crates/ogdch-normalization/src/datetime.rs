//! Date normalization.
//!
//! Dates arrive in several shapes: the date picker's `dd.mm.yyyy`, ISO 8601
//! datetimes from harvesters, integer Unix timestamps, and a few legacy
//! patterns. Each value is reduced to exactly one storage form (ISO 8601),
//! from which the index form (UTC-suffixed, offset dropped) and the display
//! form are derived.
//!
//! The parsers are tried in a fixed order, see [`DateRule::CHAIN`]. The first
//! rule that accepts the input wins.

use std::fmt::{self, Write as _};
use std::sync::LazyLock;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use ogdch_model::{DateOptions, Temporal};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::DateParseError;

/// Stored in place of a date by older records; treated as "no date".
pub const INVALID_EMPTY_DATE: &str = "False";

/// The canonical "no date" value.
pub const VALID_EMPTY_DATE: &str = "";

const STORAGE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// ISO 8601 datetime: date, `T`, time with optional seconds and fraction, and
/// an optional `Z` or numeric offset.
static ISO_DATETIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]{4})-([0-9]{2})-([0-9]{2})T([0-9]{2}):([0-9]{2})(?::([0-9]{2})(?:[.,]([0-9]{1,9})[0-9]*)?)?(Z|[+-][0-9]{2}(?::?[0-9]{2})?)?$",
    )
    .expect("Invalid ISO datetime regex")
});

static SHORT_YEAR_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2})\.([0-9]{1,2})\.([0-9]{2})$").expect("Invalid short year regex")
});

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("Invalid ISO date regex")
});

/// A date in storage form: ISO 8601, or empty for "no date".
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageDate(String);

impl StorageDate {
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StorageDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A date in index form: `YYYY-MM-DDTHH:MM:SSZ`, or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexDate(String);

impl IndexDate {
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for IndexDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A parsed ISO 8601 datetime: wall-clock time plus the offset, if one was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsoDateTime {
    pub local: NaiveDateTime,
    pub offset: Option<FixedOffset>,
}

/// Parse an ISO 8601 datetime (`YYYY-MM-DDTHH:MM[:SS[.fff]][Z|±HH[:MM]]`).
pub fn parse_iso8601(value: &str) -> Option<IsoDateTime> {
    let caps = ISO_DATETIME.captures(value)?;
    let number = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
    let date = NaiveDate::from_ymd_opt(year, number(2)?, number(3)?)?;
    let nanos = match caps.get(7) {
        Some(fraction) => {
            let digits = fraction.as_str();
            digits.parse::<u32>().ok()? * 10u32.pow(9 - digits.len() as u32)
        }
        None => 0,
    };
    let second = number(6).unwrap_or(0);
    let time = NaiveTime::from_hms_nano_opt(number(4)?, number(5)?, second, nanos)?;
    let offset = match caps.get(8) {
        Some(m) => Some(parse_offset(m.as_str())?),
        None => None,
    };

    Some(IsoDateTime {
        local: date.and_time(time),
        offset,
    })
}

fn parse_offset(value: &str) -> Option<FixedOffset> {
    if value == "Z" {
        return FixedOffset::east_opt(0);
    }
    let sign = if value.starts_with('-') { -1 } else { 1 };
    let digits: String = value[1..].chars().filter(char::is_ascii_digit).collect();
    let hours: i32 = digits.get(..2)?.parse().ok()?;
    let minutes: i32 = match digits.get(2..) {
        Some("") | None => 0,
        Some(m) => m.parse().ok()?,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Python-style `isoformat()`: fractional seconds only when non-zero.
fn isoformat(value: &NaiveDateTime) -> String {
    let mut out = value.format(STORAGE_FORMAT).to_string();
    let micros = value.and_utc().timestamp_subsec_micros();
    if micros != 0 {
        let _ = write!(out, ".{micros:06}");
    }
    out
}

/// Storage form must stay within four-digit years to remain parseable.
fn has_four_digit_year(value: &NaiveDateTime) -> bool {
    (0..=9999).contains(&value.year())
}

/// Map a two-digit year onto a century: at or above `pivot` is 19xx, else 20xx.
pub fn expand_two_digit_year(year: u32, pivot: u32) -> i32 {
    let year = (year % 100) as i32;
    if year as u32 >= pivot {
        1900 + year
    } else {
        2000 + year
    }
}

/// Check a `strftime` pattern for unknown specifiers.
pub fn validate_pattern(pattern: &str) -> Result<(), DateParseError> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(DateParseError::InvalidPattern {
            pattern: pattern.to_string(),
        });
    }
    Ok(())
}

/// Legacy input patterns accepted after all other rules have failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyPattern {
    /// `dd.mm.yy`, century chosen by the configured pivot.
    DayMonthShortYear,
    /// Bare `YYYY-MM-DD`.
    IsoDate,
}

impl LegacyPattern {
    pub const ALL: [Self; 2] = [Self::DayMonthShortYear, Self::IsoDate];

    fn parse(self, value: &str, pivot: u32) -> Option<NaiveDateTime> {
        match self {
            Self::DayMonthShortYear => {
                let caps = SHORT_YEAR_DATE.captures(value)?;
                let day = caps[1].parse().ok()?;
                let month = caps[2].parse().ok()?;
                let year = expand_two_digit_year(caps[3].parse().ok()?, pivot);
                NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)
            }
            Self::IsoDate => {
                let caps = ISO_DATE.captures(value)?;
                let year = caps[1].parse().ok()?;
                let month = caps[2].parse().ok()?;
                let day = caps[3].parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)
            }
        }
    }
}

/// One step of the parse chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRule {
    /// The configured date picker pattern (`dd.mm.yyyy` by default).
    Picker,
    /// ISO 8601 datetimes; stored exactly as given.
    Iso8601,
    /// Integer seconds since the Unix epoch, read as UTC.
    Timestamp,
    /// See [`LegacyPattern`].
    Legacy,
}

impl DateRule {
    /// Rules in the order they are tried.
    pub const CHAIN: [Self; 4] = [Self::Picker, Self::Iso8601, Self::Timestamp, Self::Legacy];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Picker => "picker",
            Self::Iso8601 => "iso8601",
            Self::Timestamp => "timestamp",
            Self::Legacy => "legacy",
        }
    }

    fn apply(self, value: &str, options: &DateOptions) -> Option<String> {
        match self {
            Self::Picker => parse_picker(value, &options.picker_format).map(|dt| isoformat(&dt)),
            Self::Iso8601 => parse_iso8601(value).map(|_| value.to_string()),
            Self::Timestamp => parse_timestamp(value).map(|dt| isoformat(&dt)),
            Self::Legacy => LegacyPattern::ALL
                .iter()
                .find_map(|pattern| pattern.parse(value, options.two_digit_year_pivot))
                .map(|dt| isoformat(&dt)),
        }
    }
}

impl fmt::Display for DateRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The picker pattern must yield a four-digit year; shorter years fall
/// through to the legacy rule.
fn parse_picker(value: &str, pattern: &str) -> Option<NaiveDateTime> {
    let parsed = NaiveDateTime::parse_from_str(value, pattern).ok().or_else(|| {
        NaiveDate::parse_from_str(value, pattern)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    })?;
    (1000..=9999).contains(&parsed.year()).then_some(parsed)
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let seconds: i64 = value.parse().ok()?;
    let parsed = DateTime::from_timestamp(seconds, 0)?.naive_utc();
    has_four_digit_year(&parsed).then_some(parsed)
}

/// Converts heterogeneous date inputs into storage, index, and display forms.
#[derive(Debug, Clone, Default)]
pub struct DateNormalizer {
    options: DateOptions,
}

impl DateNormalizer {
    /// Create a normalizer, rejecting malformed picker or display patterns.
    pub fn new(options: DateOptions) -> Result<Self, DateParseError> {
        validate_pattern(&options.picker_format)?;
        validate_pattern(&options.display_format)?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &DateOptions {
        &self.options
    }

    /// Run the parse chain and report which rule matched.
    pub fn classify(&self, raw: &str) -> Option<(DateRule, StorageDate)> {
        let value = raw.trim();
        if value.is_empty() {
            return None;
        }
        DateRule::CHAIN.iter().find_map(|rule| {
            rule.apply(value, &self.options)
                .map(|stored| (*rule, StorageDate(stored)))
        })
    }

    /// Canonical storage form of `raw`.
    ///
    /// `""` and `"False"` both yield the empty storage date; `"False"` is
    /// logged since it indicates a bad stored record.
    pub fn normalize_to_storage(&self, raw: &str) -> Result<StorageDate, DateParseError> {
        if raw == VALID_EMPTY_DATE {
            return Ok(StorageDate::empty());
        }
        if raw == INVALID_EMPTY_DATE {
            warn!(value = raw, "invalid empty date, stored as empty");
            return Ok(StorageDate::empty());
        }
        match self.classify(raw) {
            Some((rule, stored)) => {
                debug!(value = raw, rule = %rule, stored = %stored, "normalized date");
                Ok(stored)
            }
            None => {
                warn!(value = raw, "unparseable date");
                Err(DateParseError::unparseable(raw))
            }
        }
    }

    /// Index form of `raw`: the storage form with any offset and fractional
    /// seconds dropped and `Z` appended. The wall-clock time is kept as is.
    pub fn to_index_form(&self, raw: &str) -> Result<IndexDate, DateParseError> {
        let stored = self.normalize_to_storage(raw)?;
        if stored.is_empty() {
            return Ok(IndexDate::empty());
        }
        let parsed =
            parse_iso8601(stored.as_str()).ok_or_else(|| DateParseError::unparseable(raw))?;
        Ok(IndexDate(format!(
            "{}Z",
            parsed.local.format(STORAGE_FORMAT)
        )))
    }

    /// Render `raw` with `pattern`. Unusable input renders as `""` and is
    /// logged, so one bad record cannot break a page.
    pub fn to_display_form(&self, raw: &str, pattern: &str) -> String {
        let stored = match self.normalize_to_storage(raw) {
            Ok(stored) if stored.is_empty() => return String::new(),
            Ok(stored) => stored,
            Err(_) => return String::new(),
        };
        let Some(parsed) = parse_iso8601(stored.as_str()) else {
            warn!(value = raw, "stored date is not ISO 8601");
            return String::new();
        };

        let mut out = String::new();
        if validate_pattern(pattern).is_err()
            || write!(out, "{}", parsed.local.format(pattern)).is_err()
        {
            warn!(pattern, "invalid display pattern");
            return String::new();
        }
        out
    }

    /// Render `raw` with the configured display pattern.
    pub fn display(&self, raw: &str) -> String {
        self.to_display_form(raw, &self.options.display_format)
    }

    /// The latest of `dates` by storage form, or `""` when none is usable.
    /// Unparseable entries are skipped with a warning.
    pub fn latest<I, S>(&self, dates: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        dates
            .into_iter()
            .filter_map(|raw| self.normalize_to_storage(raw.as_ref()).ok())
            .max()
            .map(StorageDate::into_string)
            .unwrap_or_default()
    }

    /// Convert an integer timestamp to an ISO 8601 datetime.
    pub fn timestamp_to_iso(raw: &str) -> Option<String> {
        parse_timestamp(raw.trim()).map(|dt| isoformat(&dt))
    }

    /// Normalize both ends of a time range. Empty ends become `None`;
    /// unparseable ends are dropped with a warning.
    pub fn normalize_temporal(&self, temporal: &Temporal) -> Temporal {
        Temporal {
            start_date: self.normalize_optional(temporal.start_date.as_deref()),
            end_date: self.normalize_optional(temporal.end_date.as_deref()),
        }
    }

    fn normalize_optional(&self, raw: Option<&str>) -> Option<String> {
        let raw = raw?;
        match self.normalize_to_storage(raw) {
            Ok(stored) if stored.is_empty() => None,
            Ok(stored) => Some(stored.into_string()),
            Err(_) => {
                debug!(value = raw, "dropping temporal bound");
                None
            }
        }
    }
}
