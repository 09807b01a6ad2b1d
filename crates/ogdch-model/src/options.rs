//! Configuration options for canonicalization.

use serde::{Deserialize, Serialize};

/// Default pattern of the catalog's date picker (day.month.year).
pub const DEFAULT_DATE_PICKER_FORMAT: &str = "%d.%m.%Y";

/// Two-digit years at or above this value belong to the 1900s, below it to the 2000s.
pub const DEFAULT_TWO_DIGIT_YEAR_PIVOT: u32 = 69;

/// Options for date normalization and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateOptions {
    /// `strftime`-style pattern the date picker emits; tried first when parsing.
    pub picker_format: String,

    /// Pattern used to render dates for display.
    pub display_format: String,

    /// Century pivot for legacy two-digit-year inputs such as `05.11.20`.
    pub two_digit_year_pivot: u32,
}

impl Default for DateOptions {
    fn default() -> Self {
        Self {
            picker_format: DEFAULT_DATE_PICKER_FORMAT.to_string(),
            display_format: DEFAULT_DATE_PICKER_FORMAT.to_string(),
            two_digit_year_pivot: DEFAULT_TWO_DIGIT_YEAR_PIVOT,
        }
    }
}

impl DateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_picker_format(mut self, format: impl Into<String>) -> Self {
        self.picker_format = format.into();
        self
    }

    #[must_use]
    pub fn with_display_format(mut self, format: impl Into<String>) -> Self {
        self.display_format = format.into();
        self
    }

    #[must_use]
    pub fn with_two_digit_year_pivot(mut self, pivot: u32) -> Self {
        self.two_digit_year_pivot = pivot.min(100);
        self
    }
}

/// Top-level options, typically read from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonOptions {
    pub dates: DateOptions,
}

impl CanonOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dates(mut self, dates: DateOptions) -> Self {
        self.dates = dates;
        self
    }
}
