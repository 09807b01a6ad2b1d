//! Terms of use for catalog resources.
//!
//! The four open terms are ranked by permissiveness; `ClosedData` sorts after
//! all of them. The derived `Ord` follows declaration order, so the least
//! open of two terms is simply their maximum.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TermOfUse {
    /// Open use.
    #[serde(rename = "NonCommercialAllowed-CommercialAllowed-ReferenceNotRequired")]
    Open,
    /// Open use, the source must be provided.
    #[serde(rename = "NonCommercialAllowed-CommercialAllowed-ReferenceRequired")]
    By,
    /// Open use, commercial use requires permission of the data owner.
    #[serde(rename = "NonCommercialAllowed-CommercialWithPermission-ReferenceNotRequired")]
    Ask,
    /// Open use, source required and commercial use requires permission.
    #[serde(rename = "NonCommercialAllowed-CommercialWithPermission-ReferenceRequired")]
    ByAsk,
    /// No open term applies.
    #[serde(rename = "ClosedData")]
    ClosedData,
}

impl TermOfUse {
    /// Open terms, most permissive first.
    pub const OPEN_TERMS: [Self; 4] = [Self::Open, Self::By, Self::Ask, Self::ByAsk];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "NonCommercialAllowed-CommercialAllowed-ReferenceNotRequired",
            Self::By => "NonCommercialAllowed-CommercialAllowed-ReferenceRequired",
            Self::Ask => "NonCommercialAllowed-CommercialWithPermission-ReferenceNotRequired",
            Self::ByAsk => "NonCommercialAllowed-CommercialWithPermission-ReferenceRequired",
            Self::ClosedData => "ClosedData",
        }
    }

    pub const fn is_open(self) -> bool {
        !matches!(self, Self::ClosedData)
    }

    /// Position in the severity order (0 = most permissive).
    pub const fn severity(self) -> usize {
        self as usize
    }

    /// Returns the open term with exactly this identifier.
    ///
    /// `ClosedData` and anything unrecognized yield `None`; matching is exact.
    pub fn open_term(id: &str) -> Option<Self> {
        Self::OPEN_TERMS
            .into_iter()
            .find(|term| term.as_str() == id)
    }

    /// The less open of two terms.
    #[must_use]
    pub fn least_open(self, other: Self) -> Self {
        self.max(other)
    }
}

impl fmt::Display for TermOfUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TermOfUse {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::ClosedData.as_str() {
            return Ok(Self::ClosedData);
        }
        Self::open_term(s).ok_or_else(|| ModelError::UnknownTerm(s.to_string()))
    }
}
