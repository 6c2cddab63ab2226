//! Fetch request identity and settlement ordering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one issued fetch.
///
/// Tokens are handed out by the controller in strictly increasing order, so
/// comparing two tokens tells which search was issued later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestToken(u64);

impl RequestToken {
    /// The first token ever issued.
    pub const FIRST: Self = Self(1);

    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the token that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RequestToken {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}

/// A fetch the runtime must perform on behalf of the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub token: RequestToken,
    /// Search term, empty for the unfiltered catalog.
    pub search_term: String,
}

/// How settlements of overlapping fetches are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchOrdering {
    /// Only the most recently issued fetch may change state. Older
    /// settlements are discarded.
    #[default]
    LatestOnly,

    /// Every settlement is applied in arrival order, so a slow older fetch can
    /// overwrite a newer result.
    LastSettledWins,
}

impl FetchOrdering {
    /// Parses the `fetch_ordering` configuration value.
    ///
    /// Accepts `latest` and `last-settled` (case-insensitive).
    #[must_use]
    pub fn from_config(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "latest" | "latest-only" => Some(Self::LatestOnly),
            "last-settled" | "last-settled-wins" => Some(Self::LastSettledWins),
            _ => None,
        }
    }
}
