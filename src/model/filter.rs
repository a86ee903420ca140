//! Content filters and their per-invocation modes.

use serde::{Deserialize, Serialize};

use super::MessageId;

/// Opaque filter identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FilterId(pub u64);

impl std::fmt::Display for FilterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a filter's matches contribute to visibility.
///
/// One value per filter id per invocation — supplied by the caller, never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Filter is ignored entirely.
    Off,
    /// Matched messages are removed from the visible set.
    Exclude,
    /// Matched messages form the visible set (OR'd across filters).
    Include,
    /// Matched messages plus one hop along structural edges.
    #[serde(rename = "include_plus_1")]
    IncludePlus1,
    /// Matched messages plus two hops along structural edges.
    #[serde(rename = "include_plus_2")]
    IncludePlus2,
}

impl FilterMode {
    /// True for the include family (`Include`, `IncludePlus1`, `IncludePlus2`).
    pub fn is_include(&self) -> bool {
        matches!(self, Self::Include | Self::IncludePlus1 | Self::IncludePlus2)
    }

    /// BFS depth implied by the mode, if any.
    pub fn expansion_depth(&self) -> Option<usize> {
        match self {
            Self::Include => Some(0),
            Self::IncludePlus1 => Some(1),
            Self::IncludePlus2 => Some(2),
            Self::Off | Self::Exclude => None,
        }
    }
}

/// A precomputed "message matched filter" fact.
///
/// Produced by external scoring (LLM or rule based); the store contract only
/// ever surfaces rows where the match was positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterMatch {
    pub filter_id: FilterId,
    pub message_id: MessageId,
}
