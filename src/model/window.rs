//! Time window scoping a graph query.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The active time window: every query is scoped to messages with
/// `timestamp >= since`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub since: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(since: DateTime<Utc>) -> Self {
        Self { since }
    }

    /// Window reaching back `hours` from now.
    pub fn last_hours(hours: f64) -> Self {
        let millis = (hours * 3_600_000.0) as i64;
        Self { since: Utc::now() - Duration::milliseconds(millis) }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.since
    }
}
