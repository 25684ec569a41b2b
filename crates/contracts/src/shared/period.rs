use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Concrete statistics window. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

/// Statistics query string shared by the dashboards.
///
/// `periode` ("7j", "30j", "3m") wins over the explicit bounds.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub periode: Option<String>,
    pub date_debut: Option<String>,
    pub date_fin: Option<String>,
    pub boutique_id: Option<String>,
    pub limit: Option<usize>,
}
