//! Resolution of statistics periods into concrete date ranges.

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveDateTime, TimeZone, Utc};
use contracts::shared::period::{DateRange, StatsQuery};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Invalid date format: '{0}'")]
    InvalidDateFormat(String),
}

/// Symbolic period token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Periode {
    /// "7j"
    SeptJours,
    /// "30j"
    TrenteJours,
    /// "3m"
    TroisMois,
}

impl Periode {
    /// Unknown tokens fall back to 30 days
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "7j" => Periode::SeptJours,
            "30j" => Periode::TrenteJours,
            "3m" => Periode::TroisMois,
            _ => Periode::TrenteJours,
        }
    }

    pub fn start_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Periode::SeptJours => now - Duration::days(7),
            Periode::TrenteJours => now - Duration::days(30),
            // Calendar months, clamped to month end; 90 days only at the
            // edge of the representable range
            Periode::TroisMois => now
                .checked_sub_months(Months::new(3))
                .unwrap_or(now - Duration::days(90)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Start,
    End,
}

pub fn resolve_range(query: &StatsQuery) -> Result<DateRange, PeriodError> {
    resolve_range_at(query, Utc::now())
}

/// Same as `resolve_range` with an explicit "now"
pub fn resolve_range_at(query: &StatsQuery, now: DateTime<Utc>) -> Result<DateRange, PeriodError> {
    if let Some(token) = non_empty(&query.periode) {
        let start = Periode::from_token(token).start_from(now);
        return Ok(DateRange::new(start, now));
    }

    let start = match non_empty(&query.date_debut) {
        Some(raw) => parse_bound(raw, Bound::Start)?,
        None => now - Duration::days(30),
    };
    let end = match non_empty(&query.date_fin) {
        Some(raw) => parse_bound(raw, Bound::End)?,
        None => now,
    };
    Ok(DateRange::new(start, end))
}

/// Parse an optional explicit bound given as a calendar date or timestamp
pub fn parse_optional_start(raw: &Option<String>) -> Result<Option<DateTime<Utc>>, PeriodError> {
    non_empty(raw).map(|r| parse_bound(r, Bound::Start)).transpose()
}

pub fn parse_optional_end(raw: &Option<String>) -> Result<Option<DateTime<Utc>>, PeriodError> {
    non_empty(raw).map(|r| parse_bound(r, Bound::End)).transpose()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_bound(raw: &str, bound: Bound) -> Result<DateTime<Utc>, PeriodError> {
    let invalid = || PeriodError::InvalidDateFormat(raw.to_string());

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid())?;
    // A bare end date covers the whole day
    let naive = match bound {
        Bound::Start => date.and_hms_opt(0, 0, 0),
        Bound::End => date.and_hms_opt(23, 59, 59),
    }
    .ok_or_else(invalid)?;
    Ok(Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn periode(token: &str) -> StatsQuery {
        StatsQuery {
            periode: Some(token.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_seven_days() {
        let now = at(2025, 6, 10);
        let range = resolve_range_at(&periode("7j"), now).unwrap();
        assert_eq!(range.start, at(2025, 6, 3));
        assert_eq!(range.end, now);
    }

    #[test]
    fn test_thirty_days_and_three_months() {
        let now = at(2025, 6, 10);
        assert_eq!(
            resolve_range_at(&periode("30j"), now).unwrap().start,
            at(2025, 5, 11)
        );
        assert_eq!(
            resolve_range_at(&periode("3m"), now).unwrap().start,
            at(2025, 3, 10)
        );
    }

    #[test]
    fn test_three_months_clamps_to_month_end() {
        let now = at(2025, 5, 31);
        assert_eq!(
            resolve_range_at(&periode("3m"), now).unwrap().start,
            at(2025, 2, 28)
        );
    }

    #[test]
    fn test_unknown_token_behaves_like_thirty_days() {
        let now = at(2025, 6, 10);
        assert_eq!(
            resolve_range_at(&periode("unknown"), now).unwrap(),
            resolve_range_at(&periode("30j"), now).unwrap()
        );
    }

    #[test]
    fn test_periode_wins_over_explicit_bounds() {
        let now = at(2025, 6, 10);
        let query = StatsQuery {
            periode: Some("7j".into()),
            date_debut: Some("not a date".into()),
            ..Default::default()
        };
        assert_eq!(resolve_range_at(&query, now).unwrap().start, at(2025, 6, 3));
    }

    #[test]
    fn test_defaults_without_periode() {
        let now = at(2025, 6, 10);
        let range = resolve_range_at(&StatsQuery::default(), now).unwrap();
        assert_eq!(range.start, at(2025, 5, 11));
        assert_eq!(range.end, now);
    }

    #[test]
    fn test_explicit_dates() {
        let now = at(2025, 6, 10);
        let query = StatsQuery {
            date_debut: Some("2025-01-01".into()),
            date_fin: Some("2025-01-31".into()),
            ..Default::default()
        };
        let range = resolve_range_at(&query, now).unwrap();
        assert_eq!(range.start, at(2025, 1, 1));
        assert_eq!(
            range.end,
            Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 59).unwrap()
        );
    }

    #[test]
    fn test_timestamps_are_accepted() {
        let now = at(2025, 6, 10);
        let query = StatsQuery {
            date_debut: Some("2025-01-01T08:30:00+02:00".into()),
            date_fin: Some("2025-01-02 10:00:00".into()),
            ..Default::default()
        };
        let range = resolve_range_at(&query, now).unwrap();
        assert_eq!(range.start, Utc.with_ymd_and_hms(2025, 1, 1, 6, 30, 0).unwrap());
        assert_eq!(range.end, Utc.with_ymd_and_hms(2025, 1, 2, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_only_start_given_ends_now() {
        let now = at(2025, 6, 10);
        let query = StatsQuery {
            date_debut: Some("2025-06-01".into()),
            ..Default::default()
        };
        let range = resolve_range_at(&query, now).unwrap();
        assert_eq!(range.start, at(2025, 6, 1));
        assert_eq!(range.end, now);
    }

    #[test]
    fn test_invalid_explicit_date_is_an_error() {
        let query = StatsQuery {
            date_fin: Some("31/01/2025".into()),
            ..Default::default()
        };
        assert_eq!(
            resolve_range_at(&query, at(2025, 6, 10)).unwrap_err(),
            PeriodError::InvalidDateFormat("31/01/2025".into())
        );
    }

    #[test]
    fn test_blank_strings_count_as_absent() {
        let now = at(2025, 6, 10);
        let query = StatsQuery {
            periode: Some("  ".into()),
            date_debut: Some("".into()),
            ..Default::default()
        };
        let range = resolve_range_at(&query, now).unwrap();
        assert_eq!(range.start, at(2025, 5, 11));
    }

    #[test]
    fn test_optional_bounds() {
        assert_eq!(parse_optional_start(&None).unwrap(), None);
        assert_eq!(
            parse_optional_end(&Some("2025-02-01".into())).unwrap(),
            Some(Utc.with_ymd_and_hms(2025, 2, 1, 23, 59, 59).unwrap())
        );
        assert!(parse_optional_start(&Some("hier".into())).is_err());
    }
}
