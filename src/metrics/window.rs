use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::models::WorkflowRun;

pub const WINDOW_DAYS: i64 = 7;

#[derive(Debug, Default, PartialEq)]
pub struct RecentRuns {
    pub runs: Vec<WorkflowRun>,
    /// Runs excluded because `created_at` could not be parsed.
    pub unparseable: usize,
}

/// Parses an RFC 3339 instant, or a bare `YYYY-MM-DD` date read as UTC midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Keeps runs created at or after `now - 7 days`, in input order.
///
/// There is no upper bound, so runs stamped in the future are kept.
pub fn filter_recent(runs: &[WorkflowRun], now: DateTime<Utc>) -> RecentRuns {
    let cutoff = now - Duration::days(WINDOW_DAYS);
    let mut recent = RecentRuns::default();

    for run in runs {
        match parse_timestamp(&run.created_at) {
            Some(created_at) if created_at >= cutoff => recent.runs.push(run.clone()),
            Some(_) => {}
            None => recent.unparseable += 1,
        }
    }

    recent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Conclusion;

    fn run(id: &str, created_at: &str) -> WorkflowRun {
        WorkflowRun {
            id: id.to_string(),
            name: "CI".to_string(),
            conclusion: Conclusion::Success,
            head_branch: "main".to_string(),
            created_at: created_at.to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_filter_keeps_runs_inside_window_in_order() {
        let runs = vec![
            run("1", "2024-03-15T09:00:00Z"),
            run("2", "2024-03-01T09:00:00Z"),
            run("3", "2024-03-10T09:00:00Z"),
        ];

        let recent = filter_recent(&runs, now());

        let ids: Vec<_> = recent.runs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(recent.unparseable, 0);
    }

    #[test]
    fn test_filter_cutoff_is_inclusive() {
        let runs = vec![
            run("edge", "2024-03-08T12:00:00Z"),
            run("before", "2024-03-08T11:59:59Z"),
        ];

        let recent = filter_recent(&runs, now());

        assert_eq!(recent.runs.len(), 1);
        assert_eq!(recent.runs[0].id, "edge");
    }

    #[test]
    fn test_filter_keeps_future_runs() {
        let runs = vec![run("future", "2030-01-01T00:00:00Z")];

        assert_eq!(filter_recent(&runs, now()).runs.len(), 1);
    }

    #[test]
    fn test_filter_counts_unparseable_timestamps() {
        let runs = vec![
            run("bad", "yesterday-ish"),
            run("ok", "2024-03-14T00:00:00+02:00"),
            run("empty", ""),
        ];

        let recent = filter_recent(&runs, now());

        assert_eq!(recent.runs.len(), 1);
        assert_eq!(recent.unparseable, 2);
    }

    #[test]
    fn test_filter_empty_input() {
        assert_eq!(filter_recent(&[], now()), RecentRuns::default());
    }

    #[test]
    fn test_parse_bare_date_as_utc_midnight() {
        let parsed = parse_timestamp("2024-01-02").unwrap();

        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_offset_timestamp_normalizes_to_utc() {
        let parsed = parse_timestamp("2024-01-02T03:00:00+02:00").unwrap();

        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 2, 1, 0, 0).unwrap());
    }
}
