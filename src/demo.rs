//! A built-in seven-day degradation scenario for trying the report without
//! a GitHub repository.

use chrono::{DateTime, Days, SecondsFormat, TimeZone, Utc};
use log::info;

use crate::error::Result;
use crate::insights::RiskReport;
use crate::metrics::{self, chart, rates, window};
use crate::models::{Conclusion, WorkflowRun};

pub const REPOSITORY: &str = "demo/degrading-service";

const FAILING_WORKFLOW: &str = "Integration Tests";
const PASSING_WORKFLOW: &str = "Build & Unit Tests";

/// The streak the scenario reports: the last three days fail heavily.
pub const DECLARED_STREAK: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct DemoDay {
    pub day_offset: u64,
    pub failures: usize,
    pub total: usize,
}

#[rustfmt::skip]
pub const DEGRADATION: [DemoDay; 7] = [
    DemoDay { day_offset: 6, failures: 0, total: 3 },
    DemoDay { day_offset: 5, failures: 0, total: 4 },
    DemoDay { day_offset: 4, failures: 1, total: 4 },
    DemoDay { day_offset: 3, failures: 2, total: 5 },
    DemoDay { day_offset: 2, failures: 3, total: 5 },
    DemoDay { day_offset: 1, failures: 4, total: 6 },
    DemoDay { day_offset: 0, failures: 5, total: 6 },
];

/// Synthesizes the scenario's runs, most recent first. Each day's runs start
/// at 01:00 UTC, one per hour, with the day's failures being the latest.
pub fn synthesize_runs(now: DateTime<Utc>) -> Vec<WorkflowRun> {
    let today = now.date_naive();
    let mut runs = Vec::new();

    for day in DEGRADATION.iter().rev() {
        let Some(date) = today.checked_sub_days(Days::new(day.day_offset)) else {
            continue;
        };

        for index in (0..day.total).rev() {
            let Some(naive) = u32::try_from(index + 1)
                .ok()
                .and_then(|hour| date.and_hms_opt(hour, 0, 0))
            else {
                continue;
            };
            let is_failure = index >= day.total - day.failures;

            runs.push(WorkflowRun {
                id: format!("demo-{}-{index}", day.day_offset),
                name: if is_failure {
                    FAILING_WORKFLOW
                } else {
                    PASSING_WORKFLOW
                }
                .to_string(),
                conclusion: if is_failure {
                    Conclusion::Failure
                } else {
                    Conclusion::Success
                },
                head_branch: "main".to_string(),
                created_at: Utc
                    .from_utc_datetime(&naive)
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
            });
        }
    }

    runs
}

pub fn collect_insights(now: DateTime<Utc>) -> Result<RiskReport> {
    info!("Building demo insights for: {REPOSITORY}");

    let runs = synthesize_runs(now);

    let mut summary = rates::summarize(&runs);
    summary.streak = DECLARED_STREAK;

    let analysis = metrics::analyze(summary, &runs, chart::per_day(&runs))?;

    Ok(RiskReport {
        provider: "Demo".to_string(),
        repository: REPOSITORY.to_string(),
        collected_at: now,
        window_days: window::WINDOW_DAYS,
        skipped_runs: 0,
        analysis,
        recent_runs: runs,
        recent_commits: Vec::new(),
        narration: None,
    })
}
