use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use super::rates::top_failing_workflow;
use super::window::parse_timestamp;
use crate::insights::ChartDataPoint;
use crate::models::{Conclusion, WorkflowRun};

const SHORT_DATE: &str = "%-m/%-d/%Y";
const LONG_TIMESTAMP: &str = "%-m/%-d/%Y, %-I:%M:%S %p";
const DAY_LABEL: &str = "%Y-%m-%d";

/// One point per run, in the order given.
pub fn per_run(runs: &[WorkflowRun]) -> Vec<ChartDataPoint> {
    runs.iter()
        .map(|run| {
            let created_at = parse_timestamp(&run.created_at);

            ChartDataPoint {
                date: render(created_at, SHORT_DATE, &run.created_at),
                status: u8::from(run.conclusion.is_failure()),
                risk: None,
                name: run.name.clone(),
                conclusion: run.conclusion.clone(),
                created_at: render(created_at, LONG_TIMESTAMP, &run.created_at),
            }
        })
        .collect()
}

/// One point per UTC calendar day, oldest first, carrying the day's failure
/// percentage. Runs with unparseable timestamps are left out.
pub fn per_day(runs: &[WorkflowRun]) -> Vec<ChartDataPoint> {
    let mut days: BTreeMap<NaiveDate, Vec<(DateTime<Utc>, &WorkflowRun)>> = BTreeMap::new();

    for run in runs {
        if let Some(created_at) = parse_timestamp(&run.created_at) {
            days.entry(created_at.date_naive())
                .or_default()
                .push((created_at, run));
        }
    }

    days.into_iter()
        .map(|(day, entries)| {
            let total = entries.len();
            let failures = entries
                .iter()
                .filter(|(_, r)| r.conclusion.is_failure())
                .count();

            #[allow(clippy::cast_precision_loss)]
            let percentage = (failures as f64 / total as f64) * 100.0;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let risk = percentage.round() as u8;

            let latest = entries
                .iter()
                .map(|(ts, _)| *ts)
                .max()
                .map(|ts| ts.format(LONG_TIMESTAMP).to_string())
                .unwrap_or_default();
            let name = top_failing_workflow(entries.iter().map(|(_, r)| *r))
                .map(|cluster| cluster.workflow)
                .or_else(|| entries.first().map(|(_, r)| r.name.clone()))
                .unwrap_or_default();

            ChartDataPoint {
                date: day.format(DAY_LABEL).to_string(),
                status: u8::from(failures > 0),
                risk: Some(risk),
                name,
                conclusion: if failures > 0 {
                    Conclusion::Failure
                } else {
                    Conclusion::Success
                },
                created_at: latest,
            }
        })
        .collect()
}

fn render(created_at: Option<DateTime<Utc>>, format: &str, raw: &str) -> String {
    created_at.map_or_else(|| raw.to_string(), |ts| ts.format(format).to_string())
}
