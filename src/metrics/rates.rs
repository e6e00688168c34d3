use indexmap::IndexMap;

use crate::insights::{FailureCluster, RunSummary};
use crate::models::WorkflowRun;

const UNKNOWN_WORKFLOW: &str = "Unknown Workflow";

pub fn summarize(runs: &[WorkflowRun]) -> RunSummary {
    let total_runs = runs.len();
    let failed_runs = runs.iter().filter(|r| r.conclusion.is_failure()).count();
    let other_runs = runs
        .iter()
        .filter(|r| !r.conclusion.is_failure() && !r.conclusion.is_success())
        .count();

    RunSummary {
        total_runs,
        failed_runs,
        other_runs,
        failure_rate: failure_rate(total_runs, failed_runs),
        success_rate: success_rate_label(total_runs, failed_runs),
        streak: failure_streak(runs),
    }
}

pub fn failure_rate(total: usize, failed: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let rate = failed as f64 / total as f64;
    rate
}

/// Success percentage to one decimal, rounding halves away from zero.
pub fn success_rate_label(total: usize, failed: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }

    #[allow(clippy::cast_precision_loss)]
    let percentage = (total.saturating_sub(failed) as f64 / total as f64) * 100.0;
    let rounded = (percentage * 10.0).round() / 10.0;

    format!("{rounded:.1}%")
}

/// Number of leading failures. `runs` must be ordered most recent first.
pub fn failure_streak(runs: &[WorkflowRun]) -> usize {
    runs.iter()
        .take_while(|r| r.conclusion.is_failure())
        .count()
}

/// The workflow with the most failures; the first one seen wins a tie.
pub fn top_failing_workflow<'a, I>(runs: I) -> Option<FailureCluster>
where
    I: IntoIterator<Item = &'a WorkflowRun>,
{
    let mut counts: IndexMap<&str, usize> = IndexMap::new();

    for run in runs.into_iter().filter(|r| r.conclusion.is_failure()) {
        let name = if run.name.is_empty() {
            UNKNOWN_WORKFLOW
        } else {
            run.name.as_str()
        };
        *counts.entry(name).or_insert(0) += 1;
    }

    let mut top: Option<(&str, usize)> = None;
    for (name, count) in counts {
        if top.map_or(true, |(_, best)| count > best) {
            top = Some((name, count));
        }
    }

    top.map(|(name, failures)| FailureCluster {
        workflow: name.to_string(),
        failures,
    })
}
