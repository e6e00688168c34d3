pub mod chart;
pub mod rates;
pub mod risk;
pub mod spike;
pub mod window;

use crate::error::Result;
use crate::insights::{Analysis, ChartDataPoint, RunSummary};
use crate::models::WorkflowRun;

/// Combines an already computed run summary and chart series into the
/// derived risk signals.
pub fn analyze(
    summary: RunSummary,
    runs: &[WorkflowRun],
    chart: Vec<ChartDataPoint>,
) -> Result<Analysis> {
    let risk = risk::assess(summary.failure_rate, summary.streak)?;
    let spike_detected = spike::detect_spike(&chart, spike::SpikePolicy::for_series(&chart));

    Ok(Analysis {
        summary,
        risk,
        spike_detected,
        risk_trend: spike::risk_trend(&chart),
        top_failing_workflow: rates::top_failing_workflow(runs),
        chart,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::{RiskLevel, RiskTrend};
    use crate::models::Conclusion;

    fn run(conclusion: Conclusion, created_at: &str) -> WorkflowRun {
        WorkflowRun {
            id: created_at.to_string(),
            name: "tests".to_string(),
            conclusion,
            head_branch: "main".to_string(),
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_analyze_failure_after_success() {
        // most recent first
        let runs = vec![
            run(Conclusion::Failure, "2024-01-02T00:00:00Z"),
            run(Conclusion::Success, "2024-01-01T00:00:00Z"),
        ];
        let chronological: Vec<_> = runs.iter().rev().cloned().collect();

        let analysis = analyze(
            rates::summarize(&runs),
            &runs,
            chart::per_run(&chronological),
        )
        .unwrap();

        assert_eq!(analysis.risk.score, 45);
        assert_eq!(analysis.risk.level, RiskLevel::Medium);
        assert!(analysis.spike_detected);
        assert_eq!(analysis.risk_trend, RiskTrend::Stable);
        assert_eq!(analysis.top_failing_workflow.unwrap().failures, 1);
    }

    #[test]
    fn test_analyze_empty() {
        let analysis = analyze(rates::summarize(&[]), &[], Vec::new()).unwrap();

        assert_eq!(analysis.summary.success_rate, "0%");
        assert_eq!(analysis.risk.score, 0);
        assert_eq!(analysis.risk.level, RiskLevel::Low);
        assert!(!analysis.spike_detected);
        assert!(analysis.top_failing_workflow.is_none());
    }
}
