use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Conclusion, WorkflowRun};
use crate::narration::Narration;

#[derive(Debug, Serialize, Deserialize)]
pub struct RiskReport {
    pub provider: String,
    pub repository: String,
    pub collected_at: DateTime<Utc>,
    pub window_days: i64,
    /// Runs dropped from the window because their timestamp did not parse.
    pub skipped_runs: usize,
    #[serde(flatten)]
    pub analysis: Analysis,
    /// The windowed runs, most recent first.
    pub recent_runs: Vec<WorkflowRun>,
    pub recent_commits: Vec<CommitSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narration: Option<Narration>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub summary: RunSummary,
    pub risk: RiskAssessment,
    pub spike_detected: bool,
    pub risk_trend: RiskTrend,
    pub top_failing_workflow: Option<FailureCluster>,
    pub chart: Vec<ChartDataPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_runs: usize,
    pub failed_runs: usize,
    /// Finished or pending runs that are neither `success` nor `failure`.
    pub other_runs: usize,
    pub failure_rate: f64,
    pub success_rate: String,
    pub streak: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u8,
    pub level: RiskLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTrend {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureCluster {
    pub workflow: String,
    pub failures: usize,
}

/// One display-oriented point. Per-run points leave `risk` empty; per-day
/// aggregate points carry the day's failure percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataPoint {
    pub date: String,
    pub status: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<u8>,
    pub name: String,
    pub conclusion: Conclusion,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
    pub message: String,
    pub author: String,
}
