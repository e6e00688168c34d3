mod client;
mod prompt;
mod snapshot;

use serde::{Deserialize, Serialize};

use crate::insights::{RiskLevel, RiskReport};

pub use client::NarrationClient;
pub use snapshot::ActionSnapshot;

/// The numbers a narration is asked to explain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub total_runs: usize,
    pub failed_runs: usize,
    pub success_rate: String,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub streak: usize,
}

impl From<&RiskReport> for MetricsSnapshot {
    fn from(report: &RiskReport) -> Self {
        let summary = &report.analysis.summary;

        Self {
            total_runs: summary.total_runs,
            failed_runs: summary.failed_runs,
            success_rate: summary.success_rate.clone(),
            risk_score: report.analysis.risk.score,
            risk_level: report.analysis.risk.level,
            streak: summary.streak,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narration {
    pub model: String,
    pub explanation: String,
    pub snapshot: ActionSnapshot,
    pub full_analysis: String,
}

impl Narration {
    pub fn from_text(model: &str, text: String) -> Self {
        Self {
            model: model.to_string(),
            snapshot: ActionSnapshot::parse(&text),
            full_analysis: snapshot::full_analysis(&text),
            explanation: text,
        }
    }
}
