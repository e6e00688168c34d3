use crate::error::{Result, ShadowOpsError};
use crate::insights::{RiskAssessment, RiskLevel};

const MAX_SCORE: f64 = 100.0;

/// Linear weights combining failure density and the current failure streak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskWeights {
    pub failure_rate: f64,
    pub streak: f64,
}

impl RiskWeights {
    pub const CANONICAL: Self = Self {
        failure_rate: 60.0,
        streak: 15.0,
    };

    /// `min(100, round(rate * w_rate + streak * w_streak))`, halves rounding
    /// away from zero.
    ///
    /// `failure_rate` must be a finite value in `[0, 1]`.
    pub fn score(&self, failure_rate: f64, streak: usize) -> Result<u8> {
        if !failure_rate.is_finite() || !(0.0..=1.0).contains(&failure_rate) {
            return Err(ShadowOpsError::InvalidInput(format!(
                "failure rate must be within [0, 1], got {failure_rate}"
            )));
        }

        #[allow(clippy::cast_precision_loss)]
        let raw = failure_rate * self.failure_rate + streak as f64 * self.streak;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let score = raw.round().clamp(0.0, MAX_SCORE) as u8;
        Ok(score)
    }
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self::CANONICAL
    }
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        if score > 70 {
            Self::High
        } else if score > 40 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

pub fn risk_score(failure_rate: f64, streak: usize) -> Result<u8> {
    RiskWeights::CANONICAL.score(failure_rate, streak)
}

pub fn assess(failure_rate: f64, streak: usize) -> Result<RiskAssessment> {
    let score = risk_score(failure_rate, streak)?;

    Ok(RiskAssessment {
        score,
        level: RiskLevel::from_score(score),
    })
}
