use crate::insights::{ChartDataPoint, RiskTrend};

/// Which field of a chart point carries the failure signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Binary per-run status (0 or 1).
    Status,
    /// Per-day failure percentage; a missing value reads as 0.
    Risk,
}

/// A spike is `last > prev * multiplier && last > floor` on the chosen signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpikePolicy {
    pub signal: Signal,
    pub multiplier: f64,
    pub floor: f64,
}

impl SpikePolicy {
    pub const BINARY: Self = Self {
        signal: Signal::Status,
        multiplier: 2.0,
        floor: 0.0,
    };

    pub const PERCENTAGE: Self = Self {
        signal: Signal::Risk,
        multiplier: 1.5,
        floor: 20.0,
    };

    /// Aggregate series (every point has a risk value) use the percentage
    /// policy; per-run series use the binary one.
    pub fn for_series(points: &[ChartDataPoint]) -> Self {
        if !points.is_empty() && points.iter().all(|p| p.risk.is_some()) {
            Self::PERCENTAGE
        } else {
            Self::BINARY
        }
    }

    fn value(&self, point: &ChartDataPoint) -> f64 {
        match self.signal {
            Signal::Status => f64::from(point.status),
            Signal::Risk => f64::from(point.risk.unwrap_or(0)),
        }
    }
}

/// Compares the last two points of an oldest-first series.
pub fn detect_spike(points: &[ChartDataPoint], policy: SpikePolicy) -> bool {
    let [.., prev, last] = points else {
        return false;
    };

    let prev = policy.value(prev);
    let last = policy.value(last);

    last > prev * policy.multiplier && last > policy.floor
}

pub fn risk_trend(points: &[ChartDataPoint]) -> RiskTrend {
    let [.., prev, last] = points else {
        return RiskTrend::Stable;
    };

    let prev = prev.risk.unwrap_or(0);
    let last = last.risk.unwrap_or(0);

    match last.cmp(&prev) {
        std::cmp::Ordering::Greater => RiskTrend::Increasing,
        std::cmp::Ordering::Less => RiskTrend::Decreasing,
        std::cmp::Ordering::Equal => RiskTrend::Stable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Conclusion;

    fn status_point(status: u8) -> ChartDataPoint {
        ChartDataPoint {
            date: "1/1/2024".to_string(),
            status,
            risk: None,
            name: "ci".to_string(),
            conclusion: if status > 0 {
                Conclusion::Failure
            } else {
                Conclusion::Success
            },
            created_at: String::new(),
        }
    }

    fn risk_point(risk: u8) -> ChartDataPoint {
        ChartDataPoint {
            risk: Some(risk),
            ..status_point(u8::from(risk > 0))
        }
    }

    fn statuses(values: &[u8]) -> Vec<ChartDataPoint> {
        values.iter().copied().map(status_point).collect()
    }

    fn risks(values: &[u8]) -> Vec<ChartDataPoint> {
        values.iter().copied().map(risk_point).collect()
    }

    #[test]
    fn test_binary_success_then_failure_is_spike() {
        assert!(detect_spike(&statuses(&[0, 1]), SpikePolicy::BINARY));
    }

    #[test]
    fn test_binary_repeated_failure_is_not_spike() {
        assert!(!detect_spike(&statuses(&[1, 1]), SpikePolicy::BINARY));
    }

    #[test]
    fn test_binary_recovery_is_not_spike() {
        assert!(!detect_spike(&statuses(&[1, 0]), SpikePolicy::BINARY));
        assert!(!detect_spike(&statuses(&[0, 0]), SpikePolicy::BINARY));
    }

    #[test]
    fn test_binary_only_last_two_points_matter() {
        assert!(detect_spike(&statuses(&[1, 1, 0, 1]), SpikePolicy::BINARY));
        assert!(!detect_spike(&statuses(&[0, 0, 1, 1]), SpikePolicy::BINARY));
    }

    #[test]
    fn test_fewer_than_two_points_is_not_spike() {
        assert!(!detect_spike(&statuses(&[1]), SpikePolicy::BINARY));
        assert!(!detect_spike(&[], SpikePolicy::BINARY));
        assert!(!detect_spike(&risks(&[90]), SpikePolicy::PERCENTAGE));
    }

    #[test]
    fn test_percentage_requires_jump_and_floor() {
        assert!(detect_spike(&risks(&[10, 40]), SpikePolicy::PERCENTAGE));
        // 1.5 * 40 = 60 is not exceeded
        assert!(!detect_spike(&risks(&[40, 60]), SpikePolicy::PERCENTAGE));
        // jump from zero but below the floor
        assert!(!detect_spike(&risks(&[0, 20]), SpikePolicy::PERCENTAGE));
        assert!(detect_spike(&risks(&[0, 21]), SpikePolicy::PERCENTAGE));
    }

    #[test]
    fn test_percentage_policy_on_steady_degradation() {
        let points = risks(&[0, 0, 25, 40, 60, 67, 83]);

        assert!(!detect_spike(&points, SpikePolicy::PERCENTAGE));
    }

    #[test]
    fn test_policy_for_series() {
        assert_eq!(SpikePolicy::for_series(&risks(&[1, 2])), SpikePolicy::PERCENTAGE);
        assert_eq!(SpikePolicy::for_series(&statuses(&[0, 1])), SpikePolicy::BINARY);
        assert_eq!(SpikePolicy::for_series(&[]), SpikePolicy::BINARY);

        let mut mixed = risks(&[1]);
        mixed.push(status_point(1));
        assert_eq!(SpikePolicy::for_series(&mixed), SpikePolicy::BINARY);
    }

    #[test]
    fn test_detection_is_idempotent() {
        let points = statuses(&[0, 1]);

        assert_eq!(
            detect_spike(&points, SpikePolicy::BINARY),
            detect_spike(&points, SpikePolicy::BINARY)
        );
    }

    #[test]
    fn test_risk_trend() {
        assert_eq!(risk_trend(&risks(&[20, 40])), RiskTrend::Increasing);
        assert_eq!(risk_trend(&risks(&[40, 20])), RiskTrend::Decreasing);
        assert_eq!(risk_trend(&risks(&[40, 40])), RiskTrend::Stable);
        assert_eq!(risk_trend(&risks(&[40])), RiskTrend::Stable);
        assert_eq!(risk_trend(&statuses(&[0, 1])), RiskTrend::Stable);
    }
}
