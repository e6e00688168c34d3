use super::MetricsSnapshot;

pub fn build_prompt(metrics: &MetricsSnapshot) -> String {
    format!(
        "You are an engineering reliability system generating an automated CI incident report.

Analyze these metrics:

Total runs (7d): {total}
Failed runs (7d): {failed}
Success rate: {success_rate}
Risk score: {score}/100
Risk level: {level}
Consecutive failures (most recent): {streak}

Respond STRICTLY in this format:

EXECUTIVE_SUMMARY: <one concise sentence about system health>

PRIMARY_RISK_DRIVER: <one sentence identifying the root cause>

IMMEDIATE_ACTION: <one specific, actionable technical step>

FULL_ANALYSIS:
<detailed structured explanation with numbered sections covering: risk justification, failure dynamics, and 3 remediation steps>

REQUIREMENTS:
- Keep tone analytical and confident
- Avoid generic platitudes
- Reference actual metrics in your analysis
- Make immediate action specific and technical
",
        total = metrics.total_runs,
        failed = metrics.failed_runs,
        success_rate = metrics.success_rate,
        score = metrics.risk_score,
        level = metrics.risk_level,
        streak = metrics.streak,
    )
}
