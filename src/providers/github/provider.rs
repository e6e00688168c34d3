use std::cmp::Reverse;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{info, warn};

use super::client::GitHubClient;
use crate::auth::Token;
use crate::error::Result;
use crate::insights::{CommitSummary, RiskReport};
use crate::metrics::{self, chart, rates, window};

pub struct GitHubProvider {
    client: GitHubClient,
    owner: String,
    repo: String,
}

impl GitHubProvider {
    pub fn new(
        api_url: &str,
        owner: String,
        repo: String,
        token: Option<Token>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = GitHubClient::new(api_url, token, timeout)?;

        Ok(Self {
            client,
            owner,
            repo,
        })
    }

    fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Fetches runs and commits, then scores the runs of the last seven days
    /// relative to `now`.
    pub async fn collect_insights(&self, limit: u32, now: DateTime<Utc>) -> Result<RiskReport> {
        let repository = self.repository();
        info!("Starting insights collection for repository: {repository}");

        let (mut runs, commits) = futures::try_join!(
            self.client.fetch_workflow_runs(&self.owner, &self.repo, limit),
            self.client.fetch_commits(&self.owner, &self.repo, limit),
        )?;

        info!(
            "Fetched {} workflow runs and {} commits",
            runs.len(),
            commits.len()
        );

        // Streak detection reads the newest run first.
        runs.sort_by_key(|run| Reverse(window::parse_timestamp(&run.created_at)));

        let recent = window::filter_recent(&runs, now);
        if recent.unparseable > 0 {
            warn!(
                "Skipped {} workflow runs with unparseable timestamps",
                recent.unparseable
            );
        }
        if recent.runs.is_empty() {
            warn!("No workflow runs in the last {} days for: {repository}", window::WINDOW_DAYS);
        }

        let chronological: Vec<_> = recent.runs.iter().rev().cloned().collect();
        let analysis = metrics::analyze(
            rates::summarize(&recent.runs),
            &recent.runs,
            chart::per_run(&chronological),
        )?;

        info!(
            "Risk score {} ({}) over {} runs",
            analysis.risk.score, analysis.risk.level, analysis.summary.total_runs
        );

        Ok(RiskReport {
            provider: "GitHub".to_string(),
            repository,
            collected_at: now,
            window_days: window::WINDOW_DAYS,
            skipped_runs: recent.unparseable,
            analysis,
            recent_runs: recent.runs,
            recent_commits: commits.into_iter().map(CommitSummary::from).collect(),
            narration: None,
        })
    }
}
