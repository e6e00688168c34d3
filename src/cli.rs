use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use log::{info, warn};

use crate::auth::Token;
use crate::demo;
use crate::insights::RiskReport;
use crate::narration::{MetricsSnapshot, Narration, NarrationClient};
use crate::providers::github::GitHubProvider;

#[derive(Parser)]
#[command(name = "shadowops")]
#[command(author, version, about = "CI Risk Insights Tool", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output file path (defaults to stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Pretty print JSON output
    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,

    /// Timeout in seconds for each outbound HTTP request
    #[arg(long, global = true, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect risk insights from GitHub Actions
    Github {
        /// GitHub API token (optional, required for private repositories)
        #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// GitHub API URL
        #[arg(short, long, default_value = "https://api.github.com")]
        url: String,

        /// Repository owner (user or organization)
        #[arg(short = 'O', long)]
        owner: String,

        /// Repository name
        #[arg(short, long)]
        repo: String,

        /// Number of workflow runs and commits to fetch
        #[arg(short, long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..=100))]
        limit: u32,

        #[command(flatten)]
        narration: NarrationArgs,
    },

    /// Build the report from a simulated seven-day degradation
    Demo {
        #[command(flatten)]
        narration: NarrationArgs,
    },
}

#[derive(Args)]
struct NarrationArgs {
    /// Ask a language model to narrate the metrics
    #[arg(short, long, default_value_t = false)]
    explain: bool,

    /// API key for the chat completion endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, default_value = "https://api.openai.com/v1/")]
    openai_url: String,

    /// Model used for narration
    #[arg(long, default_value = "gpt-4o-mini")]
    model: String,
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        let now = Utc::now();
        let timeout = Duration::from_secs(self.timeout);

        let (mut report, narration) = match &self.command {
            Commands::Github {
                token,
                url,
                owner,
                repo,
                limit,
                narration,
            } => {
                info!("Collecting GitHub insights for repository: {owner}/{repo}");

                let token = Token::from_optional(token.as_deref());
                let provider =
                    GitHubProvider::new(url, owner.clone(), repo.clone(), token, timeout)?;
                (provider.collect_insights(*limit, now).await?, narration)
            }
            Commands::Demo { narration } => (demo::collect_insights(now)?, narration),
        };

        if narration.explain {
            report.narration = narration.narrate(&report, timeout).await;
        }

        self.write_report(&report)?;

        Ok(())
    }

    fn write_report(&self, report: &RiskReport) -> crate::error::Result<()> {
        let json_output = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };

        if let Some(output_path) = &self.output {
            std::fs::write(output_path, json_output)?;
            info!("Insights written to: {}", output_path.display());
        } else {
            println!("{json_output}");
        }

        Ok(())
    }
}

impl NarrationArgs {
    /// Narration never fails the report; problems are logged and skipped.
    async fn narrate(&self, report: &RiskReport, timeout: Duration) -> Option<Narration> {
        let Some(api_key) = Token::from_optional(self.openai_key.as_deref()) else {
            warn!("Narration requested but no OPENAI_API_KEY is set, skipping");
            return None;
        };

        let client =
            match NarrationClient::new(&self.openai_url, api_key, self.model.clone(), timeout) {
                Ok(client) => client,
                Err(e) => {
                    warn!("Narration unavailable: {e}");
                    return None;
                }
            };

        match client.explain(&MetricsSnapshot::from(report)).await {
            Ok(narration) => Some(narration),
            Err(e) => {
                warn!("Narration failed: {e}");
                None
            }
        }
    }
}
