use serde::Deserialize;

use crate::insights::CommitSummary;
use crate::models::WorkflowRun;

/// `GET /repos/{owner}/{repo}/actions/runs`
#[derive(Debug, Deserialize)]
pub struct WorkflowRunsPage {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub workflow_runs: Vec<WorkflowRun>,
}

/// One element of `GET /repos/{owner}/{repo}/commits`
#[derive(Debug, Deserialize)]
pub struct GitHubCommitDto {
    pub sha: String,
    pub commit: GitHubCommitDetail,
}

#[derive(Debug, Deserialize)]
pub struct GitHubCommitDetail {
    #[serde(default)]
    pub message: String,
    pub author: Option<GitHubCommitAuthor>,
}

#[derive(Debug, Deserialize)]
pub struct GitHubCommitAuthor {
    #[serde(default)]
    pub name: String,
}

impl From<GitHubCommitDto> for CommitSummary {
    fn from(dto: GitHubCommitDto) -> Self {
        Self {
            sha: dto.sha.chars().take(7).collect(),
            message: dto
                .commit
                .message
                .lines()
                .next()
                .unwrap_or_default()
                .to_string(),
            author: dto.commit.author.map(|a| a.name).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_page_without_runs_is_empty() {
        let page: WorkflowRunsPage = serde_json::from_str(r#"{"total_count": 0}"#).unwrap();

        assert!(page.workflow_runs.is_empty());
    }

    #[test]
    fn test_commit_summary_keeps_first_line_and_short_sha() {
        let dto: GitHubCommitDto = serde_json::from_str(
            r#"{
                "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
                "commit": {
                    "message": "Fix flaky integration test\n\nLonger body here.",
                    "author": {"name": "Monalisa Octocat", "date": "2024-01-01T00:00:00Z"}
                }
            }"#,
        )
        .unwrap();

        let summary = CommitSummary::from(dto);

        assert_eq!(summary.sha, "6dcb09b");
        assert_eq!(summary.message, "Fix flaky integration test");
        assert_eq!(summary.author, "Monalisa Octocat");
    }

    #[test]
    fn test_commit_without_author() {
        let dto: GitHubCommitDto =
            serde_json::from_str(r#"{"sha": "abc", "commit": {"message": "", "author": null}}"#)
                .unwrap();

        let summary = CommitSummary::from(dto);

        assert_eq!(summary.sha, "abc");
        assert_eq!(summary.message, "");
        assert_eq!(summary.author, "");
    }
}
