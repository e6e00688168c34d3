use serde::{Deserialize, Deserializer, Serialize};

/// Outcome of a workflow run as reported by GitHub.
///
/// GitHub sends `conclusion` as a nullable string. Only `failure` counts
/// against the repository; everything that is not `success` or `failure`
/// is preserved verbatim in `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Conclusion {
    Success,
    Failure,
    /// The run has not finished yet (`null` conclusion).
    #[default]
    Pending,
    Other(String),
}

impl Conclusion {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Pending => "pending",
            Self::Other(value) => value,
        }
    }
}

impl From<Option<String>> for Conclusion {
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            None => Self::Pending,
            Some("success") => Self::Success,
            Some("failure") => Self::Failure,
            Some(other) => Self::Other(other.to_string()),
        }
    }
}

impl From<Conclusion> for Option<String> {
    fn from(value: Conclusion) -> Self {
        match value {
            Conclusion::Pending => None,
            other => Some(other.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRun {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub conclusion: Conclusion,
    #[serde(default, deserialize_with = "null_as_default")]
    pub head_branch: String,
    pub created_at: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

// GitHub run ids are numeric; keep them opaque.
fn id_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(id) => id.to_string(),
        RawId::Text(id) => id,
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_github_run() {
        let json = r#"{
            "id": 30433642,
            "name": "Build",
            "conclusion": "failure",
            "head_branch": "main",
            "created_at": "2024-01-01T10:00:00Z",
            "status": "completed"
        }"#;

        let run: WorkflowRun = serde_json::from_str(json).unwrap();

        assert_eq!(run.id, "30433642");
        assert_eq!(run.name, "Build");
        assert_eq!(run.conclusion, Conclusion::Failure);
        assert_eq!(run.head_branch, "main");
    }

    #[test]
    fn test_null_conclusion_is_pending() {
        let json = r#"{"id": "7", "name": null, "conclusion": null, "head_branch": null, "created_at": "2024-01-01"}"#;

        let run: WorkflowRun = serde_json::from_str(json).unwrap();

        assert_eq!(run.conclusion, Conclusion::Pending);
        assert_eq!(run.name, "");
        assert_eq!(run.head_branch, "");
    }

    #[test]
    fn test_other_conclusions_are_kept_verbatim() {
        let conclusion = Conclusion::from(Some("cancelled".to_string()));

        assert_eq!(conclusion, Conclusion::Other("cancelled".to_string()));
        assert_eq!(conclusion.as_str(), "cancelled");
        assert!(!conclusion.is_failure());
        assert!(!conclusion.is_success());
    }

    #[test]
    fn test_conclusion_serializes_as_github_string() {
        assert_eq!(
            serde_json::to_string(&Conclusion::Failure).unwrap(),
            "\"failure\""
        );
        assert_eq!(serde_json::to_string(&Conclusion::Pending).unwrap(), "null");
    }
}
