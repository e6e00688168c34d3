use std::time::Duration;

use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::prompt::build_prompt;
use super::{MetricsSnapshot, Narration};
use crate::auth::Token;
use crate::error::{Result, ShadowOpsError};

const USER_AGENT: &str = concat!("shadowops/", env!("CARGO_PKG_VERSION"));
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 700;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat completion endpoint.
pub struct NarrationClient {
    client: Client,
    completions_url: Url,
    api_key: Token,
    model: String,
}

impl NarrationClient {
    pub fn new(base_url: &str, api_key: Token, model: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ShadowOpsError::Config(format!("Failed to create HTTP client: {e}")))?;

        let mut base = Url::parse(base_url)
            .map_err(|e| ShadowOpsError::Config(format!("Invalid narration URL: {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let completions_url = base
            .join("chat/completions")
            .map_err(|e| ShadowOpsError::Config(format!("Invalid narration URL: {e}")))?;

        Ok(Self {
            client,
            completions_url,
            api_key,
            model,
        })
    }

    pub async fn explain(&self, metrics: &MetricsSnapshot) -> Result<Narration> {
        info!("Requesting narration from model: {}", self.model);

        let prompt = build_prompt(metrics);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(self.completions_url.clone())
            .bearer_auth(self.api_key.as_str())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ShadowOpsError::Api(format!(
                "Narration request failed: {status} - {text}"
            )));
        }

        let completion: ChatResponse = serde_json::from_str(&text)?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        debug!("Narration received ({} chars)", content.len());

        Ok(Narration::from_text(&self.model, content))
    }
}
