use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use super::Provider;

const API_URL: &str = "https://api.openai.com/v1/chat/completions";

const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that generates conventional commit messages.";

/// OpenAI chat-completions provider
pub struct OpenAiProvider {
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(model: &str, api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            model: model.to_string(),
            api_key,
            client: super::http_client()?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate_message(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_ref()
            .context("OpenAI API key not configured")?;

        let response = self
            .client
            .post(API_URL)
            .bearer_auth(api_key)
            .json(&json!({
                "model": &self.model,
                "messages": [
                    { "role": "system", "content": SYSTEM_PROMPT },
                    { "role": "user", "content": prompt }
                ]
            }))
            .send()
            .await
            .context("OpenAI request failed")?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED => anyhow::bail!("OpenAI rejected the API key"),
            StatusCode::TOO_MANY_REQUESTS => anyhow::bail!("OpenAI rate limit exceeded"),
            status => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<unreadable response body>".to_string());
                anyhow::bail!("OpenAI returned {}: {}", status, body);
            }
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI response")?;

        let message = parsed
            .choices
            .into_iter()
            .next()
            .context("OpenAI response contained no choices")?
            .message
            .content;

        Ok(message.trim().to_string())
    }
}
