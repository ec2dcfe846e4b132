use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use super::Provider;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Google Gemini generateContent provider
pub struct GeminiProvider {
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(model: &str, api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            model: model.to_string(),
            api_key,
            client: super::http_client()?,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", API_BASE, self.model)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: String,
}

#[async_trait]
impl Provider for GeminiProvider {
    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate_message(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_ref()
            .context("Google API key not configured")?;

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&json!({
                "contents": [
                    { "parts": [ { "text": prompt } ] }
                ]
            }))
            .send()
            .await
            .context("Gemini request failed")?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                anyhow::bail!("Gemini rejected the API key")
            }
            StatusCode::TOO_MANY_REQUESTS => anyhow::bail!("Gemini rate limit exceeded"),
            status => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<unreadable response body>".to_string());
                anyhow::bail!("Gemini returned {}: {}", status, body);
            }
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .context("Gemini response contained no candidates")?
            .content
            .parts
            .into_iter()
            .next()
            .context("Gemini candidate contained no text parts")?
            .text;

        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_tracks_key_presence() {
        let without_key = GeminiProvider::new("gemini-2.0-flash", None).unwrap();
        assert!(!without_key.is_available());

        let with_key =
            GeminiProvider::new("gemini-2.0-flash", Some("aiza-test".to_string())).unwrap();
        assert!(with_key.is_available());
    }

    #[test]
    fn test_endpoint_includes_model() {
        let provider = GeminiProvider::new("gemini-2.5-pro", None).unwrap();
        assert_eq!(
            provider.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }

    #[tokio::test]
    async fn test_generate_without_key_is_descriptive_error() {
        let provider = GeminiProvider::new("gemini-2.0-flash", None).unwrap();
        let err = provider.generate_message("prompt").await.unwrap_err();
        assert!(err.to_string().contains("API key not configured"));
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"fix: handle empty diff"}],"role":"model"}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.candidates[0].content.parts[0].text, "fix: handle empty diff");
    }
}
