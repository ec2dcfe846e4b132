pub mod gemini;
pub mod openai;

use crate::auth::{Credentials, ProviderFamily};
use anyhow::Result;
use async_trait::async_trait;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

/// Model identifiers the registry knows how to route
pub const KNOWN_MODELS: [&str; 4] = [
    "gemini-2.0-flash",
    "gemini-2.5-flash",
    "gemini-2.5-pro",
    "gpt-4.1-mini",
];

/// Seconds before a provider call is abandoned at the transport level
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// A remote text-generation capability. One instance per invocation; no
/// retries at this layer — regeneration is the caller's decision.
#[async_trait]
pub trait Provider {
    /// True iff the required API key is configured
    fn is_available(&self) -> bool;

    /// Generate a commit message for the given prompt
    async fn generate_message(&self, prompt: &str) -> Result<String>;
}

impl std::fmt::Debug for dyn Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Provider")
    }
}

/// Which provider family serves a model identifier
pub fn family_for_model(model: &str) -> Option<ProviderFamily> {
    match model {
        "gpt-4.1-mini" => Some(ProviderFamily::OpenAi),
        "gemini-2.0-flash" | "gemini-2.5-flash" | "gemini-2.5-pro" => Some(ProviderFamily::Google),
        _ => None,
    }
}

/// Build the provider for a model identifier. Unknown identifiers are a
/// configuration error with a pointer at the valid choices.
pub fn create(model: &str, credentials: &Credentials) -> Result<Box<dyn Provider>> {
    match family_for_model(model) {
        Some(ProviderFamily::OpenAi) => Ok(Box::new(OpenAiProvider::new(
            model,
            credentials.api_key(ProviderFamily::OpenAi),
        )?)),
        Some(ProviderFamily::Google) => Ok(Box::new(GeminiProvider::new(
            model,
            credentials.api_key(ProviderFamily::Google),
        )?)),
        None => anyhow::bail!(
            "Unsupported model '{}'. Known models: {}",
            model,
            KNOWN_MODELS.join(", ")
        ),
    }
}

/// Shared HTTP client configuration for both provider families
pub(crate) fn http_client() -> Result<reqwest::Client> {
    use anyhow::Context;

    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .context("Failed to create HTTP client")
}
