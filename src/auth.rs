use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Provider families that require an API key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFamily {
    OpenAi,
    Google,
}

impl ProviderFamily {
    pub const ALL: [ProviderFamily; 2] = [ProviderFamily::OpenAi, ProviderFamily::Google];

    pub fn name(&self) -> &'static str {
        match self {
            ProviderFamily::OpenAi => "openai",
            ProviderFamily::Google => "google",
        }
    }

    pub fn env_var(&self) -> &'static str {
        match self {
            ProviderFamily::OpenAi => "OPENAI_API_KEY",
            ProviderFamily::Google => "GOOGLE_API_KEY",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "openai" => Some(ProviderFamily::OpenAi),
            "google" => Some(ProviderFamily::Google),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a configured API key was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Environment,
    AuthFile,
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::Environment => f.write_str("environment"),
            KeySource::AuthFile => f.write_str("auth file"),
        }
    }
}

/// On-disk representation of the auth file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct AuthFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    openai: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    google: Option<String>,
}

impl AuthFile {
    fn key(&self, family: ProviderFamily) -> Option<&String> {
        match family {
            ProviderFamily::OpenAi => self.openai.as_ref(),
            ProviderFamily::Google => self.google.as_ref(),
        }
    }

    fn key_mut(&mut self, family: ProviderFamily) -> &mut Option<String> {
        match family {
            ProviderFamily::OpenAi => &mut self.openai,
            ProviderFamily::Google => &mut self.google,
        }
    }
}

/// API key resolution: environment variables first, then the auth file.
/// Loaded once per invocation; no provision for concurrent writers.
#[derive(Debug, Clone)]
pub struct Credentials {
    path: PathBuf,
    file: AuthFile,
}

impl Credentials {
    /// Load the credential snapshot from the standard auth file location
    pub fn load() -> Result<Self> {
        let path = Self::auth_file_path().context("Unable to determine config directory")?;
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: PathBuf) -> Result<Self> {
        let file = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read auth file: {}", path.display()))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse auth file: {}", path.display()))?
        } else {
            AuthFile::default()
        };

        Ok(Self { path, file })
    }

    /// The auth file path, `<config_dir>/memo/auth.yaml`
    pub fn auth_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("memo").join("auth.yaml"))
    }

    /// Resolve the API key for a provider family, environment first
    pub fn api_key(&self, family: ProviderFamily) -> Option<String> {
        if let Ok(key) = std::env::var(family.env_var()) {
            if !key.is_empty() {
                return Some(key);
            }
        }
        self.file.key(family).cloned()
    }

    /// Where the resolved key comes from, if configured at all
    pub fn key_source(&self, family: ProviderFamily) -> Option<KeySource> {
        if std::env::var(family.env_var()).map(|k| !k.is_empty()).unwrap_or(false) {
            return Some(KeySource::Environment);
        }
        if self.file.key(family).is_some() {
            return Some(KeySource::AuthFile);
        }
        None
    }

    pub fn is_configured(&self, family: ProviderFamily) -> bool {
        self.key_source(family).is_some()
    }

    /// Persist an API key to the auth file
    pub fn set_api_key(&mut self, family: ProviderFamily, key: &str) -> Result<()> {
        *self.file.key_mut(family) = Some(key.to_string());
        self.save()
    }

    /// Remove an API key from the auth file. Returns false when the file
    /// held no key for this family (environment keys are not touched).
    pub fn remove_api_key(&mut self, family: ProviderFamily) -> Result<bool> {
        if self.file.key_mut(family).take().is_none() {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = serde_yaml::to_string(&self.file).context("Failed to serialize auth file")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write auth file: {}", self.path.display()))
    }
}

/// Mask an API key for display: first 8 and last 4 characters survive
pub fn mask_key(key: &str) -> String {
    if key.chars().count() > 12 {
        let head: String = key.chars().take(8).collect();
        let tail: String = key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
        format!("{}...{}", head, tail)
    } else {
        "***".to_string()
    }
}
