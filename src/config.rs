use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::path::PathBuf;

/// Default configuration embedded at compile time
const DEFAULT_CONFIG: &str = include_str!("../config/default_config.yaml");

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "defaults::default_model")]
    pub default_model: String,
    #[serde(default = "defaults::interactive_mode")]
    pub interactive_mode: bool,
    #[serde(default = "defaults::commit_history_analysis")]
    pub commit_history_analysis: bool,
    #[serde(default = "defaults::project_structure_context")]
    pub project_structure_context: bool,
    #[serde(default)]
    pub commit_rules: CommitRules,
}

/// Conventional-commit rules fed into the prompt preamble
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommitRules {
    #[serde(default = "defaults::max_subject_length")]
    pub max_subject_length: u32,
    #[serde(default = "defaults::require_scope")]
    pub require_scope: bool,
    #[serde(default = "defaults::allowed_types")]
    pub allowed_types: Vec<String>,
    #[serde(default = "defaults::custom_rules")]
    pub custom_rules: Vec<String>,
}

/// Per-field fallbacks sourced from the embedded default file. These are
/// invoked lazily, only for fields absent from the parsed document; the
/// embedded file carries every field, so [`Config::default`]'s own parse
/// never re-enters them.
mod defaults {
    use super::{CommitRules, Config};

    pub fn default_model() -> String {
        Config::default().default_model
    }

    pub fn interactive_mode() -> bool {
        Config::default().interactive_mode
    }

    pub fn commit_history_analysis() -> bool {
        Config::default().commit_history_analysis
    }

    pub fn project_structure_context() -> bool {
        Config::default().project_structure_context
    }

    pub fn max_subject_length() -> u32 {
        CommitRules::default().max_subject_length
    }

    pub fn require_scope() -> bool {
        CommitRules::default().require_scope
    }

    pub fn allowed_types() -> Vec<String> {
        CommitRules::default().allowed_types
    }

    pub fn custom_rules() -> Vec<String> {
        CommitRules::default().custom_rules
    }
}

impl Default for Config {
    fn default() -> Self {
        serde_yaml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded default configuration")
    }
}

impl Default for CommitRules {
    fn default() -> Self {
        Config::default().commit_rules
    }
}

impl Config {
    /// Load configuration from the standard config paths.
    ///
    /// Order: `.memo.yaml` in the current directory (repo-specific), then
    /// `~/.config/memo/config.yaml` (user-specific), then embedded defaults.
    /// A malformed file falls back to defaults with a warning rather than
    /// aborting the invocation.
    pub fn load() -> Self {
        for path in Self::candidate_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_path(&path) {
                Ok(config) => return config,
                Err(err) => {
                    eprintln!("⚠️  Warning: error loading {}: {}", path.display(), err);
                    eprintln!("   Using default configuration.");
                    return Self::default();
                }
            }
        }

        Self::default()
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Config file paths in precedence order
    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".memo.yaml")];
        if let Some(user) = Self::user_config_path() {
            paths.push(user);
        }
        paths
    }

    /// The user configuration path, `<config_dir>/memo/config.yaml`
    pub fn user_config_path() -> Option<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("memo").join("config.yaml"))
        } else {
            dirs::home_dir().map(|home| home.join(".config").join("memo").join("config.yaml"))
        }
    }

    /// The path that `config set` / `config reset` write to: the repo config
    /// when present, otherwise the user config.
    pub fn writable_config_path() -> Result<PathBuf> {
        let repo_config = PathBuf::from(".memo.yaml");
        if repo_config.exists() {
            return Ok(repo_config);
        }
        Self::user_config_path().context("Unable to determine config directory")
    }
}

/// Editable view of the configuration file as a YAML tree, supporting
/// dot-path access (`commit_rules.max_subject_length`).
pub struct ConfigStore {
    path: PathBuf,
    root: Value,
}

impl ConfigStore {
    /// Open the active config file, seeding missing files from defaults
    pub fn open() -> Result<Self> {
        let path = Config::writable_config_path()?;
        Self::open_at(path)
    }

    pub fn open_at(path: PathBuf) -> Result<Self> {
        let root = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            default_value()
        };

        Ok(Self { path, root })
    }

    /// Look up a value by dot path
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut current = &self.root;
        for part in key.split('.') {
            current = current.as_mapping()?.get(part)?;
        }
        Some(current)
    }

    /// Set a value by dot path, creating intermediate mappings as needed.
    /// String input is coerced to bool or integer when it parses as one.
    pub fn set(&mut self, key: &str, raw_value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();
        let mut current = &mut self.root;

        for part in &parts[..parts.len() - 1] {
            let map = current
                .as_mapping_mut()
                .with_context(|| format!("Config key '{}' does not address a mapping", key))?;
            current = map
                .entry(Value::from(*part))
                .or_insert_with(|| Value::Mapping(Default::default()));
        }

        let map = current
            .as_mapping_mut()
            .with_context(|| format!("Config key '{}' does not address a mapping", key))?;
        map.insert(Value::from(*parts.last().unwrap()), coerce_value(raw_value));

        self.save()
    }

    /// Reset one key (or the whole file when `key` is `None`) to defaults.
    /// Returns false when the key does not exist in the defaults.
    pub fn reset(&mut self, key: Option<&str>) -> Result<bool> {
        let defaults = default_value();

        match key {
            None => {
                self.root = defaults;
                self.save()?;
                Ok(true)
            }
            Some(key) => {
                let mut default_at = &defaults;
                for part in key.split('.') {
                    match default_at.as_mapping().and_then(|m| m.get(part)) {
                        Some(value) => default_at = value,
                        None => return Ok(false),
                    }
                }

                let default_at = default_at.clone();
                let parts: Vec<&str> = key.split('.').collect();
                let mut current = &mut self.root;
                for part in &parts[..parts.len() - 1] {
                    let map = current.as_mapping_mut().with_context(|| {
                        format!("Config key '{}' does not address a mapping", key)
                    })?;
                    current = map
                        .entry(Value::from(*part))
                        .or_insert_with(|| Value::Mapping(Default::default()));
                }
                let map = current
                    .as_mapping_mut()
                    .with_context(|| format!("Config key '{}' does not address a mapping", key))?;
                map.insert(Value::from(*parts.last().unwrap()), default_at);

                self.save()?;
                Ok(true)
            }
        }
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory: {}", parent.display())
                })?;
            }
        }

        let content =
            serde_yaml::to_string(&self.root).context("Failed to serialize configuration")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write config file: {}", self.path.display()))
    }
}

fn default_value() -> Value {
    serde_yaml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded default configuration")
}

/// Coerce a CLI-supplied string into the closest YAML scalar
fn coerce_value(raw: &str) -> Value {
    match raw {
        "true" | "True" => Value::from(true),
        "false" | "False" => Value::from(false),
        _ => {
            if let Ok(n) = raw.parse::<i64>() {
                Value::from(n)
            } else {
                Value::from(raw)
            }
        }
    }
}
