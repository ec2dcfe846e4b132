use anyhow::Result;

use crate::config::{Config, ConfigStore};

/// `memo config` — inspect and edit the configuration file
pub struct ConfigCommand;

impl ConfigCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&self, key: Option<&str>) -> Result<()> {
        match key {
            Some(key) => {
                let store = ConfigStore::open()?;
                match store.get(key) {
                    Some(value) => {
                        println!("{}: {}", key, render_value(value)?);
                    }
                    None => println!("Configuration key '{}' not found.", key),
                }
            }
            None => {
                let config = Config::load();
                println!("Current configuration:");
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
        Ok(())
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut store = ConfigStore::open()?;
        match store.set(key, value) {
            Ok(()) => println!("✅ Configuration updated: {} = {}", key, value),
            Err(err) => println!("❌ Failed to save configuration: {:#}", err),
        }
        Ok(())
    }

    pub fn reset(&self, key: Option<&str>) -> Result<()> {
        let mut store = ConfigStore::open()?;
        match store.reset(key) {
            Ok(true) => match key {
                Some(key) => println!("✅ Configuration key '{}' reset to default.", key),
                None => println!("✅ Configuration reset to defaults."),
            },
            Ok(false) => {
                // Only reachable with a key; full resets always succeed
                println!("❌ Configuration key '{}' not found.", key.unwrap_or_default());
            }
            Err(err) => println!("❌ Failed to save configuration: {:#}", err),
        }
        Ok(())
    }
}

/// Render a YAML value on one line for `config show <key>`
fn render_value(value: &serde_yaml::Value) -> Result<String> {
    let rendered = serde_yaml::to_string(value)?;
    Ok(rendered.trim_end().to_string())
}
