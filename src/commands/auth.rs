use anyhow::Result;

use crate::auth::{mask_key, Credentials, ProviderFamily};

/// `memo auth` — manage API keys for the provider families
pub struct AuthCommand;

impl AuthCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn set(&self, provider: &str, api_key: &str) -> Result<()> {
        let Some(family) = ProviderFamily::parse(provider) else {
            print_unknown_provider(provider);
            return Ok(());
        };

        let mut credentials = Credentials::load()?;
        match credentials.set_api_key(family, api_key) {
            Ok(()) => println!("✅ API key set for {}", family),
            Err(err) => println!("❌ Failed to set API key for {}: {:#}", family, err),
        }
        Ok(())
    }

    pub fn show(&self, provider: Option<&str>) -> Result<()> {
        let credentials = Credentials::load()?;

        match provider {
            Some(provider) => {
                let Some(family) = ProviderFamily::parse(provider) else {
                    print_unknown_provider(provider);
                    return Ok(());
                };
                self.show_one(&credentials, family);
            }
            None => {
                println!("API Key Configuration:");
                println!("{}", "=".repeat(40));
                for family in ProviderFamily::ALL {
                    self.show_one(&credentials, family);
                }
            }
        }
        Ok(())
    }

    fn show_one(&self, credentials: &Credentials, family: ProviderFamily) {
        match (credentials.api_key(family), credentials.key_source(family)) {
            (Some(key), Some(source)) => {
                println!("✅ {}: {} (source: {})", family, mask_key(&key), source);
            }
            _ => println!("❌ {}: Not configured", family),
        }
    }

    pub fn remove(&self, provider: &str) -> Result<()> {
        let Some(family) = ProviderFamily::parse(provider) else {
            print_unknown_provider(provider);
            return Ok(());
        };

        let mut credentials = Credentials::load()?;
        if credentials.remove_api_key(family)? {
            println!("✅ API key removed for {}", family);
        } else {
            println!("❌ No API key found for {} in auth config", family);
        }
        Ok(())
    }

    pub fn list(&self) -> Result<()> {
        let credentials = Credentials::load()?;

        println!("Provider Status:");
        println!("{}", "=".repeat(30));
        for family in ProviderFamily::ALL {
            match credentials.key_source(family) {
                Some(source) => println!("{}: ✅ Configured (source: {})", family, source),
                None => println!("{}: ❌ Not configured (source: none)", family),
            }
        }
        Ok(())
    }
}

fn print_unknown_provider(provider: &str) {
    println!(
        "❌ Unknown provider '{}'. Valid providers: openai, google",
        provider
    );
}
