use anyhow::Result;

use crate::auth::{Credentials, ProviderFamily};
use crate::config::Config;
use crate::git::GitOps;
use crate::providers;

/// `memo status` — one-screen health report: repository, configuration,
/// provider availability and credential sources.
pub struct StatusCommand;

impl StatusCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(
        &self,
        config: &Config,
        credentials: &Credentials,
        git: &dyn GitOps,
    ) -> Result<()> {
        println!("🔧 Memo Status");
        println!("{}", "=".repeat(50));

        if git.is_repository() {
            println!("✅ Git repository: Found");

            match git.staged_diff() {
                Ok(Some(_)) => println!("✅ Staged changes: Ready for commit"),
                _ => println!("⚠️  Staged changes: None found"),
            }
        } else {
            println!("❌ Git repository: Not found");
        }

        println!("🤖 Default model: {}", config.default_model);
        println!(
            "🔄 Interactive mode: {}",
            if config.interactive_mode {
                "Enabled"
            } else {
                "Disabled"
            }
        );

        println!("\n🔌 AI Provider Status:");
        for model in providers::KNOWN_MODELS {
            let available = providers::create(model, credentials)
                .map(|provider| provider.is_available())
                .unwrap_or(false);
            if available {
                println!("✅ {}: Available", model);
            } else {
                println!("❌ {}: Not available (check API key)", model);
            }
        }

        println!("\n🔐 Authentication Configuration:");
        for family in ProviderFamily::ALL {
            match credentials.key_source(family) {
                Some(source) => println!("✅ {}: Configured (source: {})", family, source),
                None => println!("❌ {}: Not configured", family),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockGitOps;
    use tempfile::tempdir;

    #[test]
    fn test_status_runs_outside_a_repository() {
        let temp_dir = tempdir().unwrap();
        let credentials = Credentials::load_from_path(temp_dir.path().join("auth.yaml")).unwrap();
        let config = Config::default();

        let mut git = MockGitOps::new();
        git.expect_is_repository().return_const(false);
        git.expect_staged_diff().times(0);

        let result = StatusCommand::new().execute(&config, &credentials, &git);
        assert!(result.is_ok());
    }

    #[test]
    fn test_status_reports_staged_changes() {
        let temp_dir = tempdir().unwrap();
        let credentials = Credentials::load_from_path(temp_dir.path().join("auth.yaml")).unwrap();
        let config = Config::default();

        let mut git = MockGitOps::new();
        git.expect_is_repository().return_const(true);
        git.expect_staged_diff()
            .returning(|| Ok(Some("diff".to_string())));

        let result = StatusCommand::new().execute(&config, &credentials, &git);
        assert!(result.is_ok());
    }
}
