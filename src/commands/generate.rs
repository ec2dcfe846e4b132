use anyhow::Result;

use crate::auth::Credentials;
use crate::cli::args::GenerateArgs;
use crate::config::Config;
use crate::git::GitOps;
use crate::interactive::InteractiveSession;
use crate::prompts::PromptBuilder;
use crate::providers;

/// The core pipeline: staged diff -> prompt -> provider -> review loop.
///
/// Environment and precondition failures (no repository, nothing staged,
/// unavailable provider) report and return cleanly; they are not tool
/// errors and must not produce a non-zero exit.
pub struct GenerateCommand;

impl GenerateCommand {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(
        &self,
        args: GenerateArgs,
        config: &Config,
        credentials: &Credentials,
        git: &dyn GitOps,
    ) -> Result<()> {
        if !git.is_repository() {
            println!("❌ Error: Not a git repository. Initialize git first with 'git init'.");
            return Ok(());
        }

        let model = args
            .model
            .unwrap_or_else(|| config.default_model.clone());

        let diff_text = match git.staged_diff() {
            Ok(Some(diff)) => diff,
            Ok(None) => {
                println!("❌ No staged changes found. Stage your changes first with 'git add'.");
                return Ok(());
            }
            Err(err) => {
                println!("❌ {:#}", err);
                return Ok(());
            }
        };

        let provider = match providers::create(&model, credentials) {
            Ok(provider) => provider,
            Err(err) => {
                println!("❌ {}", err);
                return Ok(());
            }
        };

        if !provider.is_available() {
            println!(
                "❌ Error: {} provider is not available. Check your API key configuration.",
                model
            );
            return Ok(());
        }

        let prompt = PromptBuilder::new(config).build(&diff_text, git);

        if args.verbose {
            let separator = "=".repeat(60);
            println!("\n{}", separator);
            println!("PROMPT SENT TO {}:", model.to_uppercase());
            println!("{}", separator);
            println!("{}", prompt);
            println!("{}\n", separator);
        }

        let commit_message = match provider.generate_message(&prompt).await {
            Ok(message) => message,
            Err(err) => {
                println!("❌ Failed to generate commit message: {:#}", err);
                return Ok(());
            }
        };

        let interactive_enabled = config.interactive_mode && !args.no_interactive;

        if interactive_enabled {
            let stdin = std::io::stdin();
            let mut session = InteractiveSession::new(config, credentials, git, stdin.lock());
            session.run(commit_message, &diff_text, model).await?;
        } else {
            println!("{}", commit_message);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockGitOps;
    use tempfile::tempdir;

    fn empty_credentials() -> Credentials {
        let temp_dir = tempdir().unwrap();
        Credentials::load_from_path(temp_dir.path().join("auth.yaml")).unwrap()
    }

    fn args() -> GenerateArgs {
        GenerateArgs {
            model: None,
            no_interactive: true,
            verbose: false,
        }
    }

    #[tokio::test]
    async fn test_outside_repository_is_a_clean_exit() {
        let config = Config::default();
        let credentials = empty_credentials();
        let mut git = MockGitOps::new();
        git.expect_is_repository().return_const(false);
        git.expect_staged_diff().times(0);

        let result = GenerateCommand::new()
            .execute(args(), &config, &credentials, &git)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_nothing_staged_is_a_clean_exit() {
        let config = Config::default();
        let credentials = empty_credentials();
        let mut git = MockGitOps::new();
        git.expect_is_repository().return_const(true);
        git.expect_staged_diff().returning(|| Ok(None));

        let result = GenerateCommand::new()
            .execute(args(), &config, &credentials, &git)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_model_override_is_a_clean_exit() {
        let config = Config::default();
        let credentials = empty_credentials();
        let mut git = MockGitOps::new();
        git.expect_is_repository().return_const(true);
        git.expect_staged_diff()
            .returning(|| Ok(Some("diff --git a/a b/a\n+x\n".to_string())));

        let mut override_args = args();
        override_args.model = Some("not-a-model".to_string());

        let result = GenerateCommand::new()
            .execute(override_args, &config, &credentials, &git)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unavailable_provider_stops_before_prompt_assembly() {
        if std::env::var("GOOGLE_API_KEY").is_ok() {
            return;
        }

        let config = Config::default();
        let credentials = empty_credentials();
        let mut git = MockGitOps::new();
        git.expect_is_repository().return_const(true);
        git.expect_staged_diff()
            .returning(|| Ok(Some("diff --git a/a b/a\n+x\n".to_string())));
        // Prompt context is never gathered when the provider is unavailable
        git.expect_recent_subjects().times(0);

        let result = GenerateCommand::new()
            .execute(args(), &config, &credentials, &git)
            .await;
        assert!(result.is_ok());
    }
}
