pub mod args;

use anyhow::Result;

use crate::auth::Credentials;
use crate::commands::{AuthCommand, ConfigCommand, GenerateCommand, StatusCommand};
use crate::config::Config;
use crate::git::SystemGit;
use crate::{AuthAction, Commands, ConfigAction};
use args::GenerateArgs;

/// Command dispatcher that routes CLI commands to their implementations.
///
/// Configuration and credentials are loaded once here and handed down as
/// read-only snapshots; nothing below this layer re-reads them.
pub struct CommandDispatcher {
    config: Config,
    credentials: Credentials,
    git: SystemGit,
}

impl CommandDispatcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            config: Config::load(),
            credentials: Credentials::load()?,
            git: SystemGit::new(),
        })
    }

    pub async fn dispatch(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Generate {
                model,
                no_interactive,
                verbose,
            } => {
                let args = GenerateArgs {
                    model,
                    no_interactive,
                    verbose,
                };
                GenerateCommand::new()
                    .execute(args, &self.config, &self.credentials, &self.git)
                    .await
            }
            Commands::Config { action } => {
                let cmd = ConfigCommand::new();
                match action {
                    ConfigAction::Show { key } => cmd.show(key.as_deref()),
                    ConfigAction::Set { key, value } => cmd.set(&key, &value),
                    ConfigAction::Reset { key } => cmd.reset(key.as_deref()),
                }
            }
            Commands::Status => {
                StatusCommand::new().execute(&self.config, &self.credentials, &self.git)
            }
            Commands::Auth { action } => {
                let cmd = AuthCommand::new();
                match action {
                    AuthAction::Set { provider, api_key } => cmd.set(&provider, &api_key),
                    AuthAction::Show { provider } => cmd.show(provider.as_deref()),
                    AuthAction::Remove { provider } => cmd.remove(&provider),
                    AuthAction::List => cmd.list(),
                }
            }
        }
    }
}
