mod analysis;
mod auth;
mod cli;
mod commands;
mod config;
mod git;
mod interactive;
mod project;
mod prompts;
mod providers;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "memo")]
#[command(about = "AI-powered conventional commit message generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a conventional commit message from the staged changes
    Generate {
        /// AI model to use (gemini-2.0-flash, gemini-2.5-flash, gemini-2.5-pro, gpt-4.1-mini)
        #[arg(short, long)]
        model: Option<String>,

        /// Print the message instead of entering the interactive review loop
        #[arg(long)]
        no_interactive: bool,

        /// Show the prompt sent to the AI model
        #[arg(short, long)]
        verbose: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show repository, provider and credential status
    Status,
    /// Manage API keys for AI providers
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the whole configuration or one key
    Show {
        /// Dot-path key, e.g. commit_rules.max_subject_length
        key: Option<String>,
    },
    /// Set a configuration value by dot-path key
    Set { key: String, value: String },
    /// Reset one key or the whole configuration to defaults
    Reset { key: Option<String> },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Store an API key for a provider (openai, google)
    Set { provider: String, api_key: String },
    /// Show configured API keys, masked
    Show { provider: Option<String> },
    /// Remove a stored API key
    Remove { provider: String },
    /// List provider configuration status
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let dispatcher = cli::CommandDispatcher::new()?;
    dispatcher.dispatch(cli.command).await
}
