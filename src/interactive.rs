use anyhow::Result;
use std::io::BufRead;

use crate::auth::Credentials;
use crate::config::Config;
use crate::git::GitOps;
use crate::prompts::PromptBuilder;
use crate::providers;

/// States of the review loop. One loop instance exists per `generate`
/// invocation; the state is never shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Presenting,
    Committing,
    Regenerating,
    Editing,
    Aborted,
}

/// How the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Committed,
    CommitFailed,
    Edited,
    EditFailed,
    Aborted,
}

/// Interactive review of a generated commit message: accept, regenerate,
/// hand off to the git editor, or abort.
///
/// Input is injected as any [`BufRead`] so the loop can be driven from
/// tests; in production it wraps locked stdin. Blocking and sequential
/// throughout — the only await point is the regeneration provider call.
pub struct InteractiveSession<'a, R: BufRead> {
    config: &'a Config,
    credentials: &'a Credentials,
    git: &'a dyn GitOps,
    input: R,
}

impl<'a, R: BufRead> InteractiveSession<'a, R> {
    pub fn new(
        config: &'a Config,
        credentials: &'a Credentials,
        git: &'a dyn GitOps,
        input: R,
    ) -> Self {
        Self {
            config,
            credentials,
            git,
            input,
        }
    }

    /// Drive the loop until a terminal state is reached
    pub async fn run(
        &mut self,
        mut message: String,
        diff_text: &str,
        mut model: String,
    ) -> Result<Outcome> {
        let mut state = State::Presenting;

        loop {
            match state {
                State::Presenting => {
                    self.display_message(&message);
                    let choice = self.read_choice()?;
                    state = next_state(&choice);
                    if state == State::Presenting {
                        println!("❌ Invalid choice. Please enter 1, 2, 3, or 4.");
                    }
                }
                State::Committing => {
                    return match self.git.commit(&message) {
                        Ok(output) => {
                            println!("\n✅ {}", output);
                            Ok(Outcome::Committed)
                        }
                        Err(err) => {
                            println!("\n❌ {}", err);
                            Ok(Outcome::CommitFailed)
                        }
                    };
                }
                State::Regenerating => {
                    // A failed regeneration keeps the current message; never
                    // trade a good message for nothing.
                    if let Some((new_message, new_model)) =
                        self.regenerate(diff_text, &model).await?
                    {
                        message = new_message;
                        model = new_model;
                    }
                    state = State::Presenting;
                }
                State::Editing => {
                    return match self.git.open_commit_editor() {
                        Ok(output) => {
                            println!("\n✅ {}", output);
                            Ok(Outcome::Edited)
                        }
                        Err(err) => {
                            println!("\n❌ {}", err);
                            Ok(Outcome::EditFailed)
                        }
                    };
                }
                State::Aborted => {
                    println!("\n❌ Exiting without committing.");
                    return Ok(Outcome::Aborted);
                }
            }
        }
    }

    fn display_message(&self, message: &str) {
        let separator = "=".repeat(60);
        println!("\n{}", separator);
        println!("Generated Commit Message:");
        println!("{}", separator);
        println!("\n{}\n", message);
        println!("{}", separator);
        println!("\nWhat would you like to do?");
        println!("1. Accept - Commit with this message");
        println!("2. Regenerate - Generate a new message");
        println!("3. Edit - Open git commit editor (default)");
        println!("4. Deny - Exit without committing");
        println!("\nEnter your choice (1-4) [3]: ");
    }

    /// One choice token from the input. Empty input selects the edit
    /// default; end of input aborts so the loop cannot spin forever.
    fn read_choice(&mut self) -> Result<String> {
        let mut line = String::new();
        let bytes = self.input.read_line(&mut line)?;
        if bytes == 0 {
            return Ok("4".to_string());
        }

        let choice = line.trim();
        if choice.is_empty() {
            Ok("3".to_string())
        } else {
            Ok(choice.to_string())
        }
    }

    /// Pick a model, rebuild the prompt and call the provider. `None` means
    /// the previous message stays in place.
    async fn regenerate(
        &mut self,
        diff_text: &str,
        current_model: &str,
    ) -> Result<Option<(String, String)>> {
        println!("\nAvailable models:");
        println!("1. gemini-2.0-flash");
        println!("2. gemini-2.5-pro");
        println!("3. gpt-4.1-mini");
        println!("\nSelect model (1-3, current: {}): ", current_model);

        let mut line = String::new();
        self.input.read_line(&mut line)?;

        let selected_model = match line.trim() {
            "1" => "gemini-2.0-flash".to_string(),
            "2" => "gemini-2.5-pro".to_string(),
            "3" => "gpt-4.1-mini".to_string(),
            // Anything else, including empty input, keeps the current model
            _ => current_model.to_string(),
        };

        println!("\nRegenerating with {}...", selected_model);

        let provider = match providers::create(&selected_model, self.credentials) {
            Ok(provider) => provider,
            Err(err) => {
                println!("❌ {}", err);
                return Ok(None);
            }
        };

        if !provider.is_available() {
            println!("❌ Selected AI provider is not available. Check your API keys.");
            return Ok(None);
        }

        let prompt = PromptBuilder::new(self.config).build(diff_text, self.git);

        match provider.generate_message(&prompt).await {
            Ok(new_message) => Ok(Some((new_message, selected_model))),
            Err(err) => {
                println!("❌ Failed to regenerate message: {:#}. Keeping current message.", err);
                Ok(None)
            }
        }
    }
}

/// Route one choice token to the next state
fn next_state(choice: &str) -> State {
    match choice {
        "1" => State::Committing,
        "2" => State::Regenerating,
        "3" => State::Editing,
        "4" => State::Aborted,
        _ => State::Presenting,
    }
}
