use anyhow::{Context, Result};
use std::process::Command;

/// Narrow git interface the generation pipeline depends on
#[cfg_attr(test, mockall::automock)]
pub trait GitOps {
    /// Whether the working directory is inside a git repository
    fn is_repository(&self) -> bool;

    /// The staged diff. `Ok(None)` when nothing is staged; `Err` when git
    /// is missing or the command itself fails.
    fn staged_diff(&self) -> Result<Option<String>>;

    /// Commit staged changes with the given message, returning git's output
    fn commit(&self, message: &str) -> Result<String>;

    /// Run `git commit` with the user's configured editor attached to the
    /// terminal
    fn open_commit_editor(&self) -> Result<String>;

    /// The most recent commit subjects, newest first. Empty on any failure;
    /// history is optional context and must never abort the pipeline.
    fn recent_subjects(&self, limit: u32) -> Vec<String>;
}

/// Subprocess-backed implementation of [`GitOps`]
pub struct SystemGit;

impl SystemGit {
    pub fn new() -> Self {
        Self
    }
}

impl GitOps for SystemGit {
    fn is_repository(&self) -> bool {
        Command::new("git")
            .args(["rev-parse", "--git-dir"])
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    fn staged_diff(&self) -> Result<Option<String>> {
        let output = Command::new("git")
            .args(["diff", "--staged"])
            .output()
            .context("Git command not found. Make sure git is installed before you continue")?;

        if !output.status.success() {
            anyhow::bail!(
                "git diff failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let diff = String::from_utf8(output.stdout).context("git diff output was not UTF-8")?;

        if diff.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(diff))
    }

    fn commit(&self, message: &str) -> Result<String> {
        let output = Command::new("git")
            .args(["commit", "-m", message])
            .output()
            .context("Failed to execute git commit")?;

        if !output.status.success() {
            anyhow::bail!(
                "Error committing: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            Ok("Committed successfully!".to_string())
        } else {
            Ok(stdout)
        }
    }

    fn open_commit_editor(&self) -> Result<String> {
        // Inherit stdio so the editor takes over the terminal
        let status = Command::new("git")
            .arg("commit")
            .status()
            .context("Failed to launch git commit editor")?;

        if !status.success() {
            anyhow::bail!("Git commit editor exited with error");
        }

        Ok("Commit process completed!".to_string())
    }

    fn recent_subjects(&self, limit: u32) -> Vec<String> {
        let output = Command::new("git")
            .args([
                "log",
                &format!("--max-count={}", limit),
                "--pretty=format:%s",
            ])
            .output();

        match output {
            Ok(result) if result.status.success() => String::from_utf8_lossy(&result.stdout)
                .lines()
                .map(|line| line.to_string())
                .filter(|line| !line.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }
}
