pub mod commit;

use crate::analysis::{DiffStats, HistoryStats};
use crate::config::Config;
use crate::git::GitOps;
use crate::project;

/// Commit subjects examined for repository conventions
const HISTORY_LIMIT: u32 = 20;
/// Character budget for the project-structure block
const STRUCTURE_LIMIT: usize = 500;
/// File paths listed in the diff context block
const MAX_LISTED_FILES: usize = 10;

/// Assembles the full AI prompt from rules, repository history, project
/// structure and diff statistics.
///
/// Section order is fixed so that identical inputs always produce the
/// identical prompt. Optional context that cannot be gathered is dropped
/// silently; only the diff itself is mandatory.
pub struct PromptBuilder<'a> {
    config: &'a Config,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Gather optional context from the repository and assemble the prompt
    pub fn build(&self, diff_text: &str, git: &dyn GitOps) -> String {
        let history = if self.config.commit_history_analysis {
            Some(HistoryStats::from_subjects(&git.recent_subjects(HISTORY_LIMIT)))
        } else {
            None
        };

        let structure = if self.config.project_structure_context {
            // Structure context is best-effort; any failure drops the block
            project::directory_tree(".").ok().filter(|s| !s.is_empty())
        } else {
            None
        };

        self.assemble(diff_text, history.as_ref(), structure.as_deref())
    }

    /// Deterministic assembly from already-gathered context
    pub fn assemble(
        &self,
        diff_text: &str,
        history: Option<&HistoryStats>,
        structure: Option<&str>,
    ) -> String {
        let rules = &self.config.commit_rules;
        let mut prompt = format!(
            "{intro}\n\nRULES:\n\
             1. Use format: <type>(<scope>): <subject>\n\
             2. Types: {types}\n\
             3. Keep it simple - most commits should be one line\n\
             4. Focus on WHY the change was made, not WHAT files changed\n\
             5. Use imperative mood (\"add\" not \"added\")\n\
             6. Subject line ≤ {max_len} characters\n\
             7. Only add body/footer if the change is complex or breaking",
            intro = commit::PROMPT_INTRO,
            types = rules.allowed_types.join(", "),
            max_len = rules.max_subject_length,
        );

        if rules.require_scope {
            prompt.push_str("\n8. Scope is REQUIRED - always include a scope in parentheses");
        }

        if !rules.custom_rules.is_empty() {
            prompt.push_str("\n\nCUSTOM RULES:");
            for (number, rule) in rules.custom_rules.iter().enumerate() {
                prompt.push_str(&format!("\n{}. {}", number + 9, rule));
            }
        }

        if let Some(history) = history {
            self.append_history_section(&mut prompt, history);
        }

        if let Some(structure) = structure {
            let truncated: String = structure.chars().take(STRUCTURE_LIMIT).collect();
            prompt.push_str(&format!("\n\nPROJECT STRUCTURE:\n{}...", truncated));
        }

        self.append_diff_section(&mut prompt, diff_text);

        prompt.push_str(&format!(
            "\n\n{examples}\n\n{instruction}\n\n{diff}\n\n{closing}",
            examples = commit::STANDARD_EXAMPLES,
            instruction = commit::DIFF_INSTRUCTION,
            diff = diff_text,
            closing = commit::CLOSING_INSTRUCTION,
        ));

        prompt
    }

    fn append_history_section(&self, prompt: &mut String, history: &HistoryStats) {
        if history.examples.is_empty() {
            return;
        }

        prompt.push_str("\n\nRECENT COMMIT EXAMPLES FROM THIS REPOSITORY:");
        for example in &history.examples {
            prompt.push_str(&format!("\n- {}", example));
        }

        if !history.types.is_empty() {
            prompt.push_str(&format!(
                "\n\nMOST COMMON COMMIT TYPES IN THIS REPO: {}",
                HistoryStats::most_frequent(&history.types, 3).join(", ")
            ));
        }

        if !history.scopes.is_empty() {
            prompt.push_str(&format!(
                "\nMOST COMMON SCOPES IN THIS REPO: {}",
                HistoryStats::most_frequent(&history.scopes, 3).join(", ")
            ));
        }

        if history.average_subject_length > 0.0 {
            prompt.push_str(&format!(
                "\nAVERAGE COMMIT LENGTH IN THIS REPO: {} characters",
                history.average_subject_length as u64
            ));
        }
    }

    fn append_diff_section(&self, prompt: &mut String, diff_text: &str) {
        let stats = DiffStats::from_diff(diff_text);
        if stats.files_changed.is_empty() {
            return;
        }

        prompt.push_str(&format!(
            "\n\nFILES CHANGED ({} files):",
            stats.files_changed.len()
        ));
        for file in stats.files_changed.iter().take(MAX_LISTED_FILES) {
            prompt.push_str(&format!("\n- {}", file));
        }

        if stats.is_large_change {
            prompt.push_str(&format!("\n\n{}", commit::LARGE_CHANGE_NOTE));
        }

        if stats.new_files > 0 {
            prompt.push_str(&format!("\n- {} new files created", stats.new_files));
        }

        if stats.deleted_files > 0 {
            prompt.push_str(&format!("\n- {} files deleted", stats.deleted_files));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    const SAMPLE_DIFF: &str = "diff --git a/src/lib.rs b/src/lib.rs\n--- a/src/lib.rs\n+++ b/src/lib.rs\n+pub fn hello() {}\n";

    fn builder_config() -> Config {
        Config::default()
    }

    #[test]
    fn test_prompt_contains_diff_verbatim_and_closing() {
        let config = builder_config();
        let builder = PromptBuilder::new(&config);
        let prompt = builder.assemble(SAMPLE_DIFF, None, None);

        assert!(prompt.contains(SAMPLE_DIFF));
        assert!(prompt.ends_with(commit::CLOSING_INSTRUCTION));
    }

    #[test]
    fn test_prompt_contains_diff_even_with_all_sections_enabled() {
        let config = builder_config();
        let builder = PromptBuilder::new(&config);
        let history = HistoryStats::from_subjects(&["feat(core): seed".to_string()]);
        let prompt = builder.assemble(SAMPLE_DIFF, Some(&history), Some("src/\n  lib.rs\n"));

        assert!(prompt.contains(SAMPLE_DIFF));
        assert!(prompt.ends_with(commit::CLOSING_INSTRUCTION));
    }

    #[test]
    fn test_rules_section_reflects_config() {
        let mut config = builder_config();
        config.commit_rules.max_subject_length = 50;
        config.commit_rules.require_scope = true;
        config.commit_rules.custom_rules = vec!["Reference the ticket number".to_string()];

        let builder = PromptBuilder::new(&config);
        let prompt = builder.assemble(SAMPLE_DIFF, None, None);

        assert!(prompt.contains("Subject line ≤ 50 characters"));
        assert!(prompt.contains("8. Scope is REQUIRED"));
        assert!(prompt.contains("CUSTOM RULES:"));
        assert!(prompt.contains("9. Reference the ticket number"));
    }

    #[test]
    fn test_scope_rule_absent_by_default() {
        let config = builder_config();
        let builder = PromptBuilder::new(&config);
        let prompt = builder.assemble(SAMPLE_DIFF, None, None);
        assert!(!prompt.contains("Scope is REQUIRED"));
        assert!(!prompt.contains("CUSTOM RULES:"));
    }

    #[test]
    fn test_history_section_lists_examples_and_patterns() {
        let config = builder_config();
        let builder = PromptBuilder::new(&config);
        let history = HistoryStats::from_subjects(&[
            "feat(auth): add login".to_string(),
            "fix(api): handle error".to_string(),
            "docs: update readme".to_string(),
        ]);

        let prompt = builder.assemble(SAMPLE_DIFF, Some(&history), None);

        assert!(prompt.contains("RECENT COMMIT EXAMPLES FROM THIS REPOSITORY:"));
        assert!(prompt.contains("- feat(auth): add login"));
        assert!(prompt.contains("MOST COMMON COMMIT TYPES IN THIS REPO: feat, fix, docs"));
        assert!(prompt.contains("MOST COMMON SCOPES IN THIS REPO: auth, api"));
        assert!(prompt.contains("AVERAGE COMMIT LENGTH IN THIS REPO:"));
    }

    #[test]
    fn test_empty_history_omits_section() {
        let config = builder_config();
        let builder = PromptBuilder::new(&config);
        let history = HistoryStats::from_subjects(&[]);
        let prompt = builder.assemble(SAMPLE_DIFF, Some(&history), None);
        assert!(!prompt.contains("RECENT COMMIT EXAMPLES"));
    }

    #[test]
    fn test_structure_section_truncates_to_500_chars() {
        let config = builder_config();
        let builder = PromptBuilder::new(&config);
        let structure = "x".repeat(800);
        let prompt = builder.assemble(SAMPLE_DIFF, None, Some(&structure));

        assert!(prompt.contains("PROJECT STRUCTURE:"));
        let section = prompt.split("PROJECT STRUCTURE:\n").nth(1).unwrap();
        let block = section.split("\n\n").next().unwrap();
        assert_eq!(block, format!("{}...", "x".repeat(500)));
    }

    #[test]
    fn test_structure_omitted_when_absent() {
        let config = builder_config();
        let builder = PromptBuilder::new(&config);
        let prompt = builder.assemble(SAMPLE_DIFF, None, None);
        assert!(!prompt.contains("PROJECT STRUCTURE:"));
    }

    #[test]
    fn test_diff_section_lists_changed_files() {
        let config = builder_config();
        let builder = PromptBuilder::new(&config);
        let prompt = builder.assemble(SAMPLE_DIFF, None, None);

        assert!(prompt.contains("FILES CHANGED (1 files):"));
        assert!(prompt.contains("- src/lib.rs"));
    }

    #[test]
    fn test_diff_section_caps_listing_at_ten_files() {
        let mut diff = String::new();
        for i in 0..12 {
            diff.push_str(&format!(
                "diff --git a/f{i}.rs b/f{i}.rs\n--- a/f{i}.rs\n+++ b/f{i}.rs\n+x\n"
            ));
        }

        let config = builder_config();
        let builder = PromptBuilder::new(&config);
        let prompt = builder.assemble(&diff, None, None);

        assert!(prompt.contains("FILES CHANGED (12 files):"));
        assert!(prompt.contains("- f9.rs"));
        // Only the first ten paths are itemized
        let listing = prompt.split("FILES CHANGED").nth(1).unwrap();
        let listed = listing.lines().filter(|l| l.starts_with("- f")).count();
        assert_eq!(listed, 10);
        assert!(prompt.contains(commit::LARGE_CHANGE_NOTE));
    }

    #[test]
    fn test_new_and_deleted_file_counts() {
        let diff = "diff --git a/new.rs b/new.rs\nnew file mode 100644\n--- /dev/null\n+++ b/new.rs\n+x\ndiff --git a/old.rs b/old.rs\ndeleted file mode 100644\n--- a/old.rs\n+++ /dev/null\n-y\n";
        let config = builder_config();
        let builder = PromptBuilder::new(&config);
        let prompt = builder.assemble(diff, None, None);

        assert!(prompt.contains("- 1 new files created"));
        assert!(prompt.contains("- 1 files deleted"));
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let config = builder_config();
        let builder = PromptBuilder::new(&config);
        let history = HistoryStats::from_subjects(&[
            "feat(a): one".to_string(),
            "fix(b): two".to_string(),
        ]);

        let first = builder.assemble(SAMPLE_DIFF, Some(&history), Some("tree"));
        let second = builder.assemble(SAMPLE_DIFF, Some(&history), Some("tree"));
        assert_eq!(first, second);
    }
}
