//! Static fragments of the commit message prompt. The dynamic sections are
//! assembled around these by [`super::PromptBuilder`].

pub const PROMPT_INTRO: &str =
    "Generate a conventional commit message based on the code changes below.";

pub const STANDARD_EXAMPLES: &str = "STANDARD EXAMPLES:
- feat(auth): add user login validation
- fix(api): handle null response in user fetch
- docs: update installation instructions
- refactor(parser): simplify token extraction logic";

pub const DIFF_INSTRUCTION: &str = "Look at this diff and write a clear, concise commit message:";

pub const CLOSING_INSTRUCTION: &str = "Output only the commit message, no explanations.";

pub const LARGE_CHANGE_NOTE: &str = "NOTE: This is a large changeset - focus on the overall purpose rather than individual changes.";
