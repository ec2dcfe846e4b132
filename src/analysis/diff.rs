use std::collections::HashMap;

/// Structured statistics extracted from a staged unified diff
#[derive(Debug, Clone, Default)]
pub struct DiffStats {
    /// Changed file paths, deduplicated, first-seen order
    pub files_changed: Vec<String>,
    pub additions: u32,
    pub deletions: u32,
    pub new_files: u32,
    pub deleted_files: u32,
    pub files_modified: u32,
    /// Count of changed files per file extension
    pub file_types: HashMap<String, u32>,
    pub is_large_change: bool,
}

impl DiffStats {
    /// Scan diff text line by line and accumulate change statistics.
    ///
    /// This is a line-oriented scan, not a semantic diff parse — the input
    /// always comes from `git diff --staged`, so header markers are reliable.
    /// Malformed or empty input yields all-zero stats rather than an error.
    pub fn from_diff(diff_text: &str) -> Self {
        let mut stats = DiffStats::default();
        let mut current_file: Option<String> = None;

        for line in diff_text.lines() {
            if line.starts_with("diff --git") {
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() >= 4 {
                    // Strip the 'b/' prefix from the destination path
                    let file_path = parts[3]
                        .strip_prefix("b/")
                        .unwrap_or(parts[3])
                        .to_string();

                    if let Some(ext) = extension_of(&file_path) {
                        *stats.file_types.entry(ext.to_string()).or_insert(0) += 1;
                    }

                    if !stats.files_changed.contains(&file_path) {
                        stats.files_changed.push(file_path.clone());
                    }
                    current_file = Some(file_path);
                }
            } else if line.starts_with("new file mode") {
                stats.new_files += 1;
            } else if line.starts_with("deleted file mode") {
                stats.deleted_files += 1;
            } else if line.starts_with("+++") || line.starts_with("---") {
                // One increment per file marker line; a file split across
                // several hunk contexts counts more than once here. Kept
                // intentionally, see DESIGN.md.
                if current_file.is_some() && !line.ends_with("/dev/null") {
                    stats.files_modified += 1;
                }
            } else if line.starts_with('+') {
                stats.additions += 1;
            } else if line.starts_with('-') {
                stats.deletions += 1;
            }
        }

        let total_changes = stats.additions + stats.deletions;
        stats.is_large_change = total_changes > 50 || stats.files_changed.len() > 5;

        stats
    }
}

/// Extension after the last dot, if the path has one
fn extension_of(path: &str) -> Option<&str> {
    if path.contains('.') {
        path.rsplit('.').next()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DIFF: &str = r#"diff --git a/src/file1.py b/src/file1.py
new file mode 100644
index 0000000..e69de29
--- /dev/null
+++ b/src/file1.py
@@ -0,0 +1,2 @@
+def hello():
+    pass
diff --git a/src/file2.js b/src/file2.js
index 1234567..89abcde 100644
--- a/src/file2.js
+++ b/src/file2.js
@@ -1,1 +1,1 @@
-const a = 1;
+const a = 2;
"#;

    #[test]
    fn test_empty_diff_yields_zero_stats() {
        let stats = DiffStats::from_diff("");
        assert!(stats.files_changed.is_empty());
        assert_eq!(stats.additions, 0);
        assert_eq!(stats.deletions, 0);
        assert!(!stats.is_large_change);
    }

    #[test]
    fn test_text_without_diff_headers_tracks_no_files() {
        let stats = DiffStats::from_diff("just some\nrandom text\nwith lines");
        assert!(stats.files_changed.is_empty());
        assert!(stats.file_types.is_empty());
        assert!(!stats.is_large_change);
    }

    #[test]
    fn test_mixed_new_and_modified_files() {
        let stats = DiffStats::from_diff(SAMPLE_DIFF);

        assert_eq!(
            stats.files_changed,
            vec!["src/file1.py".to_string(), "src/file2.js".to_string()]
        );
        assert_eq!(stats.new_files, 1);
        assert_eq!(stats.additions, 3);
        assert_eq!(stats.deletions, 1);
        assert_eq!(stats.file_types.get("py"), Some(&1));
        assert_eq!(stats.file_types.get("js"), Some(&1));
        // One marker for the new file (its --- side is /dev/null), two for
        // the modified file
        assert_eq!(stats.files_modified, 3);
        assert!(!stats.is_large_change);
    }

    #[test]
    fn test_deleted_file_detection() {
        let diff = "diff --git a/old.txt b/old.txt\ndeleted file mode 100644\n--- a/old.txt\n+++ /dev/null\n@@ -1,1 +0,0 @@\n-gone\n";
        let stats = DiffStats::from_diff(diff);
        assert_eq!(stats.deleted_files, 1);
        assert_eq!(stats.deletions, 1);
        assert_eq!(stats.additions, 0);
    }

    #[test]
    fn test_large_change_by_line_count() {
        let mut diff = String::from("diff --git a/big.rs b/big.rs\n--- a/big.rs\n+++ b/big.rs\n");
        for i in 0..60 {
            diff.push_str(&format!("+line {}\n", i));
        }
        let stats = DiffStats::from_diff(&diff);
        assert_eq!(stats.additions, 60);
        assert!(stats.is_large_change);
    }

    #[test]
    fn test_large_change_by_file_count() {
        let mut diff = String::new();
        for i in 0..10 {
            diff.push_str(&format!(
                "diff --git a/file{i}.rs b/file{i}.rs\n--- a/file{i}.rs\n+++ b/file{i}.rs\n+x\n"
            ));
        }
        let stats = DiffStats::from_diff(&diff);
        assert_eq!(stats.files_changed.len(), 10);
        assert!(stats.is_large_change);
    }

    #[test]
    fn test_large_change_invariant_holds_at_boundary() {
        // Exactly 50 changed lines in a single file is not large
        let mut diff = String::from("diff --git a/a.rs b/a.rs\n--- a/a.rs\n+++ b/a.rs\n");
        for i in 0..25 {
            diff.push_str(&format!("+new {}\n", i));
            diff.push_str(&format!("-old {}\n", i));
        }
        let stats = DiffStats::from_diff(&diff);
        assert_eq!(stats.additions + stats.deletions, 50);
        assert!(!stats.is_large_change);
    }

    #[test]
    fn test_duplicate_headers_count_file_once() {
        let diff = "diff --git a/a.rs b/a.rs\n+x\ndiff --git a/a.rs b/a.rs\n+y\n";
        let stats = DiffStats::from_diff(diff);
        assert_eq!(stats.files_changed, vec!["a.rs".to_string()]);
        // The extension histogram still counts per header
        assert_eq!(stats.file_types.get("rs"), Some(&2));
    }

    #[test]
    fn test_file_without_extension() {
        let diff = "diff --git a/Makefile b/Makefile\n--- a/Makefile\n+++ b/Makefile\n+all:\n";
        let stats = DiffStats::from_diff(diff);
        assert_eq!(stats.files_changed, vec!["Makefile".to_string()]);
        assert!(stats.file_types.is_empty());
    }
}
