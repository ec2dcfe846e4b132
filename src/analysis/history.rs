/// Frequency patterns mined from recent commit subjects
#[derive(Debug, Clone, Default)]
pub struct HistoryStats {
    /// Commit type -> occurrence count, first-seen order
    pub types: Vec<(String, u32)>,
    /// Commit scope -> occurrence count, first-seen order
    pub scopes: Vec<(String, u32)>,
    pub average_subject_length: f64,
    /// Up to five qualifying subjects, most recent first
    pub examples: Vec<String>,
}

impl HistoryStats {
    /// Analyze commit subjects (reverse-chronological) for conventional
    /// commit patterns. Merge commits are skipped. Never fails; an empty
    /// input produces the all-empty value.
    pub fn from_subjects(subjects: &[String]) -> Self {
        let mut stats = HistoryStats::default();
        let mut qualifying: Vec<&str> = Vec::new();

        for subject in subjects {
            let subject = subject.trim();
            if subject.is_empty() || subject.starts_with("Merge") {
                continue;
            }
            qualifying.push(subject);

            if let Some((type_part, _)) = subject.split_once(':') {
                let type_part = type_part.trim();
                match split_scope(type_part) {
                    Some((commit_type, scope)) => {
                        bump(&mut stats.types, commit_type);
                        bump(&mut stats.scopes, scope);
                    }
                    None => bump(&mut stats.types, type_part),
                }
            }
        }

        if !qualifying.is_empty() {
            let total: usize = qualifying.iter().map(|s| s.chars().count()).sum();
            stats.average_subject_length = total as f64 / qualifying.len() as f64;
            stats.examples = qualifying
                .iter()
                .take(5)
                .map(|s| s.to_string())
                .collect();
        }

        stats
    }

    /// The `count` most frequent entries from an insertion-ordered frequency
    /// table. Ties rank by first appearance in the input.
    pub fn most_frequent(table: &[(String, u32)], count: usize) -> Vec<&str> {
        let mut ranked: Vec<&(String, u32)> = table.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().take(count).map(|(name, _)| name.as_str()).collect()
    }
}

/// Split `type(scope)` into its parts; `None` when no parenthesized scope
fn split_scope(type_part: &str) -> Option<(&str, &str)> {
    let (commit_type, rest) = type_part.split_once('(')?;
    let (scope, _) = rest.split_once(')')?;
    Some((commit_type.trim(), scope.trim()))
}

fn bump(table: &mut Vec<(String, u32)>, key: &str) {
    if let Some(entry) = table.iter_mut().find(|(name, _)| name == key) {
        entry.1 += 1;
    } else {
        table.push((key.to_string(), 1));
    }
}
