use anyhow::Result;
use ignore::WalkBuilder;

const MAX_TREE_DEPTH: usize = 3;

/// Render the project layout as an indented listing, two spaces per level,
/// directories suffixed with `/`.
///
/// Hidden entries and everything matched by `.gitignore` are skipped. This
/// is best-effort context for the prompt; callers drop the section on error.
pub fn directory_tree(root: &str) -> Result<String> {
    let walker = WalkBuilder::new(root)
        .hidden(true)
        .ignore(true)
        .git_ignore(true)
        .git_exclude(true)
        .git_global(false)
        .max_depth(Some(MAX_TREE_DEPTH))
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut structure = String::new();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // Unreadable entries are skipped, not fatal
            Err(_) => continue,
        };

        // Depth 0 is the root itself
        if entry.depth() == 0 {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        let indent = "  ".repeat(entry.depth() - 1);
        let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);

        if is_dir {
            structure.push_str(&format!("{}{}/\n", indent, name));
        } else {
            structure.push_str(&format!("{}{}\n", indent, name));
        }
    }

    Ok(structure)
}
