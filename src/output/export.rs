//! Winner output.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::comments::CommentEntry;
use crate::paths::ensure_parent_dir;

/// Export winners to a JSON file.
///
/// The output is pretty-printed for human readability.
pub fn export_winners_json(winners: &[CommentEntry], output_path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(winners).context("Failed to serialize winners to JSON")?;

    ensure_parent_dir(output_path)
        .with_context(|| format!("Failed to create directory for {}", output_path.display()))?;
    let mut file = File::create(output_path)
        .context(format!("Failed to create JSON file: {}", output_path.display()))?;

    file.write_all(json.as_bytes())
        .context("Failed to write JSON data")?;

    Ok(())
}

/// Numbered `username - comment` list for the console.
pub fn format_winners(winners: &[CommentEntry]) -> String {
    let mut out = String::from("Selected winners:\n");
    for (idx, entry) in winners.iter().enumerate() {
        out.push_str(&format!("{}. {} - {}\n", idx + 1, entry.username, entry.comment));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn winners() -> Vec<CommentEntry> {
        vec![
            CommentEntry {
                source_image: "001.png".to_string(),
                username: "alice".to_string(),
                comment: "count me in".to_string(),
            },
            CommentEntry {
                source_image: "002.png".to_string(),
                username: "bob".to_string(),
                comment: "me too".to_string(),
            },
        ]
    }

    #[test]
    fn test_export_winners_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("winners.json");

        export_winners_json(&winners(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"username\": \"alice\""));
        assert!(content.contains("\"source_image\": \"002.png\""));

        let parsed: Vec<CommentEntry> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, winners());
    }

    #[test]
    fn test_format_winners() {
        assert_eq!(
            format_winners(&winners()),
            "Selected winners:\n1. alice - count me in\n2. bob - me too\n"
        );
    }
}
