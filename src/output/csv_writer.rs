//! CSV writer for extracted comments.
//!
//! Columns: source_image, username, comment. Comments routinely contain commas
//! and quotes, so every field goes through the csv crate's quoting.

use anyhow::{Context, Result};
use std::path::Path;

use crate::comments::CommentEntry;
use crate::paths::ensure_parent_dir;

/// Writes all entries to `path`, replacing any existing file.
pub fn write_csv(path: &Path, entries: &[CommentEntry]) -> Result<()> {
    ensure_parent_dir(path)
        .with_context(|| format!("Failed to create directory for {}", path.display()))?;

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    if entries.is_empty() {
        writer
            .write_record(["source_image", "username", "comment"])
            .context("Failed to write CSV header")?;
    }
    for entry in entries {
        writer.serialize(entry).context("Failed to write CSV row")?;
    }

    writer.flush().context("Failed to flush CSV file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entry(source: &str, username: &str, comment: &str) -> CommentEntry {
        CommentEntry {
            source_image: source.to_string(),
            username: username.to_string(),
            comment: comment.to_string(),
        }
    }

    #[test]
    fn test_write_csv_header_and_rows() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("comments.csv");

        write_csv(
            &csv_path,
            &[entry("001.png", "alice", "hi"), entry("002.png", "bob", "yo")],
        )
        .unwrap();

        let content = std::fs::read_to_string(&csv_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert_eq!(lines[0], "source_image,username,comment");
        assert_eq!(lines[1], "001.png,alice,hi");
        assert_eq!(lines[2], "002.png,bob,yo");
    }

    #[test]
    fn test_write_csv_quotes_commas_and_quotes() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("comments.csv");

        write_csv(&csv_path, &[entry("a.png", "rene_fan", r#"yes, "me" please"#)]).unwrap();

        let content = std::fs::read_to_string(&csv_path).unwrap();
        assert!(content.contains(r#"a.png,rene_fan,"yes, ""me"" please""#));
    }

    #[test]
    fn test_write_csv_creates_parent_and_overwrites() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("out").join("comments.csv");

        write_csv(&csv_path, &[entry("a.png", "alice", "one"), entry("a.png", "bob", "two")]).unwrap();
        write_csv(&csv_path, &[entry("b.png", "carol", "three")]).unwrap();

        let content = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("carol"));
        assert!(!content.contains("alice"));
    }

    #[test]
    fn test_write_csv_empty_still_has_header() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("comments.csv");

        write_csv(&csv_path, &[]).unwrap();

        let content = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(content.trim_end(), "source_image,username,comment");
    }
}
