//! Writing post records to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::fs::AccountPaths;
use crate::record::model::PostRecord;

/// Write all records as one pretty-printed JSON array.
pub fn write_json(path: &Path, records: &[PostRecord]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write one compact JSON object per line.
pub fn write_jsonl(path: &Path, records: &[PostRecord]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write both record files of an account.
pub fn save_records(paths: &AccountPaths, records: &[PostRecord]) -> Result<()> {
    write_json(&paths.json, records)?;
    write_jsonl(&paths.jsonl, records)?;

    tracing::debug!(
        "Saved {} records to {} and {}",
        records.len(),
        paths.json.display(),
        paths.jsonl.display()
    );

    Ok(())
}

/// Read back a pretty-printed array file.
pub fn read_json(path: &Path) -> Result<Vec<PostRecord>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Read back a line-delimited file.
pub fn read_jsonl(path: &Path) -> Result<Vec<PostRecord>> {
    let content = std::fs::read_to_string(path)?;
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str::<PostRecord>(line).map_err(Error::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{MediaItem, MediaKind};

    fn record(id: u64, content: &str) -> PostRecord {
        PostRecord {
            id,
            url: format!("https://x.com/jack/status/{id}"),
            date: "2024-01-01T00:00:00+00:00".into(),
            content: content.into(),
            reply_count: 0,
            retweet_count: 1,
            like_count: 2,
            quote_count: 0,
            view_count: Some(100),
            media: vec![MediaItem {
                kind: MediaKind::Video,
                url: format!("https://x.com/jack/status/{id}"),
                local_path: Some(format!("downloads/jack/videos/{id}-{id}.mp4")),
            }],
        }
    }

    #[test]
    fn test_both_files_hold_the_same_records() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AccountPaths::new(dir.path(), "jack");
        paths.ensure().unwrap();

        let records = vec![
            record(3, "multi\nline"),
            record(2, "ünïcödé 🚀"),
            record(1, "plain"),
        ];
        save_records(&paths, &records).unwrap();

        let from_json = read_json(&paths.json).unwrap();
        let from_jsonl = read_jsonl(&paths.jsonl).unwrap();
        assert_eq!(from_json, records);
        assert_eq!(from_jsonl, records);

        let jsonl = std::fs::read_to_string(&paths.jsonl).unwrap();
        assert_eq!(jsonl.lines().count(), 3);
    }

    #[test]
    fn test_json_is_indented_and_keeps_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json(&path, &[record(1, "ünïcödé")]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n  {"));
        assert!(text.contains("ünïcödé"));
    }

    #[test]
    fn test_empty_run_writes_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AccountPaths::new(dir.path(), "jack");
        paths.ensure().unwrap();

        save_records(&paths, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&paths.json).unwrap().trim(), "[]");
        assert_eq!(std::fs::read_to_string(&paths.jsonl).unwrap(), "");
    }

    #[test]
    fn test_unwritable_location_fails() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AccountPaths::new(&dir.path().join("missing"), "jack");
        assert!(save_records(&paths, &[record(1, "x")]).is_err());
    }
}
