//! File primitives shared by the scanner and the demoter
//!
//! Whole-file state is replaced atomically (temp file + rename); journals are
//! appended one line per write and fsynced.

use std::io::SeekFrom;
use std::path::Path;
use std::time::SystemTime;

use serde::Serialize;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};

use crate::errors::{SharedError, SharedResult};

/// Replace `path` with `bytes` so readers see either the old or the new file
pub async fn atomic_write(path: &Path, bytes: &[u8]) -> SharedResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| SharedError::file("create directory", parent, e))?;
    }

    let tmp = path.with_extension("tmp");
    let mut file = fs::File::create(&tmp)
        .await
        .map_err(|e| SharedError::file("create temp file", &tmp, e))?;
    file.write_all(bytes)
        .await
        .map_err(|e| SharedError::file("write temp file", &tmp, e))?;
    file.sync_all()
        .await
        .map_err(|e| SharedError::file("sync temp file", &tmp, e))?;
    drop(file);

    fs::rename(&tmp, path)
        .await
        .map_err(|e| SharedError::file("rename temp file", path, e))?;
    Ok(())
}

/// Serialize `value` as pretty JSON and write it atomically
pub async fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> SharedResult<()> {
    let mut content = serde_json::to_vec_pretty(value).map_err(|e| SharedError::SerializationError {
        message: e.to_string(),
    })?;
    content.push(b'\n');
    atomic_write(path, &content).await
}

/// Append one line to a journal file and fsync it
///
/// A previous write that died before its newline leaves an unterminated tail;
/// the new line is started on a fresh line so it stays parseable.
pub async fn append_line(path: &Path, line: &str) -> SharedResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| SharedError::file("create directory", parent, e))?;
    }

    let mut file = fs::OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)
        .await
        .map_err(|e| SharedError::file("open journal", path, e))?;

    let len = file
        .metadata()
        .await
        .map_err(|e| SharedError::file("stat journal", path, e))?
        .len();

    let mut record = Vec::with_capacity(line.len() + 2);
    if len > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::Start(len - 1))
            .await
            .map_err(|e| SharedError::file("seek journal", path, e))?;
        file.read_exact(&mut last)
            .await
            .map_err(|e| SharedError::file("read journal tail", path, e))?;
        if last[0] != b'\n' {
            record.push(b'\n');
        }
    }
    record.extend_from_slice(line.as_bytes());
    record.push(b'\n');

    file.write_all(&record)
        .await
        .map_err(|e| SharedError::file("append journal", path, e))?;
    file.sync_all()
        .await
        .map_err(|e| SharedError::file("sync journal", path, e))?;
    Ok(())
}

/// Modification time of `path`, `None` when it does not exist
pub async fn modified(path: &Path) -> SharedResult<Option<SystemTime>> {
    match fs::metadata(path).await {
        Ok(meta) => meta
            .modified()
            .map(Some)
            .map_err(|e| SharedError::file("read modification time", path, e)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SharedError::file("stat", path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_atomic_write_creates_parents_and_leaves_no_temp() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("org").join("state.json");

        write_json_atomic(&path, &vec![1, 2, 3]).await.unwrap();

        let content = fs::read_to_string(&path).await.unwrap();
        let parsed: Vec<u32> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, vec![1, 2, 3]);
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_append_line_repairs_torn_tail() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("journal.jsonl");

        append_line(&path, "{\"n\":1}").await.unwrap();
        // simulate a write that died mid-record
        let mut raw = fs::read(&path).await.unwrap();
        raw.extend_from_slice(b"{\"n\":");
        fs::write(&path, &raw).await.unwrap();

        append_line(&path, "{\"n\":3}").await.unwrap();

        let content = fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["{\"n\":1}", "{\"n\":", "{\"n\":3}"]);
    }

    #[tokio::test]
    async fn test_modified_is_none_for_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(modified(&temp.path().join("absent")).await.unwrap().is_none());

        let present = temp.path().join("present");
        fs::write(&present, "x").await.unwrap();
        assert!(modified(&present).await.unwrap().is_some());
    }
}
