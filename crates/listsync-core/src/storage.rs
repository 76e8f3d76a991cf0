//! Disk persistence for aggregated list files.
//!
//! The aggregate is written once, whole: to a `.part` temp file first, synced,
//! then renamed over the destination so readers never observe a partial file.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path
/// (e.g. `allowlist.txt` → `allowlist.txt.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Writes `content` as the complete contents of `path` (UTF-8, overwrite
/// semantics). Parent directories are created as needed. Returns the number
/// of bytes written.
pub fn write_atomic(path: &Path, content: &str) -> Result<u64> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
    }

    let tp = temp_path(path);
    let mut file = File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&tp)
        .with_context(|| format!("failed to create temp file: {}", tp.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("failed to write {}", tp.display()))?;
    file.sync_all()
        .with_context(|| format!("failed to sync {}", tp.display()))?;
    drop(file);

    fs::rename(&tp, path)
        .with_context(|| format!("failed to rename {} to {}", tp.display(), path.display()))?;
    Ok(content.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("allowlist.txt"));
        assert_eq!(p.to_string_lossy(), "allowlist.txt.part");
        let p2 = temp_path(Path::new("/tmp/lists/blocklist.txt"));
        assert_eq!(p2.to_string_lossy(), "/tmp/lists/blocklist.txt.part");
    }

    #[test]
    fn write_atomic_creates_file_and_reports_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("allowlist.txt");
        let bytes = write_atomic(&dest, "a.example\nb.example").unwrap();
        assert_eq!(bytes, 19);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "a.example\nb.example");
        assert!(!temp_path(&dest).exists());
    }

    #[test]
    fn write_atomic_overwrites_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("blocklist.txt");
        fs::write(&dest, "stale content that is much longer").unwrap();
        write_atomic(&dest, "fresh").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "fresh");
    }

    #[test]
    fn write_atomic_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("nested/lists/out.txt");
        write_atomic(&dest, "x.example").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "x.example");
    }

    #[test]
    fn write_atomic_empty_content_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("empty.txt");
        let bytes = write_atomic(&dest, "").unwrap();
        assert_eq!(bytes, 0);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "");
    }
}
