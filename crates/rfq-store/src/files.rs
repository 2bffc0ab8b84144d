//! Storage for uploaded document bytes.

use std::path::{Path, PathBuf};

use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::error::Result;

lazy_static! {
    static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_.-]").unwrap();
}

/// Replace every character outside `[A-Za-z0-9_.-]` with `_`.
pub fn safe_filename(name: &str) -> String {
    UNSAFE_FILENAME_CHARS.replace_all(name, "_").into_owned()
}

/// Directory-backed upload storage.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `data` as `<millis>-<id>-<safe name>` and return its path.
    ///
    /// `id` keeps same-named uploads within one millisecond apart.
    pub async fn save(&self, id: &str, filename: &str, data: &[u8]) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.root).await?;
        let stored_name = format!(
            "{}-{}-{}",
            Utc::now().timestamp_millis(),
            safe_filename(id),
            safe_filename(filename)
        );
        let path = self.root.join(stored_name);
        tokio::fs::write(&path, data).await?;
        debug!("Stored {} bytes at {}", data.len(), path.display());
        Ok(path)
    }

    pub async fn exists(&self, path: &Path) -> Result<bool> {
        Ok(tokio::fs::try_exists(path).await?)
    }

    pub async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_filename() {
        assert_eq!(safe_filename("RFQ 2024/07 (final).pdf"), "RFQ_2024_07__final_.pdf");
        assert_eq!(safe_filename("spec_v1-2.PDF"), "spec_v1-2.PDF");
        assert_eq!(safe_filename("zamówienie.pdf"), "zam_wienie.pdf");
    }

    #[tokio::test]
    async fn test_save_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("uploads"));

        let path = store.save("doc-1", "my rfq.pdf", b"%PDF-1.4").await.unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.ends_with("-doc-1-my_rfq.pdf"));
        assert!(path.starts_with(store.root()));

        assert!(store.exists(&path).await.unwrap());
        assert_eq!(store.read(&path).await.unwrap(), b"%PDF-1.4");
        assert!(!store.exists(&dir.path().join("nope")).await.unwrap());
    }

    #[tokio::test]
    async fn test_same_name_uploads_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let first = store.save("a", "rfq.pdf", b"first").await.unwrap();
        let second = store.save("b", "rfq.pdf", b"second").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(store.read(&first).await.unwrap(), b"first");
        assert_eq!(store.read(&second).await.unwrap(), b"second");
    }
}
