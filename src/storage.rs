//! Storage volume abstraction backing the document repository

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Directory and file primitives the repository needs from its host volume.
///
/// Every path handed to a volume is absolute; implementations do not resolve
/// relative paths against any working directory of their own.
#[async_trait]
pub trait StorageVolume: Send + Sync {
    /// Returns whether anything exists at `path`
    async fn exists(&self, path: &Path) -> io::Result<bool>;

    /// Creates `path` and any missing parents. Succeeds if it already exists.
    async fn make_directory(&self, path: &Path) -> io::Result<()>;

    /// Lists the names of the regular files directly inside `dir`
    async fn list_entries(&self, dir: &Path) -> io::Result<Vec<String>>;

    /// Copies `from` into a new file at `to`. Fails with `AlreadyExists`
    /// rather than overwrite anything.
    async fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;

    async fn delete(&self, path: &Path) -> io::Result<()>;

    /// Resolves `path` to its absolute form with all links followed
    async fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

/// The local filesystem, accessed through `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalVolume;

impl LocalVolume {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StorageVolume for LocalVolume {
    async fn exists(&self, path: &Path) -> io::Result<bool> {
        tokio::fs::try_exists(path).await
    }

    async fn make_directory(&self, path: &Path) -> io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }

    async fn list_entries(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            // Skip entries that vanish or cannot be inspected mid-listing
            let file_type = match entry.file_type().await {
                Ok(t) => t,
                Err(_) => continue,
            };
            if !file_type.is_file() {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => {
                    tracing::warn!(name = ?raw, "skipping entry with non UTF-8 name");
                }
            }
        }

        Ok(names)
    }

    async fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        // Open the source first so a missing source leaves nothing behind
        let mut reader = tokio::fs::File::open(from).await?;
        let mut writer = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(to)
            .await?;

        tokio::io::copy(&mut reader, &mut writer).await?;
        writer.flush().await
    }

    async fn delete(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_file(path).await
    }

    async fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        tokio::fs::canonicalize(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_make_directory_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("a").join("b");
        let volume = LocalVolume::new();

        volume.make_directory(&dir).await.unwrap();
        volume.make_directory(&dir).await.unwrap();

        assert!(volume.exists(&dir).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_entries_skips_directories() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("one.txt"), b"1").unwrap();
        fs::write(temp_dir.path().join("two.pdf"), b"2").unwrap();
        fs::create_dir(temp_dir.path().join("nested")).unwrap();

        let mut names = LocalVolume::new()
            .list_entries(temp_dir.path())
            .await
            .unwrap();
        names.sort();

        assert_eq!(names, vec!["one.txt".to_string(), "two.pdf".to_string()]);
    }

    #[tokio::test]
    async fn test_list_entries_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = LocalVolume::new()
            .list_entries(&temp_dir.path().join("missing"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_copy_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let from = temp_dir.path().join("from.txt");
        let to = temp_dir.path().join("to.txt");
        fs::write(&from, b"content").unwrap();
        let volume = LocalVolume::new();

        volume.copy(&from, &to).await.unwrap();
        assert_eq!(fs::read(&to).unwrap(), b"content");

        volume.delete(&to).await.unwrap();
        assert!(!volume.exists(&to).await.unwrap());

        let err = volume.delete(&to).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_copy_refuses_existing_target() {
        let temp_dir = TempDir::new().unwrap();
        let from = temp_dir.path().join("from.txt");
        let to = temp_dir.path().join("to.txt");
        fs::write(&from, b"new").unwrap();
        fs::write(&to, b"old").unwrap();

        let err = LocalVolume::new().copy(&from, &to).await.unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read(&to).unwrap(), b"old");
    }

    #[tokio::test]
    async fn test_copy_missing_source_creates_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let to = temp_dir.path().join("to.txt");

        let result = LocalVolume::new()
            .copy(&temp_dir.path().join("missing.txt"), &to)
            .await;

        assert!(result.is_err());
        assert!(!to.exists());
    }

    #[tokio::test]
    async fn test_canonicalize_resolves_parent_segments() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("docs");
        fs::create_dir(&dir).unwrap();
        let volume = LocalVolume::new();

        let aliased = volume
            .canonicalize(&dir.join("..").join("docs"))
            .await
            .unwrap();

        assert_eq!(aliased, volume.canonicalize(&dir).await.unwrap());
    }
}
