//! Collision-safe file naming for imports and exports

use crate::error::{Result, VaultError};
use crate::storage::StorageVolume;
use std::path::Path;

/// Numbered candidates tried before falling back to a timestamp suffix
pub const MAX_NAME_ATTEMPTS: u32 = 10_000;

/// Base used when a name has nothing before its extension
pub const FALLBACK_BASE: &str = "file";

/// A file name split at its last `.`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    pub base: String,
    pub extension: Option<String>,
}

impl NameParts {
    pub fn split(name: &str) -> Self {
        let (base, extension) = match name.rsplit_once('.') {
            Some((base, ext)) => (base, Some(ext.to_string())),
            None => (name, None),
        };

        let base = if base.is_empty() {
            FALLBACK_BASE.to_string()
        } else {
            base.to_string()
        };

        Self { base, extension }
    }

    /// `base.ext` for attempt 0, `base (n).ext` after that
    pub fn candidate(&self, attempt: u32) -> String {
        if attempt == 0 {
            self.with_base(&self.base)
        } else {
            self.with_base(&format!("{} ({})", self.base, attempt))
        }
    }

    pub fn timestamped(&self, stamp: &str) -> String {
        self.with_base(&format!("{} ({})", self.base, stamp))
    }

    fn with_base(&self, base: &str) -> String {
        match &self.extension {
            Some(ext) => format!("{}.{}", base, ext),
            None => base.to_string(),
        }
    }
}

/// Reduces a picker-supplied name to a single path component.
///
/// Falls back to the source's own file name, then to [`FALLBACK_BASE`].
pub fn sanitize_suggested_name(suggested: &str, source: &Path) -> String {
    let trimmed = suggested.trim();

    let from_suggestion = Path::new(trimmed)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty());

    if let Some(name) = from_suggestion {
        return name.to_string();
    }

    source
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(FALLBACK_BASE)
        .to_string()
}

/// Finds the first name derived from `name` that does not exist in `dir`.
///
/// Every candidate is checked against the volume itself, never a cached
/// listing. After `max_attempts` numbered candidates a single timestamped
/// candidate is tried.
pub async fn find_unique_name<V>(
    volume: &V,
    dir: &Path,
    name: &str,
    max_attempts: u32,
) -> Result<String>
where
    V: StorageVolume + ?Sized,
{
    let parts = NameParts::split(name);

    for attempt in 0..max_attempts {
        let candidate = parts.candidate(attempt);
        if !is_taken(volume, dir, &candidate).await? {
            return Ok(candidate);
        }
    }

    let stamp = chrono::Local::now().format("%Y%m%d%H%M%S%3f").to_string();
    let candidate = parts.timestamped(&stamp);
    tracing::warn!(
        base = %parts.base,
        attempts = max_attempts,
        "numbered names exhausted, trying {}",
        candidate
    );

    if !is_taken(volume, dir, &candidate).await? {
        return Ok(candidate);
    }

    Err(VaultError::NameUnavailable { base: parts.base })
}

async fn is_taken<V>(volume: &V, dir: &Path, candidate: &str) -> Result<bool>
where
    V: StorageVolume + ?Sized,
{
    volume
        .exists(&dir.join(candidate))
        .await
        .map_err(|source| VaultError::StorageUnavailable {
            path: dir.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalVolume;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    mod split_tests {
        use super::*;

        #[test]
        fn test_split_with_extension() {
            let parts = NameParts::split("report.final.pdf");
            assert_eq!(parts.base, "report.final");
            assert_eq!(parts.extension.as_deref(), Some("pdf"));
        }

        #[test]
        fn test_split_without_extension() {
            let parts = NameParts::split("README");
            assert_eq!(parts.base, "README");
            assert_eq!(parts.extension, None);
            assert_eq!(parts.candidate(0), "README");
            assert_eq!(parts.candidate(1), "README (1)");
        }

        #[test]
        fn test_split_dotfile_uses_fallback_base() {
            let parts = NameParts::split(".bashrc");
            assert_eq!(parts.base, FALLBACK_BASE);
            assert_eq!(parts.candidate(0), "file.bashrc");
        }

        #[test]
        fn test_candidates() {
            let parts = NameParts::split("a.txt");
            assert_eq!(parts.candidate(0), "a.txt");
            assert_eq!(parts.candidate(1), "a (1).txt");
            assert_eq!(parts.candidate(12), "a (12).txt");
            assert_eq!(parts.timestamped("20261019120000000"), "a (20261019120000000).txt");
        }

        #[test]
        fn test_candidates_keep_extension_case() {
            assert_eq!(NameParts::split("Scan.PDF").candidate(2), "Scan (2).PDF");
        }
    }

    mod sanitize_tests {
        use super::*;

        #[test]
        fn test_sanitize_plain_name() {
            assert_eq!(
                sanitize_suggested_name("notes.txt", Path::new("/tmp/x")),
                "notes.txt"
            );
        }

        #[test]
        fn test_sanitize_strips_directories() {
            assert_eq!(
                sanitize_suggested_name("../../etc/passwd", Path::new("/tmp/x")),
                "passwd"
            );
        }

        #[test]
        fn test_sanitize_falls_back_to_source_name() {
            assert_eq!(
                sanitize_suggested_name("  ", Path::new("/downloads/scan.png")),
                "scan.png"
            );
            assert_eq!(
                sanitize_suggested_name("..", Path::new("/downloads/scan.png")),
                "scan.png"
            );
        }

        #[test]
        fn test_sanitize_last_resort() {
            assert_eq!(sanitize_suggested_name("", Path::new("/")), FALLBACK_BASE);
        }
    }

    mod search_tests {
        use super::*;

        fn touch(dir: &Path, name: &str) -> PathBuf {
            let path = dir.join(name);
            fs::write(&path, b"x").unwrap();
            path
        }

        #[tokio::test]
        async fn test_free_name_is_used_as_is() {
            let temp_dir = TempDir::new().unwrap();
            let name = find_unique_name(&LocalVolume, temp_dir.path(), "a.txt", MAX_NAME_ATTEMPTS)
                .await
                .unwrap();
            assert_eq!(name, "a.txt");
        }

        #[tokio::test]
        async fn test_lowest_free_suffix_wins() {
            let temp_dir = TempDir::new().unwrap();
            touch(temp_dir.path(), "a.txt");
            touch(temp_dir.path(), "a (2).txt");

            let name = find_unique_name(&LocalVolume, temp_dir.path(), "a.txt", MAX_NAME_ATTEMPTS)
                .await
                .unwrap();
            assert_eq!(name, "a (1).txt");
        }

        #[tokio::test]
        async fn test_falls_back_to_timestamp_after_cap() {
            let temp_dir = TempDir::new().unwrap();
            touch(temp_dir.path(), "a.txt");
            touch(temp_dir.path(), "a (1).txt");

            let name = find_unique_name(&LocalVolume, temp_dir.path(), "a.txt", 2)
                .await
                .unwrap();
            assert!(name.starts_with("a ("));
            assert!(name.ends_with(").txt"));
            assert_ne!(name, "a (2).txt");
        }
    }
}
