//! The document repository: owns the managed directory and its catalogue

use super::dispatcher::mime_type_for;
use super::naming::{find_unique_name, sanitize_suggested_name, MAX_NAME_ATTEMPTS};
use super::{Catalogue, Document};
use crate::error::{Result, VaultError};
use crate::picker::PickOutcome;
use crate::share::ShareService;
use crate::storage::{LocalVolume, StorageVolume};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Name of the managed subdirectory inside the private root
pub const MANAGED_DIR_NAME: &str = "docs";

/// Owns the catalogue of imported documents.
///
/// The in-memory catalogue is only patched after a storage operation has
/// completed, so a failed operation never leaves it out of step with the
/// volume. Mutations take `&mut self`; one is in flight at a time.
pub struct DocumentRepository<V: StorageVolume = LocalVolume> {
    volume: V,
    managed_dir: PathBuf,
    catalogue: Catalogue,
    max_name_attempts: u32,
}

impl DocumentRepository<LocalVolume> {
    /// Repository on the local filesystem under `private_root`
    pub fn local(private_root: &Path) -> Self {
        Self::new(LocalVolume::new(), private_root)
    }
}

impl<V: StorageVolume> DocumentRepository<V> {
    pub fn new(volume: V, private_root: &Path) -> Self {
        Self {
            volume,
            managed_dir: private_root.join(MANAGED_DIR_NAME),
            catalogue: Catalogue::default(),
            max_name_attempts: MAX_NAME_ATTEMPTS,
        }
    }

    /// Caps the numbered-suffix search before the timestamp fallback
    pub fn with_name_attempt_limit(mut self, limit: u32) -> Self {
        self.max_name_attempts = limit;
        self
    }

    pub fn managed_dir(&self) -> &Path {
        &self.managed_dir
    }

    /// Ensures the managed directory exists and rebuilds the catalogue from it.
    ///
    /// Entries are sorted by name so the list order is deterministic. On
    /// failure the catalogue is emptied and `StorageUnavailable` returned.
    pub async fn initialize(&mut self) -> Result<&Catalogue> {
        match self.read_managed_dir().await {
            Ok(documents) => {
                info!(
                    dir = %self.managed_dir.display(),
                    count = documents.len(),
                    "catalogue loaded"
                );
                self.catalogue.replace(documents);
                Ok(&self.catalogue)
            }
            Err(e) => {
                warn!(dir = %self.managed_dir.display(), error = %e, "catalogue unavailable");
                self.catalogue.clear();
                Err(e)
            }
        }
    }

    /// Re-reads the managed directory after external changes
    pub async fn refresh(&mut self) -> Result<&Catalogue> {
        self.initialize().await
    }

    async fn read_managed_dir(&self) -> Result<Vec<Document>> {
        self.ensure_managed_dir().await?;

        let mut names = self
            .volume
            .list_entries(&self.managed_dir)
            .await
            .map_err(|source| self.storage_error(source))?;
        names.sort();

        Ok(names
            .into_iter()
            .map(|name| {
                let location = self.managed_dir.join(&name);
                Document::new(name, location)
            })
            .collect())
    }

    async fn ensure_managed_dir(&self) -> Result<()> {
        let present = self
            .volume
            .exists(&self.managed_dir)
            .await
            .map_err(|source| self.storage_error(source))?;

        if !present {
            debug!(dir = %self.managed_dir.display(), "creating managed directory");
            self.volume
                .make_directory(&self.managed_dir)
                .await
                .map_err(|source| self.storage_error(source))?;
        }
        Ok(())
    }

    /// Copies `source` into the managed directory under a free name derived
    /// from `suggested_name` and appends the new document to the catalogue.
    pub async fn import(&mut self, source: &Path, suggested_name: &str) -> Result<Document> {
        if source.as_os_str().is_empty() {
            return Err(VaultError::NoSourceSelected);
        }

        self.ensure_managed_dir().await?;

        let requested = sanitize_suggested_name(suggested_name, source);
        let name = find_unique_name(
            &self.volume,
            &self.managed_dir,
            &requested,
            self.max_name_attempts,
        )
        .await?;
        let location = self.managed_dir.join(&name);

        if let Err(source_err) = self.volume.copy(source, &location).await {
            if source_err.kind() != io::ErrorKind::AlreadyExists {
                self.discard_partial_copy(&location).await;
            }
            return Err(VaultError::CopyFailed {
                from: source.to_path_buf(),
                to: location,
                source: source_err,
            });
        }

        // Storage had the name free, so a catalogue entry under it is stale
        if let Some(stale) = self.catalogue.get(&name).cloned() {
            warn!(name = %stale.name(), "file removed externally, replacing entry");
            self.catalogue.remove(&stale);
        }

        let document = Document::new(name, location);
        info!(
            from = %source.display(),
            name = %document.name(),
            "document imported"
        );
        self.catalogue.push(document.clone());
        Ok(document)
    }

    /// Imports whatever a file picker returned; a cancelled pick is
    /// `NoSourceSelected`
    pub async fn import_picked(&mut self, outcome: PickOutcome) -> Result<Document> {
        match outcome {
            PickOutcome::Picked(file) => self.import(&file.location, &file.name).await,
            PickOutcome::Cancelled => Err(VaultError::NoSourceSelected),
        }
    }

    // The copy creates its target exclusively, so anything there after a
    // failure other than AlreadyExists is ours
    async fn discard_partial_copy(&self, location: &Path) {
        if let Ok(true) = self.volume.exists(location).await {
            if let Err(e) = self.volume.delete(location).await {
                warn!(path = %location.display(), error = %e, "could not remove partial copy");
            }
        }
    }

    /// The in-memory catalogue; does not touch storage
    pub fn list(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn get(&self, name: &str) -> Option<&Document> {
        self.catalogue.get(name)
    }

    /// Removes the document's file and its catalogue entry.
    ///
    /// A document that is not catalogued fails with `NotFound` without any
    /// storage call. If the file is already gone the stale entry is dropped
    /// and `NotFound` returned.
    pub async fn delete(&mut self, document: &Document) -> Result<()> {
        if !self.catalogue.contains(document) {
            return Err(not_found(document));
        }

        match self.volume.delete(document.location()).await {
            Ok(()) => {
                self.catalogue.remove(document);
                info!(name = %document.name(), "document deleted");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.catalogue.remove(document);
                warn!(name = %document.name(), "file already removed, dropping entry");
                Err(not_found(document))
            }
            Err(source) => Err(self.storage_error(source)),
        }
    }

    /// Copies the document out of the managed directory into `destination`,
    /// leaving the original in place. Existing files there are never
    /// overwritten; the copy gets a free name instead.
    pub async fn export(&self, document: &Document, destination: &Path) -> Result<PathBuf> {
        if !self.catalogue.contains(document) {
            return Err(not_found(document));
        }

        let copy_error = |source: io::Error| VaultError::CopyFailed {
            from: document.location().to_path_buf(),
            to: destination.to_path_buf(),
            source,
        };

        self.volume
            .make_directory(destination)
            .await
            .map_err(copy_error)?;

        // Aliases such as `docs/../docs` or symlinks must not get past this
        let resolved = self
            .volume
            .canonicalize(destination)
            .await
            .map_err(copy_error)?;
        let managed = self
            .volume
            .canonicalize(&self.managed_dir)
            .await
            .map_err(|source| self.storage_error(source))?;
        if resolved == managed {
            return Err(copy_error(io::Error::new(
                io::ErrorKind::InvalidInput,
                "destination is the managed directory",
            )));
        }

        let name = find_unique_name(
            &self.volume,
            destination,
            document.name(),
            self.max_name_attempts,
        )
        .await?;
        let target = destination.join(name);

        self.volume
            .copy(document.location(), &target)
            .await
            .map_err(|source| VaultError::CopyFailed {
                from: document.location().to_path_buf(),
                to: target.clone(),
                source,
            })?;

        info!(name = %document.name(), to = %target.display(), "document exported");
        Ok(target)
    }

    /// Hands the document to the share collaborator along with its MIME type
    pub fn share(&self, document: &Document, service: &dyn ShareService) -> Result<()> {
        if !self.catalogue.contains(document) {
            return Err(not_found(document));
        }
        if !service.is_available() {
            return Err(VaultError::ShareUnavailable);
        }

        let mime = mime_type_for(document.extension().as_deref().unwrap_or(""));
        service
            .share(document.location(), Some(&mime))
            .map_err(|source| VaultError::ShareFailed {
                path: document.location().to_path_buf(),
                source,
            })
    }

    fn storage_error(&self, source: io::Error) -> VaultError {
        VaultError::StorageUnavailable {
            path: self.managed_dir.clone(),
            source,
        }
    }
}

fn not_found(document: &Document) -> VaultError {
    VaultError::NotFound {
        name: document.name().to_string(),
    }
}
