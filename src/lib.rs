//! docvault - a local document repository with a terminal viewer
//!
//! Files are imported as copies into a managed directory, listed in a
//! catalogue and dispatched to the viewer that suits their type.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod picker;
pub mod preview;
pub mod share;
pub mod storage;
pub mod tui;

// Re-export primary types for convenience
pub use app::{App, AppSettings};
pub use config::UserConfig;
pub use domain::dispatcher::{mime_type_for, select, PresentationMode};
pub use domain::navigation::{NavState, Navigator, Route};
pub use domain::repository::DocumentRepository;
pub use domain::{Catalogue, Document, FileKind, OfficeFormat};
pub use error::{Action, Notice, Result, VaultError};
pub use storage::{LocalVolume, StorageVolume};
