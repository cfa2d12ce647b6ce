//! Error types and user-facing notices

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    /// The managed directory could not be created, read or modified
    #[error("storage unavailable at {path}: {source}")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The picker was cancelled or returned an empty location
    #[error("no source file selected")]
    NoSourceSelected,

    #[error("failed to copy {from} to {to}: {source}")]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("document not found: {name}")]
    NotFound { name: String },

    #[error("no share mechanism available on this system")]
    ShareUnavailable,

    #[error("failed to hand {path} to another application: {source}")]
    ShareFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Every candidate name for an import or export was taken
    #[error("no free file name for {base}")]
    NameUnavailable { base: String },

    #[error("configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, VaultError>;

impl VaultError {
    /// Deliberate cancellations are never shown to the user
    pub fn is_silent(&self) -> bool {
        matches!(self, VaultError::NoSourceSelected)
    }
}

/// The user-level action a failure is reported against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Load,
    Import,
    Delete,
    Export,
    Share,
    Open,
}

impl Action {
    fn headline(self) -> &'static str {
        match self {
            Action::Load => "Couldn't load your documents.",
            Action::Import => "Couldn't add the document.",
            Action::Delete => "Couldn't delete the document.",
            Action::Export => "Couldn't save a copy of the document.",
            Action::Share => "Couldn't share the document.",
            Action::Open => "Couldn't open the document.",
        }
    }
}

/// A dismissible message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub is_error: bool,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            is_error: false,
        }
    }

    /// Builds the notice for a failed action, or `None` for silent outcomes.
    ///
    /// The detail line is phrased for the user; raw OS messages only go to the log.
    pub fn for_failure(action: Action, error: &VaultError) -> Option<Self> {
        let detail = match error {
            VaultError::NoSourceSelected => return None,
            VaultError::StorageUnavailable { .. } => {
                "The document folder can't be reached right now."
            }
            VaultError::CopyFailed { .. } => {
                "The file couldn't be copied. Check that it still exists and there is free space."
            }
            VaultError::NotFound { .. } => "The document no longer exists.",
            VaultError::ShareUnavailable => "Sharing isn't available on this device.",
            VaultError::ShareFailed { .. } => "No application accepted the document.",
            VaultError::NameUnavailable { .. } => {
                "There are too many documents with this name. Rename the file and try again."
            }
            VaultError::ConfigError(_) => "Your settings couldn't be read.",
        };

        Some(Self {
            title: action.headline().to_string(),
            message: detail.to_string(),
            is_error: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_error() -> io::Error {
        io::Error::new(io::ErrorKind::PermissionDenied, "EACCES: permission denied (os error 13)")
    }

    #[test]
    fn test_no_source_selected_is_silent() {
        assert!(VaultError::NoSourceSelected.is_silent());
        assert!(Notice::for_failure(Action::Import, &VaultError::NoSourceSelected).is_none());
    }

    #[test]
    fn test_notice_names_the_action() {
        let err = VaultError::NotFound {
            name: "a.txt".to_string(),
        };
        let notice = Notice::for_failure(Action::Delete, &err).unwrap();
        assert_eq!(notice.title, "Couldn't delete the document.");
        assert!(notice.is_error);
    }

    #[test]
    fn test_notice_hides_raw_os_message() {
        let err = VaultError::CopyFailed {
            from: PathBuf::from("/src/a.txt"),
            to: PathBuf::from("/docs/a.txt"),
            source: io_error(),
        };
        let notice = Notice::for_failure(Action::Import, &err).unwrap();
        assert!(!notice.message.contains("os error"));
        assert!(!notice.message.contains("/src/a.txt"));
        assert!(err.to_string().contains("os error 13"));
    }

    #[test]
    fn test_every_loud_error_produces_notice() {
        let errors = vec![
            VaultError::StorageUnavailable {
                path: PathBuf::from("/docs"),
                source: io_error(),
            },
            VaultError::ShareUnavailable,
            VaultError::ShareFailed {
                path: PathBuf::from("/docs/a.pdf"),
                source: io_error(),
            },
            VaultError::NameUnavailable {
                base: "a".to_string(),
            },
            VaultError::ConfigError("bad json".to_string()),
        ];

        for err in &errors {
            assert!(!err.is_silent());
            assert!(Notice::for_failure(Action::Share, err).is_some());
        }
    }
}
