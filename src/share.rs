//! Handing documents to other applications

use mime::Mime;
use std::io;
use std::path::Path;

pub trait ShareService {
    fn is_available(&self) -> bool;

    /// Hands `location` to another application. `mime` is a hint for targets
    /// that pick a handler by media type.
    fn share(&self, location: &Path, mime: Option<&Mime>) -> io::Result<()>;
}

/// Opens documents with the desktop's default application for them
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShare;

impl ShareService for SystemShare {
    fn is_available(&self) -> bool {
        cfg!(any(
            target_os = "linux",
            target_os = "macos",
            target_os = "windows",
            target_os = "freebsd",
            target_os = "openbsd",
            target_os = "netbsd",
        ))
    }

    fn share(&self, location: &Path, mime: Option<&Mime>) -> io::Result<()> {
        tracing::debug!(path = %location.display(), mime = ?mime, "opening with default application");
        open::that_detached(location)
    }
}

/// A share target for environments without any, such as a headless session
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledShare;

impl ShareService for DisabledShare {
    fn is_available(&self) -> bool {
        false
    }

    fn share(&self, _location: &Path, _mime: Option<&Mime>) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "sharing is disabled",
        ))
    }
}
