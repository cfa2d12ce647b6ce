//! Browsing/viewing state machine and the dedicated PDF route

use super::dispatcher::{select, PresentationMode};
use super::Document;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::path::{Path, PathBuf};

/// Characters left alone by `encodeURIComponent`
const ROUTE_PARAM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    /// Full-screen PDF viewer; `location` is percent-encoded
    PdfViewer { location: String },
}

impl Route {
    pub fn pdf_viewer(location: &Path) -> Self {
        let raw = location.to_string_lossy();
        Route::PdfViewer {
            location: utf8_percent_encode(&raw, ROUTE_PARAM).to_string(),
        }
    }

    /// Decodes the route parameter; `None` off the PDF route or when the
    /// parameter is not valid percent-encoded UTF-8
    pub fn pdf_location(&self) -> Option<PathBuf> {
        match self {
            Route::Home => None,
            Route::PdfViewer { location } => percent_decode_str(location)
                .decode_utf8()
                .ok()
                .filter(|decoded| !decoded.is_empty())
                .map(|decoded| PathBuf::from(decoded.as_ref())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NavState {
    #[default]
    Browsing,
    Viewing(Document),
}

/// Tracks which document, if any, is being viewed.
///
/// The PDF route is a leaf: leaving it always returns to `Browsing`.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    state: NavState,
    route: Route,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn selected(&self) -> Option<&Document> {
        match &self.state {
            NavState::Viewing(document) => Some(document),
            NavState::Browsing => None,
        }
    }

    pub fn is_browsing(&self) -> bool {
        self.state == NavState::Browsing
    }

    /// Enters `Viewing(document)` and returns how to present it.
    ///
    /// Selecting while already viewing replaces the selection. A PDF also
    /// navigates once to its viewer route.
    pub fn select(&mut self, document: Document) -> PresentationMode {
        let mode = select(&document);
        self.route = match &mode {
            PresentationMode::RouteToPdfViewer { route } => route.clone(),
            _ => Route::Home,
        };
        tracing::debug!(name = %document.name(), ?mode, "document selected");
        self.state = NavState::Viewing(document);
        mode
    }

    /// Back to `Browsing` from any presentation mode
    pub fn close(&mut self) {
        self.state = NavState::Browsing;
        self.route = Route::Home;
    }

    /// Leaves the PDF route. Returns to `Browsing`, not to the inline view.
    pub fn leave_route(&mut self) {
        if matches!(self.route, Route::PdfViewer { .. }) {
            self.close();
        }
    }

    /// Deleting the viewed document forces a return to `Browsing`; any other
    /// deletion leaves the state alone
    pub fn document_deleted(&mut self, document: &Document) {
        let viewed = self
            .selected()
            .is_some_and(|selected| selected.location() == document.location());
        if viewed {
            self.close();
        }
    }
}
