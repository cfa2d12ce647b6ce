//! Interactive session state: the catalogue cursor, the navigator and
//! whatever overlay currently has the keyboard.

use crate::domain::dispatcher::{select, PresentationMode};
use crate::domain::navigation::{Navigator, Route};
use crate::domain::repository::DocumentRepository;
use crate::domain::{Catalogue, Document};
use crate::error::{Action, Notice, VaultError};
use crate::picker::{FilePicker, PathPicker};
use crate::preview::{
    self, PreviewContent, PreviewState, GALLERY_BOUNDS, INLINE_BOUNDS, PDF_PAGE_BOUNDS,
};
use crate::share::ShareService;
use crate::storage::{LocalVolume, StorageVolume};
use crate::tui::input::{
    handle_confirm_input, handle_key_event, handle_prompt_input, KeyAction, PromptAction,
};
use crossterm::event::KeyEvent;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const MAX_ZOOM: u32 = 4;
const PAN_STEP: u16 = 4;

/// What currently owns the keyboard on top of the main screen
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    None,
    Help,
    /// Shown on first launch
    Welcome,
    ConfirmDelete(Document),
    /// Path entry for an import
    ImportPrompt,
    Notice(Notice),
    /// Zoomable full-screen image
    Gallery,
}

#[derive(Debug, Clone)]
pub struct GalleryView {
    pub zoom: u32,
    pub scroll_x: u16,
    pub scroll_y: u16,
    pub state: PreviewState,
}

/// State of the dedicated PDF screen
#[derive(Debug, Clone)]
pub struct PdfView {
    /// Decoded route parameter; `None` when the route carried nothing usable
    pub location: Option<PathBuf>,
    pub page: u16,
    pub page_count: u16,
    pub state: PreviewState,
}

/// Session settings taken from the command line and user config
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub export_dir: PathBuf,
    /// Delete without asking first
    pub skip_confirm: bool,
    pub show_welcome: bool,
}

pub struct App<V: StorageVolume = LocalVolume> {
    repository: DocumentRepository<V>,
    navigator: Navigator,
    share: Box<dyn ShareService>,
    export_dir: PathBuf,
    skip_confirm: bool,
    overlay: Overlay,
    cursor: usize,
    import_input: String,
    inline_preview: Option<PreviewState>,
    gallery: Option<GalleryView>,
    pdf: Option<PdfView>,
    welcome_acknowledged: bool,
    should_quit: bool,
}

impl<V: StorageVolume> App<V> {
    pub fn new(
        repository: DocumentRepository<V>,
        share: Box<dyn ShareService>,
        settings: AppSettings,
    ) -> Self {
        Self {
            repository,
            navigator: Navigator::new(),
            share,
            export_dir: settings.export_dir,
            skip_confirm: settings.skip_confirm,
            overlay: if settings.show_welcome {
                Overlay::Welcome
            } else {
                Overlay::None
            },
            cursor: 0,
            import_input: String::new(),
            inline_preview: None,
            gallery: None,
            pdf: None,
            welcome_acknowledged: false,
            should_quit: false,
        }
    }

    /// Loads the catalogue; a failure leaves an empty list and a notice
    pub async fn load(&mut self) {
        if let Err(e) = self.repository.initialize().await {
            self.report(Action::Load, e);
        }
        self.clamp_cursor();
    }

    pub fn catalogue(&self) -> &Catalogue {
        self.repository.list()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn focused(&self) -> Option<&Document> {
        self.catalogue().at(self.cursor)
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Presentation of the viewed document, if any
    pub fn presentation(&self) -> Option<PresentationMode> {
        self.navigator.selected().map(select)
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn import_input(&self) -> &str {
        &self.import_input
    }

    pub fn inline_preview(&self) -> Option<&PreviewState> {
        self.inline_preview.as_ref()
    }

    pub fn gallery(&self) -> Option<&GalleryView> {
        self.gallery.as_ref()
    }

    pub fn pdf_view(&self) -> Option<&PdfView> {
        self.pdf.as_ref()
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// True once the welcome overlay has been dismissed in this session
    pub fn welcome_acknowledged(&self) -> bool {
        self.welcome_acknowledged
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        match self.overlay.clone() {
            Overlay::None => {
                let action = handle_key_event(key);
                self.handle_action(action).await;
            }
            Overlay::Welcome => {
                self.welcome_acknowledged = true;
                self.overlay = Overlay::None;
            }
            Overlay::Help | Overlay::Notice(_) => {
                self.overlay = Overlay::None;
            }
            Overlay::ConfirmDelete(document) => match handle_confirm_input(key) {
                KeyAction::ConfirmDelete => {
                    self.overlay = Overlay::None;
                    self.delete_document(document).await;
                }
                KeyAction::CancelDelete => self.overlay = Overlay::None,
                _ => {}
            },
            Overlay::ImportPrompt => match handle_prompt_input(key) {
                PromptAction::Insert(c) => self.import_input.push(c),
                PromptAction::Backspace => {
                    self.import_input.pop();
                }
                PromptAction::Submit => {
                    self.overlay = Overlay::None;
                    let input = std::mem::take(&mut self.import_input);
                    self.import_from_input(&input).await;
                }
                PromptAction::Cancel => {
                    self.import_input.clear();
                    self.overlay = Overlay::None;
                }
                PromptAction::None => {}
            },
            Overlay::Gallery => self.handle_gallery_key(handle_key_event(key)).await,
        }
    }

    async fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Help => self.overlay = Overlay::Help,
            KeyAction::Delete => {
                if let Some(document) = self.target().cloned() {
                    self.request_delete(document).await;
                }
            }
            KeyAction::Share => self.share_target(Action::Share),
            KeyAction::Export => self.export_target().await,
            _ if matches!(self.navigator.route(), Route::PdfViewer { .. }) => {
                self.handle_pdf_action(action).await
            }
            _ if self.navigator.is_browsing() => self.handle_browse_action(action).await,
            _ => self.handle_viewer_action(action).await,
        }
    }

    async fn handle_browse_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyAction::Down => {
                if self.cursor + 1 < self.catalogue().len() {
                    self.cursor += 1;
                }
            }
            KeyAction::Open => {
                if let Some(document) = self.focused().cloned() {
                    self.open(document).await;
                }
            }
            KeyAction::Import => {
                self.import_input.clear();
                self.overlay = Overlay::ImportPrompt;
            }
            _ => {}
        }
    }

    async fn handle_viewer_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Back => self.close_viewer(),
            KeyAction::Zoom => {
                if self.presentation() == Some(PresentationMode::InlineFullScreenImage) {
                    self.open_gallery().await;
                }
            }
            KeyAction::Launch => match self.presentation() {
                Some(PresentationMode::InlineMedia { .. }) => self.share_target(Action::Open),
                Some(PresentationMode::Unsupported(panel)) if panel.handoff.is_some() => {
                    self.share_target(Action::Open)
                }
                _ => {}
            },
            // Selecting another document replaces the one being viewed
            KeyAction::Up | KeyAction::Down | KeyAction::Open => {
                self.handle_browse_action(action).await
            }
            _ => {}
        }
    }

    async fn handle_pdf_action(&mut self, action: KeyAction) {
        let Some(view) = self.pdf.as_ref() else {
            return;
        };
        let (page, page_count) = (view.page, view.page_count);

        match action {
            KeyAction::Back => self.close_viewer(),
            KeyAction::Left | KeyAction::Up if page > 0 => self.load_pdf_page(page - 1).await,
            KeyAction::Right | KeyAction::Down if page + 1 < page_count => {
                self.load_pdf_page(page + 1).await
            }
            _ => {}
        }
    }

    async fn handle_gallery_key(&mut self, action: KeyAction) {
        let Some(gallery) = self.gallery.as_mut() else {
            self.overlay = Overlay::None;
            return;
        };

        match action {
            KeyAction::Back | KeyAction::Zoom | KeyAction::Quit => {
                self.gallery = None;
                self.overlay = Overlay::None;
            }
            KeyAction::ZoomIn if gallery.zoom < MAX_ZOOM => {
                let zoom = gallery.zoom + 1;
                self.render_gallery(zoom).await;
            }
            KeyAction::ZoomOut if gallery.zoom > 1 => {
                let zoom = gallery.zoom - 1;
                self.render_gallery(zoom).await;
            }
            KeyAction::Up => gallery.scroll_y = gallery.scroll_y.saturating_sub(PAN_STEP / 2),
            KeyAction::Down => gallery.scroll_y = gallery.scroll_y.saturating_add(PAN_STEP / 2),
            KeyAction::Left => gallery.scroll_x = gallery.scroll_x.saturating_sub(PAN_STEP),
            KeyAction::Right => gallery.scroll_x = gallery.scroll_x.saturating_add(PAN_STEP),
            _ => {}
        }
    }

    /// Document an action applies to: the viewed one, else the focused one
    fn target(&self) -> Option<&Document> {
        self.navigator.selected().or_else(|| self.focused())
    }

    async fn open(&mut self, document: Document) {
        self.inline_preview = None;
        self.pdf = None;

        let location = document.location().to_path_buf();
        match self.navigator.select(document) {
            PresentationMode::InlineFullScreenImage => {
                self.inline_preview =
                    Some(preview::render_image_blocking(location, INLINE_BOUNDS).await);
            }
            PresentationMode::RouteToPdfViewer { route } => {
                self.pdf = Some(PdfView {
                    location: route.pdf_location(),
                    page: 0,
                    page_count: 0,
                    state: PreviewState::Ready(PreviewContent::Text(Vec::new())),
                });
                self.load_pdf_page(0).await;
            }
            _ => {}
        }
    }

    fn close_viewer(&mut self) {
        self.navigator.close();
        self.inline_preview = None;
        self.gallery = None;
        self.pdf = None;
    }

    async fn load_pdf_page(&mut self, index: u16) {
        let Some(location) = self.pdf.as_ref().and_then(|view| view.location.clone()) else {
            return;
        };

        let rendered =
            preview::render_pdf_page_blocking(location, index, PDF_PAGE_BOUNDS).await;
        if let Some(view) = self.pdf.as_mut() {
            match rendered {
                Ok(page) => {
                    view.page = page.index;
                    view.page_count = page.page_count;
                    view.state = PreviewState::Ready(page.content);
                }
                Err(message) => view.state = PreviewState::Error(message),
            }
        }
    }

    async fn open_gallery(&mut self) {
        self.render_gallery(1).await;
        self.overlay = Overlay::Gallery;
    }

    async fn render_gallery(&mut self, zoom: u32) {
        let Some(location) = self.navigator.selected().map(|d| d.location().to_path_buf())
        else {
            return;
        };

        let state = preview::render_image_blocking(location, GALLERY_BOUNDS.scaled(zoom)).await;
        let (scroll_x, scroll_y) = self
            .gallery
            .as_ref()
            .map(|g| (g.scroll_x, g.scroll_y))
            .unwrap_or_default();
        self.gallery = Some(GalleryView {
            zoom,
            scroll_x,
            scroll_y,
            state,
        });
    }

    async fn import_from_input(&mut self, input: &str) {
        let outcome = PathPicker::from_input(input).pick();
        match self.repository.import_picked(outcome).await {
            Ok(document) => {
                if let Some(index) = self
                    .catalogue()
                    .iter()
                    .position(|d| d.location() == document.location())
                {
                    self.cursor = index;
                }
            }
            Err(e) => self.report(Action::Import, e),
        }
    }

    async fn request_delete(&mut self, document: Document) {
        if self.skip_confirm {
            self.delete_document(document).await;
        } else {
            self.overlay = Overlay::ConfirmDelete(document);
        }
    }

    async fn delete_document(&mut self, document: Document) {
        let result = self.repository.delete(&document).await;

        // A missing file is gone either way, so the view follows it
        if matches!(result, Ok(()) | Err(VaultError::NotFound { .. })) {
            self.navigator.document_deleted(&document);
            if self.navigator.is_browsing() {
                self.close_viewer();
            }
        }
        self.clamp_cursor();

        if let Err(e) = result {
            self.report(Action::Delete, e);
        }
    }

    async fn export_target(&mut self) {
        let Some(document) = self.target().cloned() else {
            return;
        };

        match self.repository.export(&document, &self.export_dir).await {
            Ok(path) => {
                self.overlay = Overlay::Notice(Notice::info(
                    "Copy saved",
                    format!("Saved to {}", path.display()),
                ));
            }
            Err(e) => self.report(Action::Export, e),
        }
    }

    fn share_target(&mut self, action: Action) {
        let Some(document) = self.target().cloned() else {
            return;
        };

        if let Err(e) = self.repository.share(&document, self.share.as_ref()) {
            self.report(action, e);
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.catalogue().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    fn report(&mut self, action: Action, error: VaultError) {
        if error.is_silent() {
            debug!(?action, "action cancelled");
            return;
        }
        warn!(?action, error = %error, "action failed");
        if let Some(notice) = Notice::for_failure(action, &error) {
            self.overlay = Overlay::Notice(notice);
        }
    }
}
