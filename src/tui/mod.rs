// TUI module for rendering the terminal interface
pub mod colors;
pub mod input;

// Re-exports
pub use colors::*;
pub use input::{handle_confirm_input, handle_key_event, handle_prompt_input, KeyAction, PromptAction};

use crate::app::{App, GalleryView, Overlay, PdfView};
use crate::domain::dispatcher::{handoff_label, MediaVariant, PresentationMode, UnsupportedPanel};
use crate::domain::{Document, FileKind};
use crate::error::Notice;
use crate::preview::PreviewState;
use crate::storage::StorageVolume;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Renders the whole screen for the current session state
pub fn render<V: StorageVolume>(frame: &mut Frame, app: &App<V>) {
    if let Some(view) = app.pdf_view() {
        render_pdf_screen(frame, app, view);
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Catalogue and viewer
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);

        render_header(frame, chunks[0], app);
        render_catalogue(frame, body[0], app);
        render_viewer(frame, body[1], app);
        render_footer(frame, chunks[2], footer_hints(app.navigator().is_browsing()));
    }

    match app.overlay() {
        Overlay::None => {}
        Overlay::Help => render_help_overlay(frame),
        Overlay::Welcome => render_welcome_overlay(frame),
        Overlay::ConfirmDelete(document) => render_confirm_delete_overlay(frame, document),
        Overlay::ImportPrompt => render_import_prompt(frame, app.import_input()),
        Overlay::Notice(notice) => render_notice_overlay(frame, notice),
        Overlay::Gallery => {
            if let (Some(gallery), Some(document)) = (app.gallery(), app.navigator().selected()) {
                render_gallery(frame, gallery, document);
            }
        }
    }
}

/// Renders the help overlay
pub fn render_help_overlay(frame: &mut Frame) {
    let help_area = centered_rect(50, 80, frame.area());

    // Clear background
    frame.render_widget(Clear, help_area);

    let block = overlay_block(" Help ", ACCENT_HIGHLIGHT);
    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let shortcut = |keys: &'static str, label: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<8}", keys), Style::default().fg(ACCENT_HIGHLIGHT)),
            Span::raw(label),
        ])
    };

    let help_lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        shortcut("↑↓ j k", "Move through the list"),
        shortcut("Enter", "View document"),
        shortcut("Esc", "Close the viewer"),
        shortcut("a", "Import a file"),
        shortcut("d", "Delete document"),
        shortcut("x", "Save a copy to the export folder"),
        shortcut("s", "Share with another app"),
        shortcut("z", "Open image gallery (+/- zoom)"),
        shortcut("p / o", "Play media or open externally"),
        shortcut("← →", "Turn PDF pages"),
        shortcut("?", "Toggle this help"),
        shortcut("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(help_lines)
        .alignment(Alignment::Left)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

/// Renders the welcome overlay shown on first launch
pub fn render_welcome_overlay(frame: &mut Frame) {
    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);

    let block = overlay_block(" Welcome ", ACCENT_HIGHLIGHT);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let welcome_lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to docvault!",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Files you import are copied into a private folder and listed here."),
        Line::from("The originals are never touched."),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("a", Style::default().fg(ACCENT_SECONDARY).add_modifier(Modifier::BOLD)),
            Span::raw(" to import your first file, "),
            Span::styled("?", Style::default().fg(ACCENT_HIGHLIGHT).add_modifier(Modifier::BOLD)),
            Span::raw(" for all shortcuts."),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to start",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(welcome_lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, inner);
}

/// Renders the confirmation dialog for a delete
pub fn render_confirm_delete_overlay(frame: &mut Frame, document: &Document) {
    let confirm_area = centered_rect(50, 50, frame.area());
    frame.render_widget(Clear, confirm_area);

    let block = overlay_block(" ⚠ Confirm Delete ", ACCENT_PRIMARY);
    let inner = block.inner(confirm_area);
    frame.render_widget(block, confirm_area);

    let kind = document.kind();
    let confirm_lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Delete this document?",
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("File: ", Style::default().fg(TEXT_SECONDARY)),
            Span::styled(document.name().to_string(), Style::default().fg(TEXT_PRIMARY)),
        ]),
        Line::from(vec![
            Span::styled("Type: ", Style::default().fg(TEXT_SECONDARY)),
            Span::styled(kind.label().to_string(), Style::default().fg(TEXT_PRIMARY)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "This can't be undone.",
            Style::default().fg(ACCENT_PRIMARY),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Y]", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("es  "),
            Span::styled("[Enter]", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("     "),
            Span::styled("[N]", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("o  "),
            Span::styled("[Esc]", Style::default().fg(ACCENT_PRIMARY)),
        ]),
    ];

    let paragraph = Paragraph::new(confirm_lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

/// Renders the path prompt for an import
pub fn render_import_prompt(frame: &mut Frame, input: &str) {
    let area = centered_rect(70, 30, frame.area());
    frame.render_widget(Clear, area);

    let block = overlay_block(" Import ", ACCENT_SECONDARY);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            "Path of the file to import:",
            Style::default().fg(TEXT_SECONDARY),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(ACCENT_SECONDARY)),
            Span::styled(input.to_string(), Style::default().fg(TEXT_PRIMARY)),
            Span::styled("█", Style::default().fg(ACCENT_HIGHLIGHT)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to import, Esc to cancel",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

pub fn render_notice_overlay(frame: &mut Frame, notice: &Notice) {
    let area = centered_rect(60, 30, frame.area());
    frame.render_widget(Clear, area);

    let accent = if notice.is_error {
        ACCENT_PRIMARY
    } else {
        ACCENT_SECONDARY
    };
    let block = overlay_block(" Notice ", accent);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            notice.title.clone(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(notice.message.clone()),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to continue",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, inner);
}

/// Full-screen zoomable image
fn render_gallery(frame: &mut Frame, gallery: &GalleryView, document: &Document) {
    let area = frame.area();
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} · {}x ", document.name(), gallery.zoom))
        .title_bottom(Line::from(" +/- Zoom  ←↑↓→ Pan  Esc Close ").centered())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let paragraph = Paragraph::new(preview_lines(&gallery.state))
        .block(block)
        .scroll((gallery.scroll_y, gallery.scroll_x));

    frame.render_widget(paragraph, area);
}

/// The dedicated PDF screen replaces the list entirely
fn render_pdf_screen<V: StorageVolume>(frame: &mut Frame, app: &App<V>, view: &PdfView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(frame.area());

    let name = app
        .navigator()
        .selected()
        .map(|d| d.name().to_string())
        .unwrap_or_default();
    let title = if view.page_count > 0 {
        format!(" {} · page {} of {} ", name, view.page + 1, view.page_count)
    } else {
        format!(" {} ", name)
    };

    let lines = match &view.location {
        Some(_) if matches!(view.state, PreviewState::Error(_)) => {
            let mut lines = preview_lines(&view.state);
            lines.extend([
                Line::from(""),
                Line::from(vec![
                    Span::styled("s", Style::default().fg(ACCENT_SECONDARY)),
                    Span::styled(
                        " Open it in another app instead",
                        Style::default().fg(TEXT_SECONDARY),
                    ),
                ]),
            ]);
            lines
        }
        Some(_) => preview_lines(&view.state),
        None => vec![Line::from(Span::styled(
            "No document selected.",
            Style::default().fg(TEXT_SECONDARY),
        ))],
    };

    let page = Paragraph::new(lines)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(page, chunks[0]);
    render_footer(
        frame,
        chunks[1],
        &[
            ("← →", "Page"),
            ("s", "Share"),
            ("x", "Export"),
            ("d", "Delete"),
            ("Esc", "Back"),
        ],
    );
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn overlay_block(title: &'static str, accent: ratatui::style::Color) -> Block<'static> {
    Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(BG_DARK))
}

fn render_header<V: StorageVolume>(frame: &mut Frame, area: Rect, app: &App<V>) {
    let count = app.catalogue().len();
    let summary = match count {
        1 => "1 document".to_string(),
        n => format!("{} documents", n),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " docvault ",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(summary, Style::default().fg(TEXT_SECONDARY)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_COLOR)),
    );

    frame.render_widget(header, area);
}

fn render_catalogue<V: StorageVolume>(frame: &mut Frame, area: Rect, app: &App<V>) {
    let block = Block::default()
        .title(" Documents ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR));

    if app.catalogue().is_empty() {
        frame.render_widget(render_empty_state_widget().block(block), area);
        return;
    }

    let items: Vec<ListItem> = app
        .catalogue()
        .iter()
        .map(|document| {
            let kind = document.kind();
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", kind.glyph())),
                Span::styled(document.name().to_string(), Style::default().fg(TEXT_PRIMARY)),
                Span::raw("  "),
                Span::styled(kind.label().to_string(), Style::default().fg(TEXT_SECONDARY)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default().with_selected(Some(app.cursor()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_empty_state_widget() -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No documents yet",
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(TEXT_SECONDARY)),
            Span::styled("a", Style::default().fg(ACCENT_SECONDARY)),
            Span::styled(" to import a file", Style::default().fg(TEXT_SECONDARY)),
        ]),
    ])
    .alignment(Alignment::Center)
}

/// Renders the viewer pane for the current presentation mode
fn render_viewer<V: StorageVolume>(frame: &mut Frame, area: Rect, app: &App<V>) {
    let (Some(document), Some(mode)) = (app.navigator().selected(), app.presentation()) else {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            "Select a document and press Enter",
            Style::default().fg(TEXT_SECONDARY),
        )))
        .alignment(Alignment::Center)
        .block(viewer_block(" Viewer ".to_string()));
        frame.render_widget(placeholder, area);
        return;
    };

    let lines = match mode {
        PresentationMode::InlineFullScreenImage => match app.inline_preview() {
            Some(state) => preview_lines(state),
            None => vec![Line::from("Loading...")],
        },
        PresentationMode::InlineMedia { variant } => media_lines(variant),
        PresentationMode::InlineText { notice } => vec![
            Line::from(""),
            Line::from(Span::styled(
                document.name().to_string(),
                Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(notice, Style::default().fg(TEXT_SECONDARY))),
        ],
        PresentationMode::Unsupported(panel) => unsupported_lines(&panel, document),
        // The PDF screen takes over the whole frame
        PresentationMode::RouteToPdfViewer { .. } => Vec::new(),
    };

    let paragraph = Paragraph::new(lines)
        .block(viewer_block(format!(" {} ", document.name())))
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn viewer_block(title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
}

fn preview_lines(state: &PreviewState) -> Vec<Line<'static>> {
    match state {
        PreviewState::Ready(content) => content.clone().into_lines(),
        PreviewState::Error(message) => vec![
            Line::from(Span::styled(
                "Preview unavailable",
                Style::default().fg(ACCENT_PRIMARY),
            )),
            Line::from(""),
            Line::from(Span::styled(
                message.clone(),
                Style::default().fg(TEXT_SECONDARY),
            )),
        ],
    }
}

fn media_lines(variant: MediaVariant) -> Vec<Line<'static>> {
    let (glyph, label) = match variant {
        MediaVariant::Video => ("🎬", "Video"),
        MediaVariant::Audio => ("🎵", "Audio"),
    };

    let mut lines = vec![Line::from("")];
    if variant == MediaVariant::Video {
        // Video gets the larger stage
        lines.extend([Line::from(""), Line::from(""), Line::from("")]);
    }
    lines.extend([
        Line::from(Span::styled(
            format!("{} {}", glyph, label),
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("p", Style::default().fg(ACCENT_SECONDARY)),
            Span::styled(" Play in your media player", Style::default().fg(TEXT_SECONDARY)),
        ]),
    ]);
    lines
}

fn unsupported_lines(panel: &UnsupportedPanel, document: &Document) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            document.kind().glyph(),
            Style::default().fg(TEXT_SECONDARY),
        )),
        Line::from(""),
        Line::from(Span::styled(
            panel.headline.clone(),
            Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            panel.guidance.clone(),
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    if let (Some(_), FileKind::OfficeDocument(format)) = (&panel.handoff, document.kind()) {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("o", Style::default().fg(ACCENT_SECONDARY)),
            Span::styled(
                format!(" Open in your {}", handoff_label(format)),
                Style::default().fg(TEXT_SECONDARY),
            ),
        ]));
    }
    lines
}

const BROWSE_HINTS: &[(&str, &str)] = &[
    ("↑↓", "Navigate"),
    ("Enter", "View"),
    ("a", "Import"),
    ("d", "Delete"),
    ("?", "Help"),
    ("q", "Quit"),
];

const VIEW_HINTS: &[(&str, &str)] = &[
    ("Esc", "Close"),
    ("s", "Share"),
    ("x", "Export"),
    ("d", "Delete"),
    ("?", "Help"),
];

fn footer_hints(browsing: bool) -> &'static [(&'static str, &'static str)] {
    if browsing {
        BROWSE_HINTS
    } else {
        VIEW_HINTS
    }
}

/// Renders the footer with styled controls
fn render_footer(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  │  "));
        }
        spans.push(Span::styled(
            format!("{} ", key),
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(label.to_string(), Style::default().fg(TEXT_SECONDARY)));
    }

    let footer = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(footer, area);
}
