//! Decides how a selected document is presented.
//!
//! Everything here is a pure function of the document name: no I/O and no
//! content sniffing, so a mislabelled extension is presented by its label.

use super::navigation::Route;
use super::{Document, FileKind, OfficeFormat};
use mime::Mime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaVariant {
    Video,
    /// Same playback surface with a reduced visual footprint
    Audio,
}

/// Static panel shown for documents that cannot be rendered in place
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedPanel {
    pub headline: String,
    pub guidance: String,
    /// Set when the document can be handed to an external application
    pub handoff: Option<Mime>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PresentationMode {
    /// Rendered in place, with a way to escalate to a zoomable gallery
    InlineFullScreenImage,
    InlineMedia { variant: MediaVariant },
    /// File name plus a static notice; content is never read
    InlineText { notice: &'static str },
    /// PDFs always leave the list screen for the dedicated viewer route
    RouteToPdfViewer { route: Route },
    Unsupported(UnsupportedPanel),
}

pub const TEXT_NOTICE: &str =
    "Text file detected. To read its contents, open it in a text editor.";

pub fn classify(document: &Document) -> FileKind {
    document.kind()
}

pub fn select(document: &Document) -> PresentationMode {
    match classify(document) {
        FileKind::Image => PresentationMode::InlineFullScreenImage,
        FileKind::Video => PresentationMode::InlineMedia {
            variant: MediaVariant::Video,
        },
        FileKind::Audio => PresentationMode::InlineMedia {
            variant: MediaVariant::Audio,
        },
        FileKind::Text => PresentationMode::InlineText {
            notice: TEXT_NOTICE,
        },
        FileKind::Pdf => PresentationMode::RouteToPdfViewer {
            route: Route::pdf_viewer(document.location()),
        },
        FileKind::OfficeDocument(_) => PresentationMode::Unsupported(UnsupportedPanel {
            headline: "Local Office files can't be opened directly.".to_string(),
            guidance: "Upload the file to the cloud and open it from a public link, or convert it to PDF."
                .to_string(),
            handoff: Some(mime_type_for(
                document.extension().as_deref().unwrap_or_default(),
            )),
        }),
        FileKind::Archive => PresentationMode::Unsupported(UnsupportedPanel {
            headline: format!("Compressed archive: {}", document.name()),
            guidance: "Use an extraction tool to get at its contents.".to_string(),
            handoff: None,
        }),
        FileKind::Unknown { label } => PresentationMode::Unsupported(UnsupportedPanel {
            headline: "This type of file can't be displayed.".to_string(),
            guidance: format!("Extension: {}", label),
            handoff: None,
        }),
    }
}

/// IANA media type for an extension, `application/octet-stream` when unknown
pub fn mime_type_for(extension: &str) -> Mime {
    let ext = extension.trim_start_matches('.').to_lowercase();
    let essence = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",

        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",

        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "aac" => "audio/aac",
        "flac" => "audio/flac",
        "ogg" => "audio/ogg",

        "pdf" => "application/pdf",

        "txt" => "text/plain",
        "md" => "text/markdown",
        "rtf" => "application/rtf",

        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",

        "zip" => "application/zip",
        "rar" => "application/vnd.rar",
        "7z" => "application/x-7z-compressed",

        _ => return mime::APPLICATION_OCTET_STREAM,
    };

    essence.parse().unwrap_or(mime::APPLICATION_OCTET_STREAM)
}

/// Label for the external application a handoff targets
pub fn handoff_label(format: OfficeFormat) -> &'static str {
    match format {
        OfficeFormat::Word => "word processor",
        OfficeFormat::Spreadsheet => "spreadsheet app",
        OfficeFormat::Presentation => "presentation app",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn doc(name: &str) -> Document {
        Document::new(name, PathBuf::from("/vault/docs").join(name))
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify(&doc("x.JPG")), classify(&doc("x.jpg")));
        assert_eq!(classify(&doc("x.JPG")), FileKind::Image);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(
            classify(&doc("blob.xyz")),
            FileKind::Unknown {
                label: "XYZ".to_string()
            }
        );
    }

    #[test]
    fn test_pdf_always_routes() {
        for name in ["a.pdf", "B.PDF", "scan.final.Pdf", "a (1).pdf"] {
            let mode = select(&doc(name));
            assert!(
                matches!(mode, PresentationMode::RouteToPdfViewer { .. }),
                "{} should route to the PDF viewer",
                name
            );
        }
    }

    #[test]
    fn test_pdf_route_carries_location() {
        let document = doc("my report.pdf");
        match select(&document) {
            PresentationMode::RouteToPdfViewer { route } => {
                assert_eq!(route.pdf_location(), Some(document.location().to_path_buf()));
            }
            other => panic!("Expected PDF route, got {:?}", other),
        }
    }

    #[test]
    fn test_select_inline_modes() {
        assert_eq!(
            select(&doc("a.png")),
            PresentationMode::InlineFullScreenImage
        );
        assert_eq!(
            select(&doc("a.mkv")),
            PresentationMode::InlineMedia {
                variant: MediaVariant::Video
            }
        );
        assert_eq!(
            select(&doc("a.flac")),
            PresentationMode::InlineMedia {
                variant: MediaVariant::Audio
            }
        );
        assert_eq!(
            select(&doc("notes.md")),
            PresentationMode::InlineText {
                notice: TEXT_NOTICE
            }
        );
    }

    #[test]
    fn test_office_offers_handoff() {
        match select(&doc("budget.xlsx")) {
            PresentationMode::Unsupported(panel) => {
                let mime = panel.handoff.expect("Office files should offer a handoff");
                assert_eq!(
                    mime.essence_str(),
                    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
                );
                assert!(panel.guidance.contains("PDF"));
            }
            other => panic!("Expected unsupported panel, got {:?}", other),
        }
    }

    #[test]
    fn test_archive_and_unknown_have_no_handoff() {
        for name in ["backup.zip", "blob.xyz", "README"] {
            match select(&doc(name)) {
                PresentationMode::Unsupported(panel) => assert!(panel.handoff.is_none()),
                other => panic!("Expected unsupported panel, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_unknown_panel_names_extension() {
        match select(&doc("blob.xyz")) {
            PresentationMode::Unsupported(panel) => assert_eq!(panel.guidance, "Extension: XYZ"),
            other => panic!("Expected unsupported panel, got {:?}", other),
        }
    }

    #[test]
    fn test_mime_type_lookup() {
        assert_eq!(mime_type_for("pdf"), mime::APPLICATION_PDF);
        assert_eq!(mime_type_for("JPG"), mime::IMAGE_JPEG);
        assert_eq!(mime_type_for(".png"), mime::IMAGE_PNG);
        assert_eq!(mime_type_for("mov").essence_str(), "video/quicktime");
        assert_eq!(mime_type_for("doc").essence_str(), "application/msword");
    }

    #[test]
    fn test_mime_type_fallback() {
        assert_eq!(mime_type_for("xyz"), mime::APPLICATION_OCTET_STREAM);
        assert_eq!(mime_type_for(""), mime::APPLICATION_OCTET_STREAM);
    }
}
