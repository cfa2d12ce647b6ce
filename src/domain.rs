//! Documents, their classification and the catalogue that holds them

pub mod dispatcher;
pub mod naming;
pub mod navigation;
pub mod repository;

use std::path::{Path, PathBuf};

/// Office document families that share the same presentation but carry
/// different labels and MIME types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfficeFormat {
    Word,
    Spreadsheet,
    Presentation,
}

/// Classification bucket derived from a file name extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Video,
    Audio,
    Pdf,
    Text,
    OfficeDocument(OfficeFormat),
    Archive,
    /// Anything unrecognised; `label` is the uppercase extension, or `FILE`
    /// when the name has none
    Unknown { label: String },
}

impl FileKind {
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" | "png" | "webp" | "gif" | "bmp" => FileKind::Image,

            "mp4" | "mov" | "avi" | "mkv" | "webm" => FileKind::Video,

            "mp3" | "wav" | "aac" | "flac" | "ogg" => FileKind::Audio,

            "pdf" => FileKind::Pdf,

            "txt" | "md" | "rtf" => FileKind::Text,

            "doc" | "docx" => FileKind::OfficeDocument(OfficeFormat::Word),
            "xls" | "xlsx" => FileKind::OfficeDocument(OfficeFormat::Spreadsheet),
            "ppt" | "pptx" => FileKind::OfficeDocument(OfficeFormat::Presentation),

            "zip" | "rar" | "7z" => FileKind::Archive,

            "" => FileKind::Unknown {
                label: "FILE".to_string(),
            },
            other => FileKind::Unknown {
                label: other.to_uppercase(),
            },
        }
    }

    pub fn from_name(name: &str) -> Self {
        Self::from_extension(extension_of(name).unwrap_or(""))
    }

    /// Short user-facing label shown next to a document in the catalogue
    pub fn label(&self) -> &str {
        match self {
            FileKind::Image => "Image",
            FileKind::Video => "Video",
            FileKind::Audio => "Audio",
            FileKind::Pdf => "PDF",
            FileKind::Text => "Text",
            FileKind::OfficeDocument(OfficeFormat::Word) => "Word",
            FileKind::OfficeDocument(OfficeFormat::Spreadsheet) => "Spreadsheet",
            FileKind::OfficeDocument(OfficeFormat::Presentation) => "Presentation",
            FileKind::Archive => "Archive",
            FileKind::Unknown { label } => label,
        }
    }

    /// List glyph standing in for a thumbnail
    pub fn glyph(&self) -> &'static str {
        match self {
            FileKind::Image => "🖼",
            FileKind::Video => "🎬",
            FileKind::Audio => "🎵",
            FileKind::Pdf | FileKind::Text => "📄",
            FileKind::OfficeDocument(OfficeFormat::Word) => "📝",
            FileKind::OfficeDocument(OfficeFormat::Spreadsheet) => "📊",
            FileKind::OfficeDocument(OfficeFormat::Presentation) => "📽",
            FileKind::Archive => "📦",
            FileKind::Unknown { .. } => "📁",
        }
    }
}

/// Returns the text after the last `.` of `name`, if there is any
pub(crate) fn extension_of(name: &str) -> Option<&str> {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext),
        _ => None,
    }
}

/// A file held in the managed directory.
///
/// Only the repository creates documents, so `location` always points inside
/// the directory it manages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    location: PathBuf,
}

impl Document {
    pub(crate) fn new(name: impl Into<String>, location: PathBuf) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Lowercased extension, recomputed from the name on every call
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.name).map(str::to_lowercase)
    }

    pub fn kind(&self) -> FileKind {
        FileKind::from_name(&self.name)
    }
}

/// Ordered documents mirroring the managed directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    documents: Vec<Document>,
}

impl Catalogue {
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.name == name)
    }

    pub fn at(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    pub fn contains(&self, document: &Document) -> bool {
        self.position(document).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.documents.iter().map(|d| d.name.as_str()).collect()
    }

    /// Documents are identified by location
    fn position(&self, document: &Document) -> Option<usize> {
        self.documents
            .iter()
            .position(|d| d.location == document.location)
    }

    pub(crate) fn push(&mut self, document: Document) {
        self.documents.push(document);
    }

    pub(crate) fn remove(&mut self, document: &Document) -> Option<Document> {
        self.position(document).map(|i| self.documents.remove(i))
    }

    pub(crate) fn replace(&mut self, documents: Vec<Document>) {
        self.documents = documents;
    }

    pub(crate) fn clear(&mut self) {
        self.documents.clear();
    }
}

impl<'a> IntoIterator for &'a Catalogue {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
