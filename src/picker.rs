//! File-picker collaborators that choose a source file to import

use std::path::PathBuf;

/// A file chosen by the user, not yet copied anywhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub location: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Picked(PickedFile),
    Cancelled,
}

pub trait FilePicker {
    fn pick(&mut self) -> PickOutcome;
}

/// Picks a path that was already supplied, either on the command line or
/// typed into the import prompt
#[derive(Debug, Clone, Default)]
pub struct PathPicker {
    location: Option<PathBuf>,
    name: Option<String>,
}

impl PathPicker {
    pub fn new(location: PathBuf) -> Self {
        Self {
            location: Some(location),
            name: None,
        }
    }

    /// Overrides the suggested name, which otherwise comes from the path
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Interprets raw prompt input. Blank input counts as a cancellation.
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        // Terminals often paste dropped files wrapped in quotes
        let unquoted = trimmed
            .strip_prefix('\'')
            .and_then(|s| s.strip_suffix('\''))
            .or_else(|| trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
            .unwrap_or(trimmed);

        if unquoted.is_empty() {
            return Self::default();
        }

        Self::new(expand_home(unquoted))
    }
}

impl FilePicker for PathPicker {
    fn pick(&mut self) -> PickOutcome {
        let Some(location) = self.location.take() else {
            return PickOutcome::Cancelled;
        };

        let name = self.name.take().unwrap_or_else(|| {
            location
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

        PickOutcome::Picked(PickedFile { name, location })
    }
}

fn expand_home(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_uses_file_name() {
        let mut picker = PathPicker::new(PathBuf::from("/downloads/scan.pdf"));
        assert_eq!(
            picker.pick(),
            PickOutcome::Picked(PickedFile {
                name: "scan.pdf".to_string(),
                location: PathBuf::from("/downloads/scan.pdf"),
            })
        );
    }

    #[test]
    fn test_pick_name_override() {
        let mut picker = PathPicker::new(PathBuf::from("/tmp/upload-123")).with_name("invoice.pdf");
        match picker.pick() {
            PickOutcome::Picked(file) => assert_eq!(file.name, "invoice.pdf"),
            PickOutcome::Cancelled => panic!("Expected a picked file"),
        }
    }

    #[test]
    fn test_pick_only_once() {
        let mut picker = PathPicker::new(PathBuf::from("/tmp/a.txt"));
        assert!(matches!(picker.pick(), PickOutcome::Picked(_)));
        assert_eq!(picker.pick(), PickOutcome::Cancelled);
    }

    #[test]
    fn test_blank_input_cancels() {
        assert_eq!(PathPicker::from_input("   ").pick(), PickOutcome::Cancelled);
        assert_eq!(PathPicker::from_input("''").pick(), PickOutcome::Cancelled);
    }

    #[test]
    fn test_quoted_input() {
        match PathPicker::from_input("'/tmp/my file.txt'").pick() {
            PickOutcome::Picked(file) => {
                assert_eq!(file.location, PathBuf::from("/tmp/my file.txt"));
                assert_eq!(file.name, "my file.txt");
            }
            PickOutcome::Cancelled => panic!("Expected a picked file"),
        }
    }
}
