//! Non-interactive subcommands. Each returns the lines to print on stdout.

use crate::cli::Command;
use crate::domain::dispatcher::{mime_type_for, select, MediaVariant, PresentationMode};
use crate::domain::repository::DocumentRepository;
use crate::domain::Document;
use crate::error::{Action, Result, VaultError};
use crate::picker::{FilePicker, PathPicker};
use crate::share::ShareService;
use crate::storage::StorageVolume;
use std::path::Path;

/// Collaborators a command may need besides the repository
pub struct CommandContext<'a> {
    pub export_dir: &'a Path,
    pub share: &'a dyn ShareService,
    pub skip_confirm: bool,
}

/// The user-level action a command's failure is reported against
pub fn action_for(command: &Command) -> Action {
    match command {
        Command::Browse | Command::List | Command::Show { .. } => Action::Load,
        Command::Import { .. } => Action::Import,
        Command::Delete { .. } => Action::Delete,
        Command::Export { .. } => Action::Export,
        Command::Share { .. } => Action::Share,
    }
}

/// Runs `command` against an initialized repository.
///
/// `confirm` is asked before a delete unless the context skips confirmation.
pub async fn run<V: StorageVolume>(
    repository: &mut DocumentRepository<V>,
    command: &Command,
    context: &CommandContext<'_>,
    confirm: &mut dyn FnMut(&Document) -> bool,
) -> Result<Vec<String>> {
    match command {
        Command::Browse => Ok(Vec::new()),
        Command::List => Ok(list(repository)),
        Command::Import { path, name } => {
            let mut picker = PathPicker::new(path.clone());
            if let Some(name) = name {
                picker = picker.with_name(name.clone());
            }
            let document = repository.import_picked(picker.pick()).await?;
            Ok(vec![format!("Imported {}", document.name())])
        }
        Command::Delete { name } => {
            let document = lookup(repository, name)?;
            if !context.skip_confirm && !confirm(&document) {
                return Ok(vec!["Delete cancelled".to_string()]);
            }
            repository.delete(&document).await?;
            Ok(vec![format!("Deleted {}", document.name())])
        }
        Command::Export { name, to } => {
            let document = lookup(repository, name)?;
            let destination = to.as_deref().unwrap_or(context.export_dir);
            let saved = repository.export(&document, destination).await?;
            Ok(vec![format!("Saved to {}", saved.display())])
        }
        Command::Share { name } => {
            let document = lookup(repository, name)?;
            repository.share(&document, context.share)?;
            Ok(vec![format!("Shared {}", document.name())])
        }
        Command::Show { name } => {
            let document = lookup(repository, name)?;
            Ok(describe(&document))
        }
    }
}

fn lookup<V: StorageVolume>(repository: &DocumentRepository<V>, name: &str) -> Result<Document> {
    repository
        .get(name)
        .cloned()
        .ok_or_else(|| VaultError::NotFound {
            name: name.to_string(),
        })
}

fn list<V: StorageVolume>(repository: &DocumentRepository<V>) -> Vec<String> {
    let catalogue = repository.list();
    if catalogue.is_empty() {
        return vec!["No documents yet".to_string()];
    }

    let width = catalogue
        .iter()
        .map(|d| d.name().chars().count())
        .max()
        .unwrap_or(0);
    catalogue
        .iter()
        .map(|d| format!("{:<width$}  {}", d.name(), d.kind().label(), width = width))
        .collect()
}

fn describe(document: &Document) -> Vec<String> {
    let presentation = match select(document) {
        PresentationMode::InlineFullScreenImage => "inline image".to_string(),
        PresentationMode::InlineMedia {
            variant: MediaVariant::Video,
        } => "inline video player".to_string(),
        PresentationMode::InlineMedia {
            variant: MediaVariant::Audio,
        } => "inline audio player".to_string(),
        PresentationMode::InlineText { notice } => format!("text notice ({})", notice),
        PresentationMode::RouteToPdfViewer { .. } => "PDF viewer".to_string(),
        PresentationMode::Unsupported(panel) => format!("unsupported ({})", panel.headline),
    };
    let mime = mime_type_for(document.extension().as_deref().unwrap_or(""));

    vec![
        format!("name:         {}", document.name()),
        format!("kind:         {}", document.kind().label()),
        format!("presentation: {}", presentation),
        format!("mime:         {}", mime),
        format!("location:     {}", document.location().display()),
    ]
}
