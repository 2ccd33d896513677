//! The session: current directory, current NER and clipboard, driven one
//! parsed command at a time.

use std::fs;
use std::io;
use std::mem;
use std::path::{Path, PathBuf};

use crate::command::{Action, Command};
use crate::error::SessionError;
use crate::fs::clipboard::{ClipboardOp, ClipboardState};
use crate::fs::content::{self, ContentKind};
use crate::fs::directory::DirectoryView;
use crate::fs::notes::NOTES_FILE_NAME;
use crate::fs::operations::{self, DEFAULT_FIND_MAX_DEPTH};

/// Hands an image over to something that can display it.
pub type Viewer = fn(&Path) -> io::Result<()>;

/// Removes the source of a cut once it has been pasted.
pub type Remover = fn(&Path) -> io::Result<()>;

/// Tunables the session takes from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub notes_file: String,
    pub find_max_depth: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            notes_file: NOTES_FILE_NAME.to_string(),
            find_max_depth: DEFAULT_FIND_MAX_DEPTH,
        }
    }
}

/// What a successfully applied command produced for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Nothing,
    /// Short confirmation for the status line.
    Done(String),
    /// Text body for the info panel.
    Text(String),
    /// Result of `find`.
    Found { name: String, paths: Vec<PathBuf> },
    /// An image was handed to the external viewer.
    Opened(PathBuf),
    /// The user asked to quit; notes are already saved.
    Exit,
}

pub struct Session {
    directory: DirectoryView,
    current_index: Option<usize>,
    clipboard: ClipboardState,
    options: SessionOptions,
    viewer: Viewer,
    remover: Remover,
}

impl Session {
    /// Start a session in the directory at `path`.
    pub fn open(path: &Path, options: SessionOptions) -> Result<Self, SessionError> {
        let directory = DirectoryView::open(path, &options.notes_file)?;
        tracing::info!(path = %directory.path().display(), "session started");
        Ok(Self {
            directory,
            current_index: None,
            clipboard: ClipboardState::new(),
            options,
            viewer: content::open_in_viewer,
            remover: operations::delete,
        })
    }

    /// Replace the image viewer.
    #[cfg(test)]
    pub fn with_viewer(mut self, viewer: Viewer) -> Self {
        self.viewer = viewer;
        self
    }

    #[cfg(test)]
    pub fn with_remover(mut self, remover: Remover) -> Self {
        self.remover = remover;
        self
    }

    pub fn directory(&self) -> &DirectoryView {
        &self.directory
    }

    pub fn path(&self) -> &Path {
        self.directory.path()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn clipboard(&self) -> &ClipboardState {
        &self.clipboard
    }

    /// Apply one parsed command.
    ///
    /// Preconditions are checked before anything is mutated. Once a
    /// filesystem step has run, a later failure leaves that step in place.
    pub fn apply(&mut self, command: &Command) -> Result<Outcome, SessionError> {
        tracing::debug!(
            action = %command.action,
            index = ?command.index,
            with_index = command.dispatches_with_index(),
            argument = ?command.argument,
            "applying command"
        );

        self.refresh();
        if let Some(index) = command.index {
            self.set_index(index)?;
        }

        let outcome = self.dispatch(command);
        self.refresh();

        if let Err(ref e) = outcome {
            tracing::warn!(action = %command.action, error = %e, "command failed");
        }
        outcome
    }

    /// Take a new listing snapshot and drop a current NER that no longer fits.
    pub fn refresh(&mut self) {
        if let Err(e) = self.directory.refresh() {
            tracing::warn!(path = %self.path().display(), error = %e, "could not refresh listing");
        }
        if let Some(index) = self.current_index {
            if index >= self.directory.len() {
                tracing::debug!(index, "current NER no longer valid");
                self.current_index = None;
            }
        }
    }

    /// Save the notes of the current directory.
    pub fn close(&self) -> Result<(), SessionError> {
        self.directory.flush()
    }

    /// Text for the info panel when no command output is shown.
    pub fn current_note_text(&self) -> String {
        match (self.current_index, self.directory.note(self.current_index)) {
            (Some(index), Ok(note)) => format!("Notes of the current NER {}:\n{}", index, note),
            (_, Err(e)) => e.to_string(),
            (None, Ok(_)) => String::new(),
        }
    }

    fn set_index(&mut self, index: usize) -> Result<(), SessionError> {
        if !self.directory.check_index(index) {
            return Err(SessionError::validation("Invalid NER."));
        }
        self.current_index = Some(index);
        Ok(())
    }

    fn dispatch(&mut self, command: &Command) -> Result<Outcome, SessionError> {
        let argument = command.argument.as_deref();
        match command.action {
            Action::SetIndex | Action::NoOp => Ok(Outcome::Nothing),
            Action::AddNote => self.add_note(argument),
            Action::RemoveNote => self.remove_note(),
            Action::Cut => self.stage(ClipboardOp::Cut),
            Action::Copy => self.stage(ClipboardOp::Copy),
            Action::Paste => self.paste(),
            Action::Find => self.find(argument),
            Action::MakeDirectory => self.make_directory(argument),
            Action::NavigateInto => {
                let next = self.directory.child(self.current_index)?;
                self.enter(next)
            }
            Action::NavigateParent => {
                let next = self.directory.parent()?;
                self.enter(next)
            }
            Action::Visualize => self.visualize(),
            Action::Help => Ok(Outcome::Text(self.help_text())),
            Action::Exit => {
                self.directory.flush()?;
                tracing::info!("session closed");
                Ok(Outcome::Exit)
            }
        }
    }

    fn add_note(&mut self, note: Option<&str>) -> Result<Outcome, SessionError> {
        let note = note.ok_or_else(|| SessionError::validation("No note given."))?;
        self.directory.add_note(self.current_index, note)?;
        Ok(Outcome::Done("Note added.".into()))
    }

    fn remove_note(&mut self) -> Result<Outcome, SessionError> {
        self.directory.remove_note(self.current_index)?;
        Ok(Outcome::Done("Notes removed.".into()))
    }

    fn stage(&mut self, op: ClipboardOp) -> Result<Outcome, SessionError> {
        let source = self.directory.entry_path(self.current_index)?;
        tracing::info!(source = %source.display(), ?op, "staged for paste");
        self.clipboard.set(source, op);
        let summary = self.clipboard.summary().unwrap_or_default();
        Ok(Outcome::Done(format!("Clipboard: {}", summary)))
    }

    fn paste(&mut self) -> Result<Outcome, SessionError> {
        let staged = self
            .clipboard
            .staged()
            .cloned()
            .ok_or_else(|| SessionError::validation("Nothing to paste."))?;
        let is_cut = self.clipboard.is_cut();

        let dest = self.directory.paste(&staged.source)?;
        let dest_name = dest
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if is_cut {
            // The copy stays even if the source cannot be removed.
            (self.remover)(&staged.source).map_err(|e| {
                SessionError::filesystem(format!(
                    "Pasted {} but could not remove {}: {}",
                    dest_name,
                    staged.source.display(),
                    e
                ))
            })?;
            self.clipboard.clear();
            return Ok(Outcome::Done(format!("Moved to {}", dest_name)));
        }
        Ok(Outcome::Done(format!("Pasted {}", dest_name)))
    }

    fn find(&self, name: Option<&str>) -> Result<Outcome, SessionError> {
        let name = name.ok_or_else(|| SessionError::validation("No filename to search."))?;
        let paths = self.directory.find(name, self.options.find_max_depth);
        tracing::info!(name, matches = paths.len(), "find");
        Ok(Outcome::Found {
            name: name.to_string(),
            paths,
        })
    }

    fn make_directory(&self, name: Option<&str>) -> Result<Outcome, SessionError> {
        let name = name.ok_or_else(|| SessionError::validation("No directory name given."))?;
        self.directory.make_directory(name)?;
        Ok(Outcome::Done(format!("Created {}", name)))
    }

    /// Swap in `next`, then save the notes of the directory being left.
    ///
    /// A save failure is reported but the move has already happened.
    fn enter(&mut self, next: DirectoryView) -> Result<Outcome, SessionError> {
        let previous = mem::replace(&mut self.directory, next);
        self.current_index = None;
        tracing::info!(
            from = %previous.path().display(),
            to = %self.directory.path().display(),
            "changed directory"
        );
        previous.flush()?;
        Ok(Outcome::Nothing)
    }

    fn visualize(&self) -> Result<Outcome, SessionError> {
        let path = self.directory.entry_path(self.current_index)?;
        let index = self.current_index.unwrap_or_default();

        match content::content_type(&path) {
            ContentKind::Text => {
                let bytes = fs::read(&path)?;
                Ok(Outcome::Text(format!(
                    "Content of the file {}:\n{}",
                    index,
                    String::from_utf8_lossy(&bytes)
                )))
            }
            ContentKind::Image => {
                (self.viewer)(&path)?;
                Ok(Outcome::Opened(path))
            }
            ContentKind::Other | ContentKind::Unknown => {
                let size = fs::metadata(&path)?.len();
                Ok(Outcome::Text(format!(
                    "{} is not a text file but here is its size: {} bytes",
                    index, size
                )))
            }
        }
    }

    fn help_text(&self) -> String {
        let mut help = String::new();

        match self.current_index {
            Some(index) => {
                let is_dir = self
                    .directory
                    .entries()
                    .get(index)
                    .is_some_and(|entry| entry.is_dir);
                let name = self.directory.filename(Some(index)).unwrap_or_default();
                help.push_str(&format!("Current NER: {}\n", index));
                if is_dir {
                    help.push_str(&format!("{} is a directory.\n\n", name));
                } else {
                    help.push_str(&format!("{} is a file.\n\n", name));
                }
                help.push_str(
                    "Commands with the current NER:\n\
                     \x20* help       give help for the given NER\n\
                     \x20* <new NER>  change the current NER (needs to point to an existing element)\n\
                     \x20* + <note>   add a given note to the NER\n\
                     \x20* -          remove all notes of the NER\n\
                     \x20* cut        copy file to clipboard and delete it when pasted\n\
                     \x20* copy       copy file to clipboard\n",
                );
                if is_dir {
                    help.push_str(
                        " * visu       show its size\n\
                         \x20* .          go to the given NER (needs to be a directory)\n",
                    );
                } else {
                    help.push_str(
                        " * visu       show content of the file if it is a text else show its size\n",
                    );
                }
            }
            None => {
                help.push_str(
                    "No current NER.\n\n\
                     Commands needing NER:\n\
                     \x20* <NER>           set the current NER (needs to point to an existing element)\n\
                     \x20* <NER> + <note>  add a given note to the given NER\n\
                     \x20* <NER> -         remove all notes of the given NER\n\
                     \x20* <NER> cut       copy file to clipboard and delete it when pasted\n\
                     \x20* <NER> copy      copy file to clipboard\n\
                     \x20* <NER> visu      show content of the file if it is a text else show its size\n\
                     \x20* <NER> .         go to the given NER (needs to be a directory)\n\
                     \x20* <NER> help      give help for the given NER\n",
                );
            }
        }

        help.push_str(
            "\nOther commands without NER:\n\
             \x20* ..                      go to the parent directory of the current one\n\
             \x20* mkdir <directory name>  create a new directory with the given name\n\
             \x20* find <name to search>   find the given name from this directory recursively\n\
             \x20* paste                   paste the copied file in the current directory\n\
             \x20* help                    gives general help\n\
             \x20* exit                    quit the program\n\n\
             Press <Tab> to change the focus to the next window\n\
             and navigate the text with the arrows.",
        );
        help
    }
}
