use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::SessionError;
use crate::fs::notes::NoteStore;
use crate::fs::operations;

/// One entry of a listing snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
}

/// One directory: its location, a positional listing snapshot, and its notes.
///
/// NERs index into the snapshot taken by the last `refresh`. The snapshot is
/// replaced as a whole, never edited in place.
#[derive(Debug)]
pub struct DirectoryView {
    path: PathBuf,
    entries: Vec<Entry>,
    notes: NoteStore,
    notes_file: String,
}

impl DirectoryView {
    /// Open the directory at `path` and load its notes.
    pub fn open(path: &Path, notes_file: &str) -> Result<Self, SessionError> {
        if !path.is_dir() {
            return Err(SessionError::navigation(format!(
                "No such directory: {}",
                path.display()
            )));
        }
        let path = normalize(path)?;
        let entries = list_entries(&path)?;
        let notes = NoteStore::load(&path.join(notes_file));

        tracing::debug!(path = %path.display(), entries = entries.len(), notes = notes.len(), "opened directory");

        Ok(Self {
            path,
            entries,
            notes,
            notes_file: notes_file.to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn notes(&self) -> &NoteStore {
        &self.notes
    }

    /// Take a new listing snapshot.
    pub fn refresh(&mut self) -> Result<(), SessionError> {
        self.entries = list_entries(&self.path)?;
        Ok(())
    }

    /// Whether `index` addresses an entry of the current snapshot.
    pub fn check_index(&self, index: usize) -> bool {
        index < self.entries.len()
    }

    /// Name of the entry at `index`.
    pub fn filename(&self, index: Option<usize>) -> Result<&str, SessionError> {
        let index = index.ok_or_else(|| SessionError::validation("No current NER."))?;
        self.entries
            .get(index)
            .map(|entry| entry.name.as_str())
            .ok_or_else(|| SessionError::validation("Invalid NER."))
    }

    /// Full path of the entry at `index`.
    pub fn entry_path(&self, index: Option<usize>) -> Result<PathBuf, SessionError> {
        Ok(self.path.join(self.filename(index)?))
    }

    pub fn note(&self, index: Option<usize>) -> Result<&str, SessionError> {
        let name = self.filename(index)?;
        Ok(self.notes.get(name))
    }

    pub fn add_note(&mut self, index: Option<usize>, note: &str) -> Result<(), SessionError> {
        let name = self.filename(index)?.to_string();
        self.notes.add(&name, note);
        Ok(())
    }

    pub fn remove_note(&mut self, index: Option<usize>) -> Result<(), SessionError> {
        let name = self.filename(index)?.to_string();
        self.notes.remove(&name);
        Ok(())
    }

    /// Open the subdirectory at `index`.
    pub fn child(&self, index: Option<usize>) -> Result<DirectoryView, SessionError> {
        let target = self.entry_path(index)?;
        DirectoryView::open(&target, &self.notes_file)
    }

    /// Open the parent directory.
    pub fn parent(&self) -> Result<DirectoryView, SessionError> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| SessionError::navigation("Already at the root."))?;
        DirectoryView::open(parent, &self.notes_file)
    }

    /// Write the notes back next to the entries they describe.
    pub fn flush(&self) -> Result<(), SessionError> {
        let path = self.path.join(&self.notes_file);
        self.notes.save(&path).map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "failed to save notes");
            SessionError::Persistence(format!("Could not save the notes: {}", e))
        })?;
        tracing::debug!(path = %path.display(), records = self.notes.len(), "notes saved");
        Ok(())
    }

    /// Copy `source` into this directory under a non-colliding name.
    pub fn paste(&self, source: &Path) -> Result<PathBuf, SessionError> {
        operations::copy_into(source, &self.path).map_err(SessionError::from)
    }

    /// Create the subdirectory `name`.
    pub fn make_directory(&self, name: &str) -> Result<PathBuf, SessionError> {
        let target = self.path.join(name);
        if target.exists() {
            return Err(SessionError::filesystem("Directory already exists"));
        }
        operations::create_dir(&target)?;
        Ok(target)
    }

    /// Paths anywhere below this directory whose name is exactly `name`.
    pub fn find(&self, name: &str, max_depth: usize) -> Vec<PathBuf> {
        operations::find_by_name(&self.path, name, max_depth)
    }
}

/// Absolute form of `path` with `.` and `..` resolved lexically.
fn normalize(path: &Path) -> io::Result<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in std::path::absolute(path)?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

fn list_entries(path: &Path) -> Result<Vec<Entry>, SessionError> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        entries.push(Entry {
            name: entry.file_name().to_string_lossy().to_string(),
            is_dir: entry.path().is_dir(),
        });
    }
    Ok(entries)
}
