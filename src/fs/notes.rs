//! Per-directory notes attached to entry names.
//!
//! On disk a notes file is a flat run of records, each one
//! `name US note RS` with `US = 0x1F` and `RS = 0x1E`, no other separators.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

/// Default name of the notes file stored inside each directory.
pub const NOTES_FILE_NAME: &str = "notes";

/// Ends a filename field.
pub const FIELD_SEPARATOR: u8 = 0x1F;
/// Ends a note, and with it a record.
pub const RECORD_SEPARATOR: u8 = 0x1E;

/// Notes of a single directory, keyed by entry name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteStore {
    notes: BTreeMap<String, String>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the notes file at `path`. A missing or unreadable file gives an
    /// empty store.
    pub fn load(path: &Path) -> Self {
        match fs::read(path) {
            Ok(bytes) => Self::decode(&bytes),
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %e, "unreadable notes file");
                }
                Self::new()
            }
        }
    }

    /// Decode the flat record format.
    ///
    /// Bytes seen before a field separator belong to the filename; bytes
    /// between it and the record separator are the note. A record separator
    /// with no filename pending drops whatever was buffered.
    pub fn decode(bytes: &[u8]) -> Self {
        let mut notes = BTreeMap::new();
        let mut buffer: Vec<u8> = Vec::new();
        let mut filename: Option<String> = None;

        for &byte in bytes {
            match byte {
                FIELD_SEPARATOR => {
                    filename = Some(String::from_utf8_lossy(&buffer).into_owned());
                    buffer.clear();
                }
                RECORD_SEPARATOR => {
                    if let Some(name) = filename.take() {
                        notes.insert(name, String::from_utf8_lossy(&buffer).into_owned());
                    }
                    buffer.clear();
                }
                _ => buffer.push(byte),
            }
        }

        Self { notes }
    }

    /// Encode every record, in key order.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (name, note) in &self.notes {
            out.extend_from_slice(name.as_bytes());
            out.push(FIELD_SEPARATOR);
            out.extend_from_slice(note.as_bytes());
            out.push(RECORD_SEPARATOR);
        }
        out
    }

    /// Write the store to `path`. An empty store removes the file instead.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if self.notes.is_empty() {
            return match fs::remove_file(path) {
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                other => other,
            };
        }
        fs::write(path, self.encode())
    }

    /// Note of `filename`, empty when there is none.
    pub fn get(&self, filename: &str) -> &str {
        self.notes.get(filename).map(String::as_str).unwrap_or("")
    }

    /// Append `note` to the note of `filename`, on a new line if one exists.
    pub fn add(&mut self, filename: &str, note: &str) {
        self.notes
            .entry(filename.to_string())
            .and_modify(|existing| {
                existing.push('\n');
                existing.push_str(note);
            })
            .or_insert_with(|| note.to_string());
    }

    /// Drop every note of `filename`. Unknown names are ignored.
    pub fn remove(&mut self, filename: &str) {
        self.notes.remove(filename);
    }

    pub fn has_note(&self, filename: &str) -> bool {
        self.notes.contains_key(filename)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_empty_store() {
        let tmp = TempDir::new().unwrap();
        let store = NoteStore::load(&tmp.path().join(NOTES_FILE_NAME));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn add_appends_on_new_line() {
        let mut store = NoteStore::new();
        store.add("filename", "a note");
        assert_eq!(store.get("filename"), "a note");
        store.add("filename", "another note");
        assert_eq!(store.get("filename"), "a note\nanother note");
    }

    #[test]
    fn remove_clears_and_tolerates_unknown() {
        let mut store = NoteStore::new();
        store.add("filename", "a note");
        store.remove("filename");
        assert_eq!(store.get("filename"), "");
        assert!(!store.has_note("filename"));
        store.remove("filename");
    }

    #[test]
    fn save_then_load_restores_records() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(NOTES_FILE_NAME);

        let mut store = NoteStore::new();
        store.add("report.txt", "draft");
        store.add("report.txt", "send monday");
        store.add("my photos", "holidays 2023");
        store.save(&path).unwrap();

        let loaded = NoteStore::load(&path);
        assert_eq!(loaded, store);
        assert_eq!(loaded.get("report.txt"), "draft\nsend monday");
        assert_eq!(loaded.get("my photos"), "holidays 2023");
    }

    #[test]
    fn saving_empty_store_removes_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(NOTES_FILE_NAME);

        let mut store = NoteStore::new();
        store.add("a", "b");
        store.save(&path).unwrap();
        assert!(path.exists());

        store.remove("a");
        store.save(&path).unwrap();
        assert!(!path.exists());

        // nothing to remove is not an error
        store.save(&path).unwrap();
    }

    #[test]
    fn encode_layout() {
        let mut store = NoteStore::new();
        store.add("f", "n");
        assert_eq!(store.encode(), b"f\x1Fn\x1E".to_vec());
    }

    #[test]
    fn decode_multiple_records() {
        let store = NoteStore::decode(b"a\x1Fone\x1Eb\x1Ftwo\nlines\x1E");
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a"), "one");
        assert_eq!(store.get("b"), "two\nlines");
    }

    #[test]
    fn decode_drops_unattributed_bytes() {
        let store = NoteStore::decode(b"junk\x1Ea\x1Fone\x1Etrailing");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a"), "one");
    }

    #[test]
    fn save_fails_when_directory_missing() {
        let tmp = TempDir::new().unwrap();
        let mut store = NoteStore::new();
        store.add("a", "b");
        let path = tmp.path().join("missing").join(NOTES_FILE_NAME);
        assert!(store.save(&path).is_err());
    }
}
