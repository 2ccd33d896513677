//! Content-type sniffing for `visu`, and the hand-off to the system viewer.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use content_inspector::ContentType;

/// Bytes inspected to tell text from binary.
const SNIFF_BYTES: u64 = 8 * 1024;

/// Broad classification of a file's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Text,
    Image,
    Other,
    /// Directories and anything that could not be read.
    Unknown,
}

/// Classify the file at `path` from its leading bytes.
pub fn content_type(path: &Path) -> ContentKind {
    if !path.is_file() {
        return ContentKind::Unknown;
    }
    match infer::get_from_path(path) {
        Ok(Some(kind)) if kind.matcher_type() == infer::MatcherType::Image => {
            return ContentKind::Image
        }
        Ok(Some(kind)) if kind.mime_type().starts_with("text/") => return ContentKind::Text,
        Ok(Some(_)) => return ContentKind::Other,
        Ok(None) => {}
        Err(_) => return ContentKind::Unknown,
    }

    match read_head(path) {
        Ok(head) if is_text_data(&head) => ContentKind::Text,
        Ok(_) => ContentKind::Other,
        Err(_) => ContentKind::Unknown,
    }
}

fn read_head(path: &Path) -> io::Result<Vec<u8>> {
    let mut head = Vec::new();
    File::open(path)?.take(SNIFF_BYTES).read_to_end(&mut head)?;
    Ok(head)
}

fn is_text_data(buffer: &[u8]) -> bool {
    !matches!(content_inspector::inspect(buffer), ContentType::BINARY)
}

/// Open `path` in the desktop's default viewer without waiting for it.
pub fn open_in_viewer(path: &Path) -> io::Result<()> {
    tracing::info!(path = %path.display(), "opening in external viewer");
    open::that_detached(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn plain_text_is_text() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("readme.md");
        fs::write(&path, "# Title\nsome words\n").unwrap();
        assert_eq!(content_type(&path), ContentKind::Text);
    }

    #[test]
    fn empty_file_is_text() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty");
        fs::write(&path, "").unwrap();
        assert_eq!(content_type(&path), ContentKind::Text);
    }

    #[test]
    fn png_signature_is_image() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pixel.png");
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&[0u8; 32]);
        fs::write(&path, bytes).unwrap();
        assert_eq!(content_type(&path), ContentKind::Image);
    }

    #[test]
    fn null_bytes_are_other() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("blob.dat");
        fs::write(&path, [0x01u8, 0x00, 0xFF, 0x00, 0x13, 0x37]).unwrap();
        assert_eq!(content_type(&path), ContentKind::Other);
    }

    #[test]
    fn directories_and_missing_paths_are_unknown() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(content_type(tmp.path()), ContentKind::Unknown);
        assert_eq!(
            content_type(&tmp.path().join("missing")),
            ContentKind::Unknown
        );
    }
}
