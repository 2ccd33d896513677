use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Suffix inserted to disambiguate a pasted entry from an existing one.
pub const COPY_SUFFIX: &str = "-copy";

/// Default depth bound for recursive searches.
pub const DEFAULT_FIND_MAX_DEPTH: usize = 128;

/// Create a new directory at the given path.
pub fn create_dir(path: &Path) -> io::Result<()> {
    fs::create_dir(path)?;
    tracing::info!(path = %path.display(), "created directory");
    Ok(())
}

/// Delete a file or directory. Directories are removed recursively.
pub fn delete(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    tracing::info!(path = %path.display(), "deleted");
    Ok(())
}

/// Resolve a name collision by inserting `-copy` before the extension
/// (or at the end when there is none), repeating until the name is free.
///
/// A leading dot does not start an extension: `.profile` becomes `.profile-copy`.
pub fn resolve_collision(dest: &Path) -> PathBuf {
    let mut candidate = dest.to_path_buf();
    let parent = dest.parent().unwrap_or(Path::new("."));

    while candidate.exists() {
        let name = candidate
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let new_name = match name.rfind('.') {
            Some(dot) if dot > 0 => format!("{}{}{}", &name[..dot], COPY_SUFFIX, &name[dot..]),
            _ => format!("{}{}", name, COPY_SUFFIX),
        };
        candidate = parent.join(new_name);
    }
    candidate
}

/// Recursively copy a file or directory from `src` into `dest_dir`.
///
/// Returns the final path of the copied item (with collision resolution).
pub fn copy_into(src: &Path, dest_dir: &Path) -> io::Result<PathBuf> {
    let name = src
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no filename"))?;

    if src.is_dir() && is_within(dest_dir, src) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Cannot paste a directory into itself.",
        ));
    }

    let dest = resolve_collision(&dest_dir.join(name));
    if src.is_dir() {
        copy_dir_recursive(src, &dest)?;
    } else {
        fs::copy(src, &dest)?;
    }
    tracing::info!(from = %src.display(), to = %dest.display(), "copied");
    Ok(dest)
}

/// Internal recursive directory copy.
fn copy_dir_recursive(src: &Path, dest: &Path) -> io::Result<()> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());
        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dest_path)?;
        } else {
            fs::copy(&src_path, &dest_path)?;
        }
    }
    Ok(())
}

/// Whether `path` is `ancestor` or lies below it.
fn is_within(path: &Path, ancestor: &Path) -> bool {
    match (path.canonicalize(), ancestor.canonicalize()) {
        (Ok(path), Ok(ancestor)) => path.starts_with(ancestor),
        _ => path.starts_with(ancestor),
    }
}

/// Walk `root` (itself included) down to `max_depth` and collect every path
/// whose last component equals `name`. Unreadable subtrees are skipped.
pub fn find_by_name(root: &Path, name: &str, max_depth: usize) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .max_depth(max_depth)
        .into_iter()
        .flatten()
        .filter(|entry| entry.file_name().to_string_lossy() == name)
        .map(|entry| entry.into_path())
        .collect()
}
