use std::path::PathBuf;

/// The type of clipboard operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardOp {
    Copy,
    Cut,
}

/// Entry staged for the next paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staged {
    pub source: PathBuf,
    pub operation: ClipboardOp,
}

/// Internal clipboard holding at most one staged path.
#[derive(Debug, Clone, Default)]
pub struct ClipboardState {
    staged: Option<Staged>,
}

impl ClipboardState {
    /// Create a new empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage `source`, replacing whatever was staged before.
    pub fn set(&mut self, source: PathBuf, op: ClipboardOp) {
        self.staged = Some(Staged {
            source,
            operation: op,
        });
    }

    /// Clear the clipboard.
    pub fn clear(&mut self) {
        self.staged = None;
    }

    pub fn staged(&self) -> Option<&Staged> {
        self.staged.as_ref()
    }

    pub fn is_cut(&self) -> bool {
        matches!(
            self.staged,
            Some(Staged {
                operation: ClipboardOp::Cut,
                ..
            })
        )
    }

    /// Short description for the status bar, e.g. `cut: report.txt`.
    pub fn summary(&self) -> Option<String> {
        self.staged.as_ref().map(|s| {
            let verb = match s.operation {
                ClipboardOp::Copy => "copy",
                ClipboardOp::Cut => "cut",
            };
            let name = s
                .source
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| s.source.display().to_string());
            format!("{}: {}", verb, name)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clipboard_is_empty() {
        let cb = ClipboardState::new();
        assert!(cb.staged().is_none());
        assert!(!cb.is_cut());
        assert!(cb.summary().is_none());
    }

    #[test]
    fn set_copy_operation() {
        let mut cb = ClipboardState::new();
        cb.set(PathBuf::from("/tmp/a.txt"), ClipboardOp::Copy);
        assert!(!cb.is_cut());
        assert_eq!(cb.staged().unwrap().source, PathBuf::from("/tmp/a.txt"));
        assert_eq!(cb.summary().as_deref(), Some("copy: a.txt"));
    }

    #[test]
    fn set_cut_operation() {
        let mut cb = ClipboardState::new();
        cb.set(PathBuf::from("/tmp/file.rs"), ClipboardOp::Cut);
        assert!(cb.is_cut());
        assert_eq!(cb.staged().unwrap().operation, ClipboardOp::Cut);
    }

    #[test]
    fn clear_resets_clipboard() {
        let mut cb = ClipboardState::new();
        cb.set(PathBuf::from("/tmp/a.txt"), ClipboardOp::Copy);
        cb.clear();
        assert!(cb.staged().is_none());
    }

    #[test]
    fn set_overwrites_previous() {
        let mut cb = ClipboardState::new();
        cb.set(PathBuf::from("/tmp/old.txt"), ClipboardOp::Copy);
        cb.set(PathBuf::from("/tmp/new.txt"), ClipboardOp::Cut);
        assert!(cb.is_cut());
        assert_eq!(cb.staged().unwrap().source, PathBuf::from("/tmp/new.txt"));
    }
}
