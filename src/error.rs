use thiserror::Error;

use crate::command::GrammarError;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from the terminal or filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Start path is not a directory.
    #[error("Invalid argument: {0} is not a directory.")]
    InvalidPath(String),

    /// Logging could not be set up.
    #[error("Logging error: {0}")]
    Logging(String),

    /// The session could not be started or closed.
    #[error("{0}")]
    Session(#[from] SessionError),
}

/// Errors surfaced by the session at its command boundary.
///
/// Every variant is recoverable: the interactive loop shows the message and
/// keeps running. `Display` yields the bare message so it can be shown verbatim.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The command line could not be parsed.
    #[error("{0}")]
    Grammar(#[from] GrammarError),

    /// Missing or invalid index, argument or clipboard.
    #[error("{0}")]
    Validation(String),

    /// Target is not a directory, or there is no parent.
    #[error("{0}")]
    Navigation(String),

    /// A create/copy/delete/read failed, possibly after part of the action ran.
    #[error("{0}")]
    Filesystem(String),

    /// The notes file could not be written.
    #[error("{0}")]
    Persistence(String),
}

impl SessionError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn navigation(msg: impl Into<String>) -> Self {
        Self::Navigation(msg.into())
    }

    pub fn filesystem(msg: impl Into<String>) -> Self {
        Self::Filesystem(msg.into())
    }
}

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        Self::Filesystem(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn terminal_error_display() {
        let err = AppError::Terminal("failed to enter raw mode".into());
        assert_eq!(err.to_string(), "Terminal error: failed to enter raw mode");
    }

    #[test]
    fn invalid_path_error_display() {
        let err = AppError::InvalidPath("/nonexistent".into());
        assert_eq!(
            err.to_string(),
            "Invalid argument: /nonexistent is not a directory."
        );
    }

    #[test]
    fn session_errors_display_bare_message() {
        assert_eq!(
            SessionError::validation("Invalid NER.").to_string(),
            "Invalid NER."
        );
        assert_eq!(
            SessionError::navigation("Already at the root.").to_string(),
            "Already at the root."
        );
    }

    #[test]
    fn io_error_becomes_filesystem_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SessionError = io_err.into();
        assert!(matches!(err, SessionError::Filesystem(_)));
        assert_eq!(err.to_string(), "denied");
    }

    #[test]
    fn session_error_wraps_into_app_error() {
        let err: AppError = SessionError::Persistence("disk full".into()).into();
        assert_eq!(err.to_string(), "disk full");
    }
}
