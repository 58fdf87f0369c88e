//! Error types shared across the workspace.

use std::fmt;

/// Common result type for the application.
pub type Result<T> = std::result::Result<T, SentinelError>;

/// Closed classification of everything that can go wrong while talking to the platform.
///
/// Each kind carries a fixed user-facing message so command replies never leak
/// raw SDK errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The bot lacks the rights for the operation.
    PermissionDenied,
    /// The request never completed (network, gateway, I/O).
    Transport,
    /// The target channel, guild or message does not exist.
    NotFound,
    /// The platform rejected the request or something unexpected happened.
    Unknown,
}

impl ErrorKind {
    /// Message shown to the invoking user.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::PermissionDenied => "I don't have permission to do that in this channel.",
            Self::Transport => "Couldn't reach Discord right now, please try again.",
            Self::NotFound => "That channel or server could not be found.",
            Self::Unknown => "Something went wrong while processing the command.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PermissionDenied => "permission denied",
            Self::Transport => "transport error",
            Self::NotFound => "not found",
            Self::Unknown => "unknown error",
        };
        f.write_str(name)
    }
}

/// An error returned by a platform call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct PlatformError {
    /// Classification used for user replies and fallback decisions.
    pub kind: ErrorKind,
    /// Detail for the logs.
    pub message: String,
}

impl PlatformError {
    /// Creates a new platform error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for [`ErrorKind::PermissionDenied`].
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PermissionDenied, message)
    }

    /// Shorthand for [`ErrorKind::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Shorthand for [`ErrorKind::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Shorthand for [`ErrorKind::Unknown`].
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, message)
    }

    /// Message shown to the invoking user.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        self.kind.user_message()
    }

    /// Notes how many messages a purge had already deleted when it failed.
    ///
    /// The kind is kept so fallback decisions are unaffected.
    #[must_use]
    pub fn after_partial_purge(self, deleted: u64) -> Self {
        if deleted == 0 {
            return self;
        }
        Self {
            kind: self.kind,
            message: format!("{} (after deleting {deleted} messages)", self.message),
        }
    }
}

/// Application-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum SentinelError {
    /// `BOT_TOKEN` is unset or empty.
    #[error("BOT_TOKEN missing. Set BOT_TOKEN in the secrets file or environment.")]
    MissingToken,

    /// An id variable is present but not an unsigned integer.
    #[error("Invalid value for {var}: '{value}' is not a valid id")]
    InvalidId {
        /// Variable name.
        var: String,
        /// Offending value.
        value: String,
    },

    /// A boolean variable could not be parsed.
    #[error("Invalid value for {var}: '{value}' is not a boolean")]
    InvalidFlag {
        /// Variable name.
        var: String,
        /// Offending value.
        value: String,
    },

    /// Other configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_distinct_message() {
        let kinds = [
            ErrorKind::PermissionDenied,
            ErrorKind::Transport,
            ErrorKind::NotFound,
            ErrorKind::Unknown,
        ];
        let mut messages: Vec<_> = kinds.iter().map(|k| k.user_message()).collect();
        messages.sort_unstable();
        messages.dedup();
        assert_eq!(messages.len(), kinds.len());
    }

    #[test]
    fn platform_error_display_includes_kind() {
        let err = PlatformError::permission_denied("Missing Access");
        assert_eq!(err.to_string(), "permission denied: Missing Access");
        assert_eq!(err.user_message(), ErrorKind::PermissionDenied.user_message());
    }

    #[test]
    fn partial_purge_keeps_kind_and_records_count() {
        let err = PlatformError::unknown("rejected").after_partial_purge(37);
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert!(err.message.contains("after deleting 37 messages"));

        let untouched = PlatformError::transport("reset").after_partial_purge(0);
        assert_eq!(untouched.message, "reset");
    }

    #[test]
    fn missing_token_message() {
        assert!(SentinelError::MissingToken.to_string().contains("BOT_TOKEN"));
    }
}
