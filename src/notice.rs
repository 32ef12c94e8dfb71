//! User-facing notices.
//!
//! A [`Notice`] is the one-line feedback shown after an action, such as
//! "Song added to playlist" or an error message.

use std::fmt;

use serde::Serialize;

use crate::error::{GSpotifyError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Error => "error",
            NoticeLevel::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success<S: Into<String>>(message: S) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error<S: Into<String>>(message: S) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn info<S: Into<String>>(message: S) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Error notice with the user-facing text of `err`.
    pub fn from_error(err: &GSpotifyError) -> Self {
        Self::error(err.user_message())
    }

    /// Success notice with `message`, or the error notice of a failure.
    pub fn from_result<T>(result: &Result<T>, message: &str) -> Self {
        match result {
            Ok(_) => Self::success(message),
            Err(e) => Self::from_error(e),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            NoticeLevel::Success => "✓",
            NoticeLevel::Error => "✗",
            NoticeLevel::Info => "ℹ",
        };
        write!(f, "{} {}", tag, self.message)
    }
}

impl From<&GSpotifyError> for Notice {
    fn from(err: &GSpotifyError) -> Self {
        Self::from_error(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_error() {
        let notice = Notice::from_error(&GSpotifyError::Unauthorized("expired".into()));
        assert!(notice.is_error());
        assert_eq!(notice.message, "Session expired. Please login again.");

        let notice = Notice::from(&GSpotifyError::Api {
            status: 400,
            detail: "Song already in playlist".into(),
        });
        assert_eq!(notice.message, "Song already in playlist");
    }

    #[test]
    fn test_from_result() {
        let ok: Result<()> = Ok(());
        assert_eq!(
            Notice::from_result(&ok, "Playlist created"),
            Notice::success("Playlist created")
        );

        let err: Result<()> = Err(GSpotifyError::RateLimited);
        let notice = Notice::from_result(&err, "Playlist created");
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Too many requests. Please try again later.");
    }

    #[test]
    fn test_display() {
        assert_eq!(Notice::success("Liked").to_string(), "✓ Liked");
        assert_eq!(Notice::info("Queue is empty").to_string(), "ℹ Queue is empty");
    }
}
