//! Error types for the GSpotify client.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::validation::ValidationErrors;

/// Main error type for all GSpotify operations.
#[derive(Debug, Error)]
pub enum GSpotifyError {
    /// The access token is missing, invalid or expired (HTTP 401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The authenticated user lacks the rights for this call (HTTP 403).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource was not found (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Too many requests (HTTP 429).
    #[error("Rate limited: too many requests")]
    RateLimited,

    /// Server-side failure (HTTP 5xx).
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Any other non-success response.
    #[error("API error ({status}): {detail}")]
    Api { status: u16, detail: String },

    /// No session is stored; the user has to log in first.
    #[error("Not authenticated: please login first")]
    NotAuthenticated,

    /// The session's role does not open the requested page or operation.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Client-side form validation failed.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Invalid API base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A playback operation needed a non-empty queue.
    #[error("Queue is empty")]
    EmptyQueue,

    /// HTTP request failed.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl GSpotifyError {
    /// Build an error from a non-success HTTP status and its response body.
    ///
    /// The backend reports failures as `{"detail": "..."}`; validation
    /// failures carry a list of `{"msg": "..."}` objects instead.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let detail = extract_detail(body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

        match status.as_u16() {
            401 => GSpotifyError::Unauthorized(detail),
            403 => GSpotifyError::Forbidden(detail),
            404 => GSpotifyError::NotFound(detail),
            429 => GSpotifyError::RateLimited,
            code if code >= 500 => GSpotifyError::Server {
                status: code,
                message: detail,
            },
            code => GSpotifyError::Api {
                status: code,
                detail,
            },
        }
    }

    /// HTTP status carried by this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            GSpotifyError::Unauthorized(_) => Some(401),
            GSpotifyError::Forbidden(_) => Some(403),
            GSpotifyError::NotFound(_) => Some(404),
            GSpotifyError::RateLimited => Some(429),
            GSpotifyError::Server { status, .. } | GSpotifyError::Api { status, .. } => {
                Some(*status)
            }
            GSpotifyError::RequestError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the session must be dropped and the user sent back to login.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            GSpotifyError::Unauthorized(_) | GSpotifyError::NotAuthenticated
        )
    }

    /// Message shown to the user for this error.
    pub fn user_message(&self) -> String {
        match self {
            GSpotifyError::Unauthorized(_) => "Session expired. Please login again.".to_string(),
            GSpotifyError::Forbidden(_) => {
                "You do not have permission to perform this action.".to_string()
            }
            GSpotifyError::NotFound(_) => "Resource not found.".to_string(),
            GSpotifyError::RateLimited => "Too many requests. Please try again later.".to_string(),
            GSpotifyError::Server { .. } => "Server error. Please try again later.".to_string(),
            GSpotifyError::Api { detail, .. } => detail.clone(),
            GSpotifyError::NotAuthenticated => "Please login to continue.".to_string(),
            GSpotifyError::PermissionDenied(msg) => msg.clone(),
            GSpotifyError::Validation(errors) => errors.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ValidationErrors> for GSpotifyError {
    fn from(errors: ValidationErrors) -> Self {
        GSpotifyError::Validation(errors)
    }
}

/// Pull the `detail` field out of an error body.
fn extract_detail(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    match json.get("detail")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        other => Some(other.to_string()),
    }
}

/// Result type alias for GSpotify operations.
pub type Result<T> = std::result::Result<T, GSpotifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = GSpotifyError::from_status(StatusCode::UNAUTHORIZED, "");
        assert!(matches!(err, GSpotifyError::Unauthorized(_)));
        assert!(err.requires_login());

        let err = GSpotifyError::from_status(StatusCode::TOO_MANY_REQUESTS, "");
        assert!(matches!(err, GSpotifyError::RateLimited));

        let err = GSpotifyError::from_status(StatusCode::BAD_GATEWAY, "");
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.user_message(), "Server error. Please try again later.");
    }

    #[test]
    fn test_detail_string_extracted() {
        let err = GSpotifyError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"detail": "Username already registered"}"#,
        );
        match err {
            GSpotifyError::Api { status, detail } => {
                assert_eq!(status, 400);
                assert_eq!(detail, "Username already registered");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_detail_list_joined() {
        let body = r#"{"detail": [{"msg": "field required"}, {"msg": "value too short"}]}"#;
        let err = GSpotifyError::from_status(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert_eq!(err.user_message(), "field required; value too short");
    }

    #[test]
    fn test_non_json_body_uses_reason() {
        let err = GSpotifyError::from_status(StatusCode::CONFLICT, "<html>oops</html>");
        assert_eq!(err.user_message(), "Conflict");
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            GSpotifyError::Unauthorized(String::new()).user_message(),
            "Session expired. Please login again."
        );
        assert_eq!(
            GSpotifyError::Forbidden(String::new()).user_message(),
            "You do not have permission to perform this action."
        );
        assert_eq!(
            GSpotifyError::NotFound(String::new()).user_message(),
            "Resource not found."
        );
    }
}
