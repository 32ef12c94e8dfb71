//! Client-side form validation.
//!
//! These checks run before a request is sent, so obviously bad input never
//! reaches the server. The server still validates everything again.

use std::collections::BTreeMap;
use std::fmt;

use crate::models::{LoginData, PlaylistForm, Role, SignupData};

/// Minimum username length.
pub const MIN_USERNAME_LEN: usize = 3;
/// Minimum password length.
pub const MIN_PASSWORD_LEN: usize = 6;
/// Maximum playlist name length.
pub const MAX_PLAYLIST_NAME_LEN: usize = 100;
/// Audio file extensions accepted for upload.
pub const AUDIO_EXTENSIONS: [&str; 5] = ["mp3", "wav", "flac", "aac", "ogg"];
/// Largest accepted upload, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Validation messages keyed by form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field.
    pub fn add<S: Into<String>>(&mut self, field: &'static str, message: S) {
        self.fields.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages for one field.
    pub fn field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn has(&self, field: &str) -> bool {
        !self.field(field).is_empty()
    }

    /// Iterate over `(field, message)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.fields
            .iter()
            .flat_map(|(field, msgs)| msgs.iter().map(move |m| (*field, m.as_str())))
    }

    /// `Ok(())` when empty, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.iter().map(|(_, m)| m).collect();
        f.write_str(&messages.join("; "))
    }
}

// One message per field: the first rule that fails. Checks return whether
// the field passed.

fn check_username(username: &str, errors: &mut ValidationErrors) -> bool {
    if username.is_empty() {
        errors.add("username", "Username is required");
    } else if username.chars().count() < MIN_USERNAME_LEN {
        errors.add("username", "Username must be at least 3 characters");
    } else {
        return true;
    }
    false
}

fn check_password_len(password: &str, errors: &mut ValidationErrors) -> bool {
    if password.is_empty() {
        errors.add("password", "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add("password", "Password must be at least 6 characters");
    } else {
        return true;
    }
    false
}

/// `local@domain.tld` with no whitespace in any part.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// At least one lowercase letter, one uppercase letter and one digit.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

/// Validate the login form.
pub fn validate_login(data: &LoginData) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_username(&data.username, &mut errors);
    check_password_len(&data.password, &mut errors);
    errors.into_result()
}

/// Validate the signup form.
pub fn validate_signup(data: &SignupData) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if check_username(&data.username, &mut errors)
        && !data
            .username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        errors.add(
            "username",
            "Username can only contain letters, numbers, and underscores",
        );
    }

    if data.email.is_empty() {
        errors.add("email", "Email is required");
    } else if !is_valid_email(&data.email) {
        errors.add("email", "Please enter a valid email address");
    }

    if check_password_len(&data.password, &mut errors) && !is_strong_password(&data.password) {
        errors.add(
            "password",
            "Password must contain at least one uppercase letter, one lowercase letter, and one number",
        );
    }

    match data.confirm_password.as_deref() {
        None | Some("") => errors.add("confirm_password", "Please confirm your password"),
        Some(confirm) if confirm != data.password => {
            errors.add("confirm_password", "Passwords do not match")
        }
        Some(_) => {}
    }

    if data.role == Some(Role::Admin) {
        errors.add("role", "Admin accounts cannot be created at signup");
    }

    if !data.agreed_to_terms {
        errors.add("agreed_to_terms", "You must agree to the terms of service");
    }

    errors.into_result()
}

/// Validate a new playlist.
pub fn validate_playlist(form: &PlaylistForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let name = form.name.trim();
    if name.is_empty() {
        errors.add("name", "Playlist name is required");
    } else if name.chars().count() > MAX_PLAYLIST_NAME_LEN {
        errors.add("name", "Playlist name must be at most 100 characters");
    }
    errors.into_result()
}

/// Validate a comment body.
pub fn validate_comment(content: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if content.trim().is_empty() {
        errors.add("content", "Comment cannot be empty");
    }
    errors.into_result()
}

/// Validate an admin rejection reason.
pub fn validate_reject_reason(reason: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if reason.trim().is_empty() {
        errors.add("reason", "Please provide a reason for rejection");
    }
    errors.into_result()
}

/// Lowercased extension of `file_name`, if it is an accepted audio type.
pub fn audio_extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    AUDIO_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Validate a song upload before the file is sent.
pub fn validate_upload(title: &str, file_name: &str, size: usize) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if title.trim().is_empty() {
        errors.add("title", "Song title is required");
    }
    if file_name.is_empty() {
        errors.add("file", "Please select an audio file");
    } else if audio_extension(file_name).is_none() {
        errors.add(
            "file",
            format!(
                "File type not allowed. Allowed types: {}",
                AUDIO_EXTENSIONS
                    .iter()
                    .map(|e| format!(".{}", e))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        );
    } else if size > MAX_UPLOAD_BYTES {
        errors.add("file", "File size must be less than 50MB");
    }
    errors.into_result()
}

/// Validate a password change.
pub fn validate_password_change(
    old_password: &str,
    new_password: &str,
    confirm: &str,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if old_password.is_empty() {
        errors.add("old_password", "Current password is required");
    }
    check_password_len(new_password, &mut errors);
    if new_password != confirm {
        errors.add("confirm_password", "Passwords do not match");
    }
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup() -> SignupData {
        SignupData {
            username: "new_user1".to_string(),
            email: "new@example.com".to_string(),
            password: "Secret1".to_string(),
            confirm_password: Some("Secret1".to_string()),
            agreed_to_terms: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_login_ok() {
        assert!(validate_login(&LoginData::new("bob", "hunter2")).is_ok());
    }

    #[test]
    fn test_login_short_fields() {
        let errors = validate_login(&LoginData::new("bo", "12345")).unwrap_err();
        assert_eq!(
            errors.field("username"),
            ["Username must be at least 3 characters"]
        );
        assert_eq!(
            errors.field("password"),
            ["Password must be at least 6 characters"]
        );
    }

    #[test]
    fn test_login_required() {
        let errors = validate_login(&LoginData::default()).unwrap_err();
        assert_eq!(errors.field("username"), ["Username is required"]);
        assert_eq!(errors.field("password"), ["Password is required"]);
    }

    #[test]
    fn test_signup_ok() {
        assert!(validate_signup(&signup()).is_ok());
    }

    #[test]
    fn test_signup_username_charset() {
        let data = SignupData {
            username: "bad name!".to_string(),
            ..signup()
        };
        let errors = validate_signup(&data).unwrap_err();
        assert!(errors.has("username"));
        assert!(!errors.has("email"));
    }

    #[test]
    fn test_signup_weak_password() {
        let data = SignupData {
            password: "alllower1".to_string(),
            confirm_password: Some("alllower1".to_string()),
            ..signup()
        };
        let errors = validate_signup(&data).unwrap_err();
        assert_eq!(errors.field("password").len(), 1);
    }

    #[test]
    fn test_signup_first_failing_rule_only() {
        let data = SignupData {
            username: "a!".to_string(),
            password: "abc".to_string(),
            confirm_password: Some("abc".to_string()),
            ..signup()
        };
        let errors = validate_signup(&data).unwrap_err();
        assert_eq!(
            errors.field("username"),
            ["Username must be at least 3 characters"]
        );
        assert_eq!(
            errors.field("password"),
            ["Password must be at least 6 characters"]
        );
    }

    #[test]
    fn test_signup_mismatch_and_terms() {
        let data = SignupData {
            confirm_password: Some("Other1".to_string()),
            agreed_to_terms: false,
            ..signup()
        };
        let errors = validate_signup(&data).unwrap_err();
        assert_eq!(errors.field("confirm_password"), ["Passwords do not match"]);
        assert!(errors.has("agreed_to_terms"));
    }

    #[test]
    fn test_signup_admin_role_rejected() {
        let data = SignupData {
            role: Some(Role::Admin),
            ..signup()
        };
        assert!(validate_signup(&data).unwrap_err().has("role"));
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@@b.co"));
        assert!(!is_valid_email("a@.co"));
    }

    #[test]
    fn test_playlist_name() {
        let form = PlaylistForm {
            name: "   ".to_string(),
            ..Default::default()
        };
        assert!(validate_playlist(&form).is_err());

        let form = PlaylistForm {
            name: "x".repeat(101),
            ..Default::default()
        };
        assert!(validate_playlist(&form).is_err());

        let form = PlaylistForm {
            name: "Road trip".to_string(),
            ..Default::default()
        };
        assert!(validate_playlist(&form).is_ok());
    }

    #[test]
    fn test_display_joins_messages() {
        let mut errors = ValidationErrors::new();
        errors.add("a", "first");
        errors.add("b", "second");
        assert_eq!(errors.to_string(), "first; second");
    }

    #[test]
    fn test_reject_reason_and_comment() {
        assert!(validate_reject_reason("  ").is_err());
        assert!(validate_reject_reason("poor audio").is_ok());
        assert!(validate_comment("").is_err());
    }

    #[test]
    fn test_audio_extension() {
        assert_eq!(audio_extension("Track.MP3").as_deref(), Some("mp3"));
        assert_eq!(audio_extension("a.b.flac").as_deref(), Some("flac"));
        assert_eq!(audio_extension("cover.png"), None);
        assert_eq!(audio_extension("noext"), None);
    }

    #[test]
    fn test_validate_upload() {
        assert!(validate_upload("Song", "song.ogg", 1024).is_ok());

        let errors = validate_upload(" ", "song.txt", 10).unwrap_err();
        assert!(errors.has("title"));
        assert_eq!(
            errors.field("file"),
            ["File type not allowed. Allowed types: .mp3, .wav, .flac, .aac, .ogg"]
        );

        let errors = validate_upload("Song", "big.wav", MAX_UPLOAD_BYTES + 1).unwrap_err();
        assert_eq!(errors.field("file"), ["File size must be less than 50MB"]);
    }
}
