//! User, artist and authentication models.

use serde::{Deserialize, Serialize};

use super::common::Role;

/// A user account as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// User ID.
    pub id: u64,

    /// Login name.
    pub username: String,

    /// Email address.
    #[serde(default)]
    pub email: String,

    /// Display name, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// Account role.
    #[serde(default)]
    pub role: Role,

    /// Whether the account is enabled.
    #[serde(default = "default_true")]
    pub is_active: bool,

    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: String,

    /// Profile bio (profile endpoint only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    /// Profile picture (profile endpoint only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_playlists: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_liked_songs: Option<u64>,
}

fn default_true() -> bool {
    true
}

impl User {
    /// Full name when present, username otherwise.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// Social profile links for an artist.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
}

/// Public artist listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Artist {
    /// Artist (user) ID.
    pub id: u64,

    /// Login name.
    pub username: String,

    /// Display name. Falls back to the username when the API omits it.
    #[serde(default)]
    pub full_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,

    #[serde(default)]
    pub total_songs: u64,

    #[serde(default)]
    pub total_albums: u64,

    #[serde(default)]
    pub total_followers: u64,
}

impl Artist {
    /// Display name of the artist.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }
}

impl From<&User> for Artist {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone().unwrap_or_default(),
            bio: user.bio.clone(),
            ..Default::default()
        }
    }
}

/// Response of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests.
    pub access_token: String,

    /// Token type, normally "bearer".
    #[serde(default = "default_token_type")]
    pub token_type: String,

    /// The authenticated user.
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Login form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoginData {
    pub username: String,
    pub password: String,
}

impl LoginData {
    pub fn new<S1: Into<String>, S2: Into<String>>(username: S1, password: S2) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Signup form.
///
/// `confirm_password` is checked locally and never sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SignupData {
    pub username: String,

    pub email: String,

    pub password: String,

    #[serde(skip)]
    pub confirm_password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// Requested role; only `user` or `artist` may be self-assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    pub agreed_to_terms: bool,
}

/// Profile fields a user may edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Notification preferences from the settings page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub playlist_updates: bool,
    pub new_followers: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            playlist_updates: true,
            new_followers: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_minimal_payload() {
        let user: User = serde_json::from_str(
            r#"{"id": 3, "username": "dj", "email": "dj@example.com", "role": "artist",
                "is_active": true, "created_at": "2024-01-01T00:00:00"}"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::Artist);
        assert_eq!(user.display_name(), "dj");
        assert!(user.total_playlists.is_none());
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        let user = User {
            username: "jdoe".to_string(),
            full_name: Some("Jane Doe".to_string()),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "Jane Doe");
    }

    #[test]
    fn test_signup_serialization_skips_confirmation() {
        let data = SignupData {
            username: "newbie".to_string(),
            email: "n@example.com".to_string(),
            password: "Secret1".to_string(),
            confirm_password: Some("Secret1".to_string()),
            role: Some(Role::User),
            agreed_to_terms: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("confirm_password").is_none());
        assert_eq!(json["role"], "user");
        assert!(json.get("full_name").is_none());
    }
}
