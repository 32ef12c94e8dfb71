//! Song-related models.
//!
//! Songs come back from several endpoints with different shapes: the
//! catalog returns flattened `artist_name`/`genre_name` fields, search
//! returns populated relationships, and liked-song lists return the bare
//! record. Everything beyond the core fields is therefore optional.

use serde::{Deserialize, Serialize};

use super::album::Album;
use super::common::Genre;
use super::user::User;

/// Moderation state of an uploaded song.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SongStatus {
    /// Waiting for admin review.
    #[default]
    #[serde(alias = "pending", alias = "pending_approval", alias = "PENDING_APPROVAL")]
    Pending,
    /// Visible in the catalog.
    #[serde(alias = "approved")]
    Approved,
    /// Rejected by an admin.
    #[serde(alias = "rejected")]
    Rejected,
}

impl SongStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SongStatus::Pending => "PENDING",
            SongStatus::Approved => "APPROVED",
            SongStatus::Rejected => "REJECTED",
        }
    }
}

/// A song record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Song {
    /// Song ID.
    pub id: u64,

    /// Song title.
    pub title: String,

    /// Uploading artist's user ID.
    #[serde(default)]
    pub artist_id: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_id: Option<u64>,

    #[serde(default)]
    pub genre_id: u64,

    /// Duration in seconds.
    #[serde(default)]
    pub duration_seconds: u64,

    /// Storage path of the audio file.
    #[serde(default)]
    pub file_url: String,

    #[serde(default)]
    pub status: SongStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    #[serde(default)]
    pub play_count: u64,

    #[serde(default)]
    pub created_at: String,

    // Populated relationships
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<User>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<Genre>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<Album>,

    // Legacy fields for backward compatibility
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>,

    #[serde(default, alias = "album_title", skip_serializing_if = "Option::is_none")]
    pub album_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_liked: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
}

impl Song {
    /// Best available artist name.
    pub fn display_artist(&self) -> &str {
        if let Some(artist) = &self.artist {
            return artist.display_name();
        }
        self.artist_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or("Unknown Artist")
    }

    /// Best available genre name.
    pub fn display_genre(&self) -> Option<&str> {
        self.genre
            .as_ref()
            .map(|g| g.name.as_str())
            .or(self.genre_name.as_deref())
    }

    /// Best available album title.
    pub fn display_album(&self) -> Option<&str> {
        self.album
            .as_ref()
            .map(|a| a.title.as_str())
            .or(self.album_name.as_deref())
    }

    /// Duration in seconds, falling back to the legacy field.
    pub fn duration_secs(&self) -> u64 {
        if self.duration_seconds > 0 {
            self.duration_seconds
        } else {
            self.duration.unwrap_or(0)
        }
    }

    /// Duration formatted as M:SS.
    pub fn duration_formatted(&self) -> String {
        format_duration(self.duration_secs())
    }

    /// Whether the current user has liked this song.
    pub fn liked(&self) -> bool {
        self.is_liked.unwrap_or(false)
    }

    /// Cover art from the song or its album.
    pub fn cover_url(&self) -> Option<&str> {
        self.cover_image_url
            .as_deref()
            .or_else(|| self.album.as_ref().and_then(|a| a.cover_art_url.as_deref()))
    }
}

/// Format whole seconds as M:SS.
pub fn format_duration(total_seconds: u64) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// A comment on a song.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: u64,

    /// Comment body. The backend calls this `text`.
    #[serde(alias = "text")]
    pub content: String,

    /// Author name. The backend calls this `username`.
    #[serde(default, alias = "username")]
    pub user_name: String,

    #[serde(default)]
    pub created_at: String,
}

/// Lyrics of a song.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LyricsResponse {
    #[serde(default)]
    pub song_id: u64,

    #[serde(default)]
    pub song_title: String,

    #[serde(default, alias = "text", alias = "content")]
    pub lyrics: String,
}

/// Where the audio sink loads a song from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamInfo {
    pub song_id: u64,
    pub url: String,
}

/// Result of a like call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LikeResponse {
    #[serde(default)]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_liked: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
}

/// Result of an admin moderation call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModerationResponse {
    #[serde(default)]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub song: Option<Song>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_formatted() {
        let song = Song {
            duration_seconds: 215,
            ..Default::default()
        };
        assert_eq!(song.duration_formatted(), "3:35");
        assert_eq!(format_duration(9), "0:09");
        assert_eq!(format_duration(3600), "60:00");
    }

    #[test]
    fn test_legacy_duration_fallback() {
        let song = Song {
            duration: Some(61),
            ..Default::default()
        };
        assert_eq!(song.duration_secs(), 61);
        assert_eq!(song.duration_formatted(), "1:01");
    }

    #[test]
    fn test_display_artist_fallbacks() {
        let mut song = Song::default();
        assert_eq!(song.display_artist(), "Unknown Artist");

        song.artist_name = Some("Legacy Name".to_string());
        assert_eq!(song.display_artist(), "Legacy Name");

        song.artist = Some(User {
            username: "populated".to_string(),
            ..Default::default()
        });
        assert_eq!(song.display_artist(), "populated");
    }

    #[test]
    fn test_catalog_payload() {
        let song: Song = serde_json::from_str(
            r#"{"id": 7, "title": "Night Drive", "artist_id": 2, "genre_id": 1,
                "duration_seconds": 180, "file_url": "uploads/songs/a.mp3",
                "status": "APPROVED", "release_date": "2024-02-01T00:00:00",
                "play_count": 12, "created_at": "2024-02-01T00:00:00",
                "artist_name": "Synth Kid", "genre_name": "Pop",
                "album_title": "Neon", "cover_image_url": null}"#,
        )
        .unwrap();
        assert_eq!(song.status, SongStatus::Approved);
        assert_eq!(song.display_album(), Some("Neon"));
        assert_eq!(song.display_genre(), Some("Pop"));
        assert!(song.cover_url().is_none());
        assert!(!song.liked());
    }

    #[test]
    fn test_backend_status_names() {
        let status: SongStatus = serde_json::from_str("\"pending_approval\"").unwrap();
        assert_eq!(status, SongStatus::Pending);
        let status: SongStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(status, SongStatus::Rejected);
        assert_eq!(serde_json::to_string(&SongStatus::Approved).unwrap(), "\"APPROVED\"");
    }

    #[test]
    fn test_comment_backend_names() {
        let comment: Comment = serde_json::from_str(
            r#"{"id": 1, "text": "great", "username": "fan", "created_at": "x"}"#,
        )
        .unwrap();
        assert_eq!(comment.content, "great");
        assert_eq!(comment.user_name, "fan");
    }
}
