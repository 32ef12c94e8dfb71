//! Playlist models.

use serde::{Deserialize, Serialize};

use super::song::Song;

/// A user playlist.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Playlist {
    /// Playlist ID.
    pub id: u64,

    /// Playlist name.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether other users can see the playlist.
    #[serde(default = "default_public")]
    pub is_public: bool,

    #[serde(default)]
    pub created_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,

    /// Owner display name.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub owner_name: String,

    /// Number of songs, as reported by the server.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub song_count: u64,

    /// Songs, when the endpoint embeds them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub songs: Option<Vec<Song>>,
}

fn default_public() -> bool {
    true
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_zero<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or_default())
}

impl Playlist {
    /// Number of songs, preferring the embedded list when present.
    pub fn len(&self) -> usize {
        self.songs
            .as_ref()
            .map(|s| s.len())
            .unwrap_or(self.song_count as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the playlist already holds a song.
    pub fn contains(&self, song_id: u64) -> bool {
        self.songs
            .as_ref()
            .map(|songs| songs.iter().any(|s| s.id == song_id))
            .unwrap_or(false)
    }

    /// Sum of song durations in seconds.
    pub fn total_duration_secs(&self) -> u64 {
        self.songs
            .as_ref()
            .map(|songs| songs.iter().map(|s| s.duration_secs()).sum())
            .unwrap_or(0)
    }
}

/// Playlist create payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlaylistForm {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub is_public: bool,
}

/// Playlist update payload; unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlaylistUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_payload_with_nulls() {
        let playlist: Playlist = serde_json::from_str(
            r#"{"id": 4, "name": "Gym", "description": null, "owner_id": 2,
                "created_at": "2024-01-01T00:00:00", "owner_name": null, "song_count": null}"#,
        )
        .unwrap();
        assert_eq!(playlist.owner_name, "");
        assert_eq!(playlist.song_count, 0);
        assert!(playlist.is_public);
        assert!(playlist.is_empty());
    }

    #[test]
    fn test_embedded_songs() {
        let playlist = Playlist {
            song_count: 10,
            songs: Some(vec![
                Song {
                    id: 1,
                    duration_seconds: 100,
                    ..Default::default()
                },
                Song {
                    id: 2,
                    duration_seconds: 50,
                    ..Default::default()
                },
            ]),
            ..Default::default()
        };
        assert_eq!(playlist.len(), 2);
        assert!(playlist.contains(2));
        assert!(!playlist.contains(3));
        assert_eq!(playlist.total_duration_secs(), 150);
    }

    #[test]
    fn test_update_skips_unset_fields() {
        let update = PlaylistUpdate {
            is_public: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"is_public":false}"#
        );
    }
}
