//! Album models.

use serde::{Deserialize, Serialize};

use super::user::User;

/// An album owned by an artist.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Album {
    /// Album ID.
    pub id: u64,

    /// Album title.
    pub title: String,

    /// Owning artist's user ID.
    #[serde(default)]
    pub artist_id: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_art_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    #[serde(default)]
    pub created_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<User>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub song_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>,
}

impl Album {
    /// Release year, when the date is known.
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .and_then(|y| y.parse().ok())
    }
}

/// Album create/update payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AlbumForm {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_art_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_id: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_year() {
        let album = Album {
            release_date: Some("2021-06-18T00:00:00".to_string()),
            ..Default::default()
        };
        assert_eq!(album.release_year(), Some(2021));
        assert_eq!(Album::default().release_year(), None);
    }
}
