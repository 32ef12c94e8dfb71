//! Search result models.

use serde::{Deserialize, Serialize};

use super::album::Album;
use super::playlist::Playlist;
use super::song::Song;
use super::user::Artist;

/// What a search should look for. Sent as the `type` query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    All,
    Song,
    Artist,
    Playlist,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::All => "all",
            SearchType::Song => "song",
            SearchType::Artist => "artist",
            SearchType::Playlist => "playlist",
        }
    }
}

/// Combined search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchResults {
    /// The query that produced these results.
    pub query: String,

    #[serde(default)]
    pub songs: Vec<Song>,

    /// Matching artists, plus artists of matching songs, without duplicates.
    #[serde(default)]
    pub artists: Vec<Artist>,

    #[serde(default)]
    pub albums: Vec<Album>,

    #[serde(default)]
    pub playlists: Vec<Playlist>,

    /// Total result count reported by the server, or the local count.
    #[serde(default)]
    pub total: u64,
}

impl SearchResults {
    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
            && self.artists.is_empty()
            && self.albums.is_empty()
            && self.playlists.is_empty()
    }

    /// Number of results held locally.
    pub fn len(&self) -> usize {
        self.songs.len() + self.artists.len() + self.albums.len() + self.playlists.len()
    }
}
