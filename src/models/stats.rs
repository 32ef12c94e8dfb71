//! Dashboard statistics.

use serde::{Deserialize, Serialize};

/// Plays per month on the artist dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthlyPlays {
    pub month: String,
    pub plays: u64,
}

/// One of the artist's most played songs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TopSong {
    pub title: String,
    pub plays: u64,
}

/// Artist dashboard counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArtistStats {
    pub total_songs: u64,
    pub total_albums: u64,
    pub total_plays: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub pending_songs: u64,
    pub approved_songs: u64,
    pub rejected_songs: u64,
    pub monthly_plays: Vec<MonthlyPlays>,
    pub top_songs: Vec<TopSong>,
}

/// Estimated earnings for an artist.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArtistEarnings {
    pub total_plays: u64,
    pub earnings_per_play: f64,
    pub estimated_earnings: f64,
    pub currency: String,
    pub note: String,
}

/// Genre with its song count.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GenreCount {
    pub name: String,
    pub song_count: u64,
}

/// Short user entry in the admin activity feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecentUser {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub created_at: String,
}

/// Short song entry in the admin activity feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecentSong {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub artist_id: u64,
    #[serde(default)]
    pub created_at: String,
}

/// Platform-wide admin counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AdminStats {
    pub total_users: u64,
    pub total_artists: u64,
    pub total_songs: u64,
    pub approved_songs: u64,
    pub total_albums: u64,
    pub total_playlists: u64,
    pub total_plays: u64,
    pub pending_songs: u64,
    pub recent_signups: u64,
    pub active_users_today: u64,
    pub top_genres: Vec<GenreCount>,
    pub recent_users: Vec<RecentUser>,
    pub recent_songs: Vec<RecentSong>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_stats_partial_payload() {
        let stats: AdminStats = serde_json::from_str(
            r#"{"total_users": 10, "total_artists": 2, "total_songs": 30,
                "approved_songs": 25, "pending_songs": 5, "total_plays": 900,
                "recent_users": [{"id": 1, "username": "a", "created_at": "t"}],
                "recent_songs": []}"#,
        )
        .unwrap();
        assert_eq!(stats.pending_songs, 5);
        assert_eq!(stats.recent_users.len(), 1);
        assert!(stats.top_genres.is_empty());
    }

    #[test]
    fn test_artist_stats_top_songs() {
        let stats: ArtistStats = serde_json::from_str(
            r#"{"total_plays": 40, "total_songs": 2, "approved_songs": 1,
                "pending_songs": 1, "top_songs": [{"title": "Hit", "plays": 39}]}"#,
        )
        .unwrap();
        assert_eq!(stats.top_songs[0].plays, 39);
        assert_eq!(stats.rejected_songs, 0);
    }
}
