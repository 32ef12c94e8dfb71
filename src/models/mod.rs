//! Data models for GSpotify API responses.
//!
//! This module contains the records mirrored from the REST API:
//! users, songs, albums, playlists, genres, comments and dashboard stats.

pub mod album;
pub mod common;
pub mod playlist;
pub mod search;
pub mod song;
pub mod stats;
pub mod user;

// Re-exports for convenience
pub use album::{Album, AlbumForm};
pub use common::{Genre, MessageResponse, PaginatedResponse, Role};
pub use playlist::{Playlist, PlaylistForm, PlaylistUpdate};
pub use search::{SearchResults, SearchType};
pub use song::{
    format_duration, Comment, LikeResponse, LyricsResponse, ModerationResponse, Song, SongStatus,
    StreamInfo,
};
pub use stats::{AdminStats, ArtistEarnings, ArtistStats};
pub use user::{
    Artist, AuthResponse, LoginData, NotificationSettings, ProfileUpdate, SignupData, User,
};
