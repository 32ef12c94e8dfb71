//! REST clients for the GSpotify backend.
//!
//! [`ApiClient`] owns the HTTP plumbing; each service wraps it for one area
//! of the API:
//! - [`AuthApi`]: login, signup and password changes
//! - [`MusicApi`]: songs, playlists, genres, artists and search
//! - [`UserApi`]: the logged-in user's profile and library
//! - [`ArtistApi`]: uploads, albums and artist stats
//! - [`AdminApi`]: moderation, users and genres

pub mod admin;
pub mod artist;
pub mod auth;
pub mod client;
pub mod music;
pub mod users;

pub use admin::{AdminApi, BatchModerationResult};
pub use artist::{ArtistApi, SongUpload};
pub use auth::AuthApi;
pub use client::ApiClient;
pub use music::{ListQuery, MusicApi, SongQuery, DEFAULT_SONG_LIMIT};
pub use users::UserApi;
