//! # GSpotify
//!
//! A Rust client for the GSpotify music streaming backend.
//!
//! ## Quick Start
//!
//! The easiest way to use this library is through the [`GSpotify`] struct:
//!
//! ```rust,no_run
//! use gspotify::{Config, GSpotify, LoginData, SearchFilter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut app = GSpotify::restore(Config::new("http://localhost:8000")?)?;
//!
//!     // Log in; the token is saved for the next run
//!     app.login(&LoginData::new("listener", "Secret123")).await?;
//!
//!     // Search the catalog
//!     let results = app.search("blue", SearchFilter::Songs).await?;
//!     println!("{} songs found", results.songs.len());
//!
//!     // Queue a playlist and get the URL to hand to an audio sink
//!     let stream = app.play_playlist(1, 0).await?;
//!     println!("Now playing: {}", stream.url);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Listening**: browse by genre, search, like songs, read lyrics and comments
//! - **Playlists**: create, edit and fill playlists
//! - **Player**: queue with repeat and shuffle modes
//! - **Artist studio**: upload songs, manage albums, read stats
//! - **Moderation**: approve or reject songs, manage users and genres
//!
//! ## Low-Level APIs
//!
//! For more control, use the service clients directly:
//!
//! - [`AuthApi`], [`MusicApi`], [`UserApi`] - listener endpoints
//! - [`ArtistApi`] - artist-only endpoints
//! - [`AdminApi`] - admin-only endpoints

pub mod api;
pub mod config;
pub mod converters;
pub mod error;
mod gspotify;
pub mod library;
pub mod models;
pub mod notice;
pub mod player;
pub mod routes;
pub mod session;
pub mod validation;

// Main interface (recommended)
pub use gspotify::GSpotify;

pub use config::Config;
pub use error::{GSpotifyError, Result};
pub use library::{Page, SearchFilter, UserFilter};
pub use notice::{Notice, NoticeLevel};
pub use player::{Player, RepeatMode, TrackEnd};
pub use routes::{Access, Route};
pub use session::{Session, SharedSession};

// Low-level APIs
pub use api::{AdminApi, ApiClient, ArtistApi, AuthApi, MusicApi, SongUpload, UserApi};
pub use models::{
    Album, Artist, Comment, Genre, LoginData, Playlist, PlaylistForm, Role, Song, SongStatus,
    SignupData, StreamInfo, User,
};
