//! Catalog, playlist and search endpoints.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::api::ApiClient;
use crate::converters;
use crate::error::Result;
use crate::models::{
    Album, Artist, Comment, Genre, LikeResponse, LyricsResponse, MessageResponse, Playlist,
    PlaylistForm, PlaylistUpdate, SearchResults, SearchType, Song, StreamInfo,
};

/// Songs fetched when no explicit limit is given; the server caps at 100.
pub const DEFAULT_SONG_LIMIT: u32 = 100;

/// Offset/limit paging accepted by the list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ListQuery {
    /// Offset/limit for a 1-based page.
    pub fn page(page: u32, size: u32) -> Self {
        Self {
            skip: Some(page.saturating_sub(1) * size),
            limit: Some(size),
        }
    }

    pub fn limit(limit: u32) -> Self {
        Self {
            skip: None,
            limit: Some(limit),
        }
    }
}

/// Filters for `GET /songs/`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SongQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<u64>,
}

impl SongQuery {
    /// Songs of one genre.
    pub fn genre(genre_id: u64) -> Self {
        Self {
            genre_id: Some(genre_id),
            ..Default::default()
        }
    }

    /// Songs of one artist.
    pub fn artist(artist_id: u64) -> Self {
        Self {
            artist_id: Some(artist_id),
            ..Default::default()
        }
    }

    fn with_default_limit(mut self) -> Self {
        if self.limit.is_none() {
            self.limit = Some(DEFAULT_SONG_LIMIT);
        }
        self
    }
}

#[derive(Debug, Serialize)]
struct SearchQuery<'a> {
    q: &'a str,
    #[serde(rename = "type")]
    type_: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

/// Client for the catalog: songs, playlists, genres, artists and search.
#[derive(Debug, Clone)]
pub struct MusicApi {
    api: ApiClient,
}

impl MusicApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    // ==================
    // SONGS
    // ==================

    /// List approved songs. Without an explicit limit, fetches up to 100.
    pub async fn get_songs(&self, query: SongQuery) -> Result<Vec<Song>> {
        let query = query.with_default_limit();
        let json = self.api.get_value("songs/", &query).await?;
        let songs: Vec<Song> = converters::parse_list(&json)?;
        debug!("Fetched {} songs", songs.len());
        Ok(songs)
    }

    /// Get one song with details.
    pub async fn get_song(&self, song_id: u64) -> Result<Song> {
        self.api.get(&format!("songs/{}", song_id)).await
    }

    /// URL the audio sink should load to play a song.
    ///
    /// The backend counts the play and redirects to the file, so this is
    /// handed to the player rather than fetched here.
    pub fn stream_url(&self, song_id: u64) -> String {
        self.api.url(&format!("songs/{}/stream", song_id))
    }

    /// [`stream_url`](Self::stream_url) paired with the song ID.
    pub fn stream_info(&self, song_id: u64) -> StreamInfo {
        StreamInfo {
            song_id,
            url: self.stream_url(song_id),
        }
    }

    /// Like a song.
    pub async fn like_song(&self, song_id: u64) -> Result<LikeResponse> {
        self.api
            .post_empty(&format!("songs/{}/like", song_id))
            .await
    }

    /// Remove a like.
    pub async fn unlike_song(&self, song_id: u64) -> Result<MessageResponse> {
        self.api.delete(&format!("songs/{}/like", song_id)).await
    }

    /// Lyrics of a song.
    pub async fn get_song_lyrics(&self, song_id: u64) -> Result<LyricsResponse> {
        self.api.get(&format!("songs/{}/lyrics", song_id)).await
    }

    /// Comments of a song.
    pub async fn get_song_comments(&self, song_id: u64, query: ListQuery) -> Result<Vec<Comment>> {
        let json = self
            .api
            .get_value(&format!("songs/{}/comments", song_id), &query)
            .await?;
        converters::parse_list(&json)
    }

    /// Post a comment.
    pub async fn add_comment(&self, song_id: u64, content: &str) -> Result<Comment> {
        self.api
            .post_json(
                &format!("songs/{}/comments", song_id),
                &json!({ "text": content }),
            )
            .await
    }

    // ==================
    // PLAYLISTS
    // ==================

    /// List playlists visible to the user.
    pub async fn get_playlists(&self, query: ListQuery) -> Result<Vec<Playlist>> {
        let json = self.api.get_value("playlists", &query).await?;
        converters::parse_list(&json)
    }

    /// Get a playlist.
    pub async fn get_playlist(&self, playlist_id: u64) -> Result<Playlist> {
        self.api.get(&format!("playlists/{}", playlist_id)).await
    }

    /// Songs of a playlist.
    pub async fn get_playlist_songs(&self, playlist_id: u64) -> Result<Vec<Song>> {
        let json: Value = self
            .api
            .get(&format!("playlists/{}/songs", playlist_id))
            .await?;
        converters::parse_list(&json)
    }

    /// Get a playlist with its songs embedded.
    pub async fn get_playlist_with_songs(&self, playlist_id: u64) -> Result<Playlist> {
        let (playlist, songs) = futures_util::try_join!(
            self.get_playlist(playlist_id),
            self.get_playlist_songs(playlist_id)
        )?;
        let mut playlist = playlist;
        playlist.song_count = songs.len() as u64;
        playlist.songs = Some(songs);
        Ok(playlist)
    }

    /// Create a playlist.
    pub async fn create_playlist(&self, form: &PlaylistForm) -> Result<Playlist> {
        self.api.post_json("playlists", form).await
    }

    /// Update a playlist.
    pub async fn update_playlist(&self, playlist_id: u64, update: &PlaylistUpdate) -> Result<Playlist> {
        self.api
            .put_json(&format!("playlists/{}", playlist_id), update)
            .await
    }

    /// Delete a playlist.
    pub async fn delete_playlist(&self, playlist_id: u64) -> Result<()> {
        let _: Option<MessageResponse> = self
            .api
            .delete(&format!("playlists/{}", playlist_id))
            .await?;
        Ok(())
    }

    /// Add a song to a playlist.
    pub async fn add_song_to_playlist(&self, playlist_id: u64, song_id: u64) -> Result<MessageResponse> {
        self.api
            .post_json(
                &format!("playlists/{}/songs", playlist_id),
                &json!({ "song_id": song_id }),
            )
            .await
    }

    /// Remove a song from a playlist.
    pub async fn remove_song_from_playlist(
        &self,
        playlist_id: u64,
        song_id: u64,
    ) -> Result<MessageResponse> {
        self.api
            .delete(&format!("playlists/{}/songs/{}", playlist_id, song_id))
            .await
    }

    // ==================
    // GENRES, ARTISTS, ALBUMS
    // ==================

    /// All genres.
    pub async fn get_genres(&self) -> Result<Vec<Genre>> {
        let json: Value = self.api.get("genres").await?;
        converters::parse_list(&json)
    }

    /// Artist accounts.
    pub async fn get_artists(&self, query: ListQuery) -> Result<Vec<Artist>> {
        let json = self.api.get_value("artists", &query).await?;
        converters::parse_list(&json)
    }

    /// Albums, optionally of one artist.
    pub async fn get_albums(&self, artist_id: Option<u64>, query: ListQuery) -> Result<Vec<Album>> {
        #[derive(Serialize)]
        struct AlbumQuery {
            #[serde(skip_serializing_if = "Option::is_none")]
            artist_id: Option<u64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            skip: Option<u32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            limit: Option<u32>,
        }

        let params = AlbumQuery {
            artist_id,
            skip: query.skip,
            limit: query.limit,
        };
        let json = self.api.get_value("albums", &params).await?;
        converters::parse_list(&json)
    }

    // ==================
    // SEARCH
    // ==================

    /// Search songs, artists and playlists.
    pub async fn search(
        &self,
        query: &str,
        search_type: SearchType,
        paging: ListQuery,
    ) -> Result<SearchResults> {
        let params = SearchQuery {
            q: query,
            type_: search_type.as_str(),
            skip: paging.skip,
            limit: paging.limit,
        };
        let json = self.api.get_value("search", &params).await?;
        let results = converters::parse_search_results(query, &json)?;
        debug!(
            "Search '{}' returned {} songs, {} artists, {} playlists",
            query,
            results.songs.len(),
            results.artists.len(),
            results.playlists.len()
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_page() {
        assert_eq!(
            ListQuery::page(3, 20),
            ListQuery {
                skip: Some(40),
                limit: Some(20)
            }
        );
        assert_eq!(ListQuery::page(0, 20).skip, Some(0));
    }

    #[test]
    fn test_song_query_default_limit() {
        let query = SongQuery::genre(2).with_default_limit();
        assert_eq!(query.limit, Some(DEFAULT_SONG_LIMIT));
        assert_eq!(query.genre_id, Some(2));

        let query = SongQuery {
            limit: Some(5),
            ..Default::default()
        }
        .with_default_limit();
        assert_eq!(query.limit, Some(5));
    }
}
