//! Artist studio endpoints (`/artist/*`).

use std::path::Path;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use serde_json::json;
use tracing::info;

use crate::api::{ApiClient, ListQuery, SongQuery};
use crate::converters;
use crate::error::Result;
use crate::models::{
    Album, AlbumForm, ArtistEarnings, ArtistStats, LyricsResponse, MessageResponse, Song,
};
use crate::validation;

/// A song file plus the form fields sent with it.
#[derive(Debug, Clone)]
pub struct SongUpload {
    pub title: String,
    pub genre_id: u64,
    pub album_id: Option<u64>,
    pub file_name: String,
    pub data: Bytes,
}

impl SongUpload {
    pub fn new<S: Into<String>>(title: S, genre_id: u64, file_name: S, data: Bytes) -> Self {
        Self {
            title: title.into(),
            genre_id,
            album_id: None,
            file_name: file_name.into(),
            data,
        }
    }

    pub fn with_album(mut self, album_id: u64) -> Self {
        self.album_id = Some(album_id);
        self
    }

    /// Read an audio file from disk.
    pub async fn from_path<P: AsRef<Path>>(title: &str, genre_id: u64, path: P) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("Invalid file path: {}", path.display()),
                )
            })?
            .to_string();
        let data = tokio::fs::read(path).await?;
        Ok(Self::new(title.to_string(), genre_id, file_name, Bytes::from(data)))
    }

    /// Check title, file type and size.
    pub fn validate(&self) -> Result<()> {
        validation::validate_upload(&self.title, &self.file_name, self.data.len())?;
        Ok(())
    }

    fn mime_type(&self) -> &'static str {
        match validation::audio_extension(&self.file_name).as_deref() {
            Some("mp3") => "audio/mpeg",
            Some("wav") => "audio/wav",
            Some("flac") => "audio/flac",
            Some("aac") => "audio/aac",
            Some("ogg") => "audio/ogg",
            _ => "application/octet-stream",
        }
    }

    fn into_form(self) -> Result<Form> {
        let mime = self.mime_type();
        let len = self.data.len() as u64;
        let file = Part::stream_with_length(Body::from(self.data), len)
            .file_name(self.file_name)
            .mime_str(mime)?;

        let mut form = Form::new()
            .text("title", self.title)
            .text("genre_id", self.genre_id.to_string());
        if let Some(album_id) = self.album_id {
            form = form.text("album_id", album_id.to_string());
        }
        Ok(form.part("file", file))
    }
}

/// Client for an artist's own songs and albums.
#[derive(Debug, Clone)]
pub struct ArtistApi {
    api: ApiClient,
}

impl ArtistApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Approved songs of any artist, from the public catalog.
    pub async fn get_artist_songs(&self, artist_id: u64) -> Result<Vec<Song>> {
        let json = self
            .api
            .get_value("songs/", &SongQuery::artist(artist_id))
            .await?;
        converters::parse_list(&json)
    }

    /// The artist's own songs, whatever their status.
    pub async fn get_my_songs(&self, query: ListQuery) -> Result<Vec<Song>> {
        let json = self.api.get_value("artist/songs", &query).await?;
        converters::parse_list(&json)
    }

    /// Upload a song. It stays pending until an admin approves it.
    pub async fn upload_song(&self, upload: SongUpload) -> Result<Song> {
        upload.validate()?;
        let title = upload.title.clone();
        let song: Song = self
            .api
            .post_multipart("artist/songs", upload.into_form()?)
            .await?;
        info!("Uploaded '{}' as song {} ({})", title, song.id, song.status.label());
        Ok(song)
    }

    /// Delete one of the artist's songs.
    pub async fn delete_song(&self, song_id: u64) -> Result<MessageResponse> {
        self.api.delete(&format!("artist/songs/{}", song_id)).await
    }

    /// Add or replace the lyrics of a song.
    pub async fn update_lyrics(&self, song_id: u64, text: &str) -> Result<LyricsResponse> {
        self.api
            .put_json(
                &format!("artist/songs/{}/lyrics", song_id),
                &json!({ "text": text }),
            )
            .await
    }

    /// Create an album.
    pub async fn create_album(&self, form: &AlbumForm) -> Result<Album> {
        let album: Album = self.api.post_json("artist/albums", form).await?;
        info!("Created album {} '{}'", album.id, album.title);
        Ok(album)
    }

    /// Update an album.
    pub async fn update_album(&self, album_id: u64, form: &AlbumForm) -> Result<Album> {
        self.api
            .put_json(&format!("artist/albums/{}", album_id), form)
            .await
    }

    /// Delete an empty album.
    pub async fn delete_album(&self, album_id: u64) -> Result<MessageResponse> {
        self.api.delete(&format!("artist/albums/{}", album_id)).await
    }

    /// Play and song counters.
    pub async fn get_dashboard_stats(&self) -> Result<ArtistStats> {
        self.api.get("artist/dashboard/stats").await
    }

    /// Earnings estimate.
    pub async fn get_earnings(&self) -> Result<ArtistEarnings> {
        self.api.get("artist/dashboard/earnings").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GSpotifyError;

    #[test]
    fn test_upload_validate() {
        let upload = SongUpload::new("Night Drive", 3, "night.FLAC", Bytes::from_static(b"fLaC"));
        assert!(upload.validate().is_ok());
        assert_eq!(upload.mime_type(), "audio/flac");

        let upload = SongUpload::new("Night Drive", 3, "night.exe", Bytes::from_static(b"MZ"));
        match upload.validate() {
            Err(GSpotifyError::Validation(errors)) => assert!(errors.has("file")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_with_album() {
        let upload = SongUpload::new("a", 1, "a.mp3", Bytes::new()).with_album(9);
        assert_eq!(upload.album_id, Some(9));
    }

    #[tokio::test]
    async fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.mp3");
        std::fs::write(&path, b"ID3").unwrap();

        let upload = SongUpload::from_path("Demo", 2, &path).await.unwrap();
        assert_eq!(upload.file_name, "demo.mp3");
        assert_eq!(upload.data.as_ref(), b"ID3");
        assert_eq!(upload.genre_id, 2);
    }
}
