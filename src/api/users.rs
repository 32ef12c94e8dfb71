//! Current-user endpoints (`/users/me*`).

use crate::api::{ApiClient, ListQuery};
use crate::converters;
use crate::error::Result;
use crate::models::{MessageResponse, NotificationSettings, Playlist, ProfileUpdate, Song, User};

/// Client for the logged-in user's own data.
#[derive(Debug, Clone)]
pub struct UserApi {
    api: ApiClient,
}

impl UserApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch the profile and refresh the cached session user.
    pub async fn get_current_user_profile(&self) -> Result<User> {
        let user: User = self.api.get("users/me").await?;
        self.api.session().write().await.set_user(user.clone())?;
        Ok(user)
    }

    /// Update email or full name.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        let user: User = self.api.put_json("users/me", update).await?;
        self.api.session().write().await.set_user(user.clone())?;
        Ok(user)
    }

    /// Playlists owned by the user.
    pub async fn get_my_playlists(&self, query: ListQuery) -> Result<Vec<Playlist>> {
        let json = self.api.get_value("users/me/playlists", &query).await?;
        converters::parse_list(&json)
    }

    /// Songs the user has liked. Every returned song is marked as liked.
    pub async fn get_liked_songs(&self, query: ListQuery) -> Result<Vec<Song>> {
        let json = self.api.get_value("users/me/liked-songs", &query).await?;
        let mut songs: Vec<Song> = converters::parse_list(&json)?;
        for song in &mut songs {
            song.is_liked = Some(true);
        }
        Ok(songs)
    }

    /// Save notification preferences.
    pub async fn update_notification_settings(
        &self,
        settings: &NotificationSettings,
    ) -> Result<MessageResponse> {
        self.api
            .put_json("users/notification-settings", settings)
            .await
    }

    /// Delete the account and drop the local session.
    pub async fn delete_account(&self) -> Result<MessageResponse> {
        let response: MessageResponse = self.api.delete("users/me").await?;
        self.api.session().write().await.clear()?;
        Ok(response)
    }
}
