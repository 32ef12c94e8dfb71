//! Admin moderation endpoints (`/admin/*`).

use futures_util::future::join_all;
use serde_json::{json, Value};
use tracing::info;

use crate::api::{ApiClient, ListQuery};
use crate::converters;
use crate::error::Result;
use crate::models::{AdminStats, Genre, MessageResponse, ModerationResponse, Role, Song, User};

/// Outcome of a bulk moderation action.
#[derive(Debug, Default)]
pub struct BatchModerationResult {
    /// Song IDs the action succeeded for.
    pub succeeded: Vec<u64>,
    /// Song IDs that failed, with the error message.
    pub failed: Vec<(u64, String)>,
}

impl BatchModerationResult {
    /// Total number of songs attempted.
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Check if every song was processed.
    pub fn all_successful(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Client for admin-only operations.
#[derive(Debug, Clone)]
pub struct AdminApi {
    api: ApiClient,
}

impl AdminApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All user accounts.
    pub async fn get_users(&self, query: ListQuery) -> Result<Vec<User>> {
        let json = self.api.get_value("admin/users", &query).await?;
        converters::parse_list(&json)
    }

    /// Flip a user's active flag.
    pub async fn toggle_user_status(&self, user_id: u64) -> Result<MessageResponse> {
        let response: MessageResponse = self
            .api
            .put_empty(&format!("admin/users/{}/toggle-status", user_id))
            .await?;
        info!("User {}: {}", user_id, response.message);
        Ok(response)
    }

    /// Change a user's role.
    pub async fn change_user_role(&self, user_id: u64, role: Role) -> Result<MessageResponse> {
        let response: MessageResponse = self
            .api
            .put_json(
                &format!("admin/users/{}/role", user_id),
                &json!({ "role": role }),
            )
            .await?;
        info!("Changed role of user {} to {}", user_id, role);
        Ok(response)
    }

    /// Every song regardless of status.
    pub async fn get_all_songs(&self) -> Result<Vec<Song>> {
        let json: Value = self.api.get("admin/songs").await?;
        converters::parse_list(&json)
    }

    /// Songs waiting for review.
    pub async fn get_pending_songs(&self) -> Result<Vec<Song>> {
        let json: Value = self.api.get("admin/songs/pending").await?;
        converters::parse_list(&json)
    }

    /// Approve a pending song.
    pub async fn approve_song(&self, song_id: u64) -> Result<ModerationResponse> {
        let response: ModerationResponse = self
            .api
            .post_empty(&format!("admin/songs/{}/approve", song_id))
            .await?;
        info!("Approved song {}", song_id);
        Ok(response)
    }

    /// Reject a pending song with a reason.
    pub async fn reject_song(&self, song_id: u64, reason: &str) -> Result<ModerationResponse> {
        let response: ModerationResponse = self
            .api
            .post_json(
                &format!("admin/songs/{}/reject", song_id),
                &json!({ "reason": reason }),
            )
            .await?;
        info!("Rejected song {}: {}", song_id, reason);
        Ok(response)
    }

    /// Approve several songs concurrently.
    pub async fn approve_songs(&self, song_ids: &[u64]) -> BatchModerationResult {
        let results = join_all(song_ids.iter().map(|id| self.approve_song(*id))).await;
        collect_batch(song_ids, results)
    }

    /// Reject several songs concurrently with the same reason.
    pub async fn reject_songs(&self, song_ids: &[u64], reason: &str) -> BatchModerationResult {
        let results = join_all(song_ids.iter().map(|id| self.reject_song(*id, reason))).await;
        collect_batch(song_ids, results)
    }

    /// Delete any song.
    pub async fn delete_song(&self, song_id: u64) -> Result<MessageResponse> {
        self.api.delete(&format!("admin/songs/{}", song_id)).await
    }

    /// Delete any comment.
    pub async fn delete_comment(&self, comment_id: u64) -> Result<MessageResponse> {
        self.api
            .delete(&format!("admin/comments/{}", comment_id))
            .await
    }

    /// Create a genre.
    pub async fn create_genre(&self, name: &str, description: Option<&str>) -> Result<Genre> {
        self.api
            .post_json(
                "admin/genres",
                &json!({ "name": name, "description": description }),
            )
            .await
    }

    /// Rename a genre.
    pub async fn update_genre(&self, genre_id: u64, name: &str) -> Result<Genre> {
        self.api
            .put_json(&format!("admin/genres/{}", genre_id), &json!({ "name": name }))
            .await
    }

    /// Delete a genre.
    pub async fn delete_genre(&self, genre_id: u64) -> Result<MessageResponse> {
        self.api.delete(&format!("admin/genres/{}", genre_id)).await
    }

    /// Platform statistics.
    pub async fn get_dashboard_stats(&self) -> Result<AdminStats> {
        self.api.get("admin/dashboard/stats").await
    }
}

fn collect_batch<T>(song_ids: &[u64], results: Vec<Result<T>>) -> BatchModerationResult {
    let mut batch = BatchModerationResult::default();
    for (id, result) in song_ids.iter().zip(results) {
        match result {
            Ok(_) => batch.succeeded.push(*id),
            Err(e) => batch.failed.push((*id, e.user_message())),
        }
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GSpotifyError;

    #[test]
    fn test_collect_batch() {
        let results: Vec<Result<()>> = vec![
            Ok(()),
            Err(GSpotifyError::NotFound("Song not found".into())),
            Ok(()),
        ];
        let batch = collect_batch(&[1, 2, 3], results);
        assert_eq!(batch.succeeded, vec![1, 3]);
        assert_eq!(batch.failed, vec![(2, "Resource not found.".to_string())]);
        assert_eq!(batch.total(), 3);
        assert!(!batch.all_successful());
    }
}
