//! Authentication endpoints.

use serde_json::json;
use tracing::info;

use crate::api::ApiClient;
use crate::error::{GSpotifyError, Result};
use crate::models::{AuthResponse, LoginData, MessageResponse, Role, SignupData, User};

/// Client for `/auth/*`.
#[derive(Debug, Clone)]
pub struct AuthApi {
    api: ApiClient,
}

impl AuthApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Log in and store the returned token in the shared session.
    ///
    /// The backend expects an OAuth2 password form, not JSON. Bad
    /// credentials come back as a 401 carrying the reason in `detail`.
    pub async fn login(&self, credentials: &LoginData) -> Result<AuthResponse> {
        let form = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ];
        let auth: AuthResponse = self
            .api
            .post_form("auth/login", &form)
            .await
            .map_err(rejected_login)?;
        self.api.session().write().await.set(&auth)?;
        Ok(auth)
    }

    /// Create an account. Role defaults to `user`.
    pub async fn signup(&self, data: &SignupData) -> Result<User> {
        let mut payload = data.clone();
        payload.role = Some(payload.role.unwrap_or(Role::User));
        let user: User = self.api.post_json("auth/signup", &payload).await?;
        info!("Created account {} ({})", user.username, user.role);
        Ok(user)
    }

    /// Change the logged-in user's password.
    pub async fn change_password(&self, old_password: &str, new_password: &str) -> Result<()> {
        let _: Option<MessageResponse> = self
            .api
            .post_json(
                "auth/change-password",
                &json!({
                    "old_password": old_password,
                    "new_password": new_password,
                }),
            )
            .await?;
        Ok(())
    }

    /// Drop the local session. The backend keeps no server-side session.
    pub async fn logout(&self) -> Result<()> {
        self.api.session().write().await.clear()?;
        info!("Logged out");
        Ok(())
    }
}

/// A 401 from the login endpoint means bad credentials, not an expired session.
fn rejected_login(err: GSpotifyError) -> GSpotifyError {
    match err {
        GSpotifyError::Unauthorized(detail) => GSpotifyError::Api {
            status: 401,
            detail,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_login_keeps_detail() {
        let err = rejected_login(GSpotifyError::Unauthorized(
            "Incorrect username or password".to_string(),
        ));
        assert_eq!(err.status(), Some(401));
        assert!(!err.requires_login());
        assert_eq!(err.user_message(), "Incorrect username or password");

        let err = rejected_login(GSpotifyError::RateLimited);
        assert!(matches!(err, GSpotifyError::RateLimited));
    }
}
