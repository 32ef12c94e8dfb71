//! Persisted login session.
//!
//! Holds the bearer token and the logged-in user, and keeps them in a JSON
//! file so that a later process can pick the session back up.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{AuthResponse, Role, User};

/// Session shared between the API client and the facade.
pub type SharedSession = Arc<RwLock<Session>>;

/// On-disk session format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct StoredSession {
    access_token: String,
    #[serde(default)]
    user: Option<User>,
}

/// Login session store.
#[derive(Debug, Clone, Default)]
pub struct Session {
    path: Option<PathBuf>,
    stored: Option<StoredSession>,
}

impl Session {
    /// An empty session that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// An empty session persisted at `path`.
    pub fn at<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            stored: None,
        }
    }

    /// Load the session stored at `path`.
    ///
    /// A missing or unreadable file yields an empty session.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let mut session = Self::at(path);

        match fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str::<StoredSession>(&text) {
                Ok(stored) if !stored.access_token.is_empty() => {
                    debug!("Restored session from {}", path.display());
                    session.stored = Some(stored);
                }
                Ok(_) => {}
                Err(e) => warn!("Ignoring corrupt session file {}: {}", path.display(), e),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Could not read session file {}: {}", path.display(), e),
        }

        session
    }

    /// Wrap into the shared handle used by the API client.
    pub fn shared(self) -> SharedSession {
        Arc::new(RwLock::new(self))
    }

    /// File the session is persisted to, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Store a fresh login and persist it.
    pub fn set(&mut self, auth: &AuthResponse) -> Result<()> {
        self.stored = Some(StoredSession {
            access_token: auth.access_token.clone(),
            user: Some(auth.user.clone()),
        });
        info!(
            "Logged in as {} ({})",
            auth.user.username, auth.user.role
        );
        self.save()
    }

    /// Replace the cached user (after a profile refresh or update).
    pub fn set_user(&mut self, user: User) -> Result<()> {
        if let Some(stored) = self.stored.as_mut() {
            stored.user = Some(user);
            self.save()?;
        }
        Ok(())
    }

    /// Write the session file.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let Some(stored) = &self.stored else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(stored)?)?;
        debug!("Saved session to {}", path.display());
        Ok(())
    }

    /// Forget the token and user and delete the session file.
    pub fn clear(&mut self) -> Result<()> {
        self.stored = None;
        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Ok(()) => debug!("Removed session file {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// The bearer token, if logged in.
    pub fn token(&self) -> Option<&str> {
        self.stored.as_ref().map(|s| s.access_token.as_str())
    }

    /// The logged-in user, if known.
    pub fn current_user(&self) -> Option<&User> {
        self.stored.as_ref().and_then(|s| s.user.as_ref())
    }

    /// Whether a token is stored.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Role of the logged-in user.
    pub fn role(&self) -> Option<Role> {
        self.current_user().map(|u| u.role)
    }

    /// Exact role match.
    pub fn has_role(&self, role: Role) -> bool {
        self.role() == Some(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(role: Role) -> AuthResponse {
        AuthResponse {
            access_token: "tok-123".to_string(),
            token_type: "bearer".to_string(),
            user: User {
                id: 1,
                username: "alice".to_string(),
                role,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_in_memory_session() {
        let mut session = Session::in_memory();
        assert!(!session.is_authenticated());

        session.set(&auth(Role::Artist)).unwrap();
        assert_eq!(session.token(), Some("tok-123"));
        assert!(session.has_role(Role::Artist));
        assert!(!session.has_role(Role::Admin));

        session.clear().unwrap();
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_persist_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut session = Session::at(&path);
        session.set(&auth(Role::Admin)).unwrap();
        assert!(path.exists());

        let restored = Session::load(&path);
        assert_eq!(restored.token(), Some("tok-123"));
        assert_eq!(restored.role(), Some(Role::Admin));

        let mut restored = restored;
        restored.clear().unwrap();
        assert!(!path.exists());
        assert!(!Session::load(&path).is_authenticated());
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let session = Session::load(&path);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_shared_session_sees_logout() {
        let mut session = Session::in_memory();
        session.set(&auth(Role::User)).unwrap();
        let shared = session.shared();
        let other = shared.clone();

        tokio_test::block_on(async {
            other.write().await.clear().unwrap();
            assert!(!shared.read().await.is_authenticated());
        });
    }

    #[test]
    fn test_clear_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::at(dir.path().join("missing.json"));
        assert!(session.clear().is_ok());
    }
}
