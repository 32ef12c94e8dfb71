//! Common types shared across all models.

use serde::{Deserialize, Serialize};

/// Account role. Serialized lowercase, as the backend emits it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular listener.
    #[default]
    #[serde(alias = "USER")]
    User,
    /// Can upload songs and manage albums.
    #[serde(alias = "ARTIST")]
    Artist,
    /// Can moderate songs, users and genres.
    #[serde(alias = "ADMIN")]
    Admin,
}

impl Role {
    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Artist => "artist",
            Role::Admin => "admin",
        }
    }

    /// Whether this role opens pages that require `required`.
    ///
    /// Admins may enter artist pages; nobody else is promoted.
    pub fn satisfies(&self, required: Role) -> bool {
        match required {
            Role::User => true,
            Role::Artist => matches!(self, Role::Artist | Role::Admin),
            Role::Admin => matches!(self, Role::Admin),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "artist" => Ok(Role::Artist),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Song genre.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    /// Genre ID.
    pub id: u64,

    /// Display name.
    pub name: String,

    /// Optional description (admin-managed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Paged list envelope used by a few list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Total number of items across all pages.
    #[serde(default)]
    pub total: u64,
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    /// Number of pages.
    #[serde(default)]
    pub pages: u32,
}

fn default_page() -> u32 {
    1
}

impl<T> PaginatedResponse<T> {
    /// Single page holding every item of an unpaged list.
    pub fn single(items: Vec<T>) -> Self {
        let len = items.len();
        Self {
            items,
            total: len as u64,
            page: 1,
            size: len as u32,
            pages: u32::from(len > 0),
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

/// Plain `{"message": "..."}` acknowledgement.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    /// Human-readable outcome.
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        let role: Role = serde_json::from_str("\"artist\"").unwrap();
        assert_eq!(role, Role::Artist);
        let role: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, Role::Admin);
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }

    #[test]
    fn test_role_hierarchy() {
        assert!(Role::Admin.satisfies(Role::Artist));
        assert!(Role::Artist.satisfies(Role::Artist));
        assert!(!Role::User.satisfies(Role::Artist));
        assert!(!Role::Artist.satisfies(Role::Admin));
        assert!(Role::User.satisfies(Role::User));
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_genre_without_description() {
        let genre: Genre = serde_json::from_str(r#"{"id": 1, "name": "Pop"}"#).unwrap();
        assert_eq!(genre.name, "Pop");
        assert!(genre.description.is_none());
    }
}
