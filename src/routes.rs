//! Page routes and role gating.
//!
//! Every page of the app maps to a [`Route`]. [`guard`] decides whether the
//! current session may open it or where it is sent instead.

use std::fmt;
use std::str::FromStr;

use crate::models::Role;
use crate::session::Session;

/// A page of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Signup,
    Root,
    Dashboard,
    Search,
    Browse,
    LikedSongs,
    Playlists,
    PlaylistDetail(u64),
    Profile,
    Settings,
    ArtistDashboard,
    ArtistUpload,
    ArtistAlbums,
    AdminDashboard,
    AdminUsers,
    AdminPendingSongs,
}

/// Result of [`guard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(Route),
}

impl Route {
    /// Parse a path such as `/playlists/3`. Query strings, fragments and
    /// a trailing slash are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Route::Root,
            ["login"] => Route::Login,
            ["signup"] => Route::Signup,
            ["dashboard"] => Route::Dashboard,
            ["search"] => Route::Search,
            ["browse"] => Route::Browse,
            ["liked-songs"] => Route::LikedSongs,
            ["playlists"] => Route::Playlists,
            ["playlists", id] => Route::PlaylistDetail(id.parse().ok()?),
            ["profile"] => Route::Profile,
            ["settings"] => Route::Settings,
            ["artist", "dashboard"] => Route::ArtistDashboard,
            ["artist", "upload"] => Route::ArtistUpload,
            ["artist", "albums"] => Route::ArtistAlbums,
            ["admin", "dashboard"] => Route::AdminDashboard,
            ["admin", "users"] => Route::AdminUsers,
            ["admin", "pending-songs"] => Route::AdminPendingSongs,
            _ => return None,
        };
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::Root => "/".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Search => "/search".to_string(),
            Route::Browse => "/browse".to_string(),
            Route::LikedSongs => "/liked-songs".to_string(),
            Route::Playlists => "/playlists".to_string(),
            Route::PlaylistDetail(id) => format!("/playlists/{}", id),
            Route::Profile => "/profile".to_string(),
            Route::Settings => "/settings".to_string(),
            Route::ArtistDashboard => "/artist/dashboard".to_string(),
            Route::ArtistUpload => "/artist/upload".to_string(),
            Route::ArtistAlbums => "/artist/albums".to_string(),
            Route::AdminDashboard => "/admin/dashboard".to_string(),
            Route::AdminUsers => "/admin/users".to_string(),
            Route::AdminPendingSongs => "/admin/pending-songs".to_string(),
        }
    }

    /// Login and signup, which logged-in users are sent away from.
    pub fn is_auth_page(&self) -> bool {
        matches!(self, Route::Login | Route::Signup)
    }

    /// Role needed beyond being logged in.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Route::ArtistDashboard | Route::ArtistUpload | Route::ArtistAlbums => {
                Some(Role::Artist)
            }
            Route::AdminDashboard | Route::AdminUsers | Route::AdminPendingSongs => {
                Some(Role::Admin)
            }
            _ => None,
        }
    }

    /// Pages shown in the sidebar for a role, in display order.
    pub fn navigation(role: Role) -> Vec<Route> {
        let mut routes = vec![
            Route::Dashboard,
            Route::Search,
            Route::Browse,
            Route::LikedSongs,
            Route::Playlists,
        ];
        if role.satisfies(Role::Artist) {
            routes.extend([Route::ArtistDashboard, Route::ArtistUpload, Route::ArtistAlbums]);
        }
        if role.satisfies(Role::Admin) {
            routes.extend([
                Route::AdminDashboard,
                Route::AdminUsers,
                Route::AdminPendingSongs,
            ]);
        }
        routes
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s).ok_or_else(|| format!("Unknown route: {}", s))
    }
}

/// Decide whether `session` may open `route`.
pub fn guard(route: Route, session: &Session) -> Access {
    if route == Route::Root {
        return Access::Redirect(Route::Dashboard);
    }

    if route.is_auth_page() {
        return if session.is_authenticated() {
            Access::Redirect(Route::Dashboard)
        } else {
            Access::Allow
        };
    }

    if !session.is_authenticated() {
        return Access::Redirect(Route::Login);
    }

    match route.required_role() {
        Some(required) if !session.role().is_some_and(|r| r.satisfies(required)) => {
            Access::Redirect(Route::Dashboard)
        }
        _ => Access::Allow,
    }
}

/// Follow redirects until a page is allowed.
pub fn resolve(route: Route, session: &Session) -> Route {
    let mut current = route;
    // Every redirect lands on Login or Dashboard, which settle in one step.
    for _ in 0..3 {
        match guard(current, session) {
            Access::Allow => return current,
            Access::Redirect(next) => current = next,
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthResponse, User};

    fn session_as(role: Role) -> Session {
        let mut session = Session::in_memory();
        session
            .set(&AuthResponse {
                access_token: "token".to_string(),
                token_type: "bearer".to_string(),
                user: User {
                    id: 1,
                    username: "tester".to_string(),
                    role,
                    is_active: true,
                    ..Default::default()
                },
            })
            .unwrap();
        session
    }

    #[test]
    fn test_parse_and_path() {
        assert_eq!(Route::parse("/"), Some(Route::Root));
        assert_eq!(Route::parse("/playlists/42"), Some(Route::PlaylistDetail(42)));
        assert_eq!(Route::parse("/admin/pending-songs/"), Some(Route::AdminPendingSongs));
        assert_eq!(Route::parse("/search?q=blue"), Some(Route::Search));
        assert_eq!(Route::parse("/playlists/abc"), None);
        assert_eq!(Route::parse("/nowhere"), None);
        assert_eq!(Route::PlaylistDetail(7).path(), "/playlists/7");
        assert_eq!("/artist/albums".parse::<Route>(), Ok(Route::ArtistAlbums));
    }

    #[test]
    fn test_guest_is_sent_to_login() {
        let guest = Session::in_memory();
        assert_eq!(guard(Route::Dashboard, &guest), Access::Redirect(Route::Login));
        assert_eq!(guard(Route::AdminUsers, &guest), Access::Redirect(Route::Login));
        assert_eq!(guard(Route::Login, &guest), Access::Allow);
        assert_eq!(resolve(Route::Root, &guest), Route::Login);
    }

    #[test]
    fn test_logged_in_skips_auth_pages() {
        let user = session_as(Role::User);
        assert_eq!(guard(Route::Signup, &user), Access::Redirect(Route::Dashboard));
        assert_eq!(guard(Route::Root, &user), Access::Redirect(Route::Dashboard));
        assert_eq!(guard(Route::PlaylistDetail(3), &user), Access::Allow);
    }

    #[test]
    fn test_role_gating() {
        let user = session_as(Role::User);
        let artist = session_as(Role::Artist);
        let admin = session_as(Role::Admin);

        assert_eq!(guard(Route::ArtistUpload, &user), Access::Redirect(Route::Dashboard));
        assert_eq!(guard(Route::ArtistUpload, &artist), Access::Allow);
        assert_eq!(guard(Route::ArtistUpload, &admin), Access::Allow);

        assert_eq!(guard(Route::AdminUsers, &artist), Access::Redirect(Route::Dashboard));
        assert_eq!(guard(Route::AdminUsers, &admin), Access::Allow);
    }

    #[test]
    fn test_navigation() {
        assert_eq!(Route::navigation(Role::User).len(), 5);
        assert!(Route::navigation(Role::Artist).contains(&Route::ArtistAlbums));
        assert!(!Route::navigation(Role::Artist).contains(&Route::AdminUsers));
        assert_eq!(Route::navigation(Role::Admin).len(), 11);
    }
}
