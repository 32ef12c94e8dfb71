//! Client-side list operations over fetched data.
//!
//! Browsing, searching and moderation pages filter and page through lists
//! the API already returned. These helpers keep that logic in one place.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{Album, Artist, Comment, Genre, Playlist, Role, Song, User};

/// Songs per page on the browse page.
pub const SONGS_PER_PAGE: usize = 20;
/// Users per page on the admin user list.
pub const USERS_PER_PAGE: usize = 10;
/// Songs shown on the dashboard.
pub const DASHBOARD_SONGS: usize = 12;

/// Records with a numeric ID.
pub trait Identified {
    fn id(&self) -> u64;
}

macro_rules! impl_identified {
    ($($ty:ty),*) => {
        $(impl Identified for $ty {
            fn id(&self) -> u64 {
                self.id
            }
        })*
    };
}

impl_identified!(Song, Playlist, User, Artist, Album, Comment, Genre);

/// Drop the record with `id`. Returns whether one was removed.
pub fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: u64) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

/// One page of a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T: Clone> Page<T> {
    /// Cut page `page` out of `items`.
    pub fn of(items: &[T], page: usize, per_page: usize) -> Self {
        Self {
            items: paginate(items, page, per_page).to_vec(),
            page,
            total_pages: total_pages(items.len(), per_page),
            total_items: items.len(),
        }
    }
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Slice of `items` for a 1-based page. Pages out of range are empty.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if page == 0 || per_page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `len` items.
pub fn total_pages(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    len.div_ceil(per_page)
}

/// Songs of one genre, or all songs when `genre_id` is `None`.
pub fn filter_by_genre(songs: &[Song], genre_id: Option<u64>) -> Vec<Song> {
    match genre_id {
        Some(id) => songs.iter().filter(|s| s.genre_id == id).cloned().collect(),
        None => songs.to_vec(),
    }
}

/// First songs for the dashboard feed.
pub fn dashboard_feed(songs: &[Song]) -> &[Song] {
    &songs[..songs.len().min(DASHBOARD_SONGS)]
}

/// Case-insensitive match on title or artist name.
pub fn search_songs<'a>(songs: &'a [Song], query: &str) -> Vec<&'a Song> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return songs.iter().collect();
    }
    songs
        .iter()
        .filter(|s| {
            s.title.to_lowercase().contains(&query)
                || s.display_artist().to_lowercase().contains(&query)
        })
        .collect()
}

/// Songs that can still be added to a playlist.
pub fn available_for_playlist(all: &[Song], in_playlist: &[Song]) -> Vec<Song> {
    let taken: HashSet<u64> = in_playlist.iter().map(|s| s.id).collect();
    all.iter().filter(|s| !taken.contains(&s.id)).cloned().collect()
}

/// Reflect a like or unlike on a local copy of a song.
///
/// Repeating the current state changes nothing; the count never goes
/// below zero.
pub fn apply_like(song: &mut Song, liked: bool) {
    if song.liked() == liked {
        return;
    }
    let count = song.like_count.unwrap_or(0);
    song.like_count = Some(if liked { count + 1 } else { count.saturating_sub(1) });
    song.is_liked = Some(liked);
}

/// Which result groups a search page shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchFilter {
    #[default]
    All,
    Songs,
    Artists,
}

impl SearchFilter {
    pub fn shows_songs(&self) -> bool {
        matches!(self, SearchFilter::All | SearchFilter::Songs)
    }

    pub fn shows_artists(&self) -> bool {
        matches!(self, SearchFilter::All | SearchFilter::Artists)
    }
}

impl FromStr for SearchFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(SearchFilter::All),
            "songs" | "song" => Ok(SearchFilter::Songs),
            "artists" | "artist" => Ok(SearchFilter::Artists),
            _ => Err(format!("Unknown search filter: {}", s)),
        }
    }
}

/// Account state filter on the admin user list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

/// Admin user list filters. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub search: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        if let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            if !user.username.to_lowercase().contains(&term)
                && !user.email.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        if self.role.is_some_and(|role| role != user.role) {
            return false;
        }
        match self.status {
            Some(UserStatus::Active) => user.is_active,
            Some(UserStatus::Inactive) => !user.is_active,
            None => true,
        }
    }

    pub fn apply(&self, users: &[User]) -> Vec<User> {
        users.iter().filter(|u| self.matches(u)).cloned().collect()
    }
}

/// Header counters on the admin user list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserCounts {
    pub total: usize,
    pub active: usize,
    pub artists: usize,
    pub admins: usize,
}

impl UserCounts {
    pub fn of(users: &[User]) -> Self {
        Self {
            total: users.len(),
            active: users.iter().filter(|u| u.is_active).count(),
            artists: users.iter().filter(|u| u.role == Role::Artist).count(),
            admins: users.iter().filter(|u| u.role == Role::Admin).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: u64, title: &str, artist: &str, genre_id: u64) -> Song {
        Song {
            id,
            title: title.to_string(),
            artist_name: Some(artist.to_string()),
            genre_id,
            ..Default::default()
        }
    }

    fn user(id: u64, name: &str, role: Role, active: bool) -> User {
        User {
            id,
            username: name.to_string(),
            email: format!("{}@example.com", name),
            role,
            is_active: active,
            ..Default::default()
        }
    }

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=45).collect();
        assert_eq!(paginate(&items, 1, SONGS_PER_PAGE).len(), 20);
        assert_eq!(paginate(&items, 3, SONGS_PER_PAGE), &[41, 42, 43, 44, 45]);
        assert!(paginate(&items, 4, SONGS_PER_PAGE).is_empty());
        assert!(paginate(&items, 0, SONGS_PER_PAGE).is_empty());
        assert_eq!(total_pages(45, 20), 3);
        assert_eq!(total_pages(40, 20), 2);
        assert_eq!(total_pages(0, 20), 0);
    }

    #[test]
    fn test_page_of() {
        let items: Vec<u32> = (1..=25).collect();
        let page = Page::of(&items, 2, USERS_PER_PAGE);
        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 25);
        assert!(page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_filter_by_genre() {
        let songs = vec![song(1, "a", "x", 1), song(2, "b", "x", 2), song(3, "c", "x", 1)];
        let ids: Vec<u64> = filter_by_genre(&songs, Some(1)).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(filter_by_genre(&songs, None).len(), 3);
    }

    #[test]
    fn test_apply_like() {
        let mut s = song(1, "a", "x", 1);
        s.like_count = Some(4);

        apply_like(&mut s, true);
        assert_eq!(s.is_liked, Some(true));
        assert_eq!(s.like_count, Some(5));

        apply_like(&mut s, true);
        assert_eq!(s.like_count, Some(5));

        apply_like(&mut s, false);
        assert_eq!(s.is_liked, Some(false));
        assert_eq!(s.like_count, Some(4));
    }

    #[test]
    fn test_unlike_floors_at_zero() {
        let mut s = Song {
            is_liked: Some(true),
            ..Default::default()
        };
        apply_like(&mut s, false);
        assert_eq!(s.like_count, Some(0));
    }

    #[test]
    fn test_search_songs() {
        let songs = vec![
            song(1, "Blue Monday", "New Order", 1),
            song(2, "Ceremony", "New Order", 1),
            song(3, "Karma Police", "Radiohead", 2),
        ];
        let hits: Vec<u64> = search_songs(&songs, "new order").iter().map(|s| s.id).collect();
        assert_eq!(hits, vec![1, 2]);
        let hits: Vec<u64> = search_songs(&songs, "POLICE").iter().map(|s| s.id).collect();
        assert_eq!(hits, vec![3]);
        assert_eq!(search_songs(&songs, "  ").len(), 3);
    }

    #[test]
    fn test_available_for_playlist() {
        let all = vec![song(1, "a", "x", 1), song(2, "b", "x", 1), song(3, "c", "x", 1)];
        let in_playlist = vec![song(2, "b", "x", 1)];
        let ids: Vec<u64> = available_for_playlist(&all, &in_playlist)
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_remove_by_id() {
        let mut songs = vec![song(1, "a", "x", 1), song(2, "b", "x", 1)];
        assert!(remove_by_id(&mut songs, 1));
        assert!(!remove_by_id(&mut songs, 1));
        assert_eq!(songs.len(), 1);
    }

    #[test]
    fn test_dashboard_feed() {
        let songs: Vec<Song> = (1..=30).map(|i| song(i, "t", "a", 1)).collect();
        assert_eq!(dashboard_feed(&songs).len(), DASHBOARD_SONGS);
        assert_eq!(dashboard_feed(&songs[..3]).len(), 3);
    }

    #[test]
    fn test_search_filter() {
        assert!(SearchFilter::All.shows_songs() && SearchFilter::All.shows_artists());
        assert!(!SearchFilter::Songs.shows_artists());
        assert!(!SearchFilter::Artists.shows_songs());
        assert_eq!("Artists".parse::<SearchFilter>(), Ok(SearchFilter::Artists));
    }

    #[test]
    fn test_user_filter_and_counts() {
        let users = vec![
            user(1, "alice", Role::Admin, true),
            user(2, "bob", Role::Artist, true),
            user(3, "carol", Role::Artist, false),
            user(4, "dave", Role::User, true),
        ];

        let filter = UserFilter {
            role: Some(Role::Artist),
            status: Some(UserStatus::Active),
            ..Default::default()
        };
        let ids: Vec<u64> = filter.apply(&users).iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2]);

        let filter = UserFilter {
            search: Some("CAROL@".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&users).len(), 1);
        assert_eq!(UserFilter::default().apply(&users).len(), 4);

        assert_eq!(
            UserCounts::of(&users),
            UserCounts {
                total: 4,
                active: 3,
                artists: 2,
                admins: 1
            }
        );
    }
}
