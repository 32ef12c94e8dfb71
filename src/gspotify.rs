//! High-level interface tying the API clients, session and player together.

use tracing::{debug, info};

use crate::api::{
    AdminApi, ApiClient, ArtistApi, AuthApi, BatchModerationResult, ListQuery, MusicApi, SongQuery,
    SongUpload, UserApi,
};
use crate::config::Config;
use crate::error::{GSpotifyError, Result};
use crate::library::{self, Page, SearchFilter, UserFilter};
use crate::models::{
    LoginData, Playlist, PlaylistForm, Role, SearchResults, SearchType, SignupData, Song,
    StreamInfo, User,
};
use crate::player::Player;
use crate::routes::{self, Access, Route};
use crate::session::{Session, SharedSession};
use crate::validation;

/// Main GSpotify interface.
///
/// Wraps the service clients behind one session and keeps the player state
/// for the current process.
///
/// # Example
///
/// ```rust,no_run
/// use gspotify::{Config, GSpotify, LoginData};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let app = GSpotify::restore(Config::from_env()?)?;
///
///     if !app.is_authenticated().await {
///         app.login(&LoginData::new("listener", "Secret123")).await?;
///     }
///
///     // First page of songs, all genres
///     let page = app.browse(None, 1).await?;
///     for song in &page.items {
///         println!("{} - {}", song.display_artist(), song.title);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct GSpotify {
    config: Config,
    session: SharedSession,
    auth: AuthApi,
    music: MusicApi,
    users: UserApi,
    artist: ArtistApi,
    admin: AdminApi,
    player: Player,
}

impl GSpotify {
    /// Create an instance with an empty session persisted at
    /// `config.session_path`.
    pub fn new(config: Config) -> Result<Self> {
        let session = Session::at(&config.session_path);
        Self::with_session(config, session)
    }

    /// Create an instance that picks up the session saved by a previous run.
    pub fn restore(config: Config) -> Result<Self> {
        let session = Session::load(&config.session_path);
        Self::with_session(config, session)
    }

    /// Create an instance around an existing session.
    pub fn with_session(config: Config, session: Session) -> Result<Self> {
        let session = session.shared();
        let api = ApiClient::new(&config, session.clone())?;

        Ok(Self {
            auth: AuthApi::new(api.clone()),
            music: MusicApi::new(api.clone()),
            users: UserApi::new(api.clone()),
            artist: ArtistApi::new(api.clone()),
            admin: AdminApi::new(api),
            config,
            session,
            player: Player::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub fn music(&self) -> &MusicApi {
        &self.music
    }

    pub fn users(&self) -> &UserApi {
        &self.users
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    // ==================
    // AUTHENTICATION
    // ==================

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    /// The logged-in user, as cached in the session.
    pub async fn current_user(&self) -> Option<User> {
        self.session.read().await.current_user().cloned()
    }

    /// Validate the form, log in and persist the session.
    pub async fn login(&self, credentials: &LoginData) -> Result<User> {
        validation::validate_login(credentials)?;
        let auth = self.auth.login(credentials).await?;
        Ok(auth.user)
    }

    /// Validate the form and create an account. Does not log in.
    pub async fn signup(&self, data: &SignupData) -> Result<User> {
        validation::validate_signup(data)?;
        self.auth.signup(data).await
    }

    /// Drop the session and stop playback.
    pub async fn logout(&mut self) -> Result<()> {
        self.auth.logout().await?;
        self.player.reset();
        Ok(())
    }

    pub async fn change_password(&self, old: &str, new: &str, confirm: &str) -> Result<()> {
        validation::validate_password_change(old, new, confirm)?;
        self.auth.change_password(old, new).await
    }

    /// Where `route` leads for the current session.
    pub async fn guard(&self, route: Route) -> Access {
        routes::guard(route, &*self.session.read().await)
    }

    /// Final page after following redirects.
    pub async fn resolve(&self, route: Route) -> Route {
        routes::resolve(route, &*self.session.read().await)
    }

    /// The logged-in user, if their role satisfies `role`.
    pub async fn require_role(&self, role: Role) -> Result<User> {
        let session = self.session.read().await;
        let user = match (session.is_authenticated(), session.current_user()) {
            (true, Some(user)) => user,
            _ => return Err(GSpotifyError::NotAuthenticated),
        };
        if !user.role.satisfies(role) {
            return Err(GSpotifyError::PermissionDenied(format!(
                "{} access required",
                role
            )));
        }
        Ok(user.clone())
    }

    // ==================
    // LISTENING
    // ==================

    /// Songs for the dashboard feed.
    pub async fn dashboard(&self) -> Result<Vec<Song>> {
        let songs = self.music.get_songs(SongQuery::default()).await?;
        Ok(library::dashboard_feed(&songs).to_vec())
    }

    /// One page of songs, optionally of one genre.
    pub async fn browse(&self, genre_id: Option<u64>, page: usize) -> Result<Page<Song>> {
        let songs = self.music.get_songs(SongQuery::default()).await?;
        let songs = library::filter_by_genre(&songs, genre_id);
        Ok(Page::of(&songs, page.max(1), self.config.page_size))
    }

    /// Search songs and artists, keeping only the groups `filter` shows.
    pub async fn search(&self, query: &str, filter: SearchFilter) -> Result<SearchResults> {
        let mut results = self
            .music
            .search(query, SearchType::All, ListQuery::default())
            .await?;
        if !filter.shows_songs() {
            results.songs.clear();
        }
        if !filter.shows_artists() {
            results.artists.clear();
        }
        Ok(results)
    }

    /// Like or unlike a song and update the local copy.
    ///
    /// Returns the new liked state.
    pub async fn toggle_like(&self, song: &mut Song) -> Result<bool> {
        let liked = !song.liked();
        if liked {
            let response = self.music.like_song(song.id).await?;
            library::apply_like(song, true);
            if let Some(count) = response.like_count {
                song.like_count = Some(count);
            }
        } else {
            self.music.unlike_song(song.id).await?;
            library::apply_like(song, false);
        }
        debug!("Song {} liked: {}", song.id, liked);
        Ok(liked)
    }

    pub async fn liked_songs(&self) -> Result<Vec<Song>> {
        self.users.get_liked_songs(ListQuery::default()).await
    }

    /// Validate and post a comment.
    pub async fn add_comment(&self, song_id: u64, content: &str) -> Result<()> {
        validation::validate_comment(content)?;
        self.music.add_comment(song_id, content.trim()).await?;
        Ok(())
    }

    // ==================
    // PLAYLISTS
    // ==================

    pub async fn create_playlist(&self, form: &PlaylistForm) -> Result<Playlist> {
        validation::validate_playlist(form)?;
        let mut form = form.clone();
        form.name = form.name.trim().to_string();
        let playlist = self.music.create_playlist(&form).await?;
        info!("Created playlist {} '{}'", playlist.id, playlist.name);
        Ok(playlist)
    }

    /// Songs that can still be added to a playlist, filtered by `query`.
    pub async fn playlist_candidates(&self, playlist_id: u64, query: &str) -> Result<Vec<Song>> {
        let (all, current) = futures_util::try_join!(
            self.music.get_songs(SongQuery::default()),
            self.music.get_playlist_songs(playlist_id)
        )?;
        let available = library::available_for_playlist(&all, &current);
        Ok(library::search_songs(&available, query)
            .into_iter()
            .cloned()
            .collect())
    }

    // ==================
    // PLAYBACK
    // ==================

    /// Load a playlist into the queue and start at `start`.
    ///
    /// A `start` past the end leaves the queue loaded but stopped.
    pub async fn play_playlist(&mut self, playlist_id: u64, start: usize) -> Result<StreamInfo> {
        let songs = self.music.get_playlist_songs(playlist_id).await?;
        if songs.is_empty() {
            return Err(GSpotifyError::EmptyQueue);
        }
        self.player.set_queue(songs, start);
        let stream = self.current_stream().ok_or(GSpotifyError::EmptyQueue)?;
        self.player.resume();
        Ok(stream)
    }

    /// Play a single song outside the queue.
    pub fn play_song(&mut self, song: Song) -> StreamInfo {
        let info = self.music.stream_info(song.id);
        self.player.play_song(song);
        info
    }

    pub fn next_track(&mut self) -> Option<StreamInfo> {
        self.player.next_song()?;
        self.current_stream()
    }

    pub fn previous_track(&mut self) -> Option<StreamInfo> {
        self.player.previous_song()?;
        self.current_stream()
    }

    /// Stream of the song the player is on.
    pub fn current_stream(&self) -> Option<StreamInfo> {
        self.player
            .current_song()
            .map(|song| self.music.stream_info(song.id))
    }

    // ==================
    // ARTIST
    // ==================

    pub async fn artist(&self) -> Result<&ArtistApi> {
        self.require_role(Role::Artist).await?;
        Ok(&self.artist)
    }

    /// Upload a song as the logged-in artist.
    pub async fn upload_song(&self, upload: SongUpload) -> Result<Song> {
        self.artist().await?.upload_song(upload).await
    }

    // ==================
    // ADMIN
    // ==================

    pub async fn admin(&self) -> Result<&AdminApi> {
        self.require_role(Role::Admin).await?;
        Ok(&self.admin)
    }

    /// One page of the user list after filtering.
    pub async fn list_users(&self, filter: &UserFilter, page: usize) -> Result<Page<User>> {
        let users = self.admin().await?.get_users(ListQuery::default()).await?;
        let users = filter.apply(&users);
        Ok(Page::of(&users, page.max(1), library::USERS_PER_PAGE))
    }

    /// Reject a song after checking the reason.
    pub async fn reject_song(&self, song_id: u64, reason: &str) -> Result<()> {
        validation::validate_reject_reason(reason)?;
        self.admin().await?.reject_song(song_id, reason.trim()).await?;
        Ok(())
    }

    pub async fn approve_songs(&self, song_ids: &[u64]) -> Result<BatchModerationResult> {
        Ok(self.admin().await?.approve_songs(song_ids).await)
    }
}
