use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use gspotify::api::ListQuery;
use gspotify::library::UserStatus;
use gspotify::models::{AlbumForm, PlaylistUpdate};
use gspotify::{
    Config, GSpotify, LoginData, Notice, PlaylistForm, RepeatMode, Role, Route, SearchFilter,
    SignupData, Song, SongUpload, UserFilter,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gspotify-cli")]
#[command(about = "CLI for GSpotify - music streaming client", long_about = None)]
struct Cli {
    /// API base URL
    #[arg(long, env = "GSPOTIFY_API_URL", default_value = gspotify::config::DEFAULT_API_URL)]
    api_url: String,

    /// Session file (defaults to the user config directory)
    #[arg(long, env = "GSPOTIFY_SESSION")]
    session: Option<PathBuf>,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and save the session
    Login {
        username: String,

        #[arg(short, long, env = "GSPOTIFY_PASSWORD")]
        password: String,
    },
    /// Create an account
    Signup {
        username: String,
        email: String,

        #[arg(short, long)]
        password: String,

        #[arg(long)]
        full_name: Option<String>,

        /// Register as an artist
        #[arg(long)]
        artist: bool,

        /// Accept the terms of service
        #[arg(long)]
        agree_terms: bool,
    },
    /// Forget the saved session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Change the account password
    Password {
        #[arg(long)]
        old: String,

        #[arg(long)]
        new: String,
    },
    /// Browse songs
    Songs {
        /// Only songs of this genre ID
        #[arg(short, long)]
        genre: Option<u64>,

        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Show one song
    Song { id: u64 },
    /// Search songs and artists
    Search {
        query: String,

        #[arg(short, long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
    },
    /// Like a song
    Like { id: u64 },
    /// Remove a like
    Unlike { id: u64 },
    /// Print the lyrics of a song
    Lyrics { id: u64 },
    /// List comments on a song
    Comments { id: u64 },
    /// Comment on a song
    Comment { id: u64, text: String },
    /// Songs you liked
    Liked,
    /// List genres
    Genres,
    /// List artists
    Artists,
    /// Manage playlists
    Playlists {
        #[command(subcommand)]
        command: Option<PlaylistCommand>,
    },
    /// Queue a playlist and print what would play
    Play {
        playlist_id: u64,

        /// Queue position to start at
        #[arg(long, default_value_t = 0)]
        start: usize,

        #[arg(long)]
        shuffle: bool,

        #[arg(long, default_value_t = RepeatMode::None)]
        repeat: RepeatMode,
    },
    /// Show where a page path leads for the current user
    Route { path: String },
    /// Admin tools
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
    /// Artist tools
    Artist {
        #[command(subcommand)]
        command: ArtistCommand,
    },
}

#[derive(Subcommand)]
enum PlaylistCommand {
    /// Your playlists
    List,
    /// Show a playlist with its songs
    Show { id: u64 },
    Create {
        name: String,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        private: bool,
    },
    Update {
        id: u64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        public: Option<bool>,
    },
    Delete { id: u64 },
    /// Add a song to a playlist
    Add { playlist_id: u64, song_id: u64 },
    /// Remove a song from a playlist
    Remove { playlist_id: u64, song_id: u64 },
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Platform statistics
    Stats,
    /// List users
    Users {
        #[arg(short, long)]
        search: Option<String>,

        #[arg(short, long)]
        role: Option<Role>,

        #[arg(long)]
        status: Option<UserStatus>,

        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Songs awaiting review
    Pending,
    /// Approve one or more songs
    Approve {
        #[arg(required = true)]
        ids: Vec<u64>,
    },
    /// Reject a song
    Reject { id: u64, reason: String },
    /// Change a user's role
    Role { user_id: u64, role: Role },
    /// Activate or deactivate a user
    ToggleStatus { user_id: u64 },
    /// Manage genres
    Genre {
        #[command(subcommand)]
        command: GenreCommand,
    },
}

#[derive(Subcommand)]
enum GenreCommand {
    Create {
        name: String,

        #[arg(short, long)]
        description: Option<String>,
    },
    Rename { id: u64, name: String },
    Delete { id: u64 },
}

#[derive(Subcommand)]
enum ArtistCommand {
    /// Dashboard statistics and earnings
    Stats,
    /// Your songs, any status
    Songs,
    /// Upload an audio file
    Upload {
        file: PathBuf,

        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        genre: u64,

        #[arg(short, long)]
        album: Option<u64>,
    },
    /// Set the lyrics of a song
    Lyrics { song_id: u64, text: String },
    /// Manage albums
    Album {
        #[command(subcommand)]
        command: AlbumCommand,
    },
}

#[derive(Subcommand)]
enum AlbumCommand {
    /// Your albums
    List,
    Create {
        title: String,

        /// Release date (YYYY-MM-DD)
        #[arg(long)]
        release_date: Option<String>,

        #[arg(long)]
        cover_url: Option<String>,
    },
    Update {
        id: u64,

        #[arg(long)]
        title: String,

        #[arg(long)]
        release_date: Option<String>,

        #[arg(long)]
        cover_url: Option<String>,
    },
    Delete { id: u64 },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum FilterArg {
    All,
    Songs,
    Artists,
}

impl From<FilterArg> for SearchFilter {
    fn from(f: FilterArg) -> Self {
        match f {
            FilterArg::All => SearchFilter::All,
            FilterArg::Songs => SearchFilter::Songs,
            FilterArg::Artists => SearchFilter::Artists,
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "gspotify=warn",
        1 => "gspotify=debug",
        _ => "gspotify=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_songs(songs: &[Song]) {
    for (i, song) in songs.iter().enumerate() {
        println!(
            "{}. {} - {} [{}] (ID: {})",
            i + 1,
            song.display_artist(),
            song.title,
            song.duration_formatted(),
            song.id
        );
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        match e.downcast_ref::<gspotify::GSpotifyError>() {
            Some(err) => eprintln!("{}", Notice::from_error(err)),
            None => eprintln!("{}", Notice::error(e.to_string())),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::new(cli.api_url)?;
    if let Some(path) = cli.session {
        config = config.with_session_path(path);
    }
    let mut app = GSpotify::restore(config)?;

    match cli.command {
        Commands::Login { username, password } => {
            let user = app.login(&LoginData::new(username, password)).await?;
            println!("{}", Notice::success(format!("Logged in as {} ({})", user.username, user.role)));
        }
        Commands::Signup {
            username,
            email,
            password,
            full_name,
            artist,
            agree_terms,
        } => {
            let data = SignupData {
                username,
                email,
                confirm_password: Some(password.clone()),
                password,
                full_name,
                role: Some(if artist { Role::Artist } else { Role::User }),
                agreed_to_terms: agree_terms,
            };
            let user = app.signup(&data).await?;
            println!(
                "{}",
                Notice::success(format!("Account {} created. You can now log in.", user.username))
            );
        }
        Commands::Logout => {
            app.logout().await?;
            println!("{}", Notice::success("Logged out"));
        }
        Commands::Whoami => {
            if !app.is_authenticated().await {
                println!("{}", Notice::info("Not logged in"));
                return Ok(());
            }
            let user = app.users().get_current_user_profile().await?;
            println!("{} ({})", user.display_name(), user.username);
            println!("   Email: {}", user.email);
            println!("   Role: {}", user.role);
            println!("   Active: {}", user.is_active);
        }
        Commands::Password { old, new } => {
            app.change_password(&old, &new, &new).await?;
            println!("{}", Notice::success("Password changed"));
        }
        Commands::Songs { genre, page } => {
            let page = app.browse(genre, page).await?;
            print_songs(&page.items);
            println!(
                "Page {} of {} ({} songs)",
                page.page, page.total_pages, page.total_items
            );
        }
        Commands::Song { id } => {
            let song = app.music().get_song(id).await?;
            println!("{} - {}", song.display_artist(), song.title);
            if let Some(album) = song.display_album() {
                println!("   Album: {}", album);
            }
            if let Some(genre) = song.display_genre() {
                println!("   Genre: {}", genre);
            }
            println!("   Duration: {}", song.duration_formatted());
            println!("   Plays: {}", song.play_count);
            println!("   Likes: {}", song.like_count.unwrap_or(0));
            println!("   Status: {}", song.status.label());
            println!("   Stream: {}", app.music().stream_url(song.id));
        }
        Commands::Search { query, filter } => {
            println!("Searching for '{}'...", query);
            let results = app.search(&query, filter.into()).await?;
            if results.is_empty() {
                println!("{}", Notice::info("No results found"));
            }
            if !results.songs.is_empty() {
                println!("Songs:");
                print_songs(&results.songs);
            }
            if !results.artists.is_empty() {
                println!("Artists:");
                for artist in &results.artists {
                    println!("   {} (ID: {})", artist.display_name(), artist.id);
                }
            }
        }
        Commands::Like { id } => {
            set_liked(&app, id, true).await?;
            println!("{}", Notice::success("Added to liked songs"));
        }
        Commands::Unlike { id } => {
            set_liked(&app, id, false).await?;
            println!("{}", Notice::success("Removed from liked songs"));
        }
        Commands::Lyrics { id } => {
            let lyrics = app.music().get_song_lyrics(id).await?;
            if lyrics.lyrics.trim().is_empty() {
                println!("{}", Notice::info("No lyrics available"));
            } else {
                println!("{}", lyrics.lyrics);
            }
        }
        Commands::Comments { id } => {
            let comments = app.music().get_song_comments(id, ListQuery::default()).await?;
            for comment in &comments {
                println!("{}: {}", comment.user_name, comment.content);
            }
            println!("{} comments", comments.len());
        }
        Commands::Comment { id, text } => {
            app.add_comment(id, &text).await?;
            println!("{}", Notice::success("Comment added"));
        }
        Commands::Liked => {
            let songs = app.liked_songs().await?;
            print_songs(&songs);
        }
        Commands::Genres => {
            for genre in app.music().get_genres().await? {
                println!("{} (ID: {})", genre.name, genre.id);
            }
        }
        Commands::Artists => {
            for artist in app.music().get_artists(ListQuery::default()).await? {
                println!(
                    "{} - {} songs (ID: {})",
                    artist.display_name(),
                    artist.total_songs,
                    artist.id
                );
            }
        }
        Commands::Playlists { command } => {
            playlists(&app, command.unwrap_or(PlaylistCommand::List)).await?;
        }
        Commands::Play {
            playlist_id,
            start,
            shuffle,
            repeat,
        } => {
            let stream = app.play_playlist(playlist_id, start).await?;
            let player = app.player_mut();
            if shuffle {
                player.toggle_shuffle();
            }
            while player.repeat() != repeat {
                player.toggle_repeat();
            }

            for (i, song) in player.queue().iter().enumerate() {
                let marker = if Some(i) == player.current_index() { "▶" } else { " " };
                println!("{} {}. {} - {}", marker, i + 1, song.display_artist(), song.title);
            }
            println!(
                "Repeat: {}, Shuffle: {}",
                player.repeat(),
                if player.shuffle() { "on" } else { "off" }
            );
            println!("Stream: {}", stream.url);
        }
        Commands::Route { path } => {
            let route: Route = path.parse()?;
            let target = app.resolve(route).await;
            if target == route {
                println!("{} opens", route);
            } else {
                println!("{} redirects to {}", route, target);
            }
        }
        Commands::Admin { command } => admin(&app, command).await?,
        Commands::Artist { command } => artist(&app, command).await?,
    }

    Ok(())
}

async fn set_liked(app: &GSpotify, id: u64, liked: bool) -> gspotify::Result<()> {
    let mut song = app.music().get_song(id).await?;
    // toggle_like flips the local state, so start from the opposite one
    song.is_liked = Some(!liked);
    app.toggle_like(&mut song).await?;
    Ok(())
}

async fn playlists(app: &GSpotify, command: PlaylistCommand) -> Result<(), Box<dyn std::error::Error>> {
    let music = app.music();
    match command {
        PlaylistCommand::List => {
            for playlist in app.users().get_my_playlists(ListQuery::default()).await? {
                println!(
                    "{} - {} songs{} (ID: {})",
                    playlist.name,
                    playlist.song_count,
                    if playlist.is_public { "" } else { ", private" },
                    playlist.id
                );
            }
        }
        PlaylistCommand::Show { id } => {
            let playlist = music.get_playlist_with_songs(id).await?;
            println!("{} ({} songs)", playlist.name, playlist.len());
            if let Some(description) = &playlist.description {
                println!("   {}", description);
            }
            print_songs(playlist.songs.as_deref().unwrap_or_default());
        }
        PlaylistCommand::Create {
            name,
            description,
            private,
        } => {
            let playlist = app
                .create_playlist(&PlaylistForm {
                    name,
                    description,
                    is_public: !private,
                })
                .await?;
            println!("{}", Notice::success(format!("Created playlist {} (ID: {})", playlist.name, playlist.id)));
        }
        PlaylistCommand::Update {
            id,
            name,
            description,
            public,
        } => {
            let update = PlaylistUpdate {
                name,
                description,
                is_public: public,
            };
            let playlist = music.update_playlist(id, &update).await?;
            println!("{}", Notice::success(format!("Updated playlist {}", playlist.name)));
        }
        PlaylistCommand::Delete { id } => {
            music.delete_playlist(id).await?;
            println!("{}", Notice::success("Playlist deleted"));
        }
        PlaylistCommand::Add {
            playlist_id,
            song_id,
        } => {
            music.add_song_to_playlist(playlist_id, song_id).await?;
            println!("{}", Notice::success("Song added to playlist"));
        }
        PlaylistCommand::Remove {
            playlist_id,
            song_id,
        } => {
            music.remove_song_from_playlist(playlist_id, song_id).await?;
            println!("{}", Notice::success("Song removed from playlist"));
        }
    }
    Ok(())
}

async fn admin(app: &GSpotify, command: AdminCommand) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        AdminCommand::Stats => {
            let stats = app.admin().await?.get_dashboard_stats().await?;
            println!("Users: {} ({} artists)", stats.total_users, stats.total_artists);
            println!(
                "Songs: {} ({} approved, {} pending)",
                stats.total_songs, stats.approved_songs, stats.pending_songs
            );
            println!("Plays: {}", stats.total_plays);
            for genre in &stats.top_genres {
                println!("   {}: {} songs", genre.name, genre.song_count);
            }
        }
        AdminCommand::Users {
            search,
            role,
            status,
            page,
        } => {
            let filter = UserFilter {
                search,
                role,
                status,
            };
            let page = app.list_users(&filter, page).await?;
            for user in &page.items {
                println!(
                    "{} <{}> {}{} (ID: {})",
                    user.username,
                    user.email,
                    user.role,
                    if user.is_active { "" } else { ", inactive" },
                    user.id
                );
            }
            println!(
                "Page {} of {} ({} users)",
                page.page, page.total_pages, page.total_items
            );
        }
        AdminCommand::Pending => {
            let songs = app.admin().await?.get_pending_songs().await?;
            if songs.is_empty() {
                println!("{}", Notice::info("No songs pending review"));
            }
            print_songs(&songs);
        }
        AdminCommand::Approve { ids } => {
            let result = app.approve_songs(&ids).await?;
            println!("✅ Approved {}/{}", result.succeeded.len(), result.total());
            for (id, err) in &result.failed {
                println!("   - {}: {}", id, err);
            }
        }
        AdminCommand::Reject { id, reason } => {
            app.reject_song(id, &reason).await?;
            println!("{}", Notice::success(format!("Song {} rejected", id)));
        }
        AdminCommand::Role { user_id, role } => {
            app.admin().await?.change_user_role(user_id, role).await?;
            println!("{}", Notice::success(format!("User {} is now {}", user_id, role)));
        }
        AdminCommand::ToggleStatus { user_id } => {
            let response = app.admin().await?.toggle_user_status(user_id).await?;
            println!("{}", Notice::success(response.message));
        }
        AdminCommand::Genre { command } => {
            let admin = app.admin().await?;
            match command {
                GenreCommand::Create { name, description } => {
                    let genre = admin.create_genre(&name, description.as_deref()).await?;
                    println!("{}", Notice::success(format!("Created genre {} (ID: {})", genre.name, genre.id)));
                }
                GenreCommand::Rename { id, name } => {
                    let genre = admin.update_genre(id, &name).await?;
                    println!("{}", Notice::success(format!("Renamed genre to {}", genre.name)));
                }
                GenreCommand::Delete { id } => {
                    admin.delete_genre(id).await?;
                    println!("{}", Notice::success("Genre deleted"));
                }
            }
        }
    }
    Ok(())
}

async fn artist(app: &GSpotify, command: ArtistCommand) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        ArtistCommand::Stats => {
            let api = app.artist().await?;
            let (stats, earnings) = futures_util::try_join!(api.get_dashboard_stats(), api.get_earnings())?;
            println!(
                "Songs: {} ({} approved, {} pending)",
                stats.total_songs, stats.approved_songs, stats.pending_songs
            );
            println!("Plays: {}", stats.total_plays);
            for song in &stats.top_songs {
                println!("   {}: {} plays", song.title, song.plays);
            }
            println!(
                "Estimated earnings: {:.2} {}",
                earnings.estimated_earnings, earnings.currency
            );
        }
        ArtistCommand::Songs => {
            let songs = app.artist().await?.get_my_songs(ListQuery::default()).await?;
            for song in &songs {
                println!("{} [{}] (ID: {})", song.title, song.status.label(), song.id);
            }
        }
        ArtistCommand::Upload {
            file,
            title,
            genre,
            album,
        } => {
            let mut upload = SongUpload::from_path(&title, genre, &file).await?;
            if let Some(album_id) = album {
                upload = upload.with_album(album_id);
            }
            println!("Uploading {}...", file.display());
            let song = app.upload_song(upload).await?;
            println!(
                "{}",
                Notice::success(format!("Uploaded '{}' (ID: {}), awaiting approval", song.title, song.id))
            );
        }
        ArtistCommand::Lyrics { song_id, text } => {
            app.artist().await?.update_lyrics(song_id, &text).await?;
            println!("{}", Notice::success("Lyrics saved"));
        }
        ArtistCommand::Album { command } => {
            let api = app.artist().await?;
            match command {
                AlbumCommand::List => {
                    let user = app.require_role(Role::Artist).await?;
                    for album in app.music().get_albums(Some(user.id), ListQuery::default()).await? {
                        println!(
                            "{} ({}) - {} songs (ID: {})",
                            album.title,
                            album.release_year().map(|y| y.to_string()).unwrap_or_else(|| "?".into()),
                            album.song_count.unwrap_or(0),
                            album.id
                        );
                    }
                }
                AlbumCommand::Create {
                    title,
                    release_date,
                    cover_url,
                } => {
                    let form = AlbumForm {
                        title,
                        release_date,
                        cover_art_url: cover_url,
                        ..Default::default()
                    };
                    let album = api.create_album(&form).await?;
                    println!("{}", Notice::success(format!("Created album {} (ID: {})", album.title, album.id)));
                }
                AlbumCommand::Update {
                    id,
                    title,
                    release_date,
                    cover_url,
                } => {
                    let form = AlbumForm {
                        title,
                        release_date,
                        cover_art_url: cover_url,
                        ..Default::default()
                    };
                    let album = api.update_album(id, &form).await?;
                    println!("{}", Notice::success(format!("Updated album {}", album.title)));
                }
                AlbumCommand::Delete { id } => {
                    api.delete_album(id).await?;
                    println!("{}", Notice::success("Album deleted"));
                }
            }
        }
    }
    Ok(())
}
