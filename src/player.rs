//! Playback queue and transport state.
//!
//! [`Player`] holds what the audio sink needs: the current song, the queue,
//! and the repeat/shuffle modes. It does not decode audio itself; the sink
//! loads [`MusicApi::stream_url`](crate::api::MusicApi::stream_url) for the
//! current song and reports time updates and track ends back here.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Song;

/// Volume restored when unmuting.
pub const DEFAULT_VOLUME: f32 = 0.8;

/// What happens when the end of the queue is reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop after the last song.
    #[default]
    None,
    /// Replay the current song.
    One,
    /// Wrap around to the first song.
    All,
}

impl RepeatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatMode::None => "none",
            RepeatMode::One => "one",
            RepeatMode::All => "all",
        }
    }

    /// none → one → all → none.
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::None => RepeatMode::One,
            RepeatMode::One => RepeatMode::All,
            RepeatMode::All => RepeatMode::None,
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepeatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(RepeatMode::None),
            "one" => Ok(RepeatMode::One),
            "all" => Ok(RepeatMode::All),
            _ => Err(format!("Unknown repeat mode: {}", s)),
        }
    }
}

/// Outcome of [`Player::on_track_ended`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackEnd {
    /// Repeat-one: the same song starts again.
    Restarted,
    /// Moved on to the song at this queue index.
    Advanced(usize),
    /// End of the queue; nothing more to play.
    Finished,
}

/// Player state.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    current_song: Option<Song>,
    is_playing: bool,
    duration: f64,
    current_time: f64,
    volume: f32,
    queue: Vec<Song>,
    current_index: Option<usize>,
    repeat: RepeatMode,
    shuffle: bool,
    minimized: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            current_song: None,
            is_playing: false,
            duration: 0.0,
            current_time: 0.0,
            volume: DEFAULT_VOLUME,
            queue: Vec::new(),
            current_index: None,
            repeat: RepeatMode::None,
            shuffle: false,
            minimized: false,
        }
    }
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================
    // ACCESSORS
    // ==================

    pub fn current_song(&self) -> Option<&Song> {
        self.current_song.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Track length in seconds, as reported by the sink.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Playback position in seconds.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn queue(&self) -> &[Song] {
        &self.queue
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Position as a fraction of the duration, 0.0 when unknown.
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    // ==================
    // TRANSPORT
    // ==================

    /// Start a song from the beginning. The queue is left untouched.
    pub fn play_song(&mut self, song: Song) {
        debug!("Playing song {} '{}'", song.id, song.title);
        self.current_song = Some(song);
        self.is_playing = true;
        self.current_time = 0.0;
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    pub fn resume(&mut self) {
        self.is_playing = true;
    }

    /// Advance using the thread-local RNG for shuffle.
    pub fn next_song(&mut self) -> Option<&Song> {
        self.next_song_with(&mut rand::thread_rng())
    }

    /// Advance to the next song.
    ///
    /// With shuffle on, any index may be picked, including the current one.
    /// Otherwise moves one forward, wrapping only under [`RepeatMode::All`].
    /// Returns the new current song, or `None` when nothing changed.
    pub fn next_song_with<R: Rng>(&mut self, rng: &mut R) -> Option<&Song> {
        let next = self.next_index(rng)?;
        self.jump_to(next)
    }

    fn next_index<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        if self.queue.is_empty() {
            return None;
        }
        if self.shuffle {
            return Some(rng.gen_range(0..self.queue.len()));
        }

        let next = self.current_index.map_or(0, |i| i + 1);
        if next < self.queue.len() {
            Some(next)
        } else if self.repeat == RepeatMode::All {
            Some(0)
        } else {
            None
        }
    }

    /// Step back one song, wrapping from the first to the last.
    pub fn previous_song(&mut self) -> Option<&Song> {
        if self.queue.is_empty() {
            return None;
        }

        let prev = match self.current_index {
            Some(i) if i > 0 => i - 1,
            _ => self.queue.len() - 1,
        };
        self.jump_to(prev)
    }

    fn jump_to(&mut self, index: usize) -> Option<&Song> {
        let song = self.queue.get(index)?.clone();
        debug!("Queue position {} -> '{}'", index, song.title);
        self.current_index = Some(index);
        self.current_song = Some(song);
        self.is_playing = true;
        self.current_time = 0.0;
        self.current_song.as_ref()
    }

    /// Called by the sink when a song finishes.
    pub fn on_track_ended(&mut self) -> TrackEnd {
        self.on_track_ended_with(&mut rand::thread_rng())
    }

    /// [`on_track_ended`](Self::on_track_ended) with an explicit RNG.
    pub fn on_track_ended_with<R: Rng>(&mut self, rng: &mut R) -> TrackEnd {
        if self.repeat == RepeatMode::One && self.current_song.is_some() {
            self.current_time = 0.0;
            self.is_playing = true;
            return TrackEnd::Restarted;
        }

        match self.next_index(rng) {
            Some(next) => {
                self.jump_to(next);
                TrackEnd::Advanced(next)
            }
            None => {
                self.is_playing = false;
                TrackEnd::Finished
            }
        }
    }

    // ==================
    // QUEUE
    // ==================

    /// Replace the queue and select `start`. Playback state is not changed.
    pub fn set_queue(&mut self, songs: Vec<Song>, start: usize) {
        self.current_song = songs.get(start).cloned();
        self.current_index = self.current_song.as_ref().map(|_| start);
        self.queue = songs;
    }

    pub fn add_to_queue(&mut self, song: Song) {
        self.queue.push(song);
    }

    /// Remove the song at `index`. Out-of-range indices are ignored.
    ///
    /// Removing a song before the current one shifts the current index down
    /// so the same song stays selected. Removing the current song selects
    /// whatever now sits at its position.
    pub fn remove_from_queue(&mut self, index: usize) -> Option<Song> {
        if index >= self.queue.len() {
            return None;
        }
        let removed = self.queue.remove(index);

        if let Some(current) = self.current_index {
            let current = if index < current { current - 1 } else { current };
            self.current_song = self.queue.get(current).cloned();
            self.current_index = self.current_song.as_ref().map(|_| current);
        }
        Some(removed)
    }

    /// Empty the queue and stop.
    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.current_index = None;
        self.current_song = None;
        self.is_playing = false;
    }

    // ==================
    // SINK FEEDBACK & CONTROLS
    // ==================

    pub fn set_current_time(&mut self, seconds: f64) {
        self.current_time = seconds.max(0.0);
    }

    pub fn set_duration(&mut self, seconds: f64) {
        self.duration = seconds.max(0.0);
    }

    /// Seek to a fraction of the track.
    pub fn seek_fraction(&mut self, fraction: f64) {
        self.current_time = self.duration * fraction.clamp(0.0, 1.0);
    }

    /// Set volume, clamped to `[0, 1]`.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Mute, or restore the default volume when muted.
    pub fn toggle_mute(&mut self) {
        self.volume = if self.volume == 0.0 { DEFAULT_VOLUME } else { 0.0 };
    }

    pub fn toggle_repeat(&mut self) -> RepeatMode {
        self.repeat = self.repeat.cycle();
        self.repeat
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        self.shuffle
    }

    pub fn toggle_minimized(&mut self) -> bool {
        self.minimized = !self.minimized;
        self.minimized
    }

    /// Back to the initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
