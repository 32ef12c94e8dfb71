//! JSON to model converters.
//!
//! Most endpoints deserialize straight into models. The functions here
//! cover responses whose shape varies between backend versions: lists that
//! may or may not be wrapped in a pagination envelope, and search results
//! that may be flat or nested under `results`.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::{GSpotifyError, Result};
use crate::models::{Artist, PaginatedResponse, SearchResults, Song};

/// Get string from JSON, returning empty string if not found.
fn get_str(json: &Value, key: &str) -> String {
    json.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

/// Get u64 from JSON.
fn get_u64(json: &Value, key: &str) -> u64 {
    json.get(key).and_then(|v| v.as_u64()).unwrap_or(0)
}

/// Parse every element of a JSON array, skipping malformed entries.
fn parse_items<T: DeserializeOwned>(items: &[Value], what: &str) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Skipping malformed {} entry: {}", what, e);
                None
            }
        })
        .collect()
}

/// Parse a list response.
///
/// Accepts a bare array or an envelope with the array under `items`
/// (paginated) or `data`.
pub fn parse_list<T: DeserializeOwned>(json: &Value) -> Result<Vec<T>> {
    Ok(parse_page(json)?.items)
}

/// Parse a list response keeping the envelope's totals.
///
/// A bare array becomes a single page.
pub fn parse_page<T: DeserializeOwned>(json: &Value) -> Result<PaginatedResponse<T>> {
    if let Some(items) = json.as_array() {
        return Ok(PaginatedResponse::single(parse_items(items, "list")));
    }

    let items = json
        .get("items")
        .or_else(|| json.get("data"))
        .and_then(|v| v.as_array())
        .ok_or_else(|| GSpotifyError::Api {
            status: 200,
            detail: "Expected a list response".to_string(),
        })?;
    let items: Vec<T> = parse_items(items, "list");

    let field = |key: &str| json.get(key).and_then(|v| v.as_u64());
    let total = field("total").unwrap_or(items.len() as u64);
    let size = field("size").map_or(items.len() as u32, |v| v as u32);
    let pages = field("pages").map_or_else(
        || match size {
            0 => 0,
            size => total.div_ceil(u64::from(size)) as u32,
        },
        |v| v as u32,
    );

    Ok(PaginatedResponse {
        items,
        total,
        page: field("page").map_or(1, |v| v as u32),
        size,
        pages,
    })
}

/// Collect the populated artists of a song list, keyed on first occurrence.
pub fn artists_from_songs(songs: &[Song]) -> Vec<Artist> {
    let mut artists: Vec<Artist> = Vec::new();
    for artist in songs.iter().filter_map(|s| s.artist.as_ref()) {
        if !artists.iter().any(|a| a.id == artist.id) {
            artists.push(Artist::from(artist));
        }
    }
    artists
}

/// Merge two artist lists, dropping later duplicates by ID.
pub fn merge_artists(primary: Vec<Artist>, extra: Vec<Artist>) -> Vec<Artist> {
    let mut merged: Vec<Artist> = Vec::with_capacity(primary.len() + extra.len());
    for artist in primary.into_iter().chain(extra) {
        if !merged.iter().any(|a| a.id == artist.id) {
            merged.push(artist);
        }
    }
    merged
}

/// Parse a search response.
///
/// The backend returns `{songs, artists, playlists}`; older builds wrap the
/// same lists in `{query, results: {...}, total}`. Artists of matching songs
/// are folded into the artist list.
pub fn parse_search_results(query: &str, json: &Value) -> Result<SearchResults> {
    if !json.is_object() {
        return Err(GSpotifyError::Api {
            status: 200,
            detail: "Expected a search result object".to_string(),
        });
    }

    let body = json.get("results").filter(|r| r.is_object()).unwrap_or(json);

    let list = |key: &str| -> Vec<Value> {
        body.get(key)
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default()
    };

    let songs: Vec<Song> = parse_items(&list("songs"), "song");
    let direct_artists: Vec<Artist> = parse_items(&list("artists"), "artist");
    let artists = merge_artists(direct_artists, artists_from_songs(&songs));

    let mut results = SearchResults {
        query: match get_str(json, "query") {
            q if q.is_empty() => query.to_string(),
            q => q,
        },
        songs,
        artists,
        albums: parse_items(&list("albums"), "album"),
        playlists: parse_items(&list("playlists"), "playlist"),
        total: get_u64(json, "total"),
    };

    if results.total == 0 {
        results.total = results.len() as u64;
    }

    Ok(results)
}
