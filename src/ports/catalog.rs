//! Music catalog port: search, user lookup and playlist management.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::models::PlaylistSpec;

/// Boxed future returned by every [`MusicCatalog`] operation.
pub type CatalogFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// A field-qualified track search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackQuery {
    /// Artist field filter.
    pub artist: String,
    /// Track title field filter.
    pub track: String,
    /// Maximum number of results.
    pub limit: u32,
}

impl TrackQuery {
    /// A query for the single best match of `track` by `artist`.
    #[must_use]
    pub fn top_hit(artist: &str, track: &str) -> Self {
        Self { artist: artist.to_string(), track: track.to_string(), limit: 1 }
    }

    /// The query string in catalog search syntax.
    #[must_use]
    pub fn query_string(&self) -> String {
        format!("artist:{} track:{}", self.artist, self.track)
    }
}

/// A track returned by a catalog search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTrack {
    /// Catalog identifier.
    pub id: String,
    /// Track title as the catalog knows it.
    pub name: String,
}

/// A playlist freshly created in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPlaylist {
    /// Catalog identifier.
    pub id: String,
    /// Externally shareable URL.
    pub url: String,
}

/// Operations against a streaming-music catalog on behalf of a signed-in user.
pub trait MusicCatalog: Send + Sync {
    /// Returns the id of the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or the call fails.
    fn current_user(&self) -> CatalogFuture<'_, String>;

    /// Searches the catalog for tracks.
    ///
    /// # Errors
    ///
    /// Returns an error if the search request fails.
    fn search_tracks(&self, query: &TrackQuery) -> CatalogFuture<'_, Vec<CatalogTrack>>;

    /// Creates an empty playlist owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the playlist cannot be created.
    fn create_playlist(&self, user_id: &str, spec: &PlaylistSpec)
        -> CatalogFuture<'_, CreatedPlaylist>;

    /// Appends tracks, in order, to a playlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracks cannot be added.
    fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> CatalogFuture<'_, ()>;
}
