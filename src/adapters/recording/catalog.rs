//! Recording adapter for the `MusicCatalog` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::models::PlaylistSpec;
use crate::ports::{CatalogFuture, CatalogTrack, CreatedPlaylist, MusicCatalog, TrackQuery};

/// Records catalog interactions while delegating to an inner implementation.
pub struct RecordingCatalog {
    inner: Box<dyn MusicCatalog>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingCatalog {
    /// Creates a new recording catalog wrapping the given implementation.
    pub fn new(inner: Box<dyn MusicCatalog>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct CreatePlaylistInput {
    user_id: String,
    spec: PlaylistSpec,
}

#[derive(Serialize)]
struct AddTracksInput {
    playlist_id: String,
    track_ids: Vec<String>,
}

impl MusicCatalog for RecordingCatalog {
    fn current_user(&self) -> CatalogFuture<'_, String> {
        Box::pin(async move {
            let result = self.inner.current_user().await;
            record_result(&self.recorder, "catalog", "current_user", &(), &result);
            result
        })
    }

    fn search_tracks(&self, query: &TrackQuery) -> CatalogFuture<'_, Vec<CatalogTrack>> {
        let query = query.clone();

        Box::pin(async move {
            let result = self.inner.search_tracks(&query).await;
            record_result(&self.recorder, "catalog", "search_tracks", &query, &result);
            result
        })
    }

    fn create_playlist(
        &self,
        user_id: &str,
        spec: &PlaylistSpec,
    ) -> CatalogFuture<'_, CreatedPlaylist> {
        let input = CreatePlaylistInput { user_id: user_id.to_string(), spec: spec.clone() };

        Box::pin(async move {
            let result = self.inner.create_playlist(&input.user_id, &input.spec).await;
            record_result(&self.recorder, "catalog", "create_playlist", &input, &result);
            result
        })
    }

    fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> CatalogFuture<'_, ()> {
        let input =
            AddTracksInput { playlist_id: playlist_id.to_string(), track_ids: track_ids.to_vec() };

        Box::pin(async move {
            let result = self.inner.add_tracks(&input.playlist_id, &input.track_ids).await;
            record_result(&self.recorder, "catalog", "add_tracks", &input, &result);
            result
        })
    }
}
