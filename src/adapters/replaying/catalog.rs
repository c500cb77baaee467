//! Replaying adapter for the `MusicCatalog` port.

use std::sync::{Arc, Mutex};

use super::{matching_output, next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::models::PlaylistSpec;
use crate::ports::{CatalogFuture, CatalogTrack, CreatedPlaylist, MusicCatalog, TrackQuery};

/// Serves recorded catalog responses from a cassette.
///
/// Searches are paired with their recording by query, so concurrent searches
/// may replay in any order. Other calls are served in recorded order.
pub struct ReplayingCatalog {
    replayer: Option<Arc<Mutex<CassetteReplayer>>>,
}

impl ReplayingCatalog {
    /// Create a replaying catalog backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer: Some(replayer) }
    }

    /// Create a replaying catalog with no cassette. Panics when called.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }

    fn output(&self, method: &str) -> serde_json::Value {
        next_output(self.replayer.as_ref(), "catalog", method)
    }
}

impl MusicCatalog for ReplayingCatalog {
    fn current_user(&self) -> CatalogFuture<'_, String> {
        let output = self.output("current_user");
        Box::pin(async move { replay_result(output) })
    }

    fn search_tracks(&self, query: &TrackQuery) -> CatalogFuture<'_, Vec<CatalogTrack>> {
        let input = serde_json::to_value(query).unwrap_or_default();
        let output = matching_output(self.replayer.as_ref(), "catalog", "search_tracks", &input);
        Box::pin(async move { replay_result(output) })
    }

    fn create_playlist(
        &self,
        _user_id: &str,
        _spec: &PlaylistSpec,
    ) -> CatalogFuture<'_, CreatedPlaylist> {
        let output = self.output("create_playlist");
        Box::pin(async move { replay_result(output) })
    }

    fn add_tracks(&self, _playlist_id: &str, _track_ids: &[String]) -> CatalogFuture<'_, ()> {
        let output = self.output("add_tracks");
        Box::pin(async move { replay_result(output) })
    }
}
