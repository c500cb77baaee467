//! Creating the playlist in the catalog.

use tracing::info;

use crate::config::CatalogCredentials;
use crate::error::PlaylistError;
use crate::models::{PlaylistResult, PlaylistSpec, ResolvedTrack};
use crate::ports::catalog::MusicCatalog;

/// Creates a playlist and fills it with resolved tracks.
pub struct PlaylistBuilder<'a> {
    catalog: &'a dyn MusicCatalog,
    credentials: &'a CatalogCredentials,
}

impl<'a> PlaylistBuilder<'a> {
    /// Creates a builder acting through `catalog` with the given credentials.
    #[must_use]
    pub fn new(catalog: &'a dyn MusicCatalog, credentials: &'a CatalogCredentials) -> Self {
        Self { catalog, credentials }
    }

    /// Creates the playlist described by `spec` and adds every resolved
    /// track, in ordinal order, in a single batch.
    ///
    /// # Errors
    ///
    /// Returns [`PlaylistError::MissingCredentials`] before any catalog call
    /// when the application credentials are incomplete, and
    /// [`PlaylistError::ExternalCall`] when a catalog call fails.
    pub async fn build(
        &self,
        spec: &PlaylistSpec,
        tracks: &[ResolvedTrack],
    ) -> Result<PlaylistResult, PlaylistError> {
        self.credentials.ensure_complete()?;

        let mut ordered: Vec<&ResolvedTrack> = tracks.iter().collect();
        ordered.sort_by_key(|track| track.candidate.ordinal);
        let track_ids: Vec<String> =
            ordered.into_iter().filter_map(|track| track.catalog_id.clone()).collect();

        let user_id = self.catalog.current_user().await.map_err(PlaylistError::catalog)?;
        info!(
            user = %user_id,
            scope = spec.visibility.required_scope(),
            name = %spec.name,
            "creating playlist"
        );

        let playlist =
            self.catalog.create_playlist(&user_id, spec).await.map_err(PlaylistError::catalog)?;

        if !track_ids.is_empty() {
            self.catalog
                .add_tracks(&playlist.id, &track_ids)
                .await
                .map_err(PlaylistError::catalog)?;
        }
        info!(playlist = %playlist.id, tracks = track_ids.len(), url = %playlist.url, "playlist ready");

        Ok(PlaylistResult { url: playlist.url, playlist_id: playlist.id, track_count: track_ids.len() })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::models::{TrackCandidate, Visibility};
    use crate::ports::catalog::{CatalogFuture, CatalogTrack, CreatedPlaylist, TrackQuery};

    /// Catalog that logs every call it receives.
    #[derive(Default)]
    struct LoggingCatalog {
        calls: Mutex<Vec<String>>,
        added: Mutex<Vec<String>>,
        fail_create: bool,
    }

    impl LoggingCatalog {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl MusicCatalog for LoggingCatalog {
        fn current_user(&self) -> CatalogFuture<'_, String> {
            self.calls.lock().unwrap().push("current_user".into());
            Box::pin(async { Ok("listener".to_string()) })
        }

        fn search_tracks(&self, _: &TrackQuery) -> CatalogFuture<'_, Vec<CatalogTrack>> {
            self.calls.lock().unwrap().push("search_tracks".into());
            Box::pin(async { Ok(Vec::new()) })
        }

        fn create_playlist(
            &self,
            user_id: &str,
            spec: &PlaylistSpec,
        ) -> CatalogFuture<'_, CreatedPlaylist> {
            self.calls.lock().unwrap().push(format!("create_playlist:{user_id}:{}", spec.name));
            let fail = self.fail_create;
            Box::pin(async move {
                if fail {
                    return Err("Spotify API error (403): Insufficient client scope".into());
                }
                Ok(CreatedPlaylist {
                    id: "pl-1".into(),
                    url: "https://open.spotify.com/playlist/pl-1".into(),
                })
            })
        }

        fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> CatalogFuture<'_, ()> {
            self.calls.lock().unwrap().push(format!("add_tracks:{playlist_id}"));
            self.added.lock().unwrap().extend(track_ids.iter().cloned());
            Box::pin(async { Ok(()) })
        }
    }

    fn credentials() -> CatalogCredentials {
        CatalogCredentials {
            client_id: Some("cid".into()),
            client_secret: Some("secret".into()),
            redirect_url: Some("http://localhost:8000/callback".into()),
            ..CatalogCredentials::default()
        }
    }

    fn spec() -> PlaylistSpec {
        PlaylistSpec {
            name: "Focus Mix".into(),
            description: "3 songs".into(),
            visibility: Visibility::Private,
            collaborative: false,
        }
    }

    fn track(ordinal: u32, id: Option<&str>) -> ResolvedTrack {
        ResolvedTrack {
            candidate: TrackCandidate {
                title: format!("Song {ordinal}"),
                artist: "Artist".into(),
                ordinal,
            },
            catalog_id: id.map(String::from),
        }
    }

    #[tokio::test]
    async fn adds_resolved_tracks_in_ordinal_order() {
        let catalog = LoggingCatalog::default();
        let creds = credentials();
        let tracks = [track(3, Some("t3")), track(1, Some("t1")), track(2, None)];

        let result = PlaylistBuilder::new(&catalog, &creds).build(&spec(), &tracks).await.unwrap();

        assert_eq!(result.url, "https://open.spotify.com/playlist/pl-1");
        assert_eq!(result.track_count, 2);
        assert_eq!(*catalog.added.lock().unwrap(), vec!["t1".to_string(), "t3".to_string()]);
        assert_eq!(
            catalog.calls(),
            vec!["current_user", "create_playlist:listener:Focus Mix", "add_tracks:pl-1"]
        );
    }

    #[tokio::test]
    async fn missing_secret_makes_no_catalog_calls() {
        let catalog = LoggingCatalog::default();
        let creds = CatalogCredentials { client_secret: None, ..credentials() };

        let err = PlaylistBuilder::new(&catalog, &creds)
            .build(&spec(), &[track(1, Some("t1"))])
            .await
            .unwrap_err();

        assert_eq!(err, PlaylistError::MissingCredentials { missing: vec!["client_secret"] });
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test]
    async fn no_resolved_tracks_skips_batch_add() {
        let catalog = LoggingCatalog::default();
        let creds = credentials();

        let result =
            PlaylistBuilder::new(&catalog, &creds).build(&spec(), &[track(1, None)]).await.unwrap();

        assert_eq!(result.track_count, 0);
        assert!(!catalog.calls().iter().any(|c| c.starts_with("add_tracks")));
    }

    #[tokio::test]
    async fn catalog_failure_is_external_call_error() {
        let catalog = LoggingCatalog { fail_create: true, ..LoggingCatalog::default() };
        let creds = credentials();

        let err = PlaylistBuilder::new(&catalog, &creds)
            .build(&spec(), &[track(1, Some("t1"))])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PlaylistError::ExternalCall { service: "catalog", ref message } if message.contains("403")
        ));
    }
}
