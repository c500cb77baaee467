//! Live adapter for the `MusicCatalog` port using the Spotify Web API.

use std::error::Error;
use std::sync::Mutex;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CatalogCredentials;
use crate::models::PlaylistSpec;
use crate::ports::catalog::{CatalogFuture, CatalogTrack, CreatedPlaylist, MusicCatalog, TrackQuery};

const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SPOTIFY_AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";

const TOKEN_POISONED: &str = "Spotify access token lock poisoned";

/// The API accepts at most this many URIs per add-items request.
const MAX_TRACKS_PER_REQUEST: usize = 100;

/// Live catalog client for the Spotify Web API.
///
/// Uses the configured access token when present, otherwise exchanges the
/// refresh token for one on first use and keeps it for the client's lifetime.
pub struct SpotifyCatalog {
    client: Client,
    credentials: CatalogCredentials,
    access_token: Mutex<Option<String>>,
}

impl SpotifyCatalog {
    /// Creates a catalog client from the configured credentials.
    #[must_use]
    pub fn new(credentials: CatalogCredentials) -> Self {
        let access_token = Mutex::new(credentials.access_token.clone());
        Self { client: Client::new(), credentials, access_token }
    }

    async fn token(&self) -> Result<String, Box<dyn Error + Send + Sync>> {
        let cached = self.access_token.lock().map_err(|_| TOKEN_POISONED)?.clone();
        if let Some(token) = cached {
            return Ok(token);
        }

        let refresh_token = self.credentials.refresh_token.as_deref().ok_or(
            "no SPOTIFY_ACCESS_TOKEN or SPOTIFY_REFRESH_TOKEN configured; \
             authorize via `playlistgpt auth-url` first",
        )?;
        let client_id = self.credentials.client_id.as_deref().unwrap_or_default();
        let client_secret = self.credentials.client_secret.as_deref();

        debug!("exchanging refresh token for an access token");
        let request = self
            .client
            .post(SPOTIFY_TOKEN_URL)
            .basic_auth(client_id, client_secret)
            .form(&[("grant_type", "refresh_token"), ("refresh_token", refresh_token)]);
        let response: TokenResponse = read_json(request).await?;

        *self.access_token.lock().map_err(|_| TOKEN_POISONED)? = Some(response.access_token.clone());
        Ok(response.access_token)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, Box<dyn Error + Send + Sync>> {
        let token = self.token().await?;
        read_json(request.bearer_auth(token)).await
    }
}

/// Builds the URL a user visits to grant the playlist scope to this application.
///
/// # Errors
///
/// Returns an error string if the client id or redirect URL is missing.
pub fn authorize_url(credentials: &CatalogCredentials, scope: &str) -> Result<String, String> {
    let client_id = credentials.client_id.as_deref().ok_or("SPOTIFY_CLIENT_ID is not configured")?;
    let redirect = credentials
        .redirect_url
        .as_deref()
        .ok_or("SPOTIFY_REDIRECT_URL is not configured")?;
    let url = reqwest::Url::parse_with_params(
        SPOTIFY_AUTHORIZE_URL,
        &[
            ("client_id", client_id),
            ("response_type", "code"),
            ("redirect_uri", redirect),
            ("scope", scope),
        ],
    )
    .map_err(|e| format!("Failed to build authorization URL: {e}"))?;
    Ok(url.into())
}

async fn read_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<T, Box<dyn Error + Send + Sync>> {
    let response = request.send().await.map_err(|e| -> Box<dyn Error + Send + Sync> {
        format!("Spotify API request failed: {e}").into()
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| -> Box<dyn Error + Send + Sync> {
        format!("Failed to read Spotify API response: {e}").into()
    })?;

    if !status.is_success() {
        let msg = serde_json::from_str::<SpotifyError>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        return Err(format!("Spotify API error ({}): {msg}", status.as_u16()).into());
    }

    // Some endpoints answer with an empty body.
    let body = if body.trim().is_empty() { "null" } else { body.as_str() };
    serde_json::from_str(body).map_err(|e| -> Box<dyn Error + Send + Sync> {
        format!("Failed to parse Spotify API response: {e}").into()
    })
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct UserProfile {
    id: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    tracks: TrackPage,
}

#[derive(Deserialize)]
struct TrackPage {
    items: Vec<TrackItem>,
}

#[derive(Deserialize)]
struct TrackItem {
    id: String,
    name: String,
}

#[derive(Serialize)]
struct CreatePlaylistBody<'a> {
    name: &'a str,
    description: &'a str,
    public: bool,
    collaborative: bool,
}

#[derive(Deserialize)]
struct PlaylistObject {
    id: String,
    external_urls: ExternalUrls,
}

#[derive(Deserialize)]
struct ExternalUrls {
    spotify: String,
}

#[derive(Serialize)]
struct AddTracksBody {
    uris: Vec<String>,
}

#[derive(Deserialize)]
struct SpotifyError {
    error: SpotifyErrorDetail,
}

#[derive(Deserialize)]
struct SpotifyErrorDetail {
    message: String,
}

impl MusicCatalog for SpotifyCatalog {
    fn current_user(&self) -> CatalogFuture<'_, String> {
        Box::pin(async move {
            let request = self.client.get(format!("{SPOTIFY_API_URL}/me"));
            let profile: UserProfile = self.send(request).await?;
            Ok(profile.id)
        })
    }

    fn search_tracks(&self, query: &TrackQuery) -> CatalogFuture<'_, Vec<CatalogTrack>> {
        let q = query.query_string();
        let limit = query.limit.to_string();

        Box::pin(async move {
            let request = self.client.get(format!("{SPOTIFY_API_URL}/search")).query(&[
                ("q", q.as_str()),
                ("type", "track"),
                ("limit", limit.as_str()),
            ]);
            let response: SearchResponse = self.send(request).await?;
            Ok(response
                .tracks
                .items
                .into_iter()
                .map(|item| CatalogTrack { id: item.id, name: item.name })
                .collect())
        })
    }

    fn create_playlist(
        &self,
        user_id: &str,
        spec: &PlaylistSpec,
    ) -> CatalogFuture<'_, CreatedPlaylist> {
        let user_id = user_id.to_string();
        let spec = spec.clone();

        Box::pin(async move {
            let body = CreatePlaylistBody {
                name: &spec.name,
                description: &spec.description,
                public: spec.visibility.is_public(),
                collaborative: spec.collaborative,
            };
            let request =
                self.client.post(format!("{SPOTIFY_API_URL}/users/{user_id}/playlists")).json(&body);
            let playlist: PlaylistObject = self.send(request).await?;
            Ok(CreatedPlaylist { id: playlist.id, url: playlist.external_urls.spotify })
        })
    }

    fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> CatalogFuture<'_, ()> {
        let url = format!("{SPOTIFY_API_URL}/playlists/{playlist_id}/tracks");
        let uris: Vec<String> = track_ids.iter().map(|id| format!("spotify:track:{id}")).collect();

        Box::pin(async move {
            for chunk in uris.chunks(MAX_TRACKS_PER_REQUEST) {
                let body = AddTracksBody { uris: chunk.to_vec() };
                let _: serde_json::Value = self.send(self.client.post(&url).json(&body)).await?;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_tokens_fail_before_any_request() {
        let catalog = SpotifyCatalog::new(CatalogCredentials {
            client_id: Some("cid".into()),
            client_secret: Some("secret".into()),
            redirect_url: Some("http://localhost:8000/callback".into()),
            ..CatalogCredentials::default()
        });

        let err = catalog.current_user().await.unwrap_err();
        assert!(err.to_string().contains("SPOTIFY_REFRESH_TOKEN"));
    }

    #[tokio::test]
    async fn poisoned_token_lock_fails_the_call() {
        let catalog = std::sync::Arc::new(SpotifyCatalog::new(CatalogCredentials {
            access_token: Some("token".into()),
            ..CatalogCredentials::default()
        }));
        let holder = std::sync::Arc::clone(&catalog);
        let _ = std::thread::spawn(move || {
            let _guard = holder.access_token.lock().unwrap();
            panic!("refresh died while holding the token");
        })
        .join();

        let err = catalog.current_user().await.unwrap_err();
        assert!(err.to_string().contains("poisoned"));
    }

    #[test]
    fn authorize_url_carries_scope_and_redirect() {
        let creds = CatalogCredentials {
            client_id: Some("cid".into()),
            redirect_url: Some("http://localhost:8000/callback".into()),
            ..CatalogCredentials::default()
        };
        let url = authorize_url(&creds, "playlist-modify-private").unwrap();
        assert!(url.starts_with(SPOTIFY_AUTHORIZE_URL));
        assert!(url.contains("client_id=cid"));
        assert!(url.contains("scope=playlist-modify-private"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8000%2Fcallback"));
    }

    #[test]
    fn authorize_url_requires_client_id() {
        let err = authorize_url(&CatalogCredentials::default(), "playlist-modify-public");
        assert!(err.unwrap_err().contains("SPOTIFY_CLIENT_ID"));
    }

    #[test]
    fn parses_search_and_playlist_payloads() {
        let search: SearchResponse = serde_json::from_str(
            r#"{"tracks":{"items":[{"id":"6kkwzB6hXLIONkEk9JciA6","name":"Weightless","popularity":51}]}}"#,
        )
        .unwrap();
        assert_eq!(search.tracks.items[0].id, "6kkwzB6hXLIONkEk9JciA6");

        let playlist: PlaylistObject = serde_json::from_str(
            r#"{"id":"pl1","external_urls":{"spotify":"https://open.spotify.com/playlist/pl1"}}"#,
        )
        .unwrap();
        assert_eq!(playlist.external_urls.spotify, "https://open.spotify.com/playlist/pl1");
    }
}
