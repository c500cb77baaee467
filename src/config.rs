//! Runtime configuration loaded from the environment.
//!
//! `main` loads a `.env` file with `dotenvy` before calling
//! [`AppConfig::from_env`]; every component receives the pieces it needs
//! through its constructor.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::PlaylistError;

/// Default OAuth redirect registered with the catalog application.
pub const DEFAULT_REDIRECT_URL: &str = "http://localhost:8000/callback";

/// Default location of the generation cache file.
pub const DEFAULT_CACHE_PATH: &str = ".playlistgpt/cache.json";

/// Default number of catalog searches in flight at once.
pub const DEFAULT_SEARCH_CONCURRENCY: usize = 4;

/// Language-model parameters for the completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Nucleus sampling mass.
    pub top_p: f32,
    /// Frequency penalty.
    pub frequency_penalty: f32,
    /// Presence penalty.
    pub presence_penalty: f32,
    /// Stop sequences; when unset, derived from the requested song count.
    pub stop: Option<Vec<String>>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: "text-davinci-003".into(),
            temperature: 0.7,
            max_tokens: 256,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            stop: None,
        }
    }
}

impl ModelConfig {
    /// Stop sequences for a request of `count` songs.
    ///
    /// Without an explicit setting the model stops at the marker that would
    /// open entry `count + 1`.
    #[must_use]
    pub fn stop_sequences(&self, count: u32) -> Vec<String> {
        self.stop.clone().unwrap_or_else(|| vec![format!("{}.", u64::from(count) + 1)])
    }
}

/// OAuth application credentials and tokens for the music catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogCredentials {
    /// Application client id.
    pub client_id: Option<String>,
    /// Application client secret.
    pub client_secret: Option<String>,
    /// Registered redirect URL.
    pub redirect_url: Option<String>,
    /// User refresh token obtained from the authorization flow.
    pub refresh_token: Option<String>,
    /// Pre-issued user access token; takes precedence over the refresh token.
    pub access_token: Option<String>,
}

impl CatalogCredentials {
    /// Checks that the application credentials are all present.
    ///
    /// # Errors
    ///
    /// Returns [`PlaylistError::MissingCredentials`] naming each absent setting.
    pub fn ensure_complete(&self) -> Result<(), PlaylistError> {
        let missing: Vec<&'static str> = [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("redirect_url", &self.redirect_url),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PlaylistError::MissingCredentials { missing })
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// API key for the completion provider.
    pub openai_key: Option<String>,
    /// Catalog credentials.
    pub catalog: CatalogCredentials,
    /// Completion parameters.
    pub model: ModelConfig,
    /// Path of the generation cache file.
    pub cache_path: PathBuf,
    /// Maximum concurrent catalog searches.
    pub search_concurrency: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_key: None,
            catalog: CatalogCredentials {
                redirect_url: Some(DEFAULT_REDIRECT_URL.into()),
                ..CatalogCredentials::default()
            },
            model: ModelConfig::default(),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            search_concurrency: DEFAULT_SEARCH_CONCURRENCY,
        }
    }
}

impl AppConfig {
    /// Builds the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error string if a numeric override cannot be parsed.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error string if a numeric override cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let mut model = defaults.model;
        if let Some(name) = get("PLAYLISTGPT_MODEL") {
            model.model = name;
        }
        if let Some(t) = parse_var(&get, "PLAYLISTGPT_TEMPERATURE")? {
            model.temperature = t;
        }
        if let Some(n) = parse_var(&get, "PLAYLISTGPT_MAX_TOKENS")? {
            model.max_tokens = n;
        }

        let search_concurrency = parse_var::<usize, _>(&get, "PLAYLISTGPT_SEARCH_CONCURRENCY")?
            .unwrap_or(defaults.search_concurrency)
            .max(1);

        Ok(Self {
            openai_key: get("OPENAI_KEY").or_else(|| get("OPENAI_API_KEY")),
            catalog: CatalogCredentials {
                client_id: get("SPOTIFY_CLIENT_ID"),
                client_secret: get("SPOTIFY_CLIENT_SECRET"),
                redirect_url: get("SPOTIFY_REDIRECT_URL").or(defaults.catalog.redirect_url),
                refresh_token: get("SPOTIFY_REFRESH_TOKEN"),
                access_token: get("SPOTIFY_ACCESS_TOKEN"),
            },
            model,
            cache_path: get("PLAYLISTGPT_CACHE").map_or(defaults.cache_path, PathBuf::from),
            search_concurrency,
        })
    }
}

fn parse_var<T, G>(get: &G, key: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|raw| raw.trim().parse::<T>().map_err(|e| format!("Invalid value for {key}: {e}")))
        .transpose()
}
