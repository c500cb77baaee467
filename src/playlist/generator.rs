//! End-to-end playlist generation.

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::context::ServiceContext;
use crate::error::PlaylistError;
use crate::models::{
    GenerationRequest, NewPlaylistParams, PlaylistResult, PlaylistSpec, ResolvedTrack,
    TrackCandidate,
};
use crate::playlist::builder::PlaylistBuilder;
use crate::playlist::completion::CompletionClient;
use crate::playlist::parser::parse_completion;
use crate::playlist::resolver::TrackResolver;
use crate::ports::cache::{CacheKey, CachedCompletion};

/// Composes the pipeline stages over a [`ServiceContext`].
pub struct PlaylistGenerator<'a> {
    ctx: &'a ServiceContext,
    config: &'a AppConfig,
}

impl<'a> PlaylistGenerator<'a> {
    /// Creates a generator using the ports in `ctx` and the settings in `config`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, config: &'a AppConfig) -> Self {
        Self { ctx, config }
    }

    /// Generates suggestions, resolves them and creates the playlist.
    ///
    /// # Errors
    ///
    /// - [`PlaylistError::InvalidParams`] or [`PlaylistError::MissingCredentials`]
    ///   before any external call;
    /// - [`PlaylistError::EmptyGeneration`] when no suggestions are available;
    /// - [`PlaylistError::MalformedLine`] when the model output cannot be parsed;
    /// - [`PlaylistError::NoTracksResolved`] when no suggestion matched the catalog;
    /// - [`PlaylistError::ExternalCall`] when playlist creation fails.
    pub async fn generate_new_playlist(
        &self,
        params: &NewPlaylistParams,
    ) -> Result<PlaylistResult, PlaylistError> {
        let request = params.validate()?;
        self.config.catalog.ensure_complete()?;

        let candidates = self.candidates(&request).await?;

        let resolver = TrackResolver::new(self.ctx.catalog.as_ref(), self.config.search_concurrency);
        let resolved = resolver.resolve(&candidates).await;
        if !resolved.iter().any(ResolvedTrack::is_resolved) {
            return Err(PlaylistError::NoTracksResolved(resolved.len()));
        }

        let spec = PlaylistSpec {
            name: params.name.trim().to_string(),
            description: playlist_description(&request),
            visibility: params.visibility(),
            collaborative: params.collaborative,
        };
        PlaylistBuilder::new(self.ctx.catalog.as_ref(), &self.config.catalog)
            .build(&spec, &resolved)
            .await
    }

    /// Track candidates for `request`, from the cache or a fresh completion.
    ///
    /// Fresh output is cached only once it parses into at least one candidate.
    ///
    /// # Errors
    ///
    /// Returns [`PlaylistError::EmptyGeneration`] when nothing is available and
    /// [`PlaylistError::MalformedLine`] when the output cannot be parsed.
    pub async fn candidates(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<TrackCandidate>, PlaylistError> {
        let key = CacheKey::for_request(request);

        let cached = self.ctx.cache.get(&key).unwrap_or_else(|e| {
            warn!(key = %key, error = %e, "generation cache unreadable, treating as miss");
            None
        });
        if let Some(entry) = cached {
            info!(key = %key, stored = %entry.created_at, "using cached completion");
            return non_empty(parse_completion(&entry.raw)?);
        }

        let raw = CompletionClient::new(self.ctx.llm.as_ref(), &self.config.model)
            .complete(request)
            .await
            .ok_or(PlaylistError::EmptyGeneration)?;
        let candidates = non_empty(parse_completion(&raw)?)?;

        let entry = CachedCompletion {
            raw,
            count: request.count(),
            seed_description: request.seed_description().to_string(),
            created_at: self.ctx.clock.now(),
        };
        if let Err(e) = self.ctx.cache.put(&key, &entry) {
            warn!(key = %key, error = %e, "failed to store completion in cache");
        }

        info!(count = candidates.len(), requested = request.count(), "parsed track candidates");
        Ok(candidates)
    }
}

fn non_empty(candidates: Vec<TrackCandidate>) -> Result<Vec<TrackCandidate>, PlaylistError> {
    if candidates.is_empty() {
        Err(PlaylistError::EmptyGeneration)
    } else {
        Ok(candidates)
    }
}

/// Description stored on the created playlist.
#[must_use]
pub fn playlist_description(request: &GenerationRequest) -> String {
    format!("{} songs generated from the prompt: {}", request.count(), request.seed_description())
}
