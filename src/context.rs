//! Service context bundling the port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::cache::{FileGenerationCache, MemoryGenerationCache};
use crate::adapters::live::catalog::SpotifyCatalog;
use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::llm::LiveLlmClient;
use crate::adapters::recording::{RecordingCatalog, RecordingLlmClient};
use crate::adapters::replaying::{ReplayingCatalog, ReplayingLlmClient};
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::AppConfig;
use crate::ports::cache::GenerationCache;
use crate::ports::catalog::MusicCatalog;
use crate::ports::clock::Clock;
use crate::ports::llm::LlmClient;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, recording, replaying).
pub struct ServiceContext {
    /// LLM client for text completions.
    pub llm: Box<dyn LlmClient>,
    /// Music catalog for search and playlist management.
    pub catalog: Box<dyn MusicCatalog>,
    /// Memoized model output.
    pub cache: Box<dyn GenerationCache>,
    /// Clock used to stamp cache entries.
    pub clock: Box<dyn Clock>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(
        llm: Box<dyn LlmClient>,
        catalog: Box<dyn MusicCatalog>,
        cache: Box<dyn GenerationCache>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self { llm, catalog, cache, clock }
    }

    /// Creates a live context talking to the real providers, with the
    /// generation cache stored at the configured path.
    #[must_use]
    pub fn live(config: &AppConfig) -> Self {
        Self::new(
            Box::new(LiveLlmClient::new(config.openai_key.clone())),
            Box::new(SpotifyCatalog::new(config.catalog.clone())),
            Box::new(FileGenerationCache::new(Box::new(LiveFileSystem), &config.cache_path)),
            Box::new(LiveClock),
        )
    }

    /// Creates a live context whose LLM and catalog traffic is captured by
    /// `session`.
    ///
    /// The cache is in-memory so that every recorded run reaches the model.
    #[must_use]
    pub fn recording(config: &AppConfig, session: &RecordingSession) -> Self {
        Self::new(
            Box::new(RecordingLlmClient::new(
                Box::new(LiveLlmClient::new(config.openai_key.clone())),
                Arc::clone(&session.llm),
            )),
            Box::new(RecordingCatalog::new(
                Box::new(SpotifyCatalog::new(config.catalog.clone())),
                Arc::clone(&session.catalog),
            )),
            Box::new(MemoryGenerationCache::new()),
            Box::new(LiveClock),
        )
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// LLM and catalog calls are served from the cassette (which may hold
    /// either port or both); the cache starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        Ok(Self::replaying_cassette(&cassette))
    }

    /// Creates a replaying context from a loaded cassette.
    #[must_use]
    pub fn replaying_cassette(cassette: &Cassette) -> Self {
        let replayer = Arc::new(Mutex::new(CassetteReplayer::new(cassette)));
        Self::new(
            Box::new(ReplayingLlmClient::new(Arc::clone(&replayer))),
            Box::new(ReplayingCatalog::new(replayer)),
            Box::new(MemoryGenerationCache::new()),
            Box::new(LiveClock),
        )
    }

    /// Creates a replaying context from a recording session directory
    /// containing `llm.cassette.yaml` and `catalog.cassette.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if either cassette file cannot be read or parsed.
    pub fn replaying_session(dir: &Path) -> Result<Self, String> {
        let llm = Cassette::load(&dir.join("llm.cassette.yaml"))?;
        let catalog = Cassette::load(&dir.join("catalog.cassette.yaml"))?;
        Ok(Self::new(
            Box::new(ReplayingLlmClient::new(Arc::new(Mutex::new(CassetteReplayer::new(&llm))))),
            Box::new(ReplayingCatalog::new(Arc::new(Mutex::new(CassetteReplayer::new(&catalog))))),
            Box::new(MemoryGenerationCache::new()),
            Box::new(LiveClock),
        ))
    }
}
