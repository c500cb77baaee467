//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the generation pipeline and an
//! external system (language model, music catalog, generation cache, time,
//! filesystem). Implementations live in `src/adapters/`.

pub mod cache;
pub mod catalog;
pub mod clock;
pub mod filesystem;
pub mod llm;

pub use cache::{CacheKey, CachedCompletion, GenerationCache};
pub use catalog::{CatalogFuture, CatalogTrack, CreatedPlaylist, MusicCatalog, TrackQuery};
pub use clock::Clock;
pub use filesystem::FileSystem;
pub use llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};
