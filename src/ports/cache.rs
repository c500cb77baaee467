//! Generation cache port for memoizing raw model output.

use std::error::Error;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::models::GenerationRequest;

/// Content address of a generation request.
///
/// Two requests share a key only when both the song count and the seed
/// description match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derives the key for a request.
    #[must_use]
    pub fn for_request(request: &GenerationRequest) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(request.count().to_string().as_bytes());
        hasher.update(b"\n");
        hasher.update(request.seed_description().as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// The hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored completion together with the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedCompletion {
    /// Raw model text.
    pub raw: String,
    /// Song count of the originating request.
    pub count: u32,
    /// Seed description of the originating request.
    pub seed_description: String,
    /// When the completion was stored.
    pub created_at: DateTime<Utc>,
}

/// Key-value store for raw completions.
///
/// Implementations must tolerate concurrent callers.
pub trait GenerationCache: Send + Sync {
    /// Looks up a completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &CacheKey) -> Result<Option<CachedCompletion>, Box<dyn Error + Send + Sync>>;

    /// Stores a completion, replacing any previous entry for the key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn put(
        &self,
        key: &CacheKey,
        completion: &CachedCompletion,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}
