//! Generation cache adapters: a JSON file on disk and an in-memory map.

use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::ports::cache::{CacheKey, CachedCompletion, GenerationCache};
use crate::ports::filesystem::FileSystem;

const POISONED: &str = "generation cache lock poisoned";

/// On-disk layout of the cache file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    entries: BTreeMap<String, CachedCompletion>,
}

/// Cache persisted as a single JSON document keyed by request hash.
///
/// All I/O goes through the `FileSystem` port. Reads and read-modify-write
/// cycles are serialized by an internal lock.
pub struct FileGenerationCache {
    fs: Box<dyn FileSystem>,
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileGenerationCache {
    /// Creates a cache backed by the file at `path`.
    #[must_use]
    pub fn new(fs: Box<dyn FileSystem>, path: &Path) -> Self {
        Self { fs, path: path.to_path_buf(), lock: Mutex::new(()) }
    }

    fn load(&self) -> Result<CacheFile, Box<dyn Error + Send + Sync>> {
        if !self.fs.exists(&self.path) {
            return Ok(CacheFile::default());
        }
        let contents = self.fs.read_to_string(&self.path)?;
        serde_json::from_str(&contents).map_err(|e| {
            format!("Failed to parse generation cache {}: {e}", self.path.display()).into()
        })
    }
}

impl GenerationCache for FileGenerationCache {
    fn get(&self, key: &CacheKey) -> Result<Option<CachedCompletion>, Box<dyn Error + Send + Sync>> {
        let _guard = self.lock.lock().map_err(|_| POISONED)?;
        Ok(self.load()?.entries.remove(key.as_str()))
    }

    fn put(
        &self,
        key: &CacheKey,
        completion: &CachedCompletion,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let _guard = self.lock.lock().map_err(|_| POISONED)?;
        let mut file = self.load()?;
        file.entries.insert(key.to_string(), completion.clone());
        let json = serde_json::to_string_pretty(&file)?;
        self.fs.write(&self.path, &json)
    }
}

/// Process-local cache.
#[derive(Default)]
pub struct MemoryGenerationCache {
    entries: Mutex<HashMap<CacheKey, CachedCompletion>>,
}

impl MemoryGenerationCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl GenerationCache for MemoryGenerationCache {
    fn get(&self, key: &CacheKey) -> Result<Option<CachedCompletion>, Box<dyn Error + Send + Sync>> {
        Ok(self.entries.lock().map_err(|_| POISONED)?.get(key).cloned())
    }

    fn put(
        &self,
        key: &CacheKey,
        completion: &CachedCompletion,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.entries.lock().map_err(|_| POISONED)?.insert(key.clone(), completion.clone());
        Ok(())
    }
}
