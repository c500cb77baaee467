//! Domain types shared by the generation pipeline.

use serde::{Deserialize, Serialize};

use crate::error::PlaylistError;

/// Inbound request to generate a new playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlaylistParams {
    /// Name of the playlist to create.
    pub name: String,
    /// Free-text theme used to seed the model prompt.
    pub seed_description: String,
    /// Number of songs to ask the model for.
    pub count: u32,
    /// Whether the playlist is public.
    pub public: bool,
    /// Whether other users may edit the playlist.
    pub collaborative: bool,
}

impl NewPlaylistParams {
    /// Checks the parameters and extracts the generation request.
    ///
    /// # Errors
    ///
    /// Returns [`PlaylistError::InvalidParams`] when the count is zero or the
    /// name or seed description is blank.
    pub fn validate(&self) -> Result<GenerationRequest, PlaylistError> {
        if self.name.trim().is_empty() {
            return Err(PlaylistError::InvalidParams("playlist name must not be empty".into()));
        }
        GenerationRequest::new(self.count, &self.seed_description)
    }

    /// The requested visibility.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        if self.public {
            Visibility::Public
        } else {
            Visibility::Private
        }
    }
}

/// A validated request for model suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    count: u32,
    seed_description: String,
}

impl GenerationRequest {
    /// Creates a request, rejecting a zero count or a blank seed.
    ///
    /// # Errors
    ///
    /// Returns [`PlaylistError::InvalidParams`] on invalid input.
    pub fn new(count: u32, seed_description: &str) -> Result<Self, PlaylistError> {
        if count == 0 {
            return Err(PlaylistError::InvalidParams("song count must be at least 1".into()));
        }
        let seed = seed_description.trim();
        if seed.is_empty() {
            return Err(PlaylistError::InvalidParams("seed description must not be empty".into()));
        }
        Ok(Self { count, seed_description: seed.to_string() })
    }

    /// Number of songs requested.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// The trimmed seed description.
    #[must_use]
    pub fn seed_description(&self) -> &str {
        &self.seed_description
    }
}

/// A song suggestion parsed from model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackCandidate {
    /// Track title.
    pub title: String,
    /// Artist name.
    pub artist: String,
    /// 1-based position in the parsed list.
    pub ordinal: u32,
}

/// A candidate paired with its catalog match, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTrack {
    /// The suggestion that was searched for.
    pub candidate: TrackCandidate,
    /// Catalog identifier of the first search hit; `None` when nothing matched.
    pub catalog_id: Option<String>,
}

impl ResolvedTrack {
    /// Whether the catalog returned a match.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.catalog_id.is_some()
    }
}

/// Playlist visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Listed on the owner's profile.
    Public,
    /// Visible only to the owner and collaborators.
    Private,
}

impl Visibility {
    /// OAuth scope needed to create a playlist with this visibility.
    #[must_use]
    pub fn required_scope(self) -> &'static str {
        match self {
            Self::Public => "playlist-modify-public",
            Self::Private => "playlist-modify-private",
        }
    }

    /// Whether this is [`Visibility::Public`].
    #[must_use]
    pub fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

/// Metadata for a playlist to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSpec {
    /// Playlist name.
    pub name: String,
    /// Playlist description.
    pub description: String,
    /// Public or private.
    pub visibility: Visibility,
    /// Whether other users may edit the playlist.
    pub collaborative: bool,
}

/// Outcome of a successful playlist build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistResult {
    /// Externally shareable playlist URL.
    pub url: String,
    /// Catalog identifier of the playlist.
    pub playlist_id: String,
    /// Number of tracks added.
    pub track_count: usize,
}
