//! The playlist generation pipeline.
//!
//! prompt → completion (or cache) → parser → resolver → builder, composed by
//! [`generator::PlaylistGenerator`].

pub mod builder;
pub mod completion;
pub mod generator;
pub mod parser;
pub mod prompt;
pub mod resolver;

pub use builder::PlaylistBuilder;
pub use completion::CompletionClient;
pub use generator::{playlist_description, PlaylistGenerator};
pub use parser::{parse_completion, parse_lines};
pub use prompt::build_prompt;
pub use resolver::TrackResolver;
