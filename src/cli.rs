//! CLI argument definitions.

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `playlistgpt`.
#[derive(Debug, Parser)]
#[command(
    name = "playlistgpt",
    version,
    about = "Generate streaming playlists from a text description"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask the model for songs and create a playlist from them.
    Generate {
        /// Name of the playlist to create.
        #[arg(long)]
        name: String,
        /// Description of the music you want.
        #[arg(long)]
        seed: String,
        /// Number of songs to request.
        #[arg(long, default_value_t = 10)]
        count: u32,
        /// Make the playlist public.
        #[arg(long)]
        public: bool,
        /// Let other users edit the playlist.
        #[arg(long)]
        collaborative: bool,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the prompt that would be sent to the model.
    Prompt {
        /// Description of the music you want.
        #[arg(long)]
        seed: String,
        /// Number of songs to request.
        #[arg(long, default_value_t = 10)]
        count: u32,
    },
    /// Print the catalog authorization URL.
    AuthUrl {
        /// Request the scope for public playlists.
        #[arg(long)]
        public: bool,
    },
}
