//! Core library entry for the `playlistgpt` CLI.
//!
//! A language model suggests songs for a free-text description, the
//! suggestions are resolved against a streaming catalog and the matches are
//! saved as a new playlist. External services sit behind the traits in
//! [`ports`]; [`context::ServiceContext`] wires live, recording or replaying
//! adapters for them.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod playlist;
pub mod ports;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}
