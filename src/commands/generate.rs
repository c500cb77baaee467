//! `playlistgpt generate` command.

use serde_json::json;

use crate::config::AppConfig;
use crate::context::ServiceContext;
use crate::models::{NewPlaylistParams, PlaylistResult};
use crate::playlist::PlaylistGenerator;

/// Execute the `generate` command and print the playlist URL.
///
/// # Errors
///
/// Returns an error string if the runtime cannot start or generation fails.
pub fn run(
    ctx: &ServiceContext,
    config: &AppConfig,
    params: &NewPlaylistParams,
    json: bool,
) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    let result = runtime
        .block_on(PlaylistGenerator::new(ctx, config).generate_new_playlist(params))
        .map_err(|e| e.to_string())?;

    println!("{}", render(&result, json));
    Ok(())
}

fn render(result: &PlaylistResult, json: bool) -> String {
    if json {
        json!({ "playlist_url": result.url }).to_string()
    } else {
        result.url.clone()
    }
}
