//! Command dispatch and handlers.

pub mod auth_url;
pub mod generate;
pub mod prompt;

use std::env;
use std::path::PathBuf;

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::config::AppConfig;
use crate::context::ServiceContext;
use crate::models::NewPlaylistParams;

/// Dispatch a parsed command to its handler.
///
/// When `PLAYLISTGPT_RECORD` is set to a directory path, the LLM and catalog
/// interactions of `generate` are recorded to per-port cassette files in a
/// timestamped directory beneath it.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the selected
/// command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    match command {
        Command::Prompt { seed, count } => prompt::run(seed, *count),
        Command::AuthUrl { public } => auth_url::run(&AppConfig::from_env()?, *public),
        Command::Generate { name, seed, count, public, collaborative, json } => {
            let config = AppConfig::from_env()?;
            let params = NewPlaylistParams {
                name: name.clone(),
                seed_description: seed.clone(),
                count: *count,
                public: *public,
                collaborative: *collaborative,
            };
            with_context(&config, |ctx| generate::run(ctx, &config, &params, *json))
        }
    }
}

/// Run `f` against a live context, recording it when `PLAYLISTGPT_RECORD` is set.
fn with_context<F>(config: &AppConfig, f: F) -> Result<(), String>
where
    F: FnOnce(&ServiceContext) -> Result<(), String>,
{
    let Some(root) = recording_root(env::var("PLAYLISTGPT_RECORD").ok()) else {
        return f(&ServiceContext::live(config));
    };

    let session = RecordingSession::new(&root)?;
    let ctx = ServiceContext::recording(config, &session);
    let result = f(&ctx);

    // Recording adapters hold the recorders; release them before finishing.
    drop(ctx);
    finish_recording(session)?;

    result
}

/// The recording directory named by a `PLAYLISTGPT_RECORD` value; blank means unset.
fn recording_root(value: Option<String>) -> Option<PathBuf> {
    value.filter(|v| !v.trim().is_empty()).map(PathBuf::from)
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_record_variable_means_no_recording() {
        assert_eq!(recording_root(None), None);
        assert_eq!(recording_root(Some(String::new())), None);
        assert_eq!(recording_root(Some("  ".into())), None);
    }

    #[test]
    fn record_variable_names_the_root() {
        assert_eq!(recording_root(Some("cassettes".into())), Some(PathBuf::from("cassettes")));
    }
}
