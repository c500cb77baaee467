//! Binary entrypoint for the `playlistgpt` CLI.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("playlistgpt=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Recording is handled in commands::dispatch via PLAYLISTGPT_RECORD=<dir>.
    match playlistgpt::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
