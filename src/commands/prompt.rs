//! `playlistgpt prompt` command.

use crate::models::GenerationRequest;
use crate::playlist::build_prompt;

/// Execute the `prompt` command: print the prompt for `seed` and `count`.
///
/// # Errors
///
/// Returns an error string if the parameters are invalid.
pub fn run(seed: &str, count: u32) -> Result<(), String> {
    print!("{}", render(seed, count)?);
    Ok(())
}

fn render(seed: &str, count: u32) -> Result<String, String> {
    let request = GenerationRequest::new(count, seed).map_err(|e| e.to_string())?;
    Ok(build_prompt(request.count(), request.seed_description()))
}
