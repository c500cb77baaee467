//! `playlistgpt auth-url` command.

use crate::adapters::live::catalog::authorize_url;
use crate::config::AppConfig;
use crate::models::Visibility;

/// Execute the `auth-url` command: print the URL a user opens to grant the
/// playlist scope for the requested visibility.
///
/// # Errors
///
/// Returns an error string if the client id or redirect URL is not configured.
pub fn run(config: &AppConfig, public: bool) -> Result<(), String> {
    println!("{}", url_for(config, public)?);
    Ok(())
}

fn url_for(config: &AppConfig, public: bool) -> Result<String, String> {
    let visibility = if public { Visibility::Public } else { Visibility::Private };
    authorize_url(&config.catalog, visibility.required_scope())
}
