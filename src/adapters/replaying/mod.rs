//! Replaying adapters that serve recorded interactions.

pub mod catalog;
pub mod llm;

use std::error::Error;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;

pub use catalog::ReplayingCatalog;
pub use llm::ReplayingLlmClient;

/// Take the next recorded output for `port::method`.
///
/// # Panics
///
/// Panics when no replayer is configured or the cassette is exhausted.
pub(crate) fn next_output(
    replayer: Option<&Arc<Mutex<CassetteReplayer>>>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let replayer = replayer.unwrap_or_else(|| {
        panic!("{port} port not configured for replay: no cassette loaded for {port}::{method}")
    });
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).output
}

/// Take the recorded output for `port::method` whose input matches `input`,
/// falling back to recorded order.
///
/// # Panics
///
/// Panics when no replayer is configured or the cassette is exhausted.
pub(crate) fn matching_output(
    replayer: Option<&Arc<Mutex<CassetteReplayer>>>,
    port: &str,
    method: &str,
    input: &serde_json::Value,
) -> serde_json::Value {
    let replayer = replayer.unwrap_or_else(|| {
        panic!("{port} port not configured for replay: no cassette loaded for {port}::{method}")
    });
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_matching(port, method, input).output
}

/// Take the recorded output for `port::method` whose input equals `input`.
///
/// # Panics
///
/// Panics when no replayer is configured or no recorded input matches.
pub(crate) fn exact_output(
    replayer: Option<&Arc<Mutex<CassetteReplayer>>>,
    port: &str,
    method: &str,
    input: &serde_json::Value,
) -> serde_json::Value {
    let replayer = replayer.unwrap_or_else(|| {
        panic!("{port} port not configured for replay: no cassette loaded for {port}::{method}")
    });
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_for_input(port, method, input).output
}

/// Decode a recorded `{"Ok": v}` / `{"Err": msg}` output.
///
/// Mirror of `recording::record_result`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, Box<dyn Error + Send + Sync>> {
    if let Some(err) = output.get("Err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("Ok").cloned().unwrap_or(output);
    serde_json::from_value(value)
        .map_err(|e| format!("failed to deserialize recorded output: {e}").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replay_result_decodes_ok_and_err() {
        let ok: Result<String, _> = replay_result(json!({"Ok": "user-1"}));
        assert_eq!(ok.unwrap(), "user-1");

        let err: Result<String, _> = replay_result(json!({"Err": "rate limited"}));
        assert_eq!(err.unwrap_err().to_string(), "rate limited");
    }

    #[test]
    fn replay_result_reports_shape_mismatch() {
        let bad: Result<u32, _> = replay_result(json!({"Ok": "not a number"}));
        assert!(bad.unwrap_err().to_string().contains("failed to deserialize"));
    }

    #[test]
    #[should_panic(expected = "not configured for replay")]
    fn missing_replayer_panics() {
        let _ = next_output(None, "catalog", "current_user");
    }
}
