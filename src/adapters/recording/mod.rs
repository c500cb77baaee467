//! Recording adapters that capture interactions to cassettes.

pub mod catalog;
pub mod llm;

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::warn;

use crate::cassette::recorder::CassetteRecorder;

pub use catalog::RecordingCatalog;
pub use llm::RecordingLlmClient;

/// Record a `Result<T, E>` interaction using the Ok/Err JSON convention.
///
/// Mirror of `replaying::replay_result`:
/// - `Ok(v)` is serialized as `{"Ok": v}`
/// - `Err(e)` is serialized as `{"Err": e.to_string()}`
///
/// A value that cannot be serialized is logged and skipped; recording never
/// changes the outcome of the wrapped call.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let serialized = serde_json::to_value(input).and_then(|input| {
        let output = match result {
            Ok(v) => serde_json::json!({ "Ok": serde_json::to_value(v)? }),
            Err(e) => serde_json::json!({ "Err": e.to_string() }),
        };
        Ok((input, output))
    });

    match serialized {
        Ok((input, output)) => {
            let mut guard = recorder.lock().expect("recorder lock poisoned");
            guard.record(port, method, input, output);
        }
        Err(e) => warn!(port, method, error = %e, "skipping unserializable interaction"),
    }
}
