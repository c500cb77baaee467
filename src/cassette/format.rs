//! Cassette data structures for recording and replaying interactions.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded interaction with an external port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name (e.g. "llm", "catalog").
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Input data sent to the port.
    pub input: serde_json::Value,
    /// Output data returned from the port.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Crate version that produced the recording.
    pub version: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Reads and parses a YAML cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
    }

    /// Interactions recorded for one port, in sequence order.
    pub fn port_interactions<'a>(&'a self, port: &'a str) -> impl Iterator<Item = &'a Interaction> {
        self.interactions.iter().filter(move |i| i.port == port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_cassette() -> Cassette {
        Cassette {
            name: "test-cassette".into(),
            recorded_at: Utc::now(),
            version: "0.1.0".into(),
            interactions: vec![
                Interaction {
                    seq: 0,
                    port: "llm".into(),
                    method: "complete".into(),
                    input: json!({"prompt": "List:"}),
                    output: json!({"Ok": {"text": "1. Weightless,Marconi Union"}}),
                },
                Interaction {
                    seq: 1,
                    port: "catalog".into(),
                    method: "search_tracks".into(),
                    input: json!({"artist": "Marconi Union", "track": "Weightless", "limit": 1}),
                    output: json!({"Ok": [{"id": "t1", "name": "Weightless"}]}),
                },
            ],
        }
    }

    #[test]
    fn load_reads_written_yaml() {
        let dir = std::env::temp_dir().join("playlistgpt_cassette_format_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sample.cassette.yaml");
        let cassette = sample_cassette();
        std::fs::write(&path, serde_yaml::to_string(&cassette).unwrap()).unwrap();

        assert_eq!(Cassette::load(&path).unwrap(), cassette);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Cassette::load(Path::new("/no/such/cassette.yaml")).unwrap_err();
        assert!(err.contains("Failed to read cassette file"));
    }

    #[test]
    fn port_interactions_filters_by_port() {
        let cassette = sample_cassette();
        let methods: Vec<&str> =
            cassette.port_interactions("catalog").map(|i| i.method.as_str()).collect();
        assert_eq!(methods, vec!["search_tracks"]);
    }
}
