//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Serves a cassette's interactions back in order, one queue per
/// port/method pair.
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Take the first queued interaction for `port::method` whose recorded
    /// input equals `input`, or the next one in order when none matches.
    ///
    /// Calls that run concurrently may be recorded in a different order than
    /// they are replayed; matching on input keeps their outputs paired.
    ///
    /// # Panics
    ///
    /// Panics like [`Self::next_interaction`] when nothing is left.
    pub fn next_matching(
        &mut self,
        port: &str,
        method: &str,
        input: &serde_json::Value,
    ) -> Interaction {
        let key = (port.to_string(), method.to_string());
        if let Some(queue) = self.queues.get_mut(&key) {
            if let Some(pos) = queue.iter().position(|i| &i.input == input) {
                if let Some(found) = queue.remove(pos) {
                    return found;
                }
            }
        }
        self.next_interaction(port, method)
    }

    /// Take the first queued interaction for `port::method` recorded with
    /// exactly `input`.
    ///
    /// An interaction whose recorded input is `null` or `{}` matches any
    /// input, so hand-written cassettes may omit it.
    ///
    /// # Panics
    ///
    /// Panics if no queued interaction matches, showing the requested input.
    pub fn next_for_input(
        &mut self,
        port: &str,
        method: &str,
        input: &serde_json::Value,
    ) -> Interaction {
        let key = (port.to_string(), method.to_string());
        let found = self.queues.get_mut(&key).and_then(|queue| {
            let pos = queue.iter().position(|i| accepts_any(&i.input) || &i.input == input)?;
            queue.remove(pos)
        });

        found.unwrap_or_else(|| {
            panic!(
                "Cassette mismatch: no recorded interaction for port={port:?} method={method:?} \
                 matches input {input}"
            )
        })
    }

    /// Take the next interaction for the given port and method.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the given
    /// port/method combination, listing what the cassette does contain.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        let key = (port.to_string(), method.to_string());
        let Some(queue) = self.queues.get_mut(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        };

        queue.pop_front().unwrap_or_else(|| {
            panic!(
                "Cassette exhausted: all interactions for port={port:?} method={method:?} \
                 have been consumed"
            )
        })
    }

    /// Number of interactions not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }
}

fn accepts_any(input: &serde_json::Value) -> bool {
    input.is_null() || input.as_object().is_some_and(serde_json::Map::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn interaction(seq: u64, port: &str, method: &str, output: serde_json::Value) -> Interaction {
        Interaction { seq, port: port.into(), method: method.into(), input: json!({}), output }
    }

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            version: "0.1.0".into(),
            interactions,
        }
    }

    #[test]
    fn replays_each_method_in_order() {
        let cassette = make_cassette(vec![
            interaction(0, "catalog", "search_tracks", json!({"Ok": [{"id": "a", "name": "A"}]})),
            interaction(1, "catalog", "current_user", json!({"Ok": "user"})),
            interaction(2, "catalog", "search_tracks", json!({"Ok": []})),
        ]);

        let mut replayer = CassetteReplayer::new(&cassette);
        assert_eq!(replayer.remaining(), 3);

        assert_eq!(replayer.next_interaction("catalog", "search_tracks").seq, 0);
        assert_eq!(replayer.next_interaction("catalog", "current_user").seq, 1);
        let last = replayer.next_interaction("catalog", "search_tracks");
        assert_eq!(last.seq, 2);
        assert_eq!(last.output, json!({"Ok": []}));
        assert_eq!(replayer.remaining(), 0);
    }

    #[test]
    fn matches_on_recorded_input() {
        let with_input = |seq: u64, track: &str, id: &str| Interaction {
            seq,
            port: "catalog".into(),
            method: "search_tracks".into(),
            input: json!({"track": track}),
            output: json!({"Ok": [{"id": id, "name": track}]}),
        };
        let cassette = make_cassette(vec![with_input(0, "November", "n"), with_input(1, "Divenire", "d")]);

        let mut replayer = CassetteReplayer::new(&cassette);
        let second = replayer.next_matching("catalog", "search_tracks", &json!({"track": "Divenire"}));
        assert_eq!(second.seq, 1);
        let fallback = replayer.next_matching("catalog", "search_tracks", &json!({"track": "Other"}));
        assert_eq!(fallback.seq, 0);
        assert_eq!(replayer.remaining(), 0);
    }

    #[test]
    fn exact_input_match_skips_other_requests() {
        let recorded = |seq: u64, prompt: &str| Interaction {
            seq,
            port: "llm".into(),
            method: "complete".into(),
            input: json!({"prompt": prompt}),
            output: json!({"Ok": {"text": prompt}}),
        };
        let cassette = make_cassette(vec![recorded(0, "jazz"), recorded(1, "ambient")]);

        let mut replayer = CassetteReplayer::new(&cassette);
        let hit = replayer.next_for_input("llm", "complete", &json!({"prompt": "ambient"}));
        assert_eq!(hit.seq, 1);
        assert_eq!(replayer.remaining(), 1);
    }

    #[test]
    fn empty_recorded_input_matches_anything() {
        let cassette = make_cassette(vec![interaction(0, "llm", "complete", json!({"Ok": null}))]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let hit = replayer.next_for_input("llm", "complete", &json!({"prompt": "anything"}));
        assert_eq!(hit.seq, 0);
    }

    #[test]
    #[should_panic(expected = "Cassette mismatch")]
    fn unmatched_input_panics() {
        let cassette = make_cassette(vec![Interaction {
            seq: 0,
            port: "llm".into(),
            method: "complete".into(),
            input: json!({"prompt": "jazz"}),
            output: json!({}),
        }]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_for_input("llm", "complete", &json!({"prompt": "ambient"}));
    }

    #[test]
    #[should_panic(expected = "have been consumed")]
    fn exhausted_replayer_panics_with_descriptive_message() {
        let cassette = make_cassette(vec![interaction(0, "llm", "complete", json!({}))]);

        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("llm", "complete");
        let _ = replayer.next_interaction("llm", "complete");
    }

    #[test]
    #[should_panic(expected = "no interactions recorded")]
    fn unknown_port_panics() {
        let mut replayer = CassetteReplayer::new(&make_cassette(vec![]));
        let _ = replayer.next_interaction("unknown", "method");
    }
}
