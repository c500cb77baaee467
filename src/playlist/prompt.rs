//! Few-shot prompt construction.

use std::fmt::Write as _;

const PREAMBLE: &str = "You are a music curator. For each request, suggest real, released songs \
that match the description. Answer with a numbered list, one song per line, written as \
Title,Artist.";

/// Fixed worked examples shown to the model before the real request.
const EXAMPLES: [(u32, &str, &[(&str, &str)]); 2] = [
    (
        3,
        "Upbeat songs for a summer road trip",
        &[
            ("Mr. Blue Sky", "Electric Light Orchestra"),
            ("Walking on Sunshine", "Katrina and the Waves"),
            ("Dreams", "Fleetwood Mac"),
        ],
    ),
    (
        4,
        "Melancholy piano pieces for a rainy evening",
        &[
            ("Gymnopedie No. 1", "Erik Satie"),
            ("Nuvole Bianche", "Ludovico Einaudi"),
            ("Clair de Lune", "Claude Debussy"),
            ("Comptine d'un autre ete", "Yann Tiersen"),
        ],
    ),
];

/// Builds the completion prompt for `count` songs matching `seed_description`.
///
/// The output is a pure function of its inputs. Only the first character of
/// the seed is upper-cased.
#[must_use]
pub fn build_prompt(count: u32, seed_description: &str) -> String {
    let mut prompt = String::from(PREAMBLE);
    prompt.push_str("\n\n");

    for (example_count, description, songs) in EXAMPLES {
        push_request(&mut prompt, example_count, description);
        for (i, (title, artist)) in songs.iter().enumerate() {
            let _ = writeln!(prompt, "{}. {title},{artist}", i + 1);
        }
        prompt.push('\n');
    }

    push_request(&mut prompt, count, &capitalize_first(seed_description.trim()));
    prompt
}

fn push_request(prompt: &mut String, count: u32, description: &str) {
    let _ = writeln!(
        prompt,
        "Create a playlist of {count} songs that fit the following description: {description}"
    );
    prompt.push_str("List:\n");
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_is_deterministic() {
        assert_eq!(build_prompt(5, "songs for a rainy day"), build_prompt(5, "songs for a rainy day"));
    }

    #[test]
    fn prompt_ends_with_templated_request() {
        let prompt = build_prompt(3, "ambient focus music");
        assert!(prompt.ends_with(
            "Create a playlist of 3 songs that fit the following description: \
             Ambient focus music\nList:\n"
        ));
    }

    #[test]
    fn prompt_contains_exactly_two_examples() {
        let prompt = build_prompt(3, "ambient focus music");
        assert_eq!(prompt.matches("Create a playlist of").count(), 3);
        assert_eq!(prompt.matches("List:\n").count(), 3);
        assert!(prompt.contains("1. Mr. Blue Sky,Electric Light Orchestra\n"));
        assert!(prompt.contains("4. Comptine d'un autre ete,Yann Tiersen\n"));
    }

    #[test]
    fn capitalization_applies_once() {
        let prompt = build_prompt(2, "lo-fi beats to study to");
        assert!(prompt.contains("description: Lo-fi beats to study to\n"));

        let already = build_prompt(2, "Lo-fi beats to study to");
        assert_eq!(prompt, already);
    }

    #[test]
    fn capitalize_handles_non_ascii_and_empty() {
        assert_eq!(capitalize_first("éte indien"), "Éte indien");
        assert_eq!(capitalize_first(""), "");
    }
}
