//! Parsing free-text model output into track candidates.

use crate::error::PlaylistError;
use crate::models::TrackCandidate;

/// Parses a raw completion, splitting it on newlines.
///
/// # Errors
///
/// Returns [`PlaylistError::MalformedLine`] for a non-blank line without a comma.
pub fn parse_completion(raw: &str) -> Result<Vec<TrackCandidate>, PlaylistError> {
    parse_lines(raw.lines())
}

/// Parses `N. Title,Artist` lines into candidates with ordinals `1..=N`.
///
/// Blank lines are skipped and do not consume an ordinal. The leading
/// `<digits>.` marker is optional. Title and artist are split on the first
/// comma and trimmed.
///
/// # Errors
///
/// Returns [`PlaylistError::MalformedLine`] for a non-blank line without a comma.
pub fn parse_lines<I, S>(lines: I) -> Result<Vec<TrackCandidate>, PlaylistError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut candidates = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        let entry = strip_ordinal_marker(line);
        let Some((title, artist)) = entry.split_once(',') else {
            return Err(PlaylistError::MalformedLine { line: index + 1, content: entry.to_string() });
        };

        let ordinal = u32::try_from(candidates.len() + 1).unwrap_or(u32::MAX);
        candidates.push(TrackCandidate {
            title: title.trim().to_string(),
            artist: artist.trim().to_string(),
            ordinal,
        });
    }

    Ok(candidates)
}

/// Removes a leading `<digits>.` marker and the whitespace after it.
fn strip_ordinal_marker(line: &str) -> &str {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return line;
    }
    match line[digits..].strip_prefix('.') {
        Some(rest) => rest.trim_start(),
        None => line,
    }
}
