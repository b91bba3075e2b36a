//! Human-readable excerpt extraction for search hits.

/// Target snippet window size in bytes, centered on the first match.
const WINDOW: usize = 200;

/// Build an excerpt of `text` around the first case-insensitive occurrence of
/// any of `tokens`.
///
/// The window is roughly [`WINDOW`] characters centered on the match, with
/// ellipsis markers when truncated. If no token occurs in the text, a simple
/// leading substring is returned instead.
pub(crate) fn build_snippet(text: &str, tokens: &[String]) -> String {
    let lowered = text.to_lowercase();

    let first_match = tokens
        .iter()
        .filter(|token| !token.is_empty())
        .filter_map(|token| lowered.find(token.as_str()))
        .min();

    match first_match {
        Some(position) => {
            // Offsets come from the lowercased text; clamp to char
            // boundaries of the original in case lowercasing shifted bytes.
            let position = floor_char_boundary(text, position.min(text.len()));
            let start = floor_char_boundary(text, position.saturating_sub(WINDOW / 2));
            let end = ceil_char_boundary(text, (position + WINDOW / 2).min(text.len()));

            let mut snippet = String::new();
            if start > 0 {
                snippet.push('…');
            }
            snippet.push_str(text[start..end].trim());
            if end < text.len() {
                snippet.push('…');
            }
            snippet
        }
        None => leading(text),
    }
}

/// Leading substring fallback when no query token occurs in the text.
fn leading(text: &str) -> String {
    if text.len() <= WINDOW {
        return text.trim().to_string();
    }
    let end = ceil_char_boundary(text, WINDOW);
    format!("{}…", text[..end].trim())
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(text: &str, mut index: usize) -> usize {
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index
}
