//! Negation cue detection.
//!
//! A keyword match is ignored when the few characters right before it end with a negation cue
//! ("no fever", "denies: chest pain"). The lookback is a fixed character window, not a parse of
//! the sentence, so a cue is honoured only when it is the last token before the keyword.

use crate::constants::NEGATION_WINDOW_CHARS;
use regex::Regex;
use std::sync::LazyLock;

static NEGATION_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:no|not|without|negative|denies|don't have|never)[\s:]*$")
        .expect("negation cue pattern is valid")
});

/// Returns the text window of at most `NEGATION_WINDOW_CHARS` characters ending at byte offset
/// `match_start`.
///
/// `match_start` must lie on a character boundary of `text`.
pub fn lookback_window(text: &str, match_start: usize) -> &str {
    let before = &text[..match_start];
    let start = before
        .char_indices()
        .rev()
        .nth(NEGATION_WINDOW_CHARS - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &before[start..]
}

/// Whether the match starting at byte offset `match_start` is preceded by a negation cue.
pub fn is_negated(text: &str, match_start: usize) -> bool {
    NEGATION_CUE.is_match(lookback_window(text, match_start))
}
