//! Response length shaping.
//!
//! The token budget sent to the generation backend is a soft limit, so
//! completions can come back oversized. The shaper derives a hard word
//! ceiling from the same budget and trims anything above it.

/// Estimated words per model token.
pub const WORDS_PER_TOKEN: f64 = 0.75;

/// Words held back below the ceiling when truncating, leaving room for a
/// clean cut and the ellipsis.
pub const TRUNCATION_MARGIN: usize = 5;

/// Marker appended to truncated responses.
pub const ELLIPSIS: &str = "...";

/// Enforce the word ceiling implied by `max_tokens`.
///
/// At or under the ceiling the text passes through untouched, original
/// whitespace included. Above it, the first `ceiling - TRUNCATION_MARGIN`
/// words (clamped at zero) survive, joined by single spaces, with
/// [`ELLIPSIS`] appended as its own whitespace-separated token.
pub fn shape_response(answer: &str, max_tokens: u32) -> String {
    let max_words = (f64::from(max_tokens) * WORDS_PER_TOKEN).floor() as usize;
    let words: Vec<&str> = answer.split_whitespace().collect();

    if words.len() <= max_words {
        return answer.to_string();
    }

    let keep = max_words.saturating_sub(TRUNCATION_MARGIN);
    if keep == 0 {
        return ELLIPSIS.to_string();
    }
    format!("{} {}", words[..keep].join(" "), ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(count: usize) -> String {
        (0..count)
            .map(|i| format!("w{i}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn under_the_ceiling_is_untouched() {
        // 200 tokens allow 150 words; whitespace quirks survive verbatim.
        let answer = "short  answer\twith   odd spacing";
        assert_eq!(shape_response(answer, 200), answer);
    }

    #[test]
    fn at_the_ceiling_is_untouched() {
        let answer = words(150);
        assert_eq!(shape_response(&answer, 200), answer);
    }

    #[test]
    fn over_the_ceiling_is_cut_with_margin() {
        // 10 tokens → ceiling 7 words → keep 2.
        let shaped = shape_response(&words(20), 10);
        assert_eq!(shaped, "w0 w1 ...");
        assert_eq!(shaped.split_whitespace().count(), 3);
    }

    #[test]
    fn tiny_budget_leaves_only_the_ellipsis() {
        // 4 tokens → ceiling 3 words → margin swallows everything.
        assert_eq!(shape_response(&words(12), 4), "...");
        assert_eq!(shape_response(&words(12), 0), "...");
    }

    #[test]
    fn empty_answer_stays_empty() {
        assert_eq!(shape_response("", 0), "");
        assert_eq!(shape_response("", 200), "");
    }

    #[test]
    fn ceiling_uses_the_floor_of_the_estimate() {
        // 9 tokens → 6.75 → ceiling 6 words, so 7 words get cut to 1 + ellipsis.
        let shaped = shape_response(&words(7), 9);
        assert_eq!(shaped, "w0 ...");
    }
}
