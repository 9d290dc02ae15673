//! Conversation history bounding.

use faqline_core::Turn;

/// Default cap on turns handed to the generation backend.
pub const MAX_CONVERSATION_TURNS: usize = 512;

/// Keep only the most recent `max_turns` turns, dropping the oldest first.
///
/// Relative order is preserved and the cut is role-blind; keeping a persona
/// turn alive is the pipeline's job, not the bounder's.
pub fn bound_conversation(mut turns: Vec<Turn>, max_turns: usize) -> Vec<Turn> {
    if turns.len() > max_turns {
        turns.split_off(turns.len() - max_turns)
    } else {
        turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: usize) -> Vec<Turn> {
        (0..count).map(|i| Turn::user(format!("turn {i}"))).collect()
    }

    #[test]
    fn short_history_passes_through() {
        let turns = numbered(5);
        let bounded = bound_conversation(turns.clone(), 512);
        assert_eq!(bounded, turns);
    }

    #[test]
    fn exact_length_passes_through() {
        let turns = numbered(512);
        assert_eq!(bound_conversation(turns.clone(), 512), turns);
    }

    #[test]
    fn long_history_keeps_the_recent_suffix() {
        let bounded = bound_conversation(numbered(600), 512);
        assert_eq!(bounded.len(), 512);
        assert_eq!(bounded[0].content, "turn 88");
        assert_eq!(bounded[511].content, "turn 599");
    }

    #[test]
    fn order_is_preserved() {
        let bounded = bound_conversation(numbered(10), 3);
        let contents: Vec<_> = bounded.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, ["turn 7", "turn 8", "turn 9"]);
    }

    #[test]
    fn zero_cap_empties_the_history() {
        assert!(bound_conversation(numbered(4), 0).is_empty());
    }
}
