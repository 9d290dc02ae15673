//! Conversation turn domain types.
//!
//! These are the core value objects that flow through the entire system:
//! the gateway receives a query and its history → the pipeline resolves it →
//! the generation backend sees the same turns on the wire.

use serde::{Deserialize, Serialize};

/// The role of a turn's author in the dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The answering service
    Assistant,
    /// Persona / behavioral instructions
    System,
}

/// A single turn in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who authored this turn
    pub role: Role,

    /// The text content
    pub content: String,
}

impl Turn {
    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Create a system turn.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Whether this turn carries persona instructions.
    pub fn is_system(&self) -> bool {
        self.role == Role::System
    }
}

/// A conversation is an ordered sequence of turns, oldest first.
///
/// Callers may send arbitrarily long histories; the pipeline bounds them
/// before anything downstream sees them.
pub type Conversation = Vec<Turn>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_turn() {
        let turn = Turn::user("How do I register a product?");
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.content, "How do I register a product?");
        assert!(!turn.is_system());
    }

    #[test]
    fn system_turn_is_system() {
        assert!(Turn::system("You are a helpful assistant.").is_system());
        assert!(!Turn::assistant("Hello!").is_system());
    }

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_string(&Turn::assistant("hi")).unwrap();
        assert!(json.contains(r#""role":"assistant""#));

        let json = serde_json::to_string(&Turn::system("persona")).unwrap();
        assert!(json.contains(r#""role":"system""#));
    }

    #[test]
    fn turn_serialization_roundtrip() {
        let turn = Turn::user("Test message");
        let json = serde_json::to_string(&turn).unwrap();
        let deserialized: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, turn);
    }
}
