//! Append-only message store for one session.

use leadchat_types::chat::{MessageRole, Turn};

/// Ordered, append-only sequence of turns.
///
/// Turns are never edited or removed once appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Number of turns authored by the user.
    pub fn user_turn_count(&self) -> usize {
        self.turns
            .iter()
            .filter(|t| t.role == MessageRole::User)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut conv = Conversation::new();
        conv.push(Turn::assistant("Hello"));
        conv.push(Turn::user("Hi"));
        conv.push(Turn::assistant("How can I help?"));

        let contents: Vec<&str> = conv.turns().iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, ["Hello", "Hi", "How can I help?"]);
        assert_eq!(conv.last().unwrap().content, "How can I help?");
    }

    #[test]
    fn test_user_turn_count() {
        let mut conv = Conversation::new();
        assert!(conv.is_empty());
        conv.push(Turn::assistant("Hello"));
        conv.push(Turn::user("one"));
        conv.push(Turn::assistant("reply"));
        conv.push(Turn::user("two"));
        assert_eq!(conv.len(), 4);
        assert_eq!(conv.user_turn_count(), 2);
    }
}
