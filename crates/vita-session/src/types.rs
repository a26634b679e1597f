use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vita_core::Message;

/// One visitor's conversation: an ordered, append-only log of turns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
    messages: Vec<Message>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            created_at: now,
            last_activity_at: now,
            messages: Vec::new(),
        }
    }

    /// Append a turn. Turns are never mutated or removed afterwards.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.last_activity_at = Utc::now();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn idle_for(&self) -> chrono::Duration {
        Utc::now().signed_duration_since(self.last_activity_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vita_core::Role;

    #[test]
    fn test_push_preserves_order() {
        let mut session = Session::new("s1");
        session.push(Message::user("first"));
        session.push(Message::assistant("second"));

        assert_eq!(session.len(), 2);
        assert_eq!(session.messages()[0].content, "first");
        assert_eq!(session.last_message().unwrap().role, Role::Assistant);
    }

    #[test]
    fn test_push_touches_activity() {
        let mut session = Session::new("s1");
        let before = session.last_activity_at;
        session.push(Message::user("hi"));
        assert!(session.last_activity_at >= before);
    }
}
