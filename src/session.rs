// src/session.rs
//! Client-side conversation log.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One chat entry. Fields are private so an appended message cannot change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    id: u64,
    role: Role,
    content: String,
    created_at: DateTime<Utc>,
}

impl Message {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Opaque backend token plus the append-only message log.
#[derive(Debug, Clone, Default)]
pub struct Session {
    session_id: Option<String>,
    messages: Vec<Message>,
    next_id: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session whose log opens with an assistant greeting.
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.push(Role::Assistant, greeting);
        session
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    // Append a message and return it. Ids are ordinals starting at 1.
    pub(crate) fn push(&mut self, role: Role, content: impl Into<String>) -> &Message {
        self.next_id += 1;
        self.messages.push(Message {
            id: self.next_id,
            role,
            content: content.into(),
            created_at: Utc::now(),
        });
        &self.messages[self.messages.len() - 1]
    }

    pub(crate) fn set_session_id(&mut self, token: String) {
        self.session_id = Some(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_keeps_insertion_order() {
        let mut session = Session::new();
        assert!(session.is_empty());
        session.push(Role::User, "bir");
        session.push(Role::User, "iki");
        session.push(Role::Assistant, "üç");

        let contents: Vec<_> = session.messages().iter().map(Message::content).collect();
        assert_eq!(contents, ["bir", "iki", "üç"]);

        let ids: Vec<_> = session.messages().iter().map(Message::id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn greeting_is_first_assistant_message() {
        let session = Session::with_greeting("Merhaba!");
        assert_eq!(session.len(), 1);
        assert_eq!(session.messages()[0].role(), Role::Assistant);
        assert_eq!(session.session_id(), None);
    }

    #[test]
    fn backend_token_replaces_previous() {
        let mut session = Session::new();
        session.set_session_id("abc".into());
        session.set_session_id("def".into());
        assert_eq!(session.session_id(), Some("def"));
    }
}
