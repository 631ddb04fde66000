//! Explicit per-session chat state.
//!
//! The reference UI kept chat history and the open/closed toggle in
//! module-level globals. Here each session is an explicit value keyed by a
//! generated id: created at session start, passed into and returned from the
//! chat exchange, cleared at session end. The store is the only mutable
//! state in the serving layer.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message in a chat session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// The state of one chat session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    /// Whether the chat panel is open in the UI.
    pub open: bool,
    /// Full message history, oldest first.
    pub messages: Vec<ChatMessage>,
}

impl ChatSession {
    /// Appends a user message.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            text: text.into(),
        });
    }

    /// Appends an assistant reply.
    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: ChatRole::Assistant,
            text: text.into(),
        });
    }
}

/// In-memory store of chat sessions, keyed by generated session id.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, ChatSession>>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh session and returns its id.
    pub fn create(&self) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions.lock().insert(id.clone(), ChatSession::default());
        id
    }

    /// Snapshot of a session's state, if it exists.
    pub fn get(&self, id: &str) -> Option<ChatSession> {
        self.sessions.lock().get(id).cloned()
    }

    /// Replaces a session's state, creating the session if needed.
    pub fn put(&self, id: &str, session: ChatSession) {
        self.sessions.lock().insert(id.to_string(), session);
    }

    /// Runs `f` against the live session under the lock, returning its
    /// result, or `None` without calling `f` if the session does not exist.
    ///
    /// Unlike [`get`](Self::get) + [`put`](Self::put), concurrent updates to
    /// the same session cannot lose each other's turns, and a session
    /// cleared mid-exchange stays cleared. `f` must not block.
    pub fn with_session<T>(&self, id: &str, f: impl FnOnce(&mut ChatSession) -> T) -> Option<T> {
        self.sessions.lock().get_mut(id).map(f)
    }

    /// Removes a session at session end.
    pub fn clear(&self, id: &str) -> bool {
        self.sessions.lock().remove(id).is_some()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Returns true if no sessions are live.
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_get_put_clear_lifecycle() {
        let store = SessionStore::new();
        let id = store.create();
        assert_eq!(store.get(&id), Some(ChatSession::default()));

        let mut session = store.get(&id).unwrap();
        session.open = true;
        session.push_user("hello");
        session.push_assistant("hi there");
        store.put(&id, session);

        let loaded = store.get(&id).unwrap();
        assert!(loaded.open);
        assert_eq!(loaded.messages.len(), 2);
        assert_eq!(loaded.messages[0].role, ChatRole::User);

        assert!(store.clear(&id));
        assert!(store.get(&id).is_none());
        assert!(!store.clear(&id));
    }

    #[test]
    fn with_session_mutates_in_place() {
        let store = SessionStore::new();
        let id = store.create();

        let previous = store.with_session(&id, |s| {
            let len = s.messages.len();
            s.push_user("hello");
            len
        });
        assert_eq!(previous, Some(0));
        assert_eq!(store.get(&id).unwrap().messages.len(), 1);

        assert_eq!(store.with_session("nope", |s| s.messages.len()), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn sessions_are_isolated() {
        let store = SessionStore::new();
        let a = store.create();
        let b = store.create();

        let mut session_a = store.get(&a).unwrap();
        session_a.push_user("only in a");
        store.put(&a, session_a);

        assert!(store.get(&b).unwrap().messages.is_empty());
        assert_eq!(store.len(), 2);
    }
}
