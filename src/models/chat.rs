//! Virtual CFO chat session
//!
//! An ordered list of messages exchanged with the assistant. Message ids are
//! `msg-N`, assigned from a per-session counter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "You"),
            Self::Assistant => write!(f, "CFO"),
        }
    }
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_error: bool,
    /// Still waiting for the assistant's reply
    #[serde(default)]
    pub is_streaming: bool,
}

/// Flags for a newly added message
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageOptions {
    pub is_error: bool,
    pub is_streaming: bool,
}

/// Partial update applied to an existing message
#[derive(Debug, Clone, Default)]
pub struct MessageUpdate {
    pub content: Option<String>,
    pub is_error: Option<bool>,
    pub is_streaming: Option<bool>,
}

/// The running conversation
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    counter: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn get(&self, id: &str) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Append a message and return its id
    pub fn add_message(
        &mut self,
        content: impl Into<String>,
        role: Role,
        options: MessageOptions,
    ) -> String {
        self.counter += 1;
        let id = format!("msg-{}", self.counter);
        self.messages.push(ChatMessage {
            id: id.clone(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            is_error: options.is_error,
            is_streaming: options.is_streaming,
        });
        id
    }

    /// Merge an update into the message with `id`. Returns false if there is no such message.
    pub fn update_message(&mut self, id: &str, update: MessageUpdate) -> bool {
        let Some(message) = self.messages.iter_mut().find(|m| m.id == id) else {
            return false;
        };
        if let Some(content) = update.content {
            message.content = content;
        }
        if let Some(is_error) = update.is_error {
            message.is_error = is_error;
        }
        if let Some(is_streaming) = update.is_streaming {
            message.is_streaming = is_streaming;
        }
        true
    }

    /// Mark a message as no longer streaming
    pub fn complete_streaming(&mut self, id: &str) -> bool {
        self.update_message(
            id,
            MessageUpdate {
                is_streaming: Some(false),
                ..MessageUpdate::default()
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut session = ChatSession::new();
        let a = session.add_message("hi", Role::User, MessageOptions::default());
        let b = session.add_message("hello", Role::Assistant, MessageOptions::default());
        assert_eq!(a, "msg-1");
        assert_eq!(b, "msg-2");
        assert_eq!(session.messages().len(), 2);
    }

    #[test]
    fn test_update_and_complete() {
        let mut session = ChatSession::new();
        let id = session.add_message(
            "",
            Role::Assistant,
            MessageOptions {
                is_streaming: true,
                ..MessageOptions::default()
            },
        );
        assert!(session.get(&id).unwrap().is_streaming);

        assert!(session.update_message(
            &id,
            MessageUpdate {
                content: Some("Cash flow looks healthy.".into()),
                ..MessageUpdate::default()
            }
        ));
        assert!(session.complete_streaming(&id));

        let message = session.get(&id).unwrap();
        assert_eq!(message.content, "Cash flow looks healthy.");
        assert!(!message.is_streaming);
        assert!(!message.is_error);
    }

    #[test]
    fn test_update_unknown_message() {
        let mut session = ChatSession::new();
        assert!(!session.complete_streaming("msg-9"));
    }
}
