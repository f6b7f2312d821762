//! Assistant chat service
//!
//! Sends one prompt per user message. Backend failures become an error
//! message in the session instead of an `Err`, so a conversation never
//! aborts because one request failed.

use crate::api::ApiClient;
use crate::models::{ChatSession, MessageOptions, MessageUpdate, Role};

pub const GREETING: &str = "Hello! I'm your AI assistant. How can I help you today?";
pub const EMPTY_REPLY: &str = "I apologize, but I couldn't generate a proper response.";
pub const ERROR_REPLY: &str =
    "I'm sorry, I encountered an error while processing your message. Please try again.";

/// Service for the assistant conversation
pub struct ChatService<'a> {
    client: &'a ApiClient,
}

impl<'a> ChatService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Add the opening assistant message to an empty session
    pub fn greet(&self, session: &mut ChatSession) -> Option<String> {
        if !session.messages().is_empty() {
            return None;
        }
        Some(session.add_message(GREETING, Role::Assistant, MessageOptions::default()))
    }

    /// Ask the assistant and record both sides of the exchange
    ///
    /// Returns the id of the assistant message. Blank input is ignored.
    pub async fn ask(&self, session: &mut ChatSession, message: &str) -> Option<String> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        session.add_message(message, Role::User, MessageOptions::default());
        let reply_id = session.add_message(
            "",
            Role::Assistant,
            MessageOptions {
                is_streaming: true,
                ..MessageOptions::default()
            },
        );

        let update = match self.client.prompt(message).await {
            Ok(response) => {
                let content = if response.trim().is_empty() {
                    EMPTY_REPLY.to_string()
                } else {
                    response
                };
                MessageUpdate {
                    content: Some(content),
                    is_streaming: Some(false),
                    ..MessageUpdate::default()
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Prompt failed");
                MessageUpdate {
                    content: Some(ERROR_REPLY.to_string()),
                    is_error: Some(true),
                    is_streaming: Some(false),
                }
            }
        };

        session.update_message(&reply_id, update);
        Some(reply_id)
    }
}
