//! Chat message formatting

use crate::models::ChatMessage;

/// Format one message for the terminal
pub fn format_message(message: &ChatMessage) -> String {
    let body = if message.is_streaming && message.content.is_empty() {
        "…"
    } else {
        message.content.as_str()
    };
    let marker = if message.is_error { " (error)" } else { "" };

    format!(
        "[{}] {}{}: {}",
        message.timestamp.format("%H:%M"),
        message.role,
        marker,
        body
    )
}
