//! Assistant chat CLI command
//!
//! With a message argument, asks once and prints the reply. Without one,
//! reads questions from stdin until `exit`, `quit` or end of input.

use tokio::io::{AsyncBufReadExt, BufReader};

use super::AppContext;
use crate::display::format_message;
use crate::error::LedgerDeskResult;
use crate::models::ChatSession;
use crate::services::ChatService;

/// Handle the chat command
pub async fn handle_chat_command(ctx: &AppContext, message: Option<String>) -> LedgerDeskResult<()> {
    let service = ChatService::new(&ctx.client);
    let mut session = ChatSession::new();

    if let Some(message) = message {
        if let Some(id) = service.ask(&mut session, &message).await {
            if let Some(reply) = session.get(&id) {
                println!("{}", reply.content);
            }
        }
        return Ok(());
    }

    if let Some(id) = service.greet(&mut session) {
        if let Some(greeting) = session.get(&id) {
            println!("{}", format_message(greeting));
        }
    }
    println!("Type 'exit' to leave.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprint!("> ");
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if let Some(id) = service.ask(&mut session, line).await {
            if let Some(reply) = session.get(&id) {
                println!("{}", format_message(reply));
            }
        }
    }

    Ok(())
}
