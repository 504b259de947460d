//! Chat command implementations
//!
//! Both commands bind the ledger's context block to a fresh session. Setup
//! problems (missing credentials, unusable ledger) abort before any turn;
//! per-turn completion failures are recoverable and keep the conversation.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use finsight_core::ai::{CompletionBackend, CompletionClient};
use finsight_core::session::{ChatSession, SessionConfig};
use finsight_core::summarize;

use super::report::build_report;

/// Build a session over the ledger at `path`
async fn open_session(path: &Path) -> Result<ChatSession> {
    let client = CompletionClient::from_env()
        .context("Completion backend is not configured")?;
    tracing::debug!(model = client.model(), host = client.host(), "Completion backend ready");

    let report = build_report(path, 10, 6)?;
    let block = summarize(&report).context("Failed to render context block")?;

    Ok(ChatSession::new(client, &block, SessionConfig::default()))
}

pub async fn cmd_ask(path: &Path, question: &str) -> Result<()> {
    let mut session = open_session(path).await?;
    let answer = session.ask(question).await.context("Completion call failed")?;
    println!("{}", answer);
    Ok(())
}

pub async fn cmd_chat(path: &Path) -> Result<()> {
    let mut session = open_session(path).await?;

    println!();
    println!("💬 FinSight chat — ask about your ledger");
    println!("   Commands: /clear resets the conversation, exit quits");
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("You: ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let input = line.trim();

        match input {
            "exit" | "quit" => break,
            "/clear" => {
                session.clear();
                println!("FinSight: Conversation cleared.");
                continue;
            }
            _ => {}
        }

        match session.ask(input).await {
            Ok(answer) => println!("FinSight: {}", answer),
            // Per-turn failure: the conversation survives, try again
            Err(e) => eprintln!("FinSight: (completion failed: {} — try again)", e),
        }
        println!();
    }

    Ok(())
}
