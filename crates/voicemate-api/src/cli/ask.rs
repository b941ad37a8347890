//! `voicemate ask`: one exchange from the terminal.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Run `text` through the conversation service and print the reply.
///
/// The exchange is stored exactly like a `/process` request.
pub async fn ask(state: &AppState, text: &str, json: bool) -> Result<()> {
    let reply = state.service.process(text).await?;

    if json {
        let out = serde_json::json!({ "reply": reply });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("  {} {}", style("you").dim(), text.trim());
    println!("  {} {}", style("voicemate").cyan().bold(), reply);
    println!();
    Ok(())
}
