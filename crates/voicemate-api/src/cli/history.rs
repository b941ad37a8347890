//! `voicemate history`: recent exchanges as a table or JSON.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use voicemate_types::conversation::{ConversationRecord, TIMESTAMP_FORMAT};

use crate::state::AppState;

const MAX_CELL_CHARS: usize = 60;

pub async fn history(state: &AppState, limit: u32, json: bool) -> Result<()> {
    let records = state.service.recent_history(limit).await;

    if json {
        let out = serde_json::json!({ "messages": records });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if records.is_empty() {
        println!();
        println!(
            "  {} No conversations yet. Start one with: {}",
            style("i").blue().bold(),
            style("voicemate ask hello").yellow()
        );
        println!();
        return Ok(());
    }

    println!();
    println!("{}", history_table(&records));
    println!();
    Ok(())
}

fn history_table(records: &[ConversationRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("When").fg(Color::White),
        Cell::new("You").fg(Color::White),
        Cell::new("Voicemate").fg(Color::White),
    ]);

    for record in records {
        let when = record
            .timestamp
            .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default();

        table.add_row(vec![
            Cell::new(record.id).fg(Color::DarkGrey),
            Cell::new(when).fg(Color::DarkGrey),
            Cell::new(truncate(&record.user_input)).fg(Color::Cyan),
            Cell::new(truncate(&record.assistant_reply)),
        ]);
    }

    table
}

/// Shorten long text on a char boundary.
fn truncate(text: &str) -> String {
    if text.chars().count() > MAX_CELL_CHARS {
        let head: String = text.chars().take(MAX_CELL_CHARS - 3).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
