//! `voicemate init-db`.

use anyhow::{bail, Result};
use console::style;

use crate::state::AppState;

pub async fn init_db(state: &AppState, json: bool) -> Result<()> {
    let ok = state.service.ensure_schema().await;
    let backend = state.service.repo().backend();

    if json {
        let out = serde_json::json!({ "backend": backend, "schema_ready": ok });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if ok {
        println!(
            "  {} conversations table ready ({})",
            style("✓").green(),
            style(backend).cyan()
        );
    }

    if !ok {
        bail!("could not create the conversations table on {backend}; see the log for details");
    }
    Ok(())
}
