//! Identity CLI commands: create, list.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use crate::cli::format_relative_time;
use crate::state::AppState;

/// Create an identity and print its API key once.
///
/// # Examples
///
/// ```bash
/// mediachat identity create "Ann"
/// ```
pub async fn create_identity(state: &AppState, name: &str, json: bool) -> Result<()> {
    let (record, api_key) = state.identity_store.create_identity(name).await?;

    if json {
        let out = serde_json::json!({
            "id": record.id,
            "name": record.name,
            "created_at": record.created_at,
            "api_key": api_key,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Identity '{}' created",
        style("✓").green().bold(),
        style(&record.name).cyan()
    );
    println!();
    println!("  {}  {}", style("ID:").bold(), style(&record.id).dim());
    println!();
    println!(
        "  {} API key (save this -- it won't be shown again):",
        style("🔑").bold()
    );
    println!();
    println!("  {}", style(&api_key).yellow().bold());
    println!();
    println!(
        "  Use it as {} or {}",
        style("Authorization: Bearer <key>").dim(),
        style("X-API-Key: <key>").dim()
    );
    println!();

    Ok(())
}

/// List identities in a table.
pub async fn list_identities(state: &AppState, json: bool) -> Result<()> {
    let identities = state.identity_store.list_identities().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&identities)?);
        return Ok(());
    }

    if identities.is_empty() {
        println!();
        println!(
            "  {} No identities yet. Create one with: {}",
            style("i").blue().bold(),
            style("mediachat identity create <name>").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("ID").fg(Color::White),
        Cell::new("Created").fg(Color::White),
        Cell::new("Last Seen").fg(Color::White),
    ]);

    for identity in &identities {
        let last_seen = match &identity.last_seen_at {
            Some(dt) => format_relative_time(dt),
            None => "never".to_string(),
        };

        table.add_row(vec![
            Cell::new(&identity.name).fg(Color::Cyan),
            Cell::new(&identity.id).fg(Color::DarkGrey),
            Cell::new(identity.created_at.format("%Y-%m-%d %H:%M").to_string()),
            Cell::new(last_seen).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} identit{}",
        style(identities.len()).bold(),
        if identities.len() == 1 { "y" } else { "ies" }
    );
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_list_identities() {
        let tmp = tempfile::tempdir().unwrap();
        let state = AppState::open(tmp.path().to_path_buf()).await.unwrap();

        create_identity(&state, "Ann", true).await.unwrap();
        list_identities(&state, false).await.unwrap();

        let listed = state.identity_store.list_identities().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Ann");
    }

    #[tokio::test]
    async fn test_create_identity_rejects_blank_name() {
        let tmp = tempfile::tempdir().unwrap();
        let state = AppState::open(tmp.path().to_path_buf()).await.unwrap();

        assert!(create_identity(&state, "  ", false).await.is_err());
    }
}
