//! Session CLI commands: list, show.
//!
//! Read-only views over stored sessions. Both go through the session service,
//! so `show` enforces the same ownership rule as the HTTP API.

use anyhow::{Context, Result};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use mediachat_types::session::{MessageRole, SessionId};

use crate::cli::format_relative_time;
use crate::state::AppState;

/// List the sessions owned by `owner`.
///
/// # Examples
///
/// ```bash
/// mediachat sessions list --owner <identity-id>
/// mediachat sessions list --owner <identity-id> --json
/// ```
pub async fn list_sessions(state: &AppState, owner: &str, json: bool) -> Result<()> {
    let sessions = state.session_service.list(owner).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!();
        println!(
            "  {} No sessions found for identity '{}'",
            style("i").blue().bold(),
            style(owner).cyan()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Title").fg(Color::White),
        Cell::new("ID").fg(Color::White),
        Cell::new("Created").fg(Color::White),
        Cell::new("Messages").fg(Color::White),
    ]);

    for session in &sessions {
        let title_display = if session.title.chars().count() > 40 {
            format!("{}...", session.title.chars().take(37).collect::<String>())
        } else {
            session.title.clone()
        };

        table.add_row(vec![
            Cell::new(title_display).fg(Color::Cyan),
            Cell::new(session.id.to_string()).fg(Color::DarkGrey),
            Cell::new(format_relative_time(&session.created_at)),
            Cell::new(session.messages.len().to_string()),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} session{}",
        style(sessions.len()).bold(),
        if sessions.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Print the messages of a session owned by `owner`.
pub async fn show_session(
    state: &AppState,
    session_id: &str,
    owner: &str,
    json: bool,
) -> Result<()> {
    let id: SessionId = session_id
        .trim()
        .parse()
        .ok()
        .with_context(|| format!("Session '{session_id}' not found"))?;

    let messages = state
        .session_service
        .get_messages(&id, owner)
        .await
        .with_context(|| format!("Cannot show session '{session_id}'"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    println!();
    if messages.is_empty() {
        println!("  {} No messages yet", style("i").blue().bold());
        println!();
        return Ok(());
    }

    for message in &messages {
        let who = match message.role {
            MessageRole::User => style("you").green().bold(),
            MessageRole::Assistant => style("assistant").cyan().bold(),
        };
        let kind = message
            .media_kind
            .map(|k| format!(" [{k}]"))
            .unwrap_or_default();

        println!(
            "  {}{} {}",
            who,
            style(kind).dim(),
            style(message.timestamp.format("%Y-%m-%d %H:%M:%S")).dim()
        );
        println!("    {}", message.content);
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use mediachat_types::identity::Identity;
    use mediachat_types::session::{GenerateRequest, MediaKind};

    use super::*;

    async fn state_with_session() -> (tempfile::TempDir, AppState, String) {
        let tmp = tempfile::tempdir().unwrap();
        let state = AppState::open(tmp.path().to_path_buf()).await.unwrap();

        let session = state
            .session_service
            .create("u1", "Ann", "Hello")
            .await
            .unwrap();
        let owner = Identity {
            id: "u1".to_string(),
            name: "Ann".to_string(),
        };
        state
            .orchestrator
            .generate(
                &owner,
                GenerateRequest {
                    session_id: session.id.to_string(),
                    prompt: "draw a cat".to_string(),
                    media_kind: MediaKind::Graphics,
                },
            )
            .await
            .unwrap();

        (tmp, state, session.id.to_string())
    }

    #[tokio::test]
    async fn test_list_and_show_for_owner() {
        let (_tmp, state, id) = state_with_session().await;

        list_sessions(&state, "u1", false).await.unwrap();
        list_sessions(&state, "u1", true).await.unwrap();
        show_session(&state, &id, "u1", false).await.unwrap();
    }

    #[tokio::test]
    async fn test_show_rejects_other_owner_and_bad_ids() {
        let (_tmp, state, id) = state_with_session().await;

        assert!(show_session(&state, &id, "u2", false).await.is_err());
        assert!(show_session(&state, "not-a-uuid", "u1", false).await.is_err());
        assert!(
            show_session(&state, &SessionId::new().to_string(), "u1", false)
                .await
                .is_err()
        );
    }
}
