use serde::Serialize;

use crate::cli::ReadArgs;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::inbox::{self, LogOpenHook};
use crate::output::OutputMode;
use crate::render::{self, DetailPane};
use crate::session::SessionStore;

use super::resolve_message_id;

#[derive(Debug, Serialize)]
struct ReadFailure<'a> {
    id: &'a str,
    error: String,
}

/// Opening a message fires the one-time-per-id hook, then lazily fetches the
/// full content. A failed fetch renders an inline failure instead of
/// aborting.
pub async fn run(ctx: &AppContext, args: ReadArgs) -> AppResult<()> {
    let mut session = ctx.require_session()?;
    let summaries = ctx.mail.list_messages(&session.token).await?;
    let id = resolve_message_id(&summaries, &args.id)?;

    if inbox::note_first_open(&mut session, &LogOpenHook, &id) {
        ctx.session_store.save(&session)?;
    }

    match ctx.mail.get_message(&session.token, &id).await {
        Ok(detail) => {
            let pane = render::pane_for_detail(&detail);
            let meta = format!(
                "{} — {} ({})",
                detail.sender_label(),
                detail.subject_label(),
                detail.created_at.as_deref().unwrap_or("no date"),
            );

            match ctx.output.mode() {
                OutputMode::Text => {
                    println!("{meta}");
                    println!();
                    print_pane(&pane);
                    Ok(())
                }
                OutputMode::Json => ctx.output.emit(&meta, &detail),
            }
        }
        Err(err) => {
            log::warn!("failed to load message {id}: {err}");
            let failure = ReadFailure {
                id: &id,
                error: err.to_string(),
            };
            match ctx.output.mode() {
                OutputMode::Text => {
                    print_pane(&DetailPane::Failed);
                    Ok(())
                }
                OutputMode::Json => ctx.output.emit("failed to load message", &failure),
            }
        }
    }
}

pub(super) fn print_pane(pane: &DetailPane) {
    match pane {
        DetailPane::Empty => println!("select a message to view"),
        DetailPane::Loading => println!("loading..."),
        DetailPane::Failed => println!("failed to load message"),
        DetailPane::Html(html) => println!("{html}"),
        DetailPane::Text(text) => println!("{text}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_payload_serializes_with_id_and_error() {
        let failure = ReadFailure {
            id: "m1",
            error: "network failure".to_string(),
        };

        let json = serde_json::to_value(&failure).expect("serialize");
        assert_eq!(json["id"], "m1");
        assert_eq!(json["error"], "network failure");
    }
}
