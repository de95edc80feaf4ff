use serde::Serialize;

use crate::cli::RmArgs;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::session::Confirm;

use super::{AlwaysConfirm, StdinConfirm, resolve_message_id};

#[derive(Debug, Serialize)]
struct RemoveResult {
    id: String,
    note: String,
}

/// Deletion is optimistic: the provider call is best-effort and a failure is
/// logged without being surfaced as a command error.
pub async fn run(ctx: &AppContext, args: RmArgs) -> AppResult<()> {
    let session = ctx.require_session()?;
    let summaries = ctx.mail.list_messages(&session.token).await?;
    let id = resolve_message_id(&summaries, &args.id)?;

    let confirm: &dyn Confirm = if args.yes { &AlwaysConfirm } else { &StdinConfirm };
    if !confirm.confirm("delete this message?")? {
        println!("aborted");
        return Ok(());
    }

    if let Err(err) = ctx.mail.delete_message(&session.token, &id).await {
        log::warn!("provider delete for {id} failed, message removed locally anyway: {err}");
    }

    let result = RemoveResult {
        id: id.clone(),
        note: "message deleted".to_string(),
    };
    ctx.output.emit("message deleted", &result)
}
