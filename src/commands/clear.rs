use crate::cli::ClearArgs;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::session::{Confirm, SessionStore};

use super::{AlwaysConfirm, StdinConfirm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared,
    Aborted,
    NoSession,
}

pub fn run(ctx: &AppContext, args: ClearArgs) -> AppResult<()> {
    let confirm: &dyn Confirm = if args.yes { &AlwaysConfirm } else { &StdinConfirm };

    match clear_with(&ctx.session_store, confirm)? {
        ClearOutcome::Cleared => println!("session cleared"),
        ClearOutcome::Aborted => println!("aborted"),
        ClearOutcome::NoSession => println!("no active mailbox"),
    }
    Ok(())
}

/// Removing the persisted session also discards the opened-message set and
/// everything that depends on the mailbox.
pub fn clear_with(store: &dyn SessionStore, confirm: &dyn Confirm) -> AppResult<ClearOutcome> {
    if store.load()?.is_none() {
        return Ok(ClearOutcome::NoSession);
    }

    if !confirm.confirm("clear the active mailbox session?")? {
        return Ok(ClearOutcome::Aborted);
    }

    store.clear()?;
    Ok(ClearOutcome::Cleared)
}
