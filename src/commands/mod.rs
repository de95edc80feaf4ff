pub mod address;
pub mod clear;
pub mod domains;
pub mod inbox;
pub mod new;
pub mod read;
pub mod rm;
pub mod watch;

use std::io::{self, IsTerminal, Write};

use crate::api::models::MessageSummary;
use crate::error::{AppError, AppResult};
use crate::session::Confirm;

/// Accepts either a raw message id or a 1-based index into the inbox list.
pub fn resolve_message_id(summaries: &[MessageSummary], selector: &str) -> AppResult<String> {
    if let Ok(index) = selector.parse::<usize>() {
        if index == 0 || index > summaries.len() {
            return Err(AppError::InvalidInput(format!(
                "index {index} is out of range; the inbox has {} messages",
                summaries.len()
            )));
        }
        return Ok(summaries[index - 1].id.clone());
    }

    summaries
        .iter()
        .find(|message| message.id == selector)
        .map(|message| message.id.clone())
        .ok_or_else(|| AppError::NotFound(format!("no message `{selector}` in the inbox")))
}

/// Prompts on the terminal; refuses to guess when stdin is not interactive.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> AppResult<bool> {
        if !io::stdin().is_terminal() {
            return Err(AppError::InvalidInput(
                "confirmation required; pass --yes to proceed non-interactively".to_string(),
            ));
        }

        let mut stdout = io::stdout();
        write!(stdout, "{prompt} [y/N]: ")?;
        stdout.flush()?;

        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        let answer = answer.trim();
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }
}

/// Used when `--yes` was given.
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> AppResult<bool> {
        Ok(true)
    }
}
