use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::MailClient;
use crate::api::models::{MessageDetail, MessageSummary};
use crate::error::AppError;

use super::state::FetchTicket;

pub const POLL_INTERVAL: Duration = Duration::from_secs(4);

/// How long the new-mail flash stays visible before it self-clears.
pub const NEW_MAIL_FLASH: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub enum InboxEvent {
    /// A poll completed with the full current message list. Carries the
    /// state epoch the poller was started under, so results from a torn-down
    /// session fail the stale check instead of being applied.
    Inbox {
        epoch: u64,
        list: Vec<MessageSummary>,
    },
    /// A detail fetch completed for the selection identified by the ticket.
    Detail(FetchTicket, Result<MessageDetail, AppError>),
}

/// Cancellable repeating poll task. The first tick fires immediately, so the
/// initial fetch is always sequenced before the first interval tick. Poll
/// failures are logged and skipped; the loop self-heals on the next tick.
#[derive(Debug)]
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    pub fn start(
        client: MailClient,
        token: String,
        epoch: u64,
        events: mpsc::Sender<InboxEvent>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(POLL_INTERVAL);
            loop {
                ticker.tick().await;
                match client.list_messages(&token).await {
                    Ok(list) => {
                        if events.send(InboxEvent::Inbox { epoch, list }).await.is_err() {
                            break;
                        }
                    }
                    Err(err) => log::warn!("inbox poll failed: {err}"),
                }
            }
        });

        Self { handle }
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
