use crate::api::models::{MessageDetail, MessageSummary};
use crate::error::AppError;

/// Matches an async detail fetch back to the selection that issued it. A
/// completion whose ticket no longer matches the current selection state is
/// discarded (last-selected-wins).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    id: String,
    generation: u64,
    epoch: u64,
}

impl FetchTicket {
    pub fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Applied { new_mail: bool },
    /// The session was reset while the poll was in flight; nothing applied.
    Stale,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailState {
    #[default]
    Empty,
    Loading,
    Failed,
    Ready(MessageDetail),
}

/// Ordered message list plus selection, owned by a single controller.
/// The epoch counter ties results of in-flight requests to the session that
/// issued them; `reset` bumps it so late completions fall on the floor.
#[derive(Debug, Default)]
pub struct InboxState {
    messages: Vec<MessageSummary>,
    selected: Option<String>,
    detail: DetailState,
    epoch: u64,
    fetch_generation: u64,
}

impl InboxState {
    pub fn messages(&self) -> &[MessageSummary] {
        &self.messages
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Replaces the list wholesale with a poll result. `epoch` is the value
    /// of [`InboxState::epoch`] captured before the request was issued.
    /// Returns `new_mail: true` iff the list strictly grew.
    pub fn apply_poll(&mut self, epoch: u64, list: Vec<MessageSummary>) -> PollOutcome {
        if epoch != self.epoch {
            return PollOutcome::Stale;
        }

        let new_mail = list.len() > self.messages.len();

        if let Some(selected) = self.selected.as_deref()
            && !list.iter().any(|message| message.id == selected)
        {
            self.deselect();
        }

        self.messages = list;
        PollOutcome::Applied { new_mail }
    }

    /// Marks `id` selected and hands back a ticket for the detail fetch.
    /// Returns `None` when the id is not in the current list.
    pub fn select(&mut self, id: &str) -> Option<FetchTicket> {
        if !self.messages.iter().any(|message| message.id == id) {
            return None;
        }

        self.selected = Some(id.to_string());
        self.detail = DetailState::Loading;
        self.fetch_generation += 1;

        Some(FetchTicket {
            id: id.to_string(),
            generation: self.fetch_generation,
            epoch: self.epoch,
        })
    }

    /// Applies a completed detail fetch. Stale tickets are ignored so a slow
    /// fetch for a previous selection never overwrites the current view.
    pub fn apply_detail(
        &mut self,
        ticket: &FetchTicket,
        result: Result<MessageDetail, AppError>,
    ) -> bool {
        if ticket.epoch != self.epoch || ticket.generation != self.fetch_generation {
            return false;
        }
        if self.selected.as_deref() != Some(ticket.id.as_str()) {
            return false;
        }

        self.detail = match result {
            Ok(detail) => DetailState::Ready(detail),
            Err(err) => {
                log::warn!("failed to load message {}: {err}", ticket.id);
                DetailState::Failed
            }
        };
        true
    }

    pub fn deselect(&mut self) {
        self.selected = None;
        self.detail = DetailState::Empty;
    }

    /// Optimistic removal: the message leaves the local list whether or not
    /// the provider-side delete succeeded.
    pub fn remove_locally(&mut self, id: &str) -> bool {
        let before = self.messages.len();
        self.messages.retain(|message| message.id != id);

        if self.selected.as_deref() == Some(id) {
            self.deselect();
        }

        self.messages.len() != before
    }

    /// Session teardown: drops all local state and invalidates any result
    /// still in flight.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.messages.clear();
        self.deselect();
    }
}
