pub mod body;

use std::time::SystemTime;

use crate::api::models::{MessageBody, MessageDetail};
use crate::inbox::{DetailState, InboxState};
use crate::session::Session;

/// Everything the display surface needs, computed without touching it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    pub mailbox: Option<MailboxPanel>,
    pub inbox: Vec<InboxItem>,
    /// Message-count badge; hidden when the inbox is empty.
    pub message_count: Option<usize>,
    pub detail: DetailPane,
    pub new_mail_flash: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailboxPanel {
    pub address: String,
    pub age: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxItem {
    pub id: String,
    pub from: String,
    pub subject: String,
    pub created_at: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailPane {
    Empty,
    Loading,
    Failed,
    Html(String),
    Text(String),
}

/// Pure projection of application state into the render model. With no
/// session the whole surface is hidden, whatever the rest of the state says.
pub fn project(
    session: Option<&Session>,
    state: &InboxState,
    new_mail_flash: bool,
    now: SystemTime,
) -> RenderModel {
    let Some(session) = session else {
        return RenderModel {
            mailbox: None,
            inbox: Vec::new(),
            message_count: None,
            detail: DetailPane::Empty,
            new_mail_flash: false,
        };
    };

    let inbox: Vec<InboxItem> = state
        .messages()
        .iter()
        .map(|message| InboxItem {
            id: message.id.clone(),
            from: message.sender_label().to_string(),
            subject: message.subject_label().to_string(),
            created_at: message.created_at.clone().unwrap_or_default(),
            selected: state.selected() == Some(message.id.as_str()),
        })
        .collect();

    let message_count = match inbox.len() {
        0 => None,
        count => Some(count),
    };

    RenderModel {
        mailbox: Some(MailboxPanel {
            address: session.address.clone(),
            age: format_age(session.age_seconds(now)),
        }),
        inbox,
        message_count,
        detail: detail_pane(state.detail()),
        new_mail_flash,
    }
}

pub fn detail_pane(state: &DetailState) -> DetailPane {
    match state {
        DetailState::Empty => DetailPane::Empty,
        DetailState::Loading => DetailPane::Loading,
        DetailState::Failed => DetailPane::Failed,
        DetailState::Ready(detail) => pane_for_detail(detail),
    }
}

pub fn pane_for_detail(detail: &MessageDetail) -> DetailPane {
    match detail.body() {
        MessageBody::Html(html) => DetailPane::Html(body::sanitize_html(&html)),
        MessageBody::Text(text) => DetailPane::Text(body::linkify(&text)),
    }
}

pub fn format_age(seconds: u64) -> String {
    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86400 {
        format!("{}h ago", seconds / 3600)
    } else {
        format!("{}d ago", seconds / 86400)
    }
}
