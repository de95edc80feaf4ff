use std::time::SystemTime;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::api::models::MessageSummary;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::inbox::{
    self, InboxEvent, InboxState, LogOpenHook, NEW_MAIL_FLASH, PollOutcome, Poller,
};
use crate::render::{self, DetailPane, RenderModel};
use crate::session::SessionStore;

use super::read::print_pane;
use super::resolve_message_id;

/// New-mail flash lifecycle: arms for a fixed window when a poll brings new
/// mail, then self-clears once the deadline passes.
#[derive(Debug, Default)]
struct FlashState {
    until: Option<Instant>,
}

impl FlashState {
    fn arm(&mut self, now: Instant) {
        self.until = Some(now + NEW_MAIL_FLASH);
    }

    fn deadline(&self) -> Option<Instant> {
        self.until
    }

    fn active(&self) -> bool {
        self.until.is_some()
    }

    fn tick(&mut self, now: Instant) {
        if self.until.is_some_and(|deadline| now >= deadline) {
            self.until = None;
        }
    }
}

/// Applies a fetched list against the epoch captured when the fetch was
/// issued, so a list from a torn-down session is discarded. Returns whether
/// the new-mail flash should arm.
fn apply_list(state: &mut InboxState, epoch: u64, list: Vec<MessageSummary>) -> bool {
    matches!(
        state.apply_poll(epoch, list),
        PollOutcome::Applied { new_mail: true }
    )
}

#[derive(Debug, PartialEq, Eq)]
enum WatchCommand {
    Open(String),
    Remove(String),
    Back,
    Refresh,
    Clear,
    Quit,
    Unknown,
}

/// Live mode: a poller task feeds list snapshots over a channel while stdin
/// lines drive selection. Detail fetches run in their own tasks so a slow
/// fetch never blocks input; stale completions are dropped by the state's
/// ticket check.
pub async fn run(ctx: &AppContext) -> AppResult<()> {
    let mut session = ctx.require_session()?;
    let mut state = InboxState::default();

    let (events_tx, mut events) = mpsc::channel::<InboxEvent>(16);
    let poller = Poller::start(
        ctx.mail.clone(),
        session.token.clone(),
        state.epoch(),
        events_tx.clone(),
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut flash = FlashState::default();

    println!(
        "watching {} — open <n> · rm <n> · back · refresh · clear · quit",
        session.address
    );

    loop {
        let flash_deadline = flash.deadline();
        let flash_expiry = async move {
            match flash_deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                match event {
                    InboxEvent::Inbox { epoch, list } => {
                        if apply_list(&mut state, epoch, list) {
                            flash.arm(Instant::now());
                        }
                    }
                    InboxEvent::Detail(ticket, result) => {
                        state.apply_detail(&ticket, result);
                    }
                }
                redraw(&session, &state, flash.active());
            }
            _ = flash_expiry => {
                flash.tick(Instant::now());
                redraw(&session, &state, flash.active());
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    WatchCommand::Open(selector) => {
                        match resolve_message_id(state.messages(), &selector) {
                            Ok(id) => {
                                if inbox::note_first_open(&mut session, &LogOpenHook, &id) {
                                    ctx.session_store.save(&session)?;
                                }
                                if let Some(ticket) = state.select(&id) {
                                    let client = ctx.mail.clone();
                                    let token = session.token.clone();
                                    let tx = events_tx.clone();
                                    tokio::spawn(async move {
                                        let result = client.get_message(&token, ticket.id()).await;
                                        let _ = tx.send(InboxEvent::Detail(ticket, result)).await;
                                    });
                                }
                            }
                            Err(err) => println!("{err}"),
                        }
                    }
                    WatchCommand::Remove(selector) => {
                        match resolve_message_id(state.messages(), &selector) {
                            Ok(id) => {
                                // Optimistic: local removal happens no matter
                                // what the provider says.
                                let client = ctx.mail.clone();
                                let token = session.token.clone();
                                let remote_id = id.clone();
                                tokio::spawn(async move {
                                    if let Err(err) = client.delete_message(&token, &remote_id).await {
                                        log::warn!("provider delete for {remote_id} failed: {err}");
                                    }
                                });
                                state.remove_locally(&id);
                            }
                            Err(err) => println!("{err}"),
                        }
                    }
                    WatchCommand::Back => state.deselect(),
                    WatchCommand::Refresh => {
                        let epoch = state.epoch();
                        match ctx.mail.list_messages(&session.token).await {
                            Ok(list) => {
                                if apply_list(&mut state, epoch, list) {
                                    flash.arm(Instant::now());
                                }
                            }
                            Err(err) => log::warn!("refresh failed: {err}"),
                        }
                    }
                    WatchCommand::Clear => {
                        println!("clear the active mailbox session? type yes to confirm:");
                        let answer = lines.next_line().await?.unwrap_or_default();
                        if answer.trim().eq_ignore_ascii_case("yes") {
                            // Stop polling before tearing down; anything still
                            // in flight lands on a bumped epoch and is dropped.
                            poller.stop();
                            ctx.session_store.clear()?;
                            state.reset();
                            println!("session cleared");
                            return Ok(());
                        }
                        println!("aborted");
                    }
                    WatchCommand::Quit => break,
                    WatchCommand::Unknown => {
                        println!("commands: open <n> · rm <n> · back · refresh · clear · quit");
                    }
                }
                redraw(&session, &state, flash.active());
            }
        }
    }

    poller.stop();
    Ok(())
}

fn redraw(session: &crate::session::Session, state: &InboxState, flash: bool) {
    let model = render::project(Some(session), state, flash, SystemTime::now());
    draw(&model);
}

fn draw(model: &RenderModel) {
    println!();
    if let Some(mailbox) = &model.mailbox {
        let flash = if model.new_mail_flash {
            "  ** new mail **"
        } else {
            ""
        };
        println!("mailbox {} (created {}){flash}", mailbox.address, mailbox.age);
    }

    if model.inbox.is_empty() {
        println!("  no messages yet");
    } else {
        for (index, item) in model.inbox.iter().enumerate() {
            let marker = if item.selected { '>' } else { ' ' };
            println!(
                " {marker}{}. {} — {} ({})",
                index + 1,
                item.from,
                item.subject,
                item.created_at
            );
        }
        if let Some(count) = model.message_count {
            println!("  [{count} message{}]", if count == 1 { "" } else { "s" });
        }
    }

    if model.detail != DetailPane::Empty {
        println!("  ----");
        print_pane(&model.detail);
    }
}

fn parse_command(line: &str) -> WatchCommand {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("open"), Some(selector)) | (Some("o"), Some(selector)) => {
            WatchCommand::Open(selector.to_string())
        }
        (Some("rm"), Some(selector)) | (Some("d"), Some(selector)) => {
            WatchCommand::Remove(selector.to_string())
        }
        (Some(selector), None) if selector.parse::<usize>().is_ok() => {
            WatchCommand::Open(selector.to_string())
        }
        (Some("back"), None) | (Some("b"), None) => WatchCommand::Back,
        (Some("refresh"), None) | (Some("r"), None) => WatchCommand::Refresh,
        (Some("clear"), None) => WatchCommand::Clear,
        (Some("quit"), None) | (Some("q"), None) => WatchCommand::Quit,
        _ => WatchCommand::Unknown,
    }
}
