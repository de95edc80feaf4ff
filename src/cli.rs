use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "tmail", version, about = "Disposable mailbox command line client")]
pub struct Cli {
    #[arg(long, global = true, help = "Emit JSON output")]
    pub json: bool,
    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Verbose logging")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List domains available for new mailboxes
    Domains,
    /// Create a new disposable mailbox and make it the active session
    New(NewArgs),
    /// Print the active mailbox address
    Address,
    /// List messages in the active mailbox
    Inbox,
    /// Fetch and display a single message
    Read(ReadArgs),
    /// Delete a message
    Rm(RmArgs),
    /// Clear the active session
    Clear(ClearArgs),
    /// Poll the mailbox and interact with it live
    Watch,
}

#[derive(Debug, Args)]
pub struct NewArgs {
    #[arg(long, help = "Mailbox domain (defaults to the first available)")]
    pub domain: Option<String>,
}

#[derive(Debug, Args)]
pub struct ReadArgs {
    #[arg(help = "Message id or 1-based inbox index")]
    pub id: String,
}

#[derive(Debug, Args)]
pub struct RmArgs {
    #[arg(help = "Message id or 1-based inbox index")]
    pub id: String,
    #[arg(short = 'y', long, help = "Skip confirmation")]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct ClearArgs {
    #[arg(short = 'y', long, help = "Skip confirmation")]
    pub yes: bool,
}
