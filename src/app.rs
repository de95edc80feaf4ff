use crate::cli::{Cli, Command};
use crate::commands;
use crate::context::AppContext;
use crate::error::AppResult;

pub async fn run(cli: Cli) -> AppResult<()> {
    let Cli {
        json,
        verbose,
        command,
    } = cli;

    init_logging(verbose);
    let ctx = AppContext::bootstrap(json, verbose)?;

    match command {
        Command::Domains => commands::domains::run(&ctx).await,
        Command::New(args) => commands::new::run(&ctx, args).await,
        Command::Address => commands::address::run(&ctx),
        Command::Inbox => commands::inbox::run(&ctx).await,
        Command::Read(args) => commands::read::run(&ctx, args).await,
        Command::Rm(args) => commands::rm::run(&ctx, args).await,
        Command::Clear(args) => commands::clear::run(&ctx, args),
        Command::Watch => commands::watch::run(&ctx).await,
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
