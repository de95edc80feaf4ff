use clap::Parser;
use tmail::cli::{Cli, Command};

#[test]
fn parses_new_with_domain() {
    let cli = Cli::try_parse_from(["tmail", "new", "--domain", "bugfoo.com"])
        .expect("cli parse should work");
    match cli.command {
        Command::New(new) => assert_eq!(new.domain.as_deref(), Some("bugfoo.com")),
        _ => panic!("expected new command"),
    }
}

#[test]
fn parses_read() {
    let cli = Cli::try_parse_from(["tmail", "read", "abc123"]).expect("cli parse should work");
    match cli.command {
        Command::Read(read) => assert_eq!(read.id, "abc123"),
        _ => panic!("expected read command"),
    }
}

#[test]
fn parses_rm_with_yes() {
    let cli = Cli::try_parse_from(["tmail", "rm", "2", "-y"]).expect("cli parse should work");
    match cli.command {
        Command::Rm(rm) => {
            assert_eq!(rm.id, "2");
            assert!(rm.yes);
        }
        _ => panic!("expected rm command"),
    }
}

#[test]
fn parses_clear_and_watch() {
    let cli = Cli::try_parse_from(["tmail", "clear", "--yes"]).expect("cli parse should work");
    match cli.command {
        Command::Clear(clear) => assert!(clear.yes),
        _ => panic!("expected clear command"),
    }

    let cli = Cli::try_parse_from(["tmail", "watch"]).expect("cli parse should work");
    assert!(matches!(cli.command, Command::Watch));
}

#[test]
fn json_flag_is_global() {
    let cli = Cli::try_parse_from(["tmail", "inbox", "--json"]).expect("cli parse should work");
    assert!(cli.json);
    assert!(matches!(cli.command, Command::Inbox));
}
