use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = tmail::cli::Cli::parse();

    if let Err(err) = tmail::run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
