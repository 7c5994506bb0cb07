mod commands;

use clap::Parser;
use commands::{execute_command, utils::create_client, Commands};

/// Browse the play-out history of ABC radio stations
#[derive(Parser)]
#[command(
    name = "abc-radio",
    about = "Browse the play-out history of ABC radio stations",
    long_about = None
)]
struct Cli {
    /// Show detailed debug information
    #[arg(long, global = true)]
    verbose: bool,

    /// Search endpoint (defaults to $ABC_RADIO_BASE_URL, then the public ABC API)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // RUST_LOG still wins over the verbose flag
    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let client = create_client(args.base_url);
    log::debug!("Using search endpoint {}", client.config().base_url);

    if let Err(e) = execute_command(args.command, &client).await {
        eprintln!("❌ Command failed: {e}");
        std::process::exit(1);
    }
}
