//! `passvault-pin` -- deliver a one-time PIN to a user's email address.
//!
//! `send` pushes the PIN through the configured fallback chain (SMTP
//! providers, then console, then the local delivery log). `demo` prints a
//! simulated request/response walkthrough without contacting anything.
//!
//! Chain configuration is read from the environment (a `.env` file is
//! honoured); see `NotifierConfig::from_env` for the variables.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use passvault_pin::cli::{Cli, Command};
use passvault_pin::{demo, send};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "passvault_pin=info,passvault_notifier=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Send(args) => match send::run(args).await {
            Ok(true) => {}
            Ok(false) => std::process::exit(1),
            Err(e) => {
                tracing::error!(error = ?e, "PIN delivery aborted");
                std::process::exit(1);
            }
        },
        Command::Demo(args) => {
            let mut stdout = std::io::stdout();
            if let Err(e) = demo::run(&args, &mut stdout).await {
                tracing::error!(error = ?e, "Demo output failed");
            }
        }
    }
}
