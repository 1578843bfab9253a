//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "passvault-pin", version, about = "Deliver PassVault access PINs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Deliver a PIN through the configured fallback chain.
    Send(SendArgs),
    /// Print a simulated send-pin request/response walkthrough.
    Demo(DemoArgs),
}

#[derive(Debug, Args)]
pub struct SendArgs {
    /// Recipient email address.
    #[arg(long)]
    pub email: String,

    /// Name used to personalise the message.
    #[arg(long)]
    pub name: String,

    /// PIN to deliver; a random one is generated when omitted.
    #[arg(long)]
    pub pin: Option<String>,
}

#[derive(Debug, Args)]
pub struct DemoArgs {
    #[arg(long, default_value = "user@example.com")]
    pub email: String,

    #[arg(long, default_value = "1234")]
    pub pin: String,

    #[arg(long, default_value = "Demo User")]
    pub name: String,

    /// File the demo appends its PIN record to.
    #[arg(long, default_value = crate::demo::DEMO_LOG_FILE)]
    pub log_file: PathBuf,
}
