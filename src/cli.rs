use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "rtchat", about = "Terminal client for the realtime chat server")]
pub struct Cli {
    /// Path to config file (default: ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Username to send messages as (overrides the config file)
    #[arg(long, global = true, value_name = "USERNAME")]
    pub from: Option<String>,

    /// Username of the conversation peer (overrides the config file)
    #[arg(long, global = true, value_name = "USERNAME")]
    pub to: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Connect to the chat server and start the TUI shell
    Run,
}

impl Cli {
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }
}
