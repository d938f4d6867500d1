use super::commands::{OptionsCommands, ServerCommands};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "aria2-options")]
#[command(about = "Read and change aria2 options over JSON-RPC", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Global and per-download options
    Options(OptionsCommands),
    /// Configured aria2 servers
    Server(ServerCommands),
}
