use clap::{Args, Subcommand};

#[derive(Args)]
pub struct ServerCommands {
    #[command(subcommand)]
    pub command: ServerSubcommands,
}

#[derive(Subcommand)]
pub enum ServerSubcommands {
    /// List configured servers
    List,
    /// Add or replace a server
    Add {
        /// Name to refer to the server by
        name: String,
        /// Host running aria2c with --enable-rpc
        #[arg(long, default_value = "localhost")]
        host: String,
        /// RPC port
        #[arg(long, default_value_t = aria2_options::api::constants::DEFAULT_PORT)]
        port: u16,
        /// Value of --rpc-secret
        #[arg(long)]
        secret: Option<String>,
        /// Connect over HTTPS
        #[arg(long)]
        secure: bool,
    },
    /// Make a server the current one
    Use {
        /// Server name
        name: String,
    },
    /// Remove a server
    Remove {
        /// Server name
        name: String,
    },
}
