use aria2_options::api::Gid;
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct OptionsCommands {
    #[command(subcommand)]
    pub command: OptionsSubcommands,
}

#[derive(Subcommand)]
pub enum OptionsSubcommands {
    /// Print the value of one option
    Get {
        /// Option name (`max-download-limit` or `max_download_limit`)
        name: String,
        /// Download GID; global options when omitted
        #[arg(short, long)]
        gid: Option<Gid>,
    },
    /// Change one option on the daemon
    Set {
        /// Option name
        name: String,
        /// New value
        value: String,
        /// Download GID; global options when omitted
        #[arg(short, long)]
        gid: Option<Gid>,
    },
    /// Print every option
    Show {
        /// Download GID; global options when omitted
        #[arg(short, long)]
        gid: Option<Gid>,
        /// Only show options whose name contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },
}
