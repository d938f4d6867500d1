use anyhow::Result;
use aria2_options::config::{Config, ServerConfig};
use clap::Parser;
use log::info;

mod cli;
mod commands;

use cli::Cli;
use cli::Commands;
use cli::commands::{OptionsSubcommands, ServerSubcommands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("aria2-options.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting aria2-options");

    let mut config = Config::load()?;

    match cli.command {
        Commands::Options(options) => match options.command {
            OptionsSubcommands::Get { name, gid } => {
                commands::options::get_command(&config, name, gid).await
            }
            OptionsSubcommands::Set { name, value, gid } => {
                commands::options::set_command(&config, name, value, gid).await
            }
            OptionsSubcommands::Show { gid, filter } => {
                commands::options::show_command(&config, gid, filter).await
            }
        },
        Commands::Server(server) => match server.command {
            ServerSubcommands::List => commands::server::list_command(&config),
            ServerSubcommands::Add {
                name,
                host,
                port,
                secret,
                secure,
            } => commands::server::add_command(
                &mut config,
                name,
                ServerConfig {
                    host,
                    port,
                    secret,
                    secure,
                },
            ),
            ServerSubcommands::Use { name } => commands::server::use_command(&mut config, name),
            ServerSubcommands::Remove { name } => commands::server::remove_command(&mut config, name),
        },
    }
}
