pub mod get;
pub mod set;
pub mod show;

pub use get::get_command;
pub use set::set_command;
pub use show::show_command;

use anyhow::Result;
use aria2_options::api::{Aria2Client, Gid, OptionsApi, RetryConfig};
use aria2_options::config::Config;
use aria2_options::options::Options;
use log::debug;
use std::sync::Arc;

/// Connect to the configured server and fetch the option set for `gid`, or the global one
async fn load_options(config: &Config, gid: Option<Gid>) -> Result<Options> {
    let server = config.resolve_server()?;
    debug!("Connecting to {}", server.rpc_url());

    let client: Arc<dyn OptionsApi> = Arc::new(
        Aria2Client::new(server.rpc_url(), server.secret.clone(), config.settings.timeout())?
            .with_retry_config(RetryConfig::default().with_max_attempts(config.settings.max_retries)),
    );

    match gid {
        Some(gid) => Options::fetch_for(client, gid).await,
        None => Options::fetch_global(client).await,
    }
}
