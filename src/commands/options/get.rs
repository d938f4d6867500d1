use anyhow::Result;
use aria2_options::api::Gid;
use aria2_options::config::Config;
use log::info;

/// Print the value of one option
///
/// # Arguments
/// * `name` - Option name, either separator
/// * `gid` - Download to read from, or `None` for global options
///
/// # Returns
/// * `Ok(())` - Value printed, or a note that the option is not set
/// * `Err(anyhow::Error)` - Configuration or RPC error
pub async fn get_command(config: &Config, name: String, gid: Option<Gid>) -> Result<()> {
    info!("Getting option: {}", name);

    let options = super::load_options(config, gid).await?;

    match options.get(&name) {
        Some(value) => println!("{}", value),
        None => eprintln!("Option '{}' is not set", name),
    }

    Ok(())
}
