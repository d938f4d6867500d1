use anyhow::Result;
use aria2_options::api::Gid;
use aria2_options::config::Config;
use aria2_options::options::normalize_name;
use colored::Colorize;
use log::info;

/// Change one option on the daemon
///
/// # Arguments
/// * `name` - Option name, either separator
/// * `value` - New value, sent as-is
/// * `gid` - Download to change, or `None` for global options
///
/// # Returns
/// * `Ok(())` - The daemon accepted the value
/// * `Err(anyhow::Error)` - The daemon declined it, or the call failed
pub async fn set_command(config: &Config, name: String, value: String, gid: Option<Gid>) -> Result<()> {
    info!("Setting {} to {}", name, value);

    let mut options = super::load_options(config, gid).await?;
    let previous = options.get(&name).map(str::to_string);

    if !options.set(&name, &value).await? {
        anyhow::bail!("aria2 declined {} = {}", normalize_name(&name), value);
    }

    match previous {
        Some(previous) if previous != value => println!(
            "{} {}: {} -> {}",
            "✓".green(),
            normalize_name(&name),
            previous.dimmed(),
            value.bold()
        ),
        _ => println!("{} {} = {}", "✓".green(), normalize_name(&name), value.bold()),
    }

    Ok(())
}
