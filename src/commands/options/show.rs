use anyhow::Result;
use aria2_options::api::Gid;
use aria2_options::config::Config;
use aria2_options::options::normalize_name;
use colored::Colorize;
use log::info;
use std::collections::BTreeMap;

pub async fn show_command(config: &Config, gid: Option<Gid>, filter: Option<String>) -> Result<()> {
    info!("Showing options (gid: {:?}, filter: {:?})", gid, filter);

    let options = super::load_options(config, gid).await?;

    let scope = match options.owner() {
        Some(gid) => format!("Options of download {}", gid),
        None => "Global options".to_string(),
    };
    println!("{}", scope.bold());

    let filter = filter.map(|f| normalize_name(&f));
    let sorted: BTreeMap<String, String> = options
        .snapshot()
        .into_iter()
        .filter(|(key, _)| filter.as_ref().is_none_or(|f| key.contains(f.as_str())))
        .collect();

    if sorted.is_empty() {
        println!("  (no matching options)");
    }
    for (key, value) in &sorted {
        println!("  {} {}", format!("{:<36}", key).cyan(), value);
    }

    Ok(())
}
