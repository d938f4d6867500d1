use anyhow::Result;
use aria2_options::config::{Config, ServerConfig};
use log::info;

pub fn list_command(config: &Config) -> Result<()> {
    let servers = config.list_servers();
    if servers.is_empty() {
        println!("No servers configured.");
        println!("Run 'aria2-options server add <name>' to create one.");
        return Ok(());
    }

    println!("Configured servers:");
    for name in servers {
        let server = &config.servers[name];
        let marker = if config.current_server.as_ref() == Some(name) { "●" } else { "○" };
        let auth = if server.secret.is_some() { " (secret set)" } else { "" };
        println!("  {} {} {}{}", marker, name, server.rpc_url(), auth);
    }

    Ok(())
}

pub fn add_command(config: &mut Config, name: String, server: ServerConfig) -> Result<()> {
    info!("Adding server {} at {}", name, server.rpc_url());
    let url = server.rpc_url();
    config.add_server(name.clone(), server)?;
    println!("Added server '{}' ({})", name, url);
    Ok(())
}

pub fn use_command(config: &mut Config, name: String) -> Result<()> {
    config.set_current_server(name.clone())?;
    println!("Now using server '{}'", name);
    Ok(())
}

pub fn remove_command(config: &mut Config, name: String) -> Result<()> {
    config.remove_server(&name)?;
    println!("Removed server '{}'", name);
    Ok(())
}
