use crate::api::constants::{self, DEFAULT_PORT};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Connection details of one aria2 daemon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub secure: bool,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_PORT,
            secret: None,
            secure: false,
        }
    }
}

impl ServerConfig {
    pub fn rpc_url(&self) -> String {
        constants::rpc_endpoint(&self.host, self.port, self.secure)
    }

    /// Read `ARIA2_RPC_HOST`, `ARIA2_RPC_PORT` and `ARIA2_RPC_SECRET`, loading `.env` first.
    /// Returns `None` when no host is set.
    pub fn from_env() -> Result<Option<Self>> {
        dotenvy::dotenv().ok();

        let Ok(host) = std::env::var("ARIA2_RPC_HOST") else {
            return Ok(None);
        };

        let port = match std::env::var("ARIA2_RPC_PORT") {
            Ok(port) => port
                .parse()
                .with_context(|| format!("Invalid ARIA2_RPC_PORT: '{}'", port))?,
            Err(_) => DEFAULT_PORT,
        };

        let secret = std::env::var("ARIA2_RPC_SECRET").ok().filter(|s| !s.is_empty());
        let secure = std::env::var("ARIA2_RPC_SECURE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        debug!("Using aria2 server from environment: {}:{}", host, port);
        Ok(Some(Self {
            host,
            port,
            secret,
            secure,
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub current_server: Option<String>,
    #[serde(default)]
    pub servers: HashMap<String, ServerConfig>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("aria2-options")
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".aria2-options")
        };

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Load from `path`; a missing file yields the default config bound to that path
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", path);

        let mut config = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str::<Config>(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            info!("Config file doesn't exist, using defaults");
            Self::default()
        };

        config.path = Some(path.to_path_buf());
        debug!("Loaded config with {} servers", config.servers.len());
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => Self::get_config_path()?,
        };
        debug!("Saving config to: {:?}", path);

        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create config directory: {:?}", dir))?;
                info!("Created config directory: {:?}", dir);
            }
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        info!("Config saved successfully");
        Ok(())
    }

    pub fn add_server(&mut self, name: String, server: ServerConfig) -> Result<()> {
        info!("Adding server: {}", name);
        self.servers.insert(name.clone(), server);

        if self.current_server.is_none() {
            self.current_server = Some(name.clone());
            info!("Set {} as current server", name);
        }

        self.save()
    }

    pub fn set_current_server(&mut self, name: String) -> Result<()> {
        if !self.servers.contains_key(&name) {
            anyhow::bail!("Server '{}' not found", name);
        }

        info!("Setting current server to: {}", name);
        self.current_server = Some(name);
        self.save()
    }

    pub fn remove_server(&mut self, name: &str) -> Result<()> {
        if self.servers.remove(name).is_none() {
            anyhow::bail!("Server '{}' not found", name);
        }

        info!("Removed server: {}", name);
        if self.current_server.as_deref() == Some(name) {
            warn!("Removed current server, clearing current selection");
            self.current_server = None;
        }

        self.save()
    }

    /// Server names in sorted order
    pub fn list_servers(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.servers.keys().collect();
        names.sort();
        names
    }

    pub fn get_current_server(&self) -> Option<&ServerConfig> {
        let name = self.current_server.as_ref()?;
        self.servers.get(name)
    }

    /// Server to talk to: the environment wins over the config file, then the local default
    pub fn resolve_server(&self) -> Result<ServerConfig> {
        if let Some(server) = ServerConfig::from_env()? {
            return Ok(server);
        }
        Ok(self.get_current_server().cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("aria2-options-test-{}", uuid::Uuid::new_v4()))
            .join("config.toml")
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load_from(&temp_config_path()).unwrap();
        assert!(config.servers.is_empty());
        assert_eq!(config.settings, Settings::default());
        assert!(config.get_current_server().is_none());
    }

    #[test]
    fn test_server_roundtrip_through_file() {
        let path = temp_config_path();
        let mut config = Config::load_from(&path).unwrap();

        config
            .add_server(
                "nas".to_string(),
                ServerConfig {
                    host: "nas.lan".to_string(),
                    port: 6801,
                    secret: Some("s3cret".to_string()),
                    secure: false,
                },
            )
            .unwrap();
        config.add_server("local".to_string(), ServerConfig::default()).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.current_server.as_deref(), Some("nas"));
        assert_eq!(reloaded.list_servers(), vec!["local", "nas"]);
        assert_eq!(reloaded.get_current_server().unwrap().rpc_url(), "http://nas.lan:6801/jsonrpc");

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_remove_current_server_clears_selection() {
        let path = temp_config_path();
        let mut config = Config::load_from(&path).unwrap();
        config.add_server("local".to_string(), ServerConfig::default()).unwrap();

        config.remove_server("local").unwrap();
        assert!(config.current_server.is_none());
        assert!(config.remove_server("local").is_err());
        assert!(config.set_current_server("missing".to_string()).is_err());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_partial_file_uses_field_defaults() {
        let config: Config = toml::from_str(
            r#"
            current_server = "box"

            [servers.box]
            host = "10.0.0.2"
            "#,
        )
        .unwrap();

        let server = config.get_current_server().unwrap();
        assert_eq!(server.port, 6800);
        assert_eq!(server.secret, None);
        assert_eq!(config.settings.max_retries, 3);
        assert_eq!(config.settings.timeout(), Duration::from_secs(30));
    }
}
