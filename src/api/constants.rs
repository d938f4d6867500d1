//! API constants for the aria2 JSON-RPC interface

/// JSON-RPC protocol version sent in every envelope
pub const JSON_RPC_VERSION: &str = "2.0";

/// Default aria2 RPC listen port (`--rpc-listen-port`)
pub const DEFAULT_PORT: u16 = 6800;

/// Path of the JSON-RPC endpoint on the daemon
pub const RPC_PATH: &str = "/jsonrpc";

/// Prefix aria2 expects in front of the RPC secret
pub const TOKEN_PREFIX: &str = "token:";

/// Result string aria2 returns for a successful change call
pub const OK: &str = "OK";

/// Remote method names
pub mod methods {
    pub const GET_GLOBAL_OPTION: &str = "aria2.getGlobalOption";
    pub const GET_OPTION: &str = "aria2.getOption";
    pub const CHANGE_GLOBAL_OPTION: &str = "aria2.changeGlobalOption";
    pub const CHANGE_OPTION: &str = "aria2.changeOption";
}

/// Build the full JSON-RPC endpoint URL
pub fn rpc_endpoint(host: &str, port: u16, secure: bool) -> String {
    let scheme = if secure { "https" } else { "http" };
    format!("{}://{}:{}{}", scheme, host, port, RPC_PATH)
}
