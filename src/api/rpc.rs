//! JSON-RPC 2.0 envelopes as spoken by the aria2 daemon
//!
//! aria2 takes positional params only. When the daemon runs with `--rpc-secret`,
//! the first param of every call must be `"token:<secret>"`.

use super::constants::{JSON_RPC_VERSION, TOKEN_PREFIX};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub id: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Value>,
}

impl RpcRequest {
    /// Build a request with a fresh id, prepending the secret token when one is set
    pub fn new(method: &str, secret: Option<&str>, params: Vec<Value>) -> Self {
        let mut all_params = Vec::with_capacity(params.len() + 1);
        if let Some(secret) = secret {
            all_params.push(Value::String(format!("{}{}", TOKEN_PREFIX, secret)));
        }
        all_params.extend(params);

        Self {
            jsonrpc: JSON_RPC_VERSION.to_string(),
            id: uuid::Uuid::new_v4().to_string(),
            method: method.to_string(),
            params: all_params,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

/// Error object returned by the daemon, e.g. for an unknown or malformed option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

/// What the daemon answered: a result value, or a refusal
#[derive(Debug, Clone, PartialEq)]
pub enum RpcOutcome {
    Result(Value),
    Refused(RpcError),
}

impl RpcResponse {
    /// Check the envelope against the request it answers and split it into an outcome.
    ///
    /// A response that carries neither `result` nor `error`, or that answers a different
    /// request id, is malformed and reported as an error.
    pub fn into_outcome(self, request_id: &str) -> anyhow::Result<RpcOutcome> {
        match &self.id {
            Some(Value::String(id)) if id == request_id => {}
            // aria2 answers with a null id when it could not parse the request at all
            Some(Value::Null) | None if self.error.is_some() => {}
            other => anyhow::bail!(
                "Response id {:?} does not match request id '{}'",
                other,
                request_id
            ),
        }

        match (self.result, self.error) {
            (_, Some(error)) => Ok(RpcOutcome::Refused(error)),
            (Some(result), None) => Ok(RpcOutcome::Result(result)),
            (None, None) => anyhow::bail!("Response carries neither result nor error"),
        }
    }
}
