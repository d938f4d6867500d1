use super::constants::{self, methods};
use super::models::{Gid, OptionMap};
use super::resilience::{RetryConfig, RetryPolicy, transient_status_to_error};
use super::rpc::{RpcOutcome, RpcRequest, RpcResponse};
use anyhow::Context;
use async_trait::async_trait;
use log::{debug, info, warn};
use serde_json::{Value, json};
use std::time::Duration;

/// Remote operations the options layer depends on.
///
/// `set_options` reports a daemon refusal as `Ok(false)`. `Err` is reserved for failures
/// of the exchange itself (connection lost, undecodable response).
#[async_trait]
pub trait OptionsApi: Send + Sync {
    /// Current daemon-wide options (`aria2.getGlobalOption`)
    async fn get_global_options(&self) -> anyhow::Result<OptionMap>;

    /// Current options of one download (`aria2.getOption`)
    async fn get_options(&self, gid: &Gid) -> anyhow::Result<OptionMap>;

    /// Apply `options` globally when `targets` is empty, otherwise to every listed download
    async fn set_options(&self, options: &OptionMap, targets: &[Gid]) -> anyhow::Result<bool>;
}

/// aria2 JSON-RPC client over HTTP with connection pooling
#[derive(Clone)]
pub struct Aria2Client {
    endpoint: String,
    secret: Option<String>,
    http_client: reqwest::Client,
    retry_policy: RetryPolicy,
}

impl Aria2Client {
    pub fn new(endpoint: String, secret: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("aria2-options/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_custom_client(endpoint, secret, http_client))
    }

    /// Create a client around an existing HTTP client
    pub fn with_custom_client(endpoint: String, secret: Option<String>, http_client: reqwest::Client) -> Self {
        Self {
            endpoint,
            secret: secret.filter(|s| !s.is_empty()),
            http_client,
            retry_policy: RetryPolicy::default(),
        }
    }

    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_policy = RetryPolicy::new(retry_config);
        self
    }

    /// Send one call and decode the envelope
    async fn call(&self, method: &str, params: Vec<Value>) -> anyhow::Result<RpcOutcome> {
        let request = RpcRequest::new(method, self.secret.as_deref(), params);
        debug!("RPC {} -> {} (id {})", method, self.endpoint, request.id);

        let response = self
            .retry_policy
            .execute(|| async {
                self.http_client
                    .post(&self.endpoint)
                    .json(&request)
                    .send()
                    .await
                    .and_then(transient_status_to_error)
            })
            .await
            .with_context(|| format!("Failed to reach aria2 at {}", self.endpoint))?;

        // Refusals arrive as 4xx with a JSON-RPC error body, so the body is decoded
        // before the status is looked at.
        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response to {}", method))?;

        let envelope: RpcResponse = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                anyhow::bail!("{} failed with HTTP {}: {}", method, status, body.trim())
            }
            Err(e) => return Err(e).with_context(|| format!("Malformed response to {}", method)),
        };

        envelope.into_outcome(&request.id)
    }

    async fn fetch_options(&self, method: &str, params: Vec<Value>) -> anyhow::Result<OptionMap> {
        match self.call(method, params).await? {
            RpcOutcome::Result(value) => {
                let options: OptionMap = serde_json::from_value(value)
                    .with_context(|| format!("{} did not return an option map", method))?;
                debug!("{} returned {} options", method, options.len());
                Ok(options)
            }
            RpcOutcome::Refused(error) => anyhow::bail!("{} refused: {}", method, error),
        }
    }

    async fn change(&self, method: &str, params: Vec<Value>) -> anyhow::Result<bool> {
        match self.call(method, params).await? {
            RpcOutcome::Result(Value::String(s)) if s == constants::OK => Ok(true),
            RpcOutcome::Result(other) => {
                warn!("{} answered {} instead of {}", method, other, constants::OK);
                Ok(false)
            }
            RpcOutcome::Refused(error) => {
                warn!("{} declined: {}", method, error);
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl OptionsApi for Aria2Client {
    async fn get_global_options(&self) -> anyhow::Result<OptionMap> {
        self.fetch_options(methods::GET_GLOBAL_OPTION, Vec::new()).await
    }

    async fn get_options(&self, gid: &Gid) -> anyhow::Result<OptionMap> {
        self.fetch_options(methods::GET_OPTION, vec![json!(gid)]).await
    }

    async fn set_options(&self, options: &OptionMap, targets: &[Gid]) -> anyhow::Result<bool> {
        if targets.is_empty() {
            let accepted = self
                .change(methods::CHANGE_GLOBAL_OPTION, vec![json!(options)])
                .await?;
            if accepted {
                info!("Changed {} global option(s)", options.len());
            }
            return Ok(accepted);
        }

        let mut accepted = true;
        for gid in targets {
            // Keep going after a refusal; the result is accepted only if every target was
            let ok = self
                .change(methods::CHANGE_OPTION, vec![json!(gid), json!(options)])
                .await?;
            if ok {
                info!("Changed {} option(s) of download {}", options.len(), gid);
            }
            accepted &= ok;
        }
        Ok(accepted)
    }
}
