//! aria2 JSON-RPC client
//!
//! The options layer only sees the `OptionsApi` trait; `Aria2Client` is the
//! HTTP implementation of it.

pub mod client;
pub mod constants;
pub mod models;
pub mod resilience;
pub mod rpc;

pub use client::{Aria2Client, OptionsApi};
pub use models::{Gid, OptionMap};
pub use resilience::{RetryConfig, RetryPolicy, RetryableError};
pub use rpc::{RpcError, RpcOutcome, RpcRequest, RpcResponse};
