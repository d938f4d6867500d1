//! Transport hardening for RPC calls

pub mod retry;

pub use retry::{RetryConfig, RetryPolicy, RetryableError, transient_status_to_error};
