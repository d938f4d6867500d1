//! Remote-synchronized aria2 options
//!
//! An `Options` value caches the option map of either the daemon (global) or
//! one download, and routes every change through the RPC client before
//! accepting it locally.

pub mod set;
pub mod store;

pub use set::{CONTINUE, Options};
pub use store::{OptionStore, normalize_name};
