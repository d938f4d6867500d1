//! Remote-synchronized option sets for the aria2 download daemon.
//!
//! ```no_run
//! use aria2_options::api::{Aria2Client, OptionsApi};
//! use aria2_options::options::Options;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let client: Arc<dyn OptionsApi> = Arc::new(Aria2Client::new(
//!     "http://localhost:6800/jsonrpc".to_string(),
//!     None,
//!     Duration::from_secs(30),
//! )?);
//!
//! let mut options = Options::fetch_global(client).await?;
//! if !options.set("max_overall_download_limit", "2M").await? {
//!     eprintln!("aria2 declined the new limit");
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod options;
