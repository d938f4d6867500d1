//! Read/write surface over the option store
//!
//! Reads are served from the local store. Writes go to the daemon first and
//! reach the store only once the daemon has accepted them.

use super::store::{OptionStore, normalize_name};
use crate::api::{Gid, OptionMap, OptionsApi};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fmt;
use std::sync::Arc;

/// Canonical name of the option that collides with the `continue` keyword
pub const CONTINUE: &str = "continue";

/// Global or per-download option set, kept in step with the daemon.
///
/// Not internally synchronized: writes take `&mut self`, so overlapping writes on
/// one instance need external serialization.
pub struct Options {
    client: Arc<dyn OptionsApi>,
    store: OptionStore,
    owner: Option<Gid>,
}

impl Options {
    /// Wrap a snapshot previously fetched from the daemon. `owner` of `None` means global.
    pub fn new(client: Arc<dyn OptionsApi>, snapshot: OptionMap, owner: Option<Gid>) -> Self {
        Self {
            client,
            store: OptionStore::from_snapshot(snapshot),
            owner,
        }
    }

    /// Fetch the daemon-wide options and wrap them
    pub async fn fetch_global(client: Arc<dyn OptionsApi>) -> Result<Self> {
        let snapshot = client
            .get_global_options()
            .await
            .context("Failed to fetch global options")?;
        Ok(Self::new(client, snapshot, None))
    }

    /// Fetch the options of one download and bind the set to it
    pub async fn fetch_for(client: Arc<dyn OptionsApi>, gid: Gid) -> Result<Self> {
        let snapshot = client
            .get_options(&gid)
            .await
            .with_context(|| format!("Failed to fetch options of download {}", gid))?;
        Ok(Self::new(client, snapshot, Some(gid)))
    }

    /// Cached value of `name`, or `None` if the daemon never reported it. No remote call.
    pub fn get(&self, name: &str) -> Option<&str> {
        let value = self.store.get(name);
        debug!("Option {} -> {:?}", name, value);
        value
    }

    /// Change one option on the daemon, then in the cache.
    ///
    /// `value` is sent in its `Display` form, which is what aria2 expects for every
    /// option type (`true`, `100`, `1M`). Returns `Ok(false)` if the daemon declined,
    /// in which case the cached value is untouched. Transport failures are returned as
    /// `Err` as the client reported them.
    pub async fn set(&mut self, name: &str, value: impl fmt::Display) -> Result<bool> {
        let key = normalize_name(name);
        let value = value.to_string();
        let request = OptionMap::from([(key.clone(), value.clone())]);

        if !self.client.set_options(&request, self.owner.as_slice()).await? {
            warn!("{} declined {} = {}", self.scope(), key, value);
            return Ok(false);
        }

        info!("{} set {} = {}", self.scope(), key, value);
        self.store.replace(key, value);
        Ok(true)
    }

    /// Change several options in a single remote call. All of them are cached on
    /// success, none on refusal.
    pub async fn set_all<I, K, V>(&mut self, entries: I) -> Result<bool>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: fmt::Display,
    {
        let request: OptionMap = entries
            .into_iter()
            .map(|(name, value)| (normalize_name(name.as_ref()), value.to_string()))
            .collect();

        if request.is_empty() {
            return Ok(true);
        }

        if !self.client.set_options(&request, self.owner.as_slice()).await? {
            warn!("{} declined {} option(s)", self.scope(), request.len());
            return Ok(false);
        }

        info!("{} set {} option(s)", self.scope(), request.len());
        for (key, value) in request {
            self.store.replace(key, value);
        }
        Ok(true)
    }

    /// The `continue` option
    pub fn continue_(&self) -> Option<&str> {
        self.get(CONTINUE)
    }

    /// Change the `continue` option; same contract as [`Options::set`]
    pub async fn set_continue(&mut self, value: impl fmt::Display) -> Result<bool> {
        self.set(CONTINUE, value).await
    }

    /// Download subsequent writes apply to, `None` when global
    pub fn owner(&self) -> Option<&Gid> {
        self.owner.as_ref()
    }

    /// Re-point subsequent writes. Does not touch the cache or the daemon.
    pub fn set_owner(&mut self, owner: Option<Gid>) {
        debug!("Options owner {:?} -> {:?}", self.owner, owner);
        self.owner = owner;
    }

    pub fn is_global(&self) -> bool {
        self.owner.is_none()
    }

    /// Point-in-time copy of every cached value
    pub fn snapshot(&self) -> OptionMap {
        self.store.snapshot()
    }

    /// Replace the cache with a fresh snapshot for the current owner
    pub async fn reload(&mut self) -> Result<()> {
        let snapshot = match &self.owner {
            Some(gid) => self.client.get_options(gid).await,
            None => self.client.get_global_options().await,
        }
        .with_context(|| format!("Failed to reload {} options", self.scope()))?;

        debug!("Reloaded {} options ({} values)", self.scope(), snapshot.len());
        self.store.reset(snapshot);
        Ok(())
    }

    fn scope(&self) -> String {
        match &self.owner {
            Some(gid) => format!("download {}", gid),
            None => "global".to_string(),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("owner", &self.owner)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
