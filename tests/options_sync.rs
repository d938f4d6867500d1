//! Integration tests for the write-remote-first contract of `Options`
//!
//! A scripted `OptionsApi` stands in for the daemon and records every call.

use anyhow::Result;
use aria2_options::api::{Gid, OptionMap, OptionsApi};
use aria2_options::options::{CONTINUE, Options};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

const ACCEPT: u8 = 0;
const DECLINE: u8 = 1;
const DISCONNECTED: u8 = 2;

#[derive(Default)]
struct ScriptedDaemon {
    mode: AtomicU8,
    calls: Mutex<Vec<(OptionMap, Vec<Gid>)>>,
}

impl ScriptedDaemon {
    fn set_mode(&self, mode: u8) {
        self.mode.store(mode, Ordering::SeqCst);
    }

    fn calls(&self) -> Vec<(OptionMap, Vec<Gid>)> {
        self.calls.lock().unwrap().clone()
    }

    fn last_targets(&self) -> Vec<Gid> {
        self.calls().last().map(|(_, targets)| targets.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl OptionsApi for ScriptedDaemon {
    async fn get_global_options(&self) -> Result<OptionMap> {
        Ok(OptionMap::from([
            ("max-download-limit".to_string(), "0".to_string()),
            ("continue".to_string(), "true".to_string()),
        ]))
    }

    async fn get_options(&self, _gid: &Gid) -> Result<OptionMap> {
        Ok(OptionMap::from([("split".to_string(), "5".to_string())]))
    }

    async fn set_options(&self, options: &OptionMap, targets: &[Gid]) -> Result<bool> {
        self.calls.lock().unwrap().push((options.clone(), targets.to_vec()));
        match self.mode.load(Ordering::SeqCst) {
            ACCEPT => Ok(true),
            DECLINE => Ok(false),
            _ => anyhow::bail!("connection reset by peer"),
        }
    }
}

fn daemon() -> Arc<ScriptedDaemon> {
    Arc::new(ScriptedDaemon::default())
}

fn global_options(daemon: &Arc<ScriptedDaemon>) -> Options {
    Options::new(
        daemon.clone(),
        OptionMap::from([("max-download-limit".to_string(), "0".to_string())]),
        None,
    )
}

fn gid(s: &str) -> Gid {
    s.parse().unwrap()
}

#[tokio::test]
async fn test_max_download_limit_scenario() {
    let daemon = daemon();
    let mut options = global_options(&daemon);

    assert_eq!(options.get("max_download_limit"), Some("0"));

    assert!(options.set("max_download_limit", 100).await.unwrap());
    assert_eq!(options.get("max-download-limit"), Some("100"));

    daemon.set_mode(DECLINE);
    assert!(!options.set("max_download_limit", 200).await.unwrap());
    assert_eq!(options.get("max-download-limit"), Some("100"));

    let calls = daemon.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, OptionMap::from([("max-download-limit".to_string(), "100".to_string())]));
    assert_eq!(calls[1].0, OptionMap::from([("max-download-limit".to_string(), "200".to_string())]));
}

#[tokio::test]
async fn test_either_spelling_reads_what_the_other_wrote() {
    let daemon = daemon();
    let mut options = global_options(&daemon);

    assert!(options.set("max-overall-upload-limit", "1M").await.unwrap());
    assert_eq!(options.get("max_overall_upload_limit"), Some("1M"));

    assert!(options.set("max_overall_upload_limit", "2M").await.unwrap());
    assert_eq!(options.get("max-overall-upload-limit"), Some("2M"));

    for (sent, _) in daemon.calls() {
        assert!(sent.contains_key("max-overall-upload-limit"));
        assert!(!sent.contains_key("max_overall_upload_limit"));
    }
}

#[tokio::test]
async fn test_values_are_sent_as_strings() {
    let daemon = daemon();
    let mut options = global_options(&daemon);

    assert!(options.set("check-integrity", true).await.unwrap());
    assert!(options.set("seed-ratio", 1.5).await.unwrap());
    assert!(options.set("max-tries", 0u32).await.unwrap());

    assert_eq!(options.get("check-integrity"), Some("true"));
    assert_eq!(options.get("seed-ratio"), Some("1.5"));
    assert_eq!(options.get("max-tries"), Some("0"));
}

#[tokio::test]
async fn test_declined_write_of_unknown_option_stays_absent() {
    let daemon = daemon();
    daemon.set_mode(DECLINE);
    let mut options = global_options(&daemon);

    assert!(!options.set("no-such-option", "x").await.unwrap());
    assert_eq!(options.get("no-such-option"), None);
    assert_eq!(daemon.calls().len(), 1);
}

#[tokio::test]
async fn test_transport_failure_propagates_and_leaves_cache() {
    let daemon = daemon();
    daemon.set_mode(DISCONNECTED);
    let mut options = global_options(&daemon);

    let err = options.set("max-download-limit", 100).await.unwrap_err();
    assert!(err.to_string().contains("connection reset"));
    assert_eq!(options.get("max-download-limit"), Some("0"));
}

#[tokio::test]
async fn test_reads_never_call_the_daemon() {
    let daemon = daemon();
    let options = global_options(&daemon);

    let _ = options.get("max-download-limit");
    let _ = options.get("unknown");
    let _ = options.snapshot();

    assert!(daemon.calls().is_empty());
}

#[tokio::test]
async fn test_snapshot_isolation() {
    let daemon = daemon();
    let options = global_options(&daemon);

    let mut snapshot = options.snapshot();
    snapshot.insert("max-download-limit".to_string(), "42".to_string());
    snapshot.insert("dir".to_string(), "/tmp".to_string());

    assert_eq!(options.get("max-download-limit"), Some("0"));
    assert_eq!(options.get("dir"), None);
}

#[tokio::test]
async fn test_owner_transitions_drive_targets() {
    let daemon = daemon();
    let mut options = global_options(&daemon);
    let first = gid("2089b05ecca3d829");
    let second = gid("d270c8a55d9a6cf9");

    assert!(options.is_global());
    options.set("split", 4).await.unwrap();
    assert!(daemon.last_targets().is_empty());

    options.set_owner(Some(first.clone()));
    assert_eq!(options.owner(), Some(&first));
    options.set("split", 8).await.unwrap();
    assert_eq!(daemon.last_targets(), vec![first.clone()]);

    options.set_owner(Some(second.clone()));
    options.set("split", 16).await.unwrap();
    assert_eq!(daemon.last_targets(), vec![second]);

    options.set_owner(None);
    assert_eq!(options.owner(), None);
    options.set("split", 2).await.unwrap();
    assert!(daemon.last_targets().is_empty());
}

#[tokio::test]
async fn test_set_owner_keeps_cache_and_stays_local() {
    let daemon = daemon();
    let mut options = global_options(&daemon);
    let before = options.snapshot();

    options.set_owner(Some(gid("2089b05ecca3d829")));
    options.set_owner(None);

    assert_eq!(options.snapshot(), before);
    assert!(daemon.calls().is_empty());
}

#[tokio::test]
async fn test_continue_alias_matches_canonical_name() {
    let daemon = daemon();
    let mut options = Options::fetch_global(daemon.clone()).await.unwrap();

    assert_eq!(options.continue_(), Some("true"));
    assert_eq!(options.get(CONTINUE), options.continue_());

    assert!(options.set_continue(false).await.unwrap());
    assert_eq!(options.get("continue"), Some("false"));

    assert!(options.set("continue", true).await.unwrap());
    assert_eq!(options.continue_(), Some("true"));

    daemon.set_mode(DECLINE);
    assert!(!options.set_continue(false).await.unwrap());
    assert_eq!(options.continue_(), Some("true"));

    let (sent, _) = daemon.calls().into_iter().next().unwrap();
    assert_eq!(sent.get("continue").map(String::as_str), Some("false"));
}

#[tokio::test]
async fn test_fetch_for_download_scopes_writes() {
    let daemon = daemon();
    let target = gid("2089b05ecca3d829");
    let mut options = Options::fetch_for(daemon.clone(), target.clone()).await.unwrap();

    assert_eq!(options.get("split"), Some("5"));
    assert!(options.set("split", 10).await.unwrap());
    assert_eq!(daemon.last_targets(), vec![target]);
}

#[tokio::test]
async fn test_repeated_identical_write_is_stable() {
    let daemon = daemon();
    let mut options = global_options(&daemon);

    assert!(options.set("max-download-limit", "1K").await.unwrap());
    assert!(options.set("max-download-limit", "1K").await.unwrap());
    assert_eq!(options.get("max-download-limit"), Some("1K"));
    assert_eq!(daemon.calls().len(), 2);
}
