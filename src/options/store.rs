//! Last-known-good option values

use crate::api::OptionMap;

/// Translate a caller-supplied option name into the daemon's spelling.
///
/// aria2 option names are lowercase and hyphenated (`max-download-limit`). Callers may
/// use underscores instead, since hyphens are not legal in identifiers.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('_', "-")
}

/// In-memory map of normalized option names to values.
///
/// Only `Options` mutates it, and only after the daemon has
/// confirmed the change or handed over a full snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionStore {
    values: OptionMap,
}

impl OptionStore {
    pub fn from_snapshot(snapshot: OptionMap) -> Self {
        let values = snapshot
            .into_iter()
            .map(|(key, value)| (normalize_name(&key), value))
            .collect();
        Self { values }
    }

    /// Look up an option by any spelling of its name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(&normalize_name(name)).map(String::as_str)
    }

    /// Independent copy of every value
    pub fn snapshot(&self) -> OptionMap {
        self.values.clone()
    }

    /// `key` must already be normalized
    pub(crate) fn replace(&mut self, key: String, value: String) {
        debug_assert_eq!(key, normalize_name(&key));
        self.values.insert(key, value);
    }

    pub(crate) fn reset(&mut self, snapshot: OptionMap) {
        *self = Self::from_snapshot(snapshot);
    }
}
