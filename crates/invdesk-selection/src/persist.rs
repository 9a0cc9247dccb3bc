//! Durable selection state, keyed per list view.
//!
//! Three logical keys live under `<namespace>.<view>`:
//!
//! - `selected_ids`: JSON array of id strings
//! - `select_all`: `"1"` when the all-matching flag is set, absent otherwise
//! - `filter`: hex fingerprint of the filter the selection was made under
//!
//! The store is the only writer. It is saved and restored at lifecycle
//! points (page unload, page load), never read ad hoc.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use invdesk_model::{FilterSnapshot, ListViewKey, RecordId};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SelectionError};
use crate::store::SelectionStore;

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "invdesk";

const KEY_SELECTED_IDS: &str = "selected_ids";
const KEY_SELECT_ALL: &str = "select_all";
const KEY_FILTER: &str = "filter";
const SELECT_ALL_SET: &str = "1";

/// Where one view's selection is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceScope {
    pub namespace: String,
    pub view: ListViewKey,
}

impl PersistenceScope {
    pub fn new(view: ListViewKey) -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            view,
        }
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    fn key(&self, suffix: &str) -> String {
        format!("{}.{}.{}", self.namespace, self.view, suffix)
    }
}

/// A string key-value store that survives a reload.
pub trait SelectionBackend {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Make earlier writes durable.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// In-process backend; state lasts as long as the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: BTreeMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

impl SelectionBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Backend storing every key in one JSON object file.
///
/// Reads happen once at [`open`](Self::open); [`flush`](SelectionBackend::flush)
/// rewrites the file atomically (temp file + rename).
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    dirty: bool,
}

impl JsonFileBackend {
    /// Open the state file. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                SelectionError::Deserialization {
                    path: path.clone(),
                    source: e,
                }
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(SelectionError::Io {
                    operation: "read",
                    path,
                    source: e,
                });
            }
        };
        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SelectionBackend for JsonFileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        if self.entries.get(key) != Some(&value) {
            self.entries.insert(key.to_string(), value);
            self.dirty = true;
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.dirty = true;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let bytes = serde_json::to_vec_pretty(&self.entries)
            .map_err(|e| SelectionError::Serialization { source: e })?;
        write_atomic(&self.path, &bytes)?;
        self.dirty = false;
        tracing::debug!(path = %self.path.display(), "wrote selection state");
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = path.with_extension("json.tmp");

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| SelectionError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| SelectionError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;
    file.write_all(bytes).map_err(|e| SelectionError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;
    file.sync_all().map_err(|e| SelectionError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| SelectionError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })
}

impl SelectionStore {
    /// Persist the explicit ids, the all-matching flag and the filter
    /// fingerprint under `scope`.
    pub fn save(&self, scope: &PersistenceScope, backend: &mut dyn SelectionBackend) -> Result<()> {
        let ids: Vec<&RecordId> = self.explicit_ids().iter().collect();
        let encoded =
            serde_json::to_string(&ids).map_err(|e| SelectionError::Serialization { source: e })?;
        backend.set(&scope.key(KEY_SELECTED_IDS), encoded)?;
        if self.is_all_matching() {
            backend.set(&scope.key(KEY_SELECT_ALL), SELECT_ALL_SET.to_string())?;
        } else {
            backend.remove(&scope.key(KEY_SELECT_ALL))?;
        }
        backend.set(&scope.key(KEY_FILTER), self.filter().fingerprint())?;
        backend.flush()?;

        tracing::info!(
            view = %scope.view,
            count = %self.count(),
            "saved selection"
        );
        Ok(())
    }

    /// Restore the selection persisted under `scope` for a view showing
    /// `current`.
    ///
    /// State saved under another filter, or that cannot be read back, is
    /// discarded and an empty selection returned.
    pub fn restore(
        scope: &PersistenceScope,
        current: &FilterSnapshot,
        backend: &mut dyn SelectionBackend,
    ) -> Result<Self> {
        let stored_filter = backend.get(&scope.key(KEY_FILTER))?;
        let stored_ids = backend.get(&scope.key(KEY_SELECTED_IDS))?;
        let stored_all = backend.get(&scope.key(KEY_SELECT_ALL))?;

        if stored_filter.is_none() && stored_ids.is_none() && stored_all.is_none() {
            return Ok(Self::new(current.clone()));
        }

        if stored_filter.as_deref() != Some(current.fingerprint().as_str()) {
            tracing::warn!(
                view = %scope.view,
                "persisted selection belongs to another filter; discarding"
            );
            discard(scope, backend)?;
            return Ok(Self::new(current.clone()));
        }

        let ids: BTreeSet<RecordId> = match stored_ids.as_deref() {
            None => BTreeSet::new(),
            Some(text) => match serde_json::from_str(text) {
                Ok(ids) => ids,
                Err(error) => {
                    tracing::warn!(view = %scope.view, %error, "unreadable persisted ids; discarding");
                    discard(scope, backend)?;
                    return Ok(Self::new(current.clone()));
                }
            },
        };
        let all_matching = stored_all.as_deref() == Some(SELECT_ALL_SET);

        let store = Self::from_parts(ids, all_matching, current.clone());
        tracing::info!(view = %scope.view, count = %store.count(), "restored selection");
        Ok(store)
    }
}

fn discard(scope: &PersistenceScope, backend: &mut dyn SelectionBackend) -> Result<()> {
    for suffix in [KEY_SELECTED_IDS, KEY_SELECT_ALL, KEY_FILTER] {
        backend.remove(&scope.key(suffix))?;
    }
    backend.flush()
}
