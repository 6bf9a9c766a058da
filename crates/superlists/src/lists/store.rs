use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{ItemId, ItemRecord, ItemText, ListId, ListRecord};
use super::repository::{ListRepository, ListStore, RepositoryError};

/// List and item tables. Identifiers come from per-table sequences, so map order
/// is insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Tables {
    last_list_id: u64,
    last_item_id: u64,
    lists: BTreeMap<ListId, ListRecord>,
    items: BTreeMap<ItemId, ItemRecord>,
}

impl Tables {
    fn rows_differ(&self, other: &Tables) -> bool {
        self.lists != other.lists || self.items != other.items
    }
}

impl ListStore for Tables {
    fn create_list(&mut self) -> Result<ListRecord, RepositoryError> {
        self.last_list_id += 1;
        let record = ListRecord {
            id: ListId(self.last_list_id),
            created_at: Utc::now(),
        };
        self.lists.insert(record.id, record.clone());
        Ok(record)
    }

    fn delete_list(&mut self, id: ListId) -> Result<(), RepositoryError> {
        if self.lists.remove(&id).is_none() {
            return Err(RepositoryError::MissingList(id));
        }
        self.items.retain(|_, item| item.list != id);
        Ok(())
    }

    fn fetch_list(&self, id: ListId) -> Result<Option<ListRecord>, RepositoryError> {
        Ok(self.lists.get(&id).cloned())
    }

    fn create_item(
        &mut self,
        list: ListId,
        text: ItemText,
    ) -> Result<ItemRecord, RepositoryError> {
        if !self.lists.contains_key(&list) {
            return Err(RepositoryError::MissingList(list));
        }
        self.last_item_id += 1;
        let record = ItemRecord {
            id: ItemId(self.last_item_id),
            list,
            text,
            created_at: Utc::now(),
        };
        self.items.insert(record.id, record.clone());
        Ok(record)
    }

    fn list_items(&self, list: ListId) -> Result<Vec<ItemRecord>, RepositoryError> {
        Ok(self
            .items
            .values()
            .filter(|item| item.list == list)
            .cloned()
            .collect())
    }
}

/// Process-local list store, optionally mirrored to a JSON snapshot file.
///
/// Transactions run against a copy of the tables while holding the lock; the copy
/// replaces the live tables only after the snapshot (if any) was written. A
/// transaction that leaves every row as it found it commits nothing, so sequence
/// numbers it consumed are handed out again.
#[derive(Debug, Default)]
pub struct LocalListRepository {
    tables: Mutex<Tables>,
    snapshot: Option<PathBuf>,
}

impl LocalListRepository {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the tables from `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();
        let tables = if path.exists() {
            let raw = fs::read(&path)?;
            serde_json::from_slice(&raw)?
        } else {
            Tables::default()
        };
        debug!(path = %path.display(), lists = tables.lists.len(), "list snapshot loaded");

        Ok(Self {
            tables: Mutex::new(tables),
            snapshot: Some(path),
        })
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot.as_deref()
    }

    pub fn list_count(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.lists.len())
    }

    pub fn item_count(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.items.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::Unavailable("list store mutex poisoned".to_string()))
    }

    fn write_snapshot(path: &Path, tables: &Tables) -> Result<(), RepositoryError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, serde_json::to_vec_pretty(tables)?)?;
        fs::rename(&staging, path)?;
        Ok(())
    }
}

impl ListRepository for LocalListRepository {
    fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn ListStore) -> Result<T, E>,
        E: From<RepositoryError>,
    {
        let mut guard = self.lock()?;
        let mut staged = guard.clone();
        let value = work(&mut staged)?;

        // Nothing to commit when the rows are untouched, e.g. a rejected submission.
        if !staged.rows_differ(&guard) {
            return Ok(value);
        }
        if let Some(path) = &self.snapshot {
            Self::write_snapshot(path, &staged)?;
        }
        *guard = staged;
        Ok(value)
    }

    fn fetch_list(&self, id: ListId) -> Result<Option<ListRecord>, RepositoryError> {
        self.lock()?.fetch_list(id)
    }

    fn list_items(&self, list: ListId) -> Result<Vec<ItemRecord>, RepositoryError> {
        self.lock()?.list_items(list)
    }
}
