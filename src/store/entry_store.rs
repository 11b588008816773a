//! The persisted entry list and policy.

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{PayPolicy, PolicyLoader};
use crate::error::{EngineError, EngineResult};
use crate::models::ShiftRecord;

use super::export::{Backup, entries_to_csv, parse_backup};
use super::key_value::KeyValueStore;

/// Key holding the JSON array of entries.
pub const ENTRIES_KEY: &str = "tp_entries";

/// Key holding the JSON settings object.
pub const SETTINGS_KEY: &str = "tp_settings";

/// Entries plus policy, written back to a [`KeyValueStore`] on every change.
///
/// Entries are kept sorted newest first: by date descending, then by start
/// time descending.
///
/// # Examples
///
/// ```
/// use timepulse_engine::models::ShiftRecord;
/// use timepulse_engine::store::{EntryStore, MemoryStore};
/// use chrono::NaiveDate;
///
/// let mut store = EntryStore::open(MemoryStore::new()).unwrap();
/// let date = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// let saved = store.upsert_entry(ShiftRecord::new("", date, "09:00", "17:00")).unwrap();
///
/// assert!(!saved.id.is_empty());
/// assert_eq!(store.entries().len(), 1);
/// ```
#[derive(Debug)]
pub struct EntryStore<S: KeyValueStore> {
    backend: S,
    entries: Vec<ShiftRecord>,
    policy: PayPolicy,
}

impl<S: KeyValueStore> EntryStore<S> {
    /// Loads entries and settings from `backend`, falling back to the
    /// built-in defaults for missing settings.
    pub fn open(backend: S) -> EngineResult<Self> {
        Self::open_with_policy(backend, PayPolicy::default())
    }

    /// Like [`EntryStore::open`], but uses `initial_policy` when nothing has
    /// been stored yet.
    pub fn open_with_policy(backend: S, initial_policy: PayPolicy) -> EngineResult<Self> {
        let mut entries: Vec<ShiftRecord> = match backend.get(ENTRIES_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| EngineError::StoreError {
                key: ENTRIES_KEY.to_string(),
                message: e.to_string(),
            })?,
            None => Vec::new(),
        };
        sort_entries(&mut entries);

        let policy = match backend.get(SETTINGS_KEY)? {
            Some(raw) => {
                let stored: Value =
                    serde_json::from_str(&raw).map_err(|e| EngineError::StoreError {
                        key: SETTINGS_KEY.to_string(),
                        message: e.to_string(),
                    })?;
                PolicyLoader::merge_with_defaults(stored)
            }
            None => initial_policy,
        };

        info!(entries = entries.len(), "Opened entry store");

        Ok(Self {
            backend,
            entries,
            policy,
        })
    }

    /// All entries, newest first.
    pub fn entries(&self) -> &[ShiftRecord] {
        &self.entries
    }

    /// The current policy.
    pub fn policy(&self) -> &PayPolicy {
        &self.policy
    }

    /// Looks up one entry by id.
    pub fn entry(&self, id: &str) -> Option<&ShiftRecord> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Inserts a new entry or replaces the one with the same id.
    ///
    /// The record is validated first. An empty id gets a fresh UUID.
    /// Returns the stored record.
    pub fn upsert_entry(&mut self, mut record: ShiftRecord) -> EngineResult<ShiftRecord> {
        if record.id.trim().is_empty() {
            record.id = Uuid::new_v4().to_string();
        }
        record.validate()?;

        match self.entries.iter_mut().find(|entry| entry.id == record.id) {
            Some(existing) => {
                debug!(entry_id = %record.id, "Replacing entry");
                *existing = record.clone();
            }
            None => {
                debug!(entry_id = %record.id, "Adding entry");
                self.entries.push(record.clone());
            }
        }
        sort_entries(&mut self.entries);
        self.persist_entries()?;

        Ok(record)
    }

    /// Removes the entry with `id`.
    pub fn delete_entry(&mut self, id: &str) -> EngineResult<()> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if self.entries.len() == before {
            return Err(EngineError::EntryNotFound { id: id.to_string() });
        }
        debug!(entry_id = %id, "Deleted entry");
        self.persist_entries()
    }

    /// Replaces the policy wholesale. Stored entries are untouched.
    pub fn replace_policy(&mut self, policy: PayPolicy) -> EngineResult<()> {
        self.policy = policy;
        self.persist_policy()
    }

    /// Pretty-printed JSON backup of entries and settings.
    pub fn export_backup(&self) -> EngineResult<String> {
        Backup::new(&self.entries, &self.policy, Utc::now()).to_json()
    }

    /// Replaces every entry and the policy with the contents of a backup.
    ///
    /// Nothing changes if the backup is rejected.
    pub fn import_backup(&mut self, json: &str) -> EngineResult<usize> {
        let (mut entries, policy) = parse_backup(json).inspect_err(|e| {
            warn!(error = %e, "Rejected backup import");
        })?;
        sort_entries(&mut entries);

        self.entries = entries;
        self.policy = policy;
        self.persist_entries()?;
        self.persist_policy()?;

        info!(entries = self.entries.len(), "Imported backup");
        Ok(self.entries.len())
    }

    /// CSV export of every entry under the current policy.
    pub fn export_csv(&self) -> String {
        entries_to_csv(&self.entries, &self.policy)
    }

    fn persist_entries(&mut self) -> EngineResult<()> {
        let json = serde_json::to_string(&self.entries).map_err(|e| EngineError::StoreError {
            key: ENTRIES_KEY.to_string(),
            message: e.to_string(),
        })?;
        self.backend.set(ENTRIES_KEY, &json)
    }

    fn persist_policy(&mut self) -> EngineResult<()> {
        let json = serde_json::to_string(&self.policy).map_err(|e| EngineError::StoreError {
            key: SETTINGS_KEY.to_string(),
            message: e.to_string(),
        })?;
        self.backend.set(SETTINGS_KEY, &json)
    }
}

fn sort_entries(entries: &mut [ShiftRecord]) {
    entries.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.start_time.cmp(&a.start_time))
    });
}
