//! Persistence for entries and settings.
//!
//! Two JSON blobs live in a [`KeyValueStore`]: the entry list under
//! [`ENTRIES_KEY`] and the settings under [`SETTINGS_KEY`]. [`EntryStore`]
//! owns both in memory and rewrites the affected blob after every change.

mod entry_store;
mod export;
mod key_value;

pub use entry_store::{ENTRIES_KEY, EntryStore, SETTINGS_KEY};
pub use export::{Backup, CSV_HEADER, csv_row, entries_to_csv, parse_backup};
pub use key_value::{FileStore, KeyValueStore, MemoryStore};
