//! Persistence for diary entries.
//!
//! An [`EntryStore`] owns one pooled SQLite connection for the lifetime of a
//! request. Lookups that miss return `None`/`false`; only failures of the
//! database itself surface as `sqlx::Error`.

mod entries;

pub use entries::EntryStore;
