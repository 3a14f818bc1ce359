use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DiaryEntry {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub is_done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to insert an entry. The store assigns everything else.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub title: String,
    pub content: String,
}

/// Partial update applied by the store.
///
/// `None` means the caller did not supply the field and the stored value is
/// kept. `Some("")` is a real value and overwrites.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_done: Option<bool>,
}

impl EntryChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.is_done.is_none()
    }
}
