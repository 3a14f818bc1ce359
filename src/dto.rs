//! # Diary API — Request/Response DTOs
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body
//! - `*Query`    → deserialized from query params
//! - Create-time validation is expressed via `validator` derive macros
//! - Patch bodies use [`Field`] so an omitted key and an explicit `null` differ

use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::entry::{EntryChanges, NewEntry};

pub const TITLE_MAX_LEN: usize = 200;
pub const DEFAULT_LIST_LIMIT: u32 = 100;

// ============================================================================
// Common
// ============================================================================

/// Standard message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /readyz
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<i64>,
}

/// A JSON field that may be absent, explicitly `null`, or carry a value.
///
/// Use with `#[serde(default)]`: a missing key stays [`Field::Unset`].
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Unset,
    Null,
    Value(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Unset
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Field::Value(value),
            None => Field::Null,
        })
    }
}

impl<T> Field<T> {
    /// Collapses a field backed by a NOT NULL column. `null` is rejected.
    fn into_required(self, name: &str) -> AppResult<Option<T>> {
        match self {
            Field::Unset => Ok(None),
            Field::Value(value) => Ok(Some(value)),
            Field::Null => Err(AppError::Validation(format!("{name} may not be null"))),
        }
    }
}

// ============================================================================
// Entries
// ============================================================================

/// POST /entries/
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEntryRequest {
    // Keep `max` equal to TITLE_MAX_LEN; the update path checks the same bound.
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

impl From<CreateEntryRequest> for NewEntry {
    fn from(req: CreateEntryRequest) -> Self {
        NewEntry {
            title: req.title,
            content: req.content,
        }
    }
}

/// PATCH /entries/{id}
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEntryRequest {
    #[serde(default)]
    pub title: Field<String>,
    #[serde(default)]
    pub content: Field<String>,
    #[serde(default)]
    pub is_done: Field<bool>,
}

impl UpdateEntryRequest {
    /// Validates the patch and keeps only the keys the client sent.
    pub fn into_changes(self) -> AppResult<EntryChanges> {
        let title = self.title.into_required("title")?;
        if let Some(title) = &title {
            if title.chars().count() > TITLE_MAX_LEN {
                return Err(AppError::Validation(format!(
                    "title: Title must be at most {TITLE_MAX_LEN} characters"
                )));
            }
        }

        Ok(EntryChanges {
            title,
            content: self.content.into_required("content")?,
            is_done: self.is_done.into_required("is_done")?,
        })
    }
}

/// GET /entries/?skip=&limit=
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIST_LIMIT
}

/// PATCH /entries/{id}/done?is_done=
#[derive(Debug, Deserialize)]
pub struct MarkDoneQuery {
    #[serde(default = "default_is_done", deserialize_with = "deserialize_flag")]
    pub is_done: bool,
}

fn default_is_done() -> bool {
    true
}

/// Parses the boolean spellings clients send in query strings, ignoring case.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" | "on" => Some(true),
        "false" | "f" | "0" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw).ok_or_else(|| {
        de::Error::invalid_value(
            Unexpected::Str(&raw),
            &"a boolean such as true/false, 1/0, yes/no or on/off",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch(json: &str) -> UpdateEntryRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn omitted_keys_stay_unset() {
        let req = patch(r#"{"title": "Updated"}"#);
        assert_eq!(req.title, Field::Value("Updated".to_string()));
        assert_eq!(req.content, Field::Unset);
        assert_eq!(req.is_done, Field::Unset);
    }

    #[test]
    fn falsy_values_count_as_supplied() {
        let changes = patch(r#"{"content": "", "is_done": false}"#)
            .into_changes()
            .unwrap();
        assert_eq!(
            changes,
            EntryChanges {
                title: None,
                content: Some(String::new()),
                is_done: Some(false),
            }
        );
    }

    #[test]
    fn explicit_null_is_rejected() {
        let err = patch(r#"{"title": null}"#).into_changes().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("title")));
    }

    #[test]
    fn empty_patch_has_no_changes() {
        assert!(patch("{}").into_changes().unwrap().is_empty());
    }

    #[test]
    fn overlong_title_is_rejected_on_update() {
        let body = format!(r#"{{"title": "{}"}}"#, "x".repeat(TITLE_MAX_LEN + 1));
        assert!(patch(&body).into_changes().is_err());
    }

    #[test]
    fn wrong_type_fails_to_deserialize() {
        assert!(serde_json::from_str::<UpdateEntryRequest>(r#"{"is_done": "yes"}"#).is_err());
    }

    #[test]
    fn create_requires_non_empty_fields() {
        let ok = CreateEntryRequest {
            title: "Day one".into(),
            content: "Wrote some Rust".into(),
        };
        assert!(ok.validate().is_ok());

        let empty_title = CreateEntryRequest {
            title: String::new(),
            content: "body".into(),
        };
        assert!(empty_title.validate().is_err());

        let empty_content = CreateEntryRequest {
            title: "title".into(),
            content: String::new(),
        };
        assert!(empty_content.validate().is_err());

        let long_title = CreateEntryRequest {
            title: "x".repeat(TITLE_MAX_LEN + 1),
            content: "body".into(),
        };
        assert!(long_title.validate().is_err());
    }

    #[test]
    fn create_and_update_share_title_limit() {
        let at_limit = CreateEntryRequest {
            title: "é".repeat(TITLE_MAX_LEN),
            content: "body".into(),
        };
        assert!(at_limit.validate().is_ok());

        let body = format!(r#"{{"title": "{}"}}"#, "é".repeat(TITLE_MAX_LEN));
        assert!(patch(&body).into_changes().is_ok());
    }

    #[test]
    fn flag_accepts_common_spellings() {
        for raw in ["true", "True", "1", "yes", "Y", "on", "t"] {
            assert_eq!(parse_flag(raw), Some(true), "{raw}");
        }
        for raw in ["false", "FALSE", "0", "no", "n", "Off", "f"] {
            assert_eq!(parse_flag(raw), Some(false), "{raw}");
        }
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag(""), None);
    }
}
