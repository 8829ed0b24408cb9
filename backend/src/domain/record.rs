//! Record data model.
//!
//! Three shapes describe a record at different points of its life:
//!
//! - [`RecordDraft`]: a candidate exactly as submitted by a client or decoded
//!   from a spreadsheet row. Every field is optional.
//! - [`NewRecord`]: a candidate that passed the validation engine and can be
//!   handed to storage.
//! - [`Record`]: a stored record carrying its storage-assigned [`RecordId`].

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Storage-assigned record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Candidate record as submitted, before validation.
///
/// Serialised back unchanged when the candidate is rejected, so clients can
/// match rejections to their input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
    /// Identifier echoed from the input; ignored when persisting.
    #[schema(value_type = Option<i64>)]
    #[serde(default)]
    pub id: Option<RecordId>,
    #[schema(example = "Ada Lovelace")]
    #[serde(default)]
    pub name: Option<String>,
    #[schema(example = "ada@example.com")]
    #[serde(default)]
    pub email: Option<String>,
    #[schema(example = 36)]
    #[serde(default)]
    pub age: Option<i32>,
}

impl RecordDraft {
    /// Build a fully populated draft.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::RecordDraft;
    ///
    /// let draft = RecordDraft::new("Ada", "ada@example.com", 36);
    /// assert_eq!(draft.email_key(), Some("ada@example.com"));
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i32) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            email: Some(email.into()),
            age: Some(age),
        }
    }

    /// Email usable as a deduplication key: present and not blank.
    #[must_use]
    pub fn email_key(&self) -> Option<&str> {
        self.email
            .as_deref()
            .filter(|email| !email.trim().is_empty())
    }
}

/// Validated record ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl NewRecord {
    /// Construct a record from already validated parts.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
        }
    }
}

/// Stored record.
///
/// ## Invariants
/// - `email` is unique among stored records; the record service enforces
///   this, storage does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[schema(value_type = i64, example = 1)]
    pub id: RecordId,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = 36)]
    pub age: i32,
}

impl Record {
    /// Attach a storage identifier to validated fields.
    #[must_use]
    pub fn from_new(id: RecordId, record: NewRecord) -> Self {
        let NewRecord { name, email, age } = record;
        Self {
            id,
            name,
            email,
            age,
        }
    }

    /// Replace name, email and age while keeping the identifier.
    #[must_use]
    pub fn with_changes(self, changes: NewRecord) -> Self {
        Self::from_new(self.id, changes)
    }
}
