use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for to-do lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(pub u64);

impl ListId {
    /// Recover the id from a list page location such as `/lists/12/`.
    pub fn from_url(url: &str) -> Option<Self> {
        let id = url.strip_prefix("/lists/")?.strip_suffix('/')?;
        id.parse().ok()
    }
}

/// Path segment that is not a list id (only plain digits are).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a list id")]
pub struct InvalidListId(pub String);

impl FromStr for ListId {
    type Err = InvalidListId;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidListId(raw.to_string()));
        }
        raw.parse()
            .map(Self)
            .map_err(|_| InvalidListId(raw.to_string()))
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Item text that passed validation: trimmed, non-empty and HTML-escaped.
///
/// Only [`ItemValidator`](super::ItemValidator) hands these out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemText(String);

impl ItemText {
    pub(super) fn new_unchecked(escaped: String) -> Self {
        Self(escaped)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored list. Lists carry no data beyond their identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRecord {
    pub id: ListId,
    pub created_at: DateTime<Utc>,
}

impl ListRecord {
    /// Location of the list's page, used as the redirect target after a submission.
    pub fn url(&self) -> String {
        list_url(self.id)
    }
}

pub fn list_url(id: ListId) -> String {
    format!("/lists/{id}/")
}

/// A stored item, owned by exactly one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    pub list: ListId,
    pub text: ItemText,
    pub created_at: DateTime<Utc>,
}
