use std::sync::Arc;

use crate::config::ListsConfig;

use super::domain::ItemText;

/// Rejection of a submission whose text is empty once trimmed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct EmptyTextError {
    message: Arc<str>,
}

impl EmptyTextError {
    /// The escaped, user-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Single-rule validator for item text.
#[derive(Debug, Clone)]
pub struct ItemValidator {
    empty_item_error: Arc<str>,
}

impl ItemValidator {
    pub fn from_config(config: &ListsConfig) -> Self {
        Self::with_message(&config.empty_item_error)
    }

    pub fn with_message(raw_message: &str) -> Self {
        Self {
            empty_item_error: Arc::from(escape_html(raw_message)),
        }
    }

    pub fn empty_item_error(&self) -> &str {
        &self.empty_item_error
    }

    pub fn validate(&self, raw: &str) -> Result<ItemText, EmptyTextError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmptyTextError {
                message: self.empty_item_error.clone(),
            });
        }
        Ok(ItemText::new_unchecked(escape_html(trimmed)))
    }
}

impl Default for ItemValidator {
    fn default() -> Self {
        Self::from_config(&ListsConfig::default())
    }
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
