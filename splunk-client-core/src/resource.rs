//! Generic resource representation shared by every entity collection
//!
//! The transport layer parses responses into these types; entity types map
//! a [`Resource`] into their own fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::{Error, Result};

/// Extent of the last fetch relative to the whole remote collection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Number of entries the server was asked to return in this window
    pub items_per_page: u32,
    /// Offset of the first returned entry
    pub start_index: u32,
    /// Number of entries in the remote collection
    pub total_results: u32,
}

impl Pagination {
    pub fn new(items_per_page: u32, start_index: u32, total_results: u32) -> Self {
        Self {
            items_per_page,
            start_index,
            total_results,
        }
    }

    /// Pagination of a collection that has not been fetched yet
    pub fn none() -> Self {
        Self::default()
    }

    /// Single window holding all `count` results, saturating at `u32::MAX`
    pub fn single_window(count: usize) -> Self {
        let total = u32::try_from(count).unwrap_or(u32::MAX);
        Self::new(total, 0, total)
    }

    /// Offset one past the last entry covered by this window
    pub fn end_index(&self) -> u32 {
        let end = if self.items_per_page == 0 {
            self.total_results
        } else {
            self.start_index.saturating_add(self.items_per_page)
        };
        end.min(self.total_results)
    }

    /// Check if the remote collection holds entries past this window
    pub fn has_more(&self) -> bool {
        self.end_index() < self.total_results
    }
}

/// Severity of a message returned alongside a response
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl MessageKind {
    /// Warnings and worse are surfaced in the logs
    pub fn is_notable(&self) -> bool {
        matches!(
            self,
            MessageKind::Warning | MessageKind::Error | MessageKind::Fatal
        )
    }
}

/// Non-fatal message returned by the server with a response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn new<S: Into<String>>(kind: MessageKind, text: S) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.text)
    }
}

/// Generic materialization target for a single remote entity
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Resource {
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    pub updated: Option<DateTime<Utc>>,
    pub content: Map<String, Value>,
}

impl Resource {
    /// Create a resource with an empty content map
    pub fn new<S1: Into<String>, S2: Into<String>>(id: S1, title: S2) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set a content value, returning the resource for chaining
    pub fn with_content<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.content.insert(key.into(), value.into());
        self
    }

    /// String content value; `None` when absent, null or not a string
    pub fn content_str(&self, key: &str) -> Option<&str> {
        self.content.get(key).and_then(Value::as_str)
    }

    /// Boolean content value, accepting Splunk's `"0"`/`"1"` strings
    pub fn content_bool(&self, key: &str) -> Option<bool> {
        match self.content.get(key)? {
            Value::Bool(value) => Some(*value),
            Value::String(value) => match value.as_str() {
                "1" | "true" => Some(true),
                "0" | "false" => Some(false),
                _ => None,
            },
            Value::Number(value) => value.as_i64().map(|value| value != 0),
            _ => None,
        }
    }

    /// String content value that must be present for `entity` to be built
    pub fn require_str(&self, entity: &str, key: &str) -> Result<&str> {
        self.content_str(key)
            .ok_or_else(|| Error::conversion(entity, format!("Missing content field '{}'", key)))
    }
}

/// Entries, pagination and messages returned by one transport call
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Feed {
    pub entries: Vec<Resource>,
    pub pagination: Pagination,
    pub messages: Vec<Message>,
}

impl Feed {
    /// Feed holding all of `entries` in a single window
    pub fn from_entries(entries: Vec<Resource>) -> Self {
        Self {
            pagination: Pagination::single_window(entries.len()),
            entries,
            messages: Vec::new(),
        }
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }
}

/// Owner/app scope a request is issued in
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Namespace {
    pub owner: Option<String>,
    pub app: Option<String>,
}

impl Namespace {
    pub fn new<S1: Into<String>, S2: Into<String>>(owner: S1, app: S2) -> Self {
        Self {
            owner: Some(owner.into()),
            app: Some(app.into()),
        }
    }

    /// Check if requests use the server's default scope
    pub fn is_default(&self) -> bool {
        self.owner.is_none() && self.app.is_none()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.owner, &self.app) {
            (None, None) => f.write_str("default"),
            (owner, app) => write!(
                f,
                "{}/{}",
                owner.as_deref().unwrap_or("-"),
                app.as_deref().unwrap_or("-")
            ),
        }
    }
}
