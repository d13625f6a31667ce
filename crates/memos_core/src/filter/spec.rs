//! Declarative feed query.

use serde::{Deserialize, Serialize};

/// Content classification filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    /// No plain or line-start hashtag.
    NotTagged,
    /// Contains a URL.
    Linked,
    /// Contains an image URL.
    Imaged,
    /// Contains a `[@text](id)` cross-memo link.
    Connected,
}

impl ContentType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "NOT_TAGGED" => Some(Self::NotTagged),
            "LINKED" => Some(Self::Linked),
            "IMAGED" => Some(Self::Imaged),
            "CONNECTED" => Some(Self::Connected),
            _ => None,
        }
    }
}

/// Creation-time window in epoch milliseconds, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duration {
    pub from: i64,
    pub to: i64,
}

impl Duration {
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }

    /// Only `from < to` windows filter anything.
    pub fn is_active(&self) -> bool {
        self.from < self.to
    }

    pub fn contains(&self, epoch_ms: i64) -> bool {
        self.from <= epoch_ms && epoch_ms <= self.to
    }
}

/// A named, persisted clause list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredQuery {
    pub id: String,
    pub title: String,
    /// JSON array of [`crate::filter::query::QueryClause`].
    pub querystring: String,
}

/// Feed query. Every present part must match (AND).
///
/// Empty `tag` / `text` strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    pub tag: Option<String>,
    pub duration: Option<Duration>,
    #[serde(rename = "type")]
    pub content_type: Option<ContentType>,
    pub text: Option<String>,
    pub query: Option<StoredQuery>,
}

impl FilterSpec {
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_duration(mut self, from: i64, to: i64) -> Self {
        self.duration = Some(Duration::new(from, to));
        self
    }

    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_query(mut self, query: StoredQuery) -> Self {
        self.query = Some(query);
        self
    }

    pub fn tag_filter(&self) -> Option<&str> {
        self.tag.as_deref().filter(|tag| !tag.is_empty())
    }

    pub fn text_filter(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.is_empty())
    }

    pub fn active_duration(&self) -> Option<Duration> {
        self.duration.filter(Duration::is_active)
    }

    /// Whether any part of this spec can hide a memo.
    pub fn is_active(&self) -> bool {
        self.tag_filter().is_some()
            || self.active_duration().is_some()
            || self.content_type.is_some()
            || self.text_filter().is_some()
            || self.query.is_some()
    }
}
