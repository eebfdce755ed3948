//! Data models shared by the source adapters and the output writers.
//!
//! - [`Source`]: which upstream produced an article
//! - [`ArticleRecord`]: one normalized article, regardless of source
//! - [`Credentials`]: HTTP Basic identity for the Hatena AtomPub endpoint

use chrono::{DateTime, FixedOffset};
use std::fmt;

/// The upstream an article was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Qiita item listing (JSON).
    Qiita,
    /// Hatena Blog AtomPub collection (paginated XML).
    Hatena,
}

impl Source {
    /// Display tag used in the `tags` list of the generated file.
    pub fn tag(self) -> &'static str {
        match self {
            Source::Qiita => "Qiita",
            Source::Hatena => "Hatena",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A normalized article entry.
///
/// Records are built once by a source adapter and never mutated afterwards;
/// the fields are private so the invariants checked at construction hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    url: String,
    title: String,
    source: Source,
    published_at: DateTime<FixedOffset>,
}

impl ArticleRecord {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        source: Source,
        published_at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            source,
            published_at,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn published_at(&self) -> DateTime<FixedOffset> {
        self.published_at
    }

    /// File stem for the generated content file: publication time as
    /// milliseconds since the Unix epoch.
    pub fn file_stem(&self) -> i64 {
        self.published_at.timestamp_millis()
    }
}

/// HTTP Basic credentials for the Hatena endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
