//! Source adapters that turn upstream responses into [`ArticleRecord`]s.
//!
//! | Source | Module | Format | Auth | Paging |
//! |--------|--------|--------|------|--------|
//! | Qiita | [`qiita`] | JSON array | none | single request |
//! | Hatena Blog | [`hatena`] | AtomPub feed | HTTP Basic | `rel="next"` links |
//!
//! Each module exports `fetch_articles(..)`, which performs the requests
//! through a [`Fetch`](crate::fetch::Fetch) implementation, plus a pure
//! parsing function that works on an already-fetched body. Raw upstream
//! fields are validated at this boundary: a missing URL, title or date is an
//! [`Error::Schema`](crate::error::Error::Schema), never a half-filled record.
//!
//! [`ArticleRecord`]: crate::models::ArticleRecord

pub mod hatena;
pub mod qiita;
