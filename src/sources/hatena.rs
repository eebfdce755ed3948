//! Hatena Blog AtomPub adapter and pagination walker.
//!
//! The collection endpoint (`https://blog.hatena.ne.jp/<user>/<blog>/atom/entry`)
//! requires HTTP Basic authentication with the user id and the AtomPub API
//! key. Each response is an Atom feed page:
//!
//! ```text
//! <feed>
//!   <link rel="first" href="…"/>
//!   <link rel="next" href="…?page=1700000000"/>   (absent on the last page)
//!   <title>…</title>
//!   <entry>
//!     <link rel="edit" href="…"/>
//!     <link rel="alternate" type="text/html" href="https://…/entry/…"/>
//!     <title>…</title>
//!     <published>2024-01-01T09:00:00+09:00</published>
//!     …
//!   </entry>
//! </feed>
//! ```
//!
//! [`parse_page`] turns one body into records plus the next link;
//! [`fetch_articles`] follows next links until there are none.

use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::models::{ArticleRecord, Credentials, Source};
use crate::utils::parse_timestamp;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{error, info, instrument, warn};
use url::Url;

#[derive(Debug, Deserialize)]
struct RawFeed {
    #[serde(rename = "link", default)]
    links: Vec<RawLink>,
    #[serde(rename = "entry", default)]
    entries: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    title: Option<RawText>,
    published: Option<String>,
    #[serde(rename = "link", default)]
    links: Vec<RawLink>,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    #[serde(rename = "@rel")]
    rel: Option<String>,
    #[serde(rename = "@href")]
    href: Option<String>,
}

/// Element text, ignoring any attributes such as `type="text"`.
#[derive(Debug, Deserialize)]
struct RawText {
    #[serde(rename = "$text", default)]
    value: String,
}

/// One parsed feed page.
#[derive(Debug)]
pub struct FeedPage {
    pub articles: Vec<ArticleRecord>,
    /// `href` of the first feed-level `rel="next"` link.
    pub next: Option<String>,
}

/// First `href` among `links` whose `rel` equals `rel`.
fn find_link<'a>(links: &'a [RawLink], rel: &str) -> Option<&'a str> {
    links
        .iter()
        .find(|link| link.rel.as_deref() == Some(rel))
        .and_then(|link| link.href.as_deref())
}

/// Parse one feed page fetched from `url`.
///
/// # Arguments
///
/// * `url` - The page address, used only in error reports
/// * `body` - The Atom document as served
///
/// # Returns
///
/// A [`FeedPage`] with one record per `<entry>` in document order and the
/// raw `href` of the feed's first `rel="next"` link, if any.
///
/// # Errors
///
/// [`Error::Feed`] when the body is not a well-formed feed (the parser error
/// is also logged), [`Error::Schema`] when an entry lacks an alternate link,
/// a title or a usable `published` date. Schema errors name `url`, and their
/// index counts entries within this page only.
pub fn parse_page(url: &str, body: &str) -> Result<FeedPage> {
    let feed: RawFeed = quick_xml::de::from_str(body).map_err(|source| {
        error!(%url, error = %source, "Failed to parse Hatena feed page");
        Error::Feed {
            url: url.to_string(),
            source,
        }
    })?;

    let next = find_link(&feed.links, "next").map(str::to_string);
    let articles = feed
        .entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| to_record(url, index, entry))
        .collect::<Result<Vec<_>>>()?;

    Ok(FeedPage { articles, next })
}

fn to_record(page: &str, index: usize, entry: RawEntry) -> Result<ArticleRecord> {
    let url = find_link(&entry.links, "alternate")
        .filter(|href| !href.trim().is_empty())
        .ok_or_else(|| {
            Error::schema(Source::Hatena, page, index, "link", "has no rel=\"alternate\" href")
        })?
        .to_string();
    let title = entry
        .title
        .map(|t| t.value)
        .ok_or_else(|| Error::schema(Source::Hatena, page, index, "title", "is missing"))?;
    let raw_date = entry
        .published
        .ok_or_else(|| Error::schema(Source::Hatena, page, index, "published", "is missing"))?;
    let published_at = parse_timestamp(&raw_date).ok_or_else(|| {
        Error::schema(
            Source::Hatena,
            page,
            index,
            "published",
            format!("is not a valid date: {raw_date:?}"),
        )
    })?;

    Ok(ArticleRecord::new(url, title, Source::Hatena, published_at))
}

/// Resolve a possibly relative `next` href against the page it came from.
fn resolve_next(current: &str, href: &str) -> String {
    Url::parse(current)
        .and_then(|base| base.join(href))
        .map(String::from)
        .unwrap_or_else(|_| href.to_string())
}

/// Walk the feed from `start_url`, following `rel="next"` links.
///
/// Pages are fetched strictly one after another with the same credentials
/// and their records are appended in document order. The walk stops when a
/// page has no next link, or once `max_pages` pages have been read.
///
/// # Arguments
///
/// * `fetcher` - Transport for the authenticated GETs
/// * `start_url` - The collection endpoint, fetched first
/// * `credentials` - Basic-auth pair sent with every page request
/// * `max_pages` - Optional bound on the number of pages read
///
/// # Returns
///
/// Records from all pages, page by page, each page in document order.
///
/// # Errors
///
/// Any fetch or page error aborts the walk and discards what was collected.
/// A next link pointing at an already-visited page yields
/// [`Error::PaginationCycle`].
#[instrument(level = "info", skip_all, fields(%start_url, ?max_pages))]
pub async fn fetch_articles<F: Fetch>(
    fetcher: &F,
    start_url: &str,
    credentials: &Credentials,
    max_pages: Option<usize>,
) -> Result<Vec<ArticleRecord>> {
    let mut articles = Vec::new();
    let mut visited = HashSet::new();
    let mut next = Some(start_url.to_string());
    let mut pages = 0usize;

    while let Some(url) = next.take() {
        if max_pages.is_some_and(|limit| pages >= limit) {
            warn!(pages, %url, "Reached page limit; not following next link");
            break;
        }
        if !visited.insert(url.clone()) {
            error!(%url, "Next link points at an already visited page");
            return Err(Error::PaginationCycle { url });
        }

        let body = fetcher.fetch_with_auth(&url, credentials).await?;
        let page = parse_page(&url, &body)?;
        pages += 1;
        info!(page = pages, %url, count = page.articles.len(), "Parsed Hatena page");

        articles.extend(page.articles);
        next = page.next.map(|href| resolve_next(&url, &href));
    }

    info!(pages, count = articles.len(), "Collected Hatena articles");
    Ok(articles)
}
