//! Qiita item listing adapter.
//!
//! One GET against the configured endpoint (for example
//! `https://qiita.com/api/v2/users/<id>/items?per_page=100`) returning a JSON
//! array. Every item becomes one [`ArticleRecord`] tagged [`Source::Qiita`],
//! dated by its `updated_at` field. No pagination.

use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::models::{ArticleRecord, Source};
use crate::utils::parse_timestamp;
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// One element of the listing as served; only the fields we read.
#[derive(Debug, Deserialize)]
pub struct RawItem {
    pub url: Option<String>,
    pub title: Option<String>,
    pub updated_at: Option<String>,
}

/// Fetch the listing and convert it into article records.
///
/// # Arguments
///
/// * `fetcher` - Transport used for the single unauthenticated GET
/// * `url` - The listing endpoint
///
/// # Returns
///
/// One record per listing item, in listing order.
///
/// # Errors
///
/// Transport and status failures from the fetcher, [`Error::Json`] for a
/// body that is not a JSON array of objects, and [`Error::Schema`] for items
/// missing a required field.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn fetch_articles<F: Fetch>(fetcher: &F, url: &str) -> Result<Vec<ArticleRecord>> {
    let body = fetcher.fetch(url).await?;
    let items: Vec<RawItem> = serde_json::from_str(&body).map_err(|source| Error::Json {
        url: url.to_string(),
        source,
    })?;
    debug!(count = items.len(), "Decoded Qiita listing");

    let articles = extract_articles(url, items)?;
    info!(count = articles.len(), "Collected Qiita articles");
    Ok(articles)
}

/// Map raw items 1:1 to records, preserving order. `url` is the listing the
/// items came from and only appears in schema errors.
pub fn extract_articles(url: &str, items: Vec<RawItem>) -> Result<Vec<ArticleRecord>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| to_record(url, index, item))
        .collect()
}

fn to_record(listing: &str, index: usize, item: RawItem) -> Result<ArticleRecord> {
    let url = item
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| Error::schema(Source::Qiita, listing, index, "url", "is missing or empty"))?;
    let title = item
        .title
        .ok_or_else(|| Error::schema(Source::Qiita, listing, index, "title", "is missing"))?;
    let raw_date = item
        .updated_at
        .ok_or_else(|| Error::schema(Source::Qiita, listing, index, "updated_at", "is missing"))?;
    let published_at = parse_timestamp(&raw_date).ok_or_else(|| {
        Error::schema(
            Source::Qiita,
            listing,
            index,
            "updated_at",
            format!("is not a valid date: {raw_date:?}"),
        )
    })?;

    Ok(ArticleRecord::new(url, title, Source::Qiita, published_at))
}
