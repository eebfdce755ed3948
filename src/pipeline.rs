//! One harvest run: fetch both sources, merge, write.

use crate::aggregate::merge;
use crate::config::Config;
use crate::error::Result;
use crate::fetch::Fetch;
use crate::models::ArticleRecord;
use crate::outputs::files::{WriteSummary, write_articles};
use crate::sources::{hatena, qiita};
use crate::utils::ensure_writable_dir;
use futures::future::try_join;
use itertools::Itertools;
use tracing::{info, instrument, warn};

/// Run the whole pipeline once.
///
/// Both sources are awaited together and the first failure aborts the run
/// before anything is written. Output order depends only on the merge sort.
///
/// # Errors
///
/// [`Error::Write`](crate::error::Error::Write) before any request is made
/// when `config.output_dir` does not exist or is not writable; otherwise the
/// first fetch, parse, schema, render or write error.
#[instrument(level = "info", skip_all, fields(output_dir = %config.output_dir.display()))]
pub async fn run<F: Fetch>(config: &Config, fetcher: &F) -> Result<WriteSummary> {
    ensure_writable_dir(&config.output_dir).await?;

    let (qiita_articles, hatena_articles) = try_join(
        qiita::fetch_articles(fetcher, &config.qiita_url),
        hatena::fetch_articles(
            fetcher,
            &config.hatena.start_url,
            &config.hatena.credentials,
            config.hatena.max_pages,
        ),
    )
    .await?;
    info!(
        qiita = qiita_articles.len(),
        hatena = hatena_articles.len(),
        "Fetched all sources"
    );

    let articles = merge(qiita_articles, hatena_articles);
    warn_on_colliding_timestamps(&articles);

    write_articles(&config.output_dir, &articles, &config.author).await
}

/// Records sharing a millisecond timestamp map to the same file; only the
/// first one in sorted order is written.
fn warn_on_colliding_timestamps(articles: &[ArticleRecord]) {
    for stem in articles.iter().map(ArticleRecord::file_stem).duplicates() {
        warn!(stem, "Several articles share a timestamp; only the first is written");
    }
}
