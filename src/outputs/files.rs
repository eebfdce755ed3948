//! Content file writer.
//!
//! Files are named `<published_at as epoch millis>.md` and are never
//! overwritten: an existing file at the computed path counts as already
//! produced, including one written earlier in the same run by a record with
//! an identical timestamp.

use crate::error::{Error, Result};
use crate::models::ArticleRecord;
use crate::outputs::front_matter::{AuthorProfile, render};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

/// What [`write_if_absent`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// A file already existed at the path; nothing was touched.
    Skipped,
}

/// Result of one [`write_articles`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Paths of newly created files, in the order they were written.
    pub written: Vec<PathBuf>,
    pub skipped: usize,
}

/// `<dir>/<epoch millis>.md` for `article`.
pub fn article_path(dir: &Path, article: &ArticleRecord) -> PathBuf {
    dir.join(format!("{}.md", article.file_stem()))
}

/// Write `content` to `path` unless something already exists there.
///
/// The file is opened with create-new semantics, so the existence check and
/// the creation are one step.
///
/// # Arguments
///
/// * `path` - Target file; its parent directory must already exist
/// * `content` - Full file contents, written as UTF-8
///
/// # Returns
///
/// [`WriteOutcome::Written`] when the file was created, or
/// [`WriteOutcome::Skipped`] when one was already there.
///
/// # Errors
///
/// [`Error::Write`] for any I/O failure other than the file already existing.
pub async fn write_if_absent(path: &Path, content: &str) -> Result<WriteOutcome> {
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
    {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!(path = %path.display(), "File exists; skipping");
            return Ok(WriteOutcome::Skipped);
        }
        Err(e) => return Err(write_err(e)),
    };

    file.write_all(content.as_bytes()).await.map_err(write_err)?;
    file.flush().await.map_err(write_err)?;
    Ok(WriteOutcome::Written)
}

/// Render and write every article, in the given order, into `dir`.
///
/// Writes are strictly sequential. The first render or write error aborts
/// the loop; files written before it stay on disk.
///
/// # Returns
///
/// A [`WriteSummary`] listing created paths in write order and counting
/// skipped records.
#[instrument(level = "info", skip_all, fields(dir = %dir.display(), count = articles.len()))]
pub async fn write_articles(
    dir: &Path,
    articles: &[ArticleRecord],
    author: &AuthorProfile,
) -> Result<WriteSummary> {
    let mut summary = WriteSummary::default();

    for article in articles {
        let path = article_path(dir, article);
        let content = render(article, author)?;
        match write_if_absent(&path, &content).await? {
            WriteOutcome::Written => {
                info!(title = %article.title(), path = %path.display(), "Created article file");
                summary.written.push(path);
            }
            WriteOutcome::Skipped => summary.skipped += 1,
        }
    }

    info!(written = summary.written.len(), skipped = summary.skipped, "Finished writing articles");
    Ok(summary)
}
