//! Merge both sources into one newest-first list.

use crate::models::ArticleRecord;

/// Concatenate `qiita` then `hatena` and order the result newest first.
///
/// `sort_by` is stable, so records with equal timestamps keep their
/// concatenation order (Qiita before Hatena, then upstream order).
///
/// # Returns
///
/// Every input record exactly once, newest `published_at` first.
pub fn merge(qiita: Vec<ArticleRecord>, hatena: Vec<ArticleRecord>) -> Vec<ArticleRecord> {
    let mut all = qiita;
    all.extend(hatena);
    all.sort_by(|l, r| r.published_at().cmp(&l.published_at()));
    all
}
