//! Error taxonomy for the harvest pipeline.
//!
//! Every variant is fatal: the pipeline has no partial-success mode, so a
//! single failed request, parse, schema check or write aborts the run.

use crate::models::Source;
use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Connection, TLS or body-read failure during a GET.
    #[error("transport error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a status of 300 or above. `body` holds a
    /// truncated preview of the response text.
    #[error("request to {url} failed with status {status}: {body}")]
    Request {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("malformed JSON from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed feed document from {url}: {source}")]
    Feed {
        url: String,
        #[source]
        source: quick_xml::DeError,
    },

    /// A raw item is missing a required field or carries an unusable value.
    /// `url` is the listing or feed page the item came from; `index` counts
    /// from zero within that document.
    #[error("{origin} item #{index} on {url}: field `{field}` {reason}")]
    Schema {
        origin: Source,
        url: String,
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("pagination revisited {url}")]
    PaginationCycle { url: String },

    #[error("failed to render front matter: {0}")]
    Render(#[from] serde_yaml::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn schema(
        origin: Source,
        url: &str,
        index: usize,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Error::Schema {
            origin,
            url: url.to_string(),
            index,
            field,
            reason: reason.into(),
        }
    }
}
