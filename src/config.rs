//! Validated, immutable run configuration.
//!
//! [`Cli`] is parsed once in `main` and converted into a [`Config`], which is
//! then borrowed by every stage of the pipeline. Nothing reads the
//! environment after this point.

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::models::Credentials;
use crate::outputs::front_matter::AuthorProfile;
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub qiita_url: String,
    pub hatena: HatenaConfig,
    pub output_dir: PathBuf,
    pub author: AuthorProfile,
}

#[derive(Debug, Clone)]
pub struct HatenaConfig {
    pub start_url: String,
    pub credentials: Credentials,
    pub max_pages: Option<usize>,
}

/// Reject anything that is not an absolute http(s) URL.
fn http_url(name: &str, raw: &str) -> Result<String> {
    let url = Url::parse(raw).map_err(|e| Error::Config(format!("{name} {raw:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(raw.to_string()),
        other => Err(Error::Config(format!(
            "{name} {raw:?}: unsupported scheme {other:?}"
        ))),
    }
}

fn non_empty(name: &str, raw: String) -> Result<String> {
    if raw.trim().is_empty() {
        return Err(Error::Config(format!("{name} must not be empty")));
    }
    Ok(raw)
}

impl TryFrom<Cli> for Config {
    type Error = Error;

    fn try_from(cli: Cli) -> Result<Self> {
        if cli.max_pages == Some(0) {
            return Err(Error::Config("max pages must be at least 1".into()));
        }

        Ok(Self {
            qiita_url: http_url("QiitaURL", &cli.qiita_url)?,
            hatena: HatenaConfig {
                start_url: http_url("HatenaURL", &cli.hatena_url)?,
                credentials: Credentials {
                    username: non_empty("HatenaUsername", cli.hatena_username)?,
                    api_key: non_empty("HatenaApiKey", cli.hatena_api_key)?,
                },
                max_pages: cli.max_pages,
            },
            output_dir: PathBuf::from(cli.output_dir),
            author: AuthorProfile {
                name: cli.author,
                emoji: cli.author_emoji.filter(|e| !e.is_empty()),
            },
        })
    }
}
