//! Command-line interface definitions.
//!
//! Every option can also come from the environment (or a `.env` file loaded
//! at startup), so a bare `article_harvest` run works once the four source
//! variables are set.

use clap::Parser;

/// Command-line arguments for article_harvest.
///
/// # Examples
///
/// ```sh
/// # Everything from the environment / .env
/// article_harvest
///
/// # Explicit output directory and a page limit for the Hatena walk
/// article_harvest -o ./content/ja --max-pages 20
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Qiita item listing endpoint (JSON)
    #[arg(long, env = "QiitaURL")]
    pub qiita_url: String,

    /// First page of the Hatena Blog AtomPub collection
    #[arg(long, env = "HatenaURL")]
    pub hatena_url: String,

    /// Hatena user id for HTTP Basic authentication
    #[arg(long, env = "HatenaUsername")]
    pub hatena_username: String,

    /// Hatena AtomPub API key
    #[arg(long, env = "HatenaApiKey", hide_env_values = true)]
    pub hatena_api_key: String,

    /// Directory the article files are written to
    #[arg(short, long, env = "OUTPUT_DIR", default_value = "../../content/ja/")]
    pub output_dir: String,

    /// Author written into every front-matter block
    #[arg(long, env = "ARTICLE_AUTHOR", default_value = "seriru")]
    pub author: String,

    /// Optional authorEmoji front-matter value
    #[arg(long, env = "ARTICLE_AUTHOR_EMOJI")]
    pub author_emoji: Option<String>,

    /// Stop following Hatena next links after this many pages
    #[arg(long, env = "HATENA_MAX_PAGES")]
    pub max_pages: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 9] = [
        "article_harvest",
        "--qiita-url",
        "https://qiita.com/api/v2/users/seriru/items",
        "--hatena-url",
        "https://blog.hatena.ne.jp/seriru/seriru.hatenablog.com/atom/entry",
        "--hatena-username",
        "seriru",
        "--hatena-api-key",
        "key",
    ];

    #[test]
    fn test_cli_parsing_defaults() {
        let cli = Cli::parse_from(REQUIRED);

        assert_eq!(cli.qiita_url, "https://qiita.com/api/v2/users/seriru/items");
        assert_eq!(cli.hatena_username, "seriru");
        assert_eq!(cli.output_dir, "../../content/ja/");
        assert_eq!(cli.author, "seriru");
        assert_eq!(cli.author_emoji, None);
        assert_eq!(cli.max_pages, None);
    }

    #[test]
    fn test_cli_short_flags() {
        let mut args = REQUIRED.to_vec();
        args.extend(["-o", "/tmp/content", "--max-pages", "3"]);
        let cli = Cli::parse_from(args);

        assert_eq!(cli.output_dir, "/tmp/content");
        assert_eq!(cli.max_pages, Some(3));
    }

    #[test]
    fn test_cli_rejects_non_numeric_page_limit() {
        let mut args = REQUIRED.to_vec();
        args.extend(["--max-pages", "lots"]);
        assert!(Cli::try_parse_from(args).is_err());
    }
}
