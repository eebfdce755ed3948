//! Hugo content file rendering.
//!
//! Each article becomes a short page: a YAML front-matter block between
//! `---` fences, one fixed lead sentence, and the link to the original post.
//!
//! ```text
//! ---
//! author: seriru
//! title: Hello
//! date: 2024-01-01T09:00:00+09:00
//! description: ''
//! draft: false
//! hideToc: false
//! enableToc: true
//! enableTocContent: false
//! tags:
//! - Qiita
//! ---
//! 記事はこちら（タグが付いているリンク先に飛びます）
//! https://qiita.com/...
//! ```

use crate::error::Result;
use crate::models::ArticleRecord;
use serde::Serialize;

/// Lead sentence placed above the link: "The article is here (jumps to the
/// tagged site)".
pub const BODY_LEAD: &str = "記事はこちら（タグが付いているリンク先に飛びます）";

/// Author fields written into every front-matter block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorProfile {
    pub name: String,
    pub emoji: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FrontMatter<'a> {
    author: &'a str,
    title: &'a str,
    date: String,
    description: &'a str,
    draft: bool,
    hide_toc: bool,
    enable_toc: bool,
    enable_toc_content: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    author_emoji: Option<&'a str>,
    tags: Vec<&'static str>,
}

/// Render the full file contents for `article`.
///
/// # Arguments
///
/// * `article` - The record to render
/// * `author` - Name and optional emoji placed in the front matter
///
/// # Returns
///
/// A `---`-delimited YAML block followed by [`BODY_LEAD`] and the article
/// URL, ending in a newline.
///
/// # Errors
///
/// [`Error::Render`](crate::error::Error::Render) if YAML serialization fails.
pub fn render(article: &ArticleRecord, author: &AuthorProfile) -> Result<String> {
    let front_matter = FrontMatter {
        author: &author.name,
        title: article.title(),
        date: article.published_at().to_rfc3339(),
        description: "",
        draft: false,
        hide_toc: false,
        enable_toc: true,
        enable_toc_content: false,
        author_emoji: author.emoji.as_deref(),
        tags: vec![article.source().tag()],
    };
    let yaml = serde_yaml::to_string(&front_matter)?;

    Ok(format!("---\n{yaml}---\n{BODY_LEAD}\n{}\n", article.url()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;
    use chrono::DateTime;

    fn author() -> AuthorProfile {
        AuthorProfile {
            name: "seriru".to_string(),
            emoji: None,
        }
    }

    fn article(title: &str, source: Source) -> ArticleRecord {
        ArticleRecord::new(
            "http://x",
            title,
            source,
            DateTime::parse_from_rfc3339("2024-01-01T09:00:00+09:00").unwrap(),
        )
    }

    /// Split rendered output into (front matter, body).
    fn split(rendered: &str) -> (&str, &str) {
        let rest = rendered.strip_prefix("---\n").expect("opening fence");
        let end = rest.find("\n---\n").expect("closing fence");
        (&rest[..end + 1], &rest[end + 5..])
    }

    #[test]
    fn test_render_layout() {
        let rendered = render(&article("Hello", Source::Qiita), &author()).unwrap();
        let (front, body) = split(&rendered);

        assert!(front.contains("author: seriru\n"));
        assert!(front.contains("title: Hello\n"));
        assert!(front.contains("2024-01-01T09:00:00+09:00"));
        assert!(front.contains("draft: false\n"));
        assert!(front.contains("hideToc: false\n"));
        assert!(front.contains("enableToc: true\n"));
        assert!(front.contains("enableTocContent: false\n"));
        assert!(front.contains("tags:\n- Qiita\n"));
        assert!(!front.contains("authorEmoji"));

        assert_eq!(body, format!("{BODY_LEAD}\nhttp://x\n"));
        assert!(body.lines().any(|line| line == "http://x"));
    }

    #[test]
    fn test_render_key_order() {
        let rendered = render(&article("Hello", Source::Hatena), &author()).unwrap();
        let (front, _) = split(&rendered);
        let keys: Vec<&str> = front
            .lines()
            .filter(|l| !l.starts_with('-'))
            .filter_map(|l| l.split(':').next())
            .collect();

        assert_eq!(
            keys,
            vec![
                "author",
                "title",
                "date",
                "description",
                "draft",
                "hideToc",
                "enableToc",
                "enableTocContent",
                "tags",
            ]
        );
        assert!(front.ends_with("tags:\n- Hatena\n"));
    }

    #[test]
    fn test_render_author_emoji_when_configured() {
        let author = AuthorProfile {
            name: "seriru".to_string(),
            emoji: Some("☕".to_string()),
        };
        let rendered = render(&article("Hello", Source::Qiita), &author).unwrap();
        assert!(rendered.contains("authorEmoji: "));
        assert!(rendered.contains("☕"));
    }

    #[test]
    fn test_render_keeps_yaml_significant_titles_inside_front_matter() {
        let title = "Rust: --- the # hard parts";
        let rendered = render(&article(title, Source::Qiita), &author()).unwrap();
        let (front, body) = split(&rendered);

        let value: serde_yaml::Value = serde_yaml::from_str(front).unwrap();
        assert_eq!(value["title"].as_str(), Some(title));
        assert_eq!(value["tags"][0].as_str(), Some("Qiita"));
        assert!(body.ends_with("http://x\n"));
    }
}
