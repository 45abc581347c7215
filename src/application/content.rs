//! Article parsing and listing projections.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;

use crate::domain::article::{Article, ArticleCard, ArticleMeta};

pub const DEFAULT_EXCERPT_LENGTH: usize = 150;
pub const CARD_EXCERPT_LENGTH: usize = 120;
pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_AUTHOR: &str = "Unknown";

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content from `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Supplies articles to the page shell.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// All articles, ordered by id.
    async fn list(&self) -> Result<Vec<Article>, ContentError>;

    async fn find(&self, id: &str) -> Result<Option<Article>, ContentError> {
        Ok(self.list().await?.into_iter().find(|article| article.id == id))
    }
}

static FRONTMATTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A---\r?\n((?s).*?)\r?\n---\r?\n((?s).*)\z").expect("frontmatter pattern")
});

/// Splits YAML frontmatter from the markdown body.
///
/// Frontmatter that is missing or not valid YAML leaves the text untouched
/// and yields default metadata.
pub fn parse_article(id: &str, markdown: &str) -> Article {
    let parsed = FRONTMATTER.captures(markdown).and_then(|captures| {
        let yaml = captures.get(1).map_or("", |m| m.as_str());
        let body = captures.get(2).map_or("", |m| m.as_str());
        match serde_yaml::from_str::<ArticleMeta>(yaml) {
            Ok(meta) => Some((meta, body.trim().to_string())),
            Err(err) => {
                debug!(
                    target = "application::content",
                    article_id = id,
                    error = %err,
                    "Ignoring unparsable frontmatter"
                );
                None
            }
        }
    });

    let (meta, content) = parsed.unwrap_or_else(|| (ArticleMeta::default(), markdown.to_string()));

    Article {
        id: id.to_string(),
        meta: with_defaults(meta),
        content,
    }
}

fn with_defaults(mut meta: ArticleMeta) -> ArticleMeta {
    if meta.title.trim().is_empty() {
        meta.title = DEFAULT_TITLE.to_string();
    }
    if meta.author.trim().is_empty() {
        meta.author = DEFAULT_AUTHOR.to_string();
    }
    if meta.date.trim().is_empty() {
        meta.date = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();
    }
    meta
}

struct ExcerptRules {
    headings: Regex,
    bold: Regex,
    italic: Regex,
    code: Regex,
    links: Regex,
    blockquotes: Regex,
    list_markers: Regex,
    newlines: Regex,
}

static EXCERPT_RULES: Lazy<ExcerptRules> = Lazy::new(|| ExcerptRules {
    headings: Regex::new(r"(?m)^#{1,6}\s+").expect("heading pattern"),
    bold: Regex::new(r"\*\*|__").expect("bold pattern"),
    italic: Regex::new(r"[*_]").expect("italic pattern"),
    code: Regex::new(r"`{1,3}[^`]*`{1,3}").expect("code pattern"),
    links: Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("link pattern"),
    blockquotes: Regex::new(r"(?m)^>\s*").expect("blockquote pattern"),
    list_markers: Regex::new(r"(?m)^[-*+]\s+").expect("list pattern"),
    newlines: Regex::new(r"\n+").expect("newline pattern"),
});

/// Plain-text preview of markdown, cut to `max_len` characters plus `...`.
pub fn extract_excerpt(markdown: &str, max_len: usize) -> String {
    let rules = &*EXCERPT_RULES;
    let text = rules.headings.replace_all(markdown, "");
    let text = rules.bold.replace_all(&text, "");
    let text = rules.italic.replace_all(&text, "");
    let text = rules.code.replace_all(&text, "");
    let text = rules.links.replace_all(&text, "$1");
    let text = rules.blockquotes.replace_all(&text, "");
    let text = rules.list_markers.replace_all(&text, "");
    let text = rules.newlines.replace_all(&text, " ");
    let plain = text.trim();

    if plain.chars().count() <= max_len {
        return plain.to_string();
    }
    let cut: String = plain.chars().take(max_len).collect();
    format!("{}...", cut.trim())
}

pub fn article_card(article: &Article) -> ArticleCard {
    ArticleCard {
        id: article.id.clone(),
        title: article.meta.title.clone(),
        author: article.meta.author.clone(),
        date: article.meta.date.clone(),
        excerpt: extract_excerpt(&article.content, CARD_EXCERPT_LENGTH),
        thumbnail: article.meta.thumbnail().map(str::to_string),
        tags: article.meta.tag_list().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::article::ArticleImage;

    const ARTICLE: &str = "---\ntitle: \"Mountain Light\"\nauthor: Mara Quinn\ndate: 2024-03-02\nheroImage: https://img.example/peak.jpg\ntags: [photography, hiking]\nimages:\n  - url: \"https://img.example/a.jpg\"\n    caption: \"Dawn\"\n---\n\n# Mountain Light\n\nChasing the first rays.\n";

    #[test]
    fn parses_frontmatter_and_trims_body() {
        let article = parse_article("mountain-light", ARTICLE);

        assert_eq!(article.id, "mountain-light");
        assert_eq!(article.meta.title, "Mountain Light");
        assert_eq!(article.meta.author, "Mara Quinn");
        assert_eq!(article.meta.date, "2024-03-02");
        assert_eq!(
            article.meta.tags,
            Some(vec!["photography".to_string(), "hiking".to_string()])
        );
        assert_eq!(
            article.meta.images,
            Some(vec![ArticleImage {
                url: "https://img.example/a.jpg".into(),
                caption: "Dawn".into(),
            }])
        );
        assert_eq!(article.content, "# Mountain Light\n\nChasing the first rays.");
    }

    #[test]
    fn missing_frontmatter_uses_defaults() {
        let article = parse_article("plain", "Just text.\n");

        assert_eq!(article.meta.title, "Untitled");
        assert_eq!(article.meta.author, "Unknown");
        assert!(OffsetDateTime::parse(&article.meta.date, &Rfc3339).is_ok());
        assert_eq!(article.content, "Just text.\n");
    }

    #[test]
    fn invalid_yaml_is_treated_as_absent() {
        let markdown = "---\ntitle: [unclosed\n---\nBody";
        let article = parse_article("broken", markdown);
        assert_eq!(article.meta.title, "Untitled");
        assert_eq!(article.content, markdown);
    }

    #[test]
    fn excerpt_strips_markdown() {
        let markdown = "# Title\n\nSome **bold** and _soft_ text with `code` and a [link](https://x.y).\n\n> quoted\n- item";
        assert_eq!(
            extract_excerpt(markdown, DEFAULT_EXCERPT_LENGTH),
            "Title Some bold and soft text with  and a link. quoted item"
        );
    }

    #[test]
    fn excerpt_truncates_with_ellipsis() {
        let excerpt = extract_excerpt("abcde fghij", 6);
        assert_eq!(excerpt, "abcde...");
        assert_eq!(extract_excerpt("short", 6), "short");
    }

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        assert_eq!(extract_excerpt("ééééé", 3), "ééé...");
    }

    #[test]
    fn cards_use_short_excerpts_and_thumbnails() {
        let article = parse_article("mountain-light", ARTICLE);
        let card = article_card(&article);
        assert_eq!(card.thumbnail.as_deref(), Some("https://img.example/peak.jpg"));
        assert_eq!(card.tags, ["photography", "hiking"]);
        assert_eq!(card.excerpt, "Mountain Light Chasing the first rays.");
    }
}
