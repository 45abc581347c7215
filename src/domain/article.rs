use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleImage {
    pub url: String,
    #[serde(default)]
    pub caption: String,
}

/// Frontmatter metadata of an article.
///
/// Every field may be missing on the wire; absent strings deserialize as
/// empty and are treated as "not present" by consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleMeta {
    pub title: String,
    pub author: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ArticleImage>>,
}

impl ArticleMeta {
    /// Hero image, or the first listed image when no hero is set.
    pub fn thumbnail(&self) -> Option<&str> {
        self.hero_image
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| {
                self.images
                    .as_ref()
                    .and_then(|images| images.first())
                    .map(|image| image.url.as_str())
            })
    }

    pub fn tag_list(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: String,
    pub meta: ArticleMeta,
    pub content: String,
}

/// Listing projection of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleCard {
    pub id: String,
    pub title: String,
    pub author: String,
    pub date: String,
    pub excerpt: String,
    pub thumbnail: Option<String>,
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_prefers_hero_image() {
        let meta = ArticleMeta {
            hero_image: Some("https://img/hero.jpg".into()),
            images: Some(vec![ArticleImage {
                url: "https://img/first.jpg".into(),
                caption: String::new(),
            }]),
            ..ArticleMeta::default()
        };
        assert_eq!(meta.thumbnail(), Some("https://img/hero.jpg"));
    }

    #[test]
    fn thumbnail_falls_back_to_first_image() {
        let meta = ArticleMeta {
            images: Some(vec![ArticleImage {
                url: "https://img/first.jpg".into(),
                caption: "first".into(),
            }]),
            ..ArticleMeta::default()
        };
        assert_eq!(meta.thumbnail(), Some("https://img/first.jpg"));
        assert_eq!(ArticleMeta::default().thumbnail(), None);
    }

    #[test]
    fn missing_fields_deserialize_as_empty() {
        let meta: ArticleMeta = serde_json::from_str(r#"{ "title": "Only title" }"#).unwrap();
        assert_eq!(meta.title, "Only title");
        assert_eq!(meta.author, "");
        assert!(meta.tag_list().is_empty());
    }
}
