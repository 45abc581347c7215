//! Markdown articles on disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use crate::application::content::{ArticleSource, ContentError, parse_article};
use crate::domain::article::Article;

const ARTICLE_EXTENSION: &str = "md";

/// Loads every `*.md` file of one directory; the file stem is the article id.
#[derive(Debug, Clone)]
pub struct FsArticleSource {
    directory: PathBuf,
}

impl FsArticleSource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    async fn article_paths(&self) -> Result<Vec<(String, PathBuf)>, ContentError> {
        let io_error = |source| ContentError::Io {
            path: self.directory.display().to_string(),
            source,
        };

        let mut entries = fs::read_dir(&self.directory).await.map_err(io_error)?;
        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(ARTICLE_EXTENSION) {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            paths.push((id.to_string(), path.clone()));
        }
        paths.sort_by(|left, right| left.0.cmp(&right.0));
        Ok(paths)
    }

    async fn load(id: &str, path: &Path) -> Option<Article> {
        match fs::read_to_string(path).await {
            Ok(markdown) => Some(parse_article(id, &markdown)),
            Err(err) => {
                warn!(
                    target = "infra::content_store",
                    path = %path.display(),
                    error = %err,
                    "Skipping unreadable article"
                );
                None
            }
        }
    }
}

#[async_trait]
impl ArticleSource for FsArticleSource {
    async fn list(&self) -> Result<Vec<Article>, ContentError> {
        let paths = self.article_paths().await?;
        let mut articles = Vec::with_capacity(paths.len());
        for (id, path) in &paths {
            if let Some(article) = Self::load(id, path).await {
                articles.push(article);
            }
        }
        debug!(
            target = "infra::content_store",
            directory = %self.directory.display(),
            count = articles.len(),
            "Loaded articles"
        );
        Ok(articles)
    }

    async fn find(&self, id: &str) -> Result<Option<Article>, ContentError> {
        let paths = self.article_paths().await?;
        match paths.iter().find(|(candidate, _)| candidate == id) {
            Some((id, path)) => Ok(Self::load(id, path).await),
            None => Ok(None),
        }
    }
}
