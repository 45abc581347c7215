//! Article listing and per-article surface views for the page shell.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

use lru::LruCache;
use tracing::{debug, warn};

use crate::application::content::{ArticleSource, article_card};
use crate::application::error::AppError;
use crate::application::surface::{RenderedSurface, SurfaceRenderer, SurfaceViewState};
use crate::application::transport::SurfaceTransport;
use crate::domain::article::{Article, ArticleCard};
use crate::domain::error::DomainError;
use crate::domain::lightbox::GalleryFocus;
use crate::domain::surface::SurfaceUpdate;

const SOURCE: &str = "application::article_view";

#[derive(Debug, Clone, Default)]
pub struct ViewRequest {
    pub focus: Option<GalleryFocus>,
    /// Skip the cache and replace its entry with a fresh surface.
    pub refresh: bool,
}

#[derive(Debug, Clone)]
pub struct ArticleView {
    pub article: Article,
    pub surface: Arc<SurfaceUpdate>,
    pub rendered: RenderedSurface,
    pub cached: bool,
}

impl ArticleView {
    pub fn component_count(&self) -> usize {
        self.surface.components.len()
    }
}

pub struct ArticleViewService {
    source: Arc<dyn ArticleSource>,
    transport: Arc<dyn SurfaceTransport>,
    renderer: SurfaceRenderer,
    surfaces: Mutex<LruCache<String, Arc<SurfaceUpdate>>>,
}

impl ArticleViewService {
    pub fn new(
        source: Arc<dyn ArticleSource>,
        transport: Arc<dyn SurfaceTransport>,
        renderer: SurfaceRenderer,
        capacity: NonZeroUsize,
    ) -> Self {
        Self {
            source,
            transport,
            renderer,
            surfaces: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub async fn cards(&self) -> Result<Vec<ArticleCard>, AppError> {
        let articles = self.source.list().await?;
        Ok(articles.iter().map(article_card).collect())
    }

    pub async fn view(&self, id: &str, request: &ViewRequest) -> Result<ArticleView, AppError> {
        let article = self
            .source
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found("article", id))?;

        let cached = if request.refresh {
            None
        } else {
            self.lock_surfaces("view.get").get(id).cloned()
        };

        let (surface, from_cache) = match cached {
            Some(surface) => (surface, true),
            None => {
                let surface = Arc::new(self.transport.render(&article.content, &article.meta).await);
                self.lock_surfaces("view.put")
                    .put(article.id.clone(), Arc::clone(&surface));
                (surface, false)
            }
        };

        debug!(
            target = SOURCE,
            article_id = id,
            cached = from_cache,
            components = surface.components.len(),
            "Rendering article surface"
        );

        let view_state = SurfaceViewState {
            focus: request.focus.clone(),
        };
        let rendered = self.renderer.render(&surface.components, &view_state);

        Ok(ArticleView {
            article,
            surface,
            rendered,
            cached: from_cache,
        })
    }

    pub fn cached_surfaces(&self) -> usize {
        self.lock_surfaces("cached_surfaces").len()
    }

    fn lock_surfaces(
        &self,
        op: &'static str,
    ) -> MutexGuard<'_, LruCache<String, Arc<SurfaceUpdate>>> {
        match self.surfaces.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!(
                    target = SOURCE,
                    op,
                    result = "poisoned_recovered",
                    "Recovered from poisoned surface cache lock"
                );
                poisoned.into_inner()
            }
        }
    }
}
