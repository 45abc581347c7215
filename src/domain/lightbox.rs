//! Focus state of an image gallery.

use std::str::FromStr;

use super::error::DomainError;
use super::surface::GalleryImage;

/// At most one image is focused per gallery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LightboxState {
    #[default]
    Closed,
    Focused(GalleryImage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    Backdrop,
    CloseButton,
}

impl LightboxState {
    /// Clicking a gallery item. Without lightbox support the state is kept.
    pub fn select(self, image: &GalleryImage, lightbox_enabled: bool) -> Self {
        if lightbox_enabled {
            LightboxState::Focused(image.clone())
        } else {
            self
        }
    }

    pub fn dismiss(self, _via: Dismissal) -> Self {
        LightboxState::Closed
    }

    pub fn focused(&self) -> Option<&GalleryImage> {
        match self {
            LightboxState::Focused(image) => Some(image),
            LightboxState::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, LightboxState::Focused(_))
    }
}

/// Request-level pointer at one image of one gallery: `<entry-id>:<index>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryFocus {
    pub gallery_id: String,
    pub index: usize,
}

impl GalleryFocus {
    pub fn new(gallery_id: impl Into<String>, index: usize) -> Self {
        Self {
            gallery_id: gallery_id.into(),
            index,
        }
    }

    pub fn to_query_value(&self) -> String {
        format!("{}:{}", self.gallery_id, self.index)
    }
}

impl FromStr for GalleryFocus {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        // Entry ids may themselves contain colons; the index is the last segment.
        let (gallery_id, index) = raw
            .rsplit_once(':')
            .ok_or_else(|| DomainError::validation(format!("focus `{raw}` must be `id:index`")))?;
        let index = index
            .parse::<usize>()
            .map_err(|_| DomainError::validation(format!("focus index `{index}` is not a number")))?;
        Ok(Self::new(gallery_id, index))
    }
}
