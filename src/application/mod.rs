//! Application services layer.

pub mod agent;
pub mod article_view;
pub mod content;
pub mod error;
pub mod markdown;
pub mod style;
pub mod surface;
pub mod transport;
