//! Domain layer types and invariants.

#[macro_use]
mod scale;

pub mod article;
pub mod error;
pub mod lightbox;
pub mod style;
pub mod surface;
