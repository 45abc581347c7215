//! One renderer per component type.

pub(super) mod callout;
pub(super) mod card;
pub(super) mod code_block;
pub(super) mod divider;
pub(super) mod gallery;
pub(super) mod hero;
pub(super) mod layout;
pub(super) mod list;
pub(super) mod metadata;
pub(super) mod quote;
pub(super) mod table;
pub(super) mod text_block;
