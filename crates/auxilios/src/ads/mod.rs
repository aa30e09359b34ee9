//! Ad slots: creative storage, markup sanitizing and slot rendering.

pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod sanitizer;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{AdCreative, AdPosition, CreativeId, UnknownPosition};
pub use import::{AdCreativeImporter, AdImportError};
pub use repository::{AdRepository, InMemoryAdRepository, RepositoryError};
pub use router::ad_router;
pub use sanitizer::{
    AdContentSanitizer, AdMarkupPolicy, DEFAULT_ALLOWED_ATTRIBUTES, DEFAULT_ALLOWED_TAGS,
};
pub use service::{AdSlotError, AdSlotService, RenderedCreative, RenderedSlot};
