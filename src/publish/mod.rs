//! Publication adapter for WordPress sites.

pub mod slug;
pub mod types;
pub mod wordpress;

pub use slug::{derive_slug, FALLBACK_SLUG};
pub use types::{PublicationResult, PublicationTarget};
pub use wordpress::WordPressPublisher;
