//! mg-store: volatile image storage and the thumbnail cache.
//!
//! [`ImageStore`] owns every uploaded [`ImageRecord`](mg_core::ImageRecord)
//! and cascades deletions into the [`ThumbnailCache`] it is built with, so a
//! thumbnail can never outlive its parent image. Thumbnails are produced on
//! demand by [`thumbnail::generate`] and cached on first request.

pub mod cache;
pub mod store;
pub mod thumbnail;

pub use cache::ThumbnailCache;
pub use store::ImageStore;
pub use thumbnail::Thumbnail;
