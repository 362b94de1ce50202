//! Application context.
//!
//! [`AppContext`] is the state shared across all route handlers via Axum
//! state. It is built once at startup and injected into the router, so each
//! test can construct an isolated instance.

use std::sync::Arc;

use mg_core::config::Config;
use mg_store::{ImageStore, ThumbnailCache};

/// Application context shared by all request handlers (via Axum state).
///
/// This is cheaply cloneable because it only holds `Arc`s.
#[derive(Clone)]
pub struct AppContext {
    /// Immutable application configuration snapshot.
    pub config: Arc<Config>,
    /// Uploaded images.
    pub images: Arc<ImageStore>,
    /// Generated thumbnails, evicted by `images` on delete.
    pub thumbnails: Arc<ThumbnailCache>,
}

impl AppContext {
    /// Build an empty context for the given configuration.
    pub fn new(config: Config) -> Self {
        let thumbnails = Arc::new(ThumbnailCache::new());
        let images = Arc::new(ImageStore::new(thumbnails.clone()));
        Self {
            config: Arc::new(config),
            images,
            thumbnails,
        }
    }
}
