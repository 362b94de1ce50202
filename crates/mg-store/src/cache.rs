//! Lazily populated thumbnail cache.
//!
//! Entries are created on the first thumbnail request for an image and
//! removed only when the parent image is deleted. There is no size bound.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use mg_core::config::ThumbnailConfig;
use mg_core::{Error, ImageId, Result};
use tokio::sync::Notify;

use crate::store::ImageStore;
use crate::thumbnail::{self, Thumbnail};

/// Map from image id to its generated thumbnail.
#[derive(Debug, Default)]
pub struct ThumbnailCache {
    thumbnails: DashMap<ImageId, Thumbnail>,
    /// Ids with a generation in flight, so concurrent misses wait instead of
    /// decoding the same image twice.
    loading: DashMap<ImageId, Arc<Notify>>,
}

impl ThumbnailCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, id: &ImageId) -> bool {
        self.thumbnails.contains_key(id)
    }

    pub fn get(&self, id: &ImageId) -> Option<Thumbnail> {
        self.thumbnails.get(id).map(|entry| entry.value().clone())
    }

    pub fn put(&self, id: ImageId, thumbnail: Thumbnail) {
        self.thumbnails.insert(id, thumbnail);
    }

    /// Drop the cached thumbnail for `id`, returning whether one existed.
    pub fn evict(&self, id: &ImageId) -> bool {
        self.thumbnails.remove(id).is_some()
    }

    pub fn clear(&self) {
        self.thumbnails.clear();
    }

    pub fn len(&self) -> usize {
        self.thumbnails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thumbnails.is_empty()
    }

    /// Return the cached thumbnail for `id`, generating it from the stored
    /// image on a miss.
    ///
    /// Concurrent misses for the same id are coalesced: one caller generates,
    /// the others wait and then read the cache. Fails with
    /// [`Error::NotFound`] if the image is not in `images`, and with
    /// [`Error::Thumbnail`] if decoding or encoding fails, in which case
    /// nothing is cached.
    pub async fn get_or_generate(
        &self,
        id: ImageId,
        images: &ImageStore,
        settings: &ThumbnailConfig,
    ) -> Result<Thumbnail> {
        loop {
            if let Some(thumb) = self.get(&id) {
                tracing::debug!(image_id = %id, "Thumbnail cache hit");
                return Ok(thumb);
            }

            match self.loading.entry(id) {
                Entry::Occupied(e) => {
                    // Register interest before releasing the shard lock so the
                    // loader's wake-up cannot be missed.
                    let notify = e.get().clone();
                    let notified = notify.notified();
                    tokio::pin!(notified);
                    notified.as_mut().enable();
                    drop(e);
                    notified.await;
                    // Loader finished; re-check the cache, or become the
                    // loader ourselves if it failed.
                }
                Entry::Vacant(e) => {
                    let notify = Arc::new(Notify::new());
                    e.insert(notify.clone());
                    let _guard = LoadingGuard {
                        loading: &self.loading,
                        id,
                        notify,
                    };
                    return self.populate(id, images, settings).await;
                }
            }
        }
    }

    async fn populate(
        &self,
        id: ImageId,
        images: &ImageStore,
        settings: &ThumbnailConfig,
    ) -> Result<Thumbnail> {
        let record = images
            .get(&id)
            .ok_or_else(|| Error::not_found("image", id))?;

        tracing::debug!(image_id = %id, size = record.size, "Generating thumbnail");

        let settings = settings.clone();
        let thumb = tokio::task::spawn_blocking(move || {
            thumbnail::generate(&record.data, &settings)
        })
        .await
        .map_err(|e| Error::Internal(format!("thumbnail task failed: {e}")))??;

        self.put(id, thumb.clone());
        // The image may have been deleted while we were encoding.
        if !images.contains(&id) {
            self.evict(&id);
        }

        Ok(thumb)
    }
}

/// Clears the in-flight marker and wakes waiters, even if the generating
/// request is dropped mid-way.
struct LoadingGuard<'a> {
    loading: &'a DashMap<ImageId, Arc<Notify>>,
    id: ImageId,
    notify: Arc<Notify>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.loading.remove(&self.id);
        self.notify.notify_waiters();
    }
}
