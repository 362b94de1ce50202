//! In-memory image store.

use std::sync::Arc;

use dashmap::DashMap;
use mg_core::{ImageId, ImageRecord, ImageSummary};

use crate::cache::ThumbnailCache;

/// Map from image id to the uploaded record.
///
/// Deleting or clearing records also evicts the matching entries from the
/// attached [`ThumbnailCache`].
#[derive(Debug)]
pub struct ImageStore {
    images: DashMap<ImageId, ImageRecord>,
    thumbnails: Arc<ThumbnailCache>,
}

impl ImageStore {
    pub fn new(thumbnails: Arc<ThumbnailCache>) -> Self {
        Self {
            images: DashMap::new(),
            thumbnails,
        }
    }

    /// Insert `record` under `id`, replacing any existing record.
    pub fn add(&self, id: ImageId, record: ImageRecord) {
        self.images.insert(id, record);
    }

    pub fn get(&self, id: &ImageId) -> Option<ImageRecord> {
        self.images.get(id).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, id: &ImageId) -> bool {
        self.images.contains_key(id)
    }

    /// All records, in no particular order.
    pub fn list(&self) -> Vec<ImageRecord> {
        self.images.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Metadata for every record, oldest upload first.
    pub fn summaries(&self) -> Vec<ImageSummary> {
        let mut summaries: Vec<ImageSummary> = self
            .images
            .iter()
            .map(|entry| entry.value().summary())
            .collect();
        summaries.sort_by(|a, b| a.uploaded_at.cmp(&b.uploaded_at).then(a.id.cmp(&b.id)));
        summaries
    }

    /// Remove the record and its cached thumbnail. Returns whether a record
    /// existed.
    pub fn delete(&self, id: &ImageId) -> bool {
        let existed = self.images.remove(id).is_some();
        self.thumbnails.evict(id);
        existed
    }

    /// Remove every record and every cached thumbnail.
    pub fn clear(&self) {
        self.images.clear();
        self.thumbnails.clear();
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thumbnail::Thumbnail;
    use bytes::Bytes;
    use mg_core::MimeType;

    fn store() -> (ImageStore, Arc<ThumbnailCache>) {
        let cache = Arc::new(ThumbnailCache::new());
        (ImageStore::new(cache.clone()), cache)
    }

    fn record(id: ImageId, name: &str) -> ImageRecord {
        ImageRecord::new(id, name, MimeType::Jpeg, Bytes::from_static(b"\xFF\xD8\xFF"))
    }

    #[test]
    fn add_and_get() {
        let (store, _) = store();
        let id = ImageId::new();
        let rec = record(id, "test.jpg");
        store.add(id, rec.clone());
        assert_eq!(store.get(&id), Some(rec));
    }

    #[test]
    fn add_overwrites() {
        let (store, _) = store();
        let id = ImageId::new();
        store.add(id, record(id, "first.jpg"));
        store.add(id, record(id, "second.jpg"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).unwrap().filename, "second.jpg");
    }

    #[test]
    fn list_returns_every_record() {
        let (store, _) = store();
        for i in 0..5 {
            let id = ImageId::new();
            store.add(id, record(id, &format!("{i}.jpg")));
        }
        assert_eq!(store.list().len(), 5);
        assert_eq!(store.summaries().len(), 5);
    }

    #[test]
    fn delete_existing_and_missing() {
        let (store, _) = store();
        let id = ImageId::new();
        store.add(id, record(id, "test.jpg"));
        assert!(store.delete(&id));
        assert_eq!(store.get(&id), None);
        assert!(!store.delete(&id));
        assert!(!store.delete(&ImageId::new()));
    }

    #[test]
    fn delete_evicts_thumbnail() {
        let (store, cache) = store();
        let id = ImageId::new();
        store.add(id, record(id, "test.jpg"));
        cache.put(
            id,
            Thumbnail {
                mime_type: MimeType::Jpeg,
                data: Bytes::from_static(b"thumb"),
            },
        );
        assert!(cache.has(&id));

        store.delete(&id);
        assert!(!cache.has(&id));
        assert_eq!(cache.get(&id), None);
    }

    #[test]
    fn clear_empties_store_and_cache() {
        let (store, cache) = store();
        let id = ImageId::new();
        store.add(id, record(id, "test.jpg"));
        cache.put(
            id,
            Thumbnail {
                mime_type: MimeType::Jpeg,
                data: Bytes::from_static(b"thumb"),
            },
        );
        store.clear();
        assert!(store.is_empty());
        assert_eq!(cache.len(), 0);
    }
}
