//! Course content image catalog.
//!
//! Fetches the per-category content listing and flattens it into the
//! uniform image collection the review session pages over. A re-fetch is a
//! full replace, never a merge, and a monotonically increasing request
//! ticket guards against a stale in-flight fetch installing its result
//! after the category changed or the session ended.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use log::{debug, info};
use thiserror::Error;

use crate::api::{ApiError, ContentApi};
use crate::model::{flatten, ContentItem, EnrichedImage, ReviewCategory};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Image fetch failed: {0}")]
    Api(#[from] ApiError),

    /// The fetch resolved after a newer request or an invalidation; its
    /// result was discarded.
    #[error("Image fetch superseded by a newer request")]
    Superseded,
}

/// One fetched category's content items and their flattened images.
#[derive(Debug)]
pub struct CatalogSnapshot {
    pub category: ReviewCategory,
    pub items: Vec<ContentItem>,
    pub images: Vec<EnrichedImage>,
    index_by_key: HashMap<String, usize>,
}

impl CatalogSnapshot {
    pub(crate) fn new(category: ReviewCategory, items: Vec<ContentItem>) -> Self {
        let images = flatten(&items);
        let index_by_key = images
            .iter()
            .enumerate()
            .map(|(idx, image)| (image.key(), idx))
            .collect();
        Self {
            category,
            items,
            images,
            index_by_key,
        }
    }

    pub fn total_images(&self) -> usize {
        self.images.len()
    }

    pub fn image_by_id(&self, key: &str) -> Option<&EnrichedImage> {
        self.index_by_key.get(key).map(|idx| &self.images[*idx])
    }
}

/// Catalog of the currently loaded category, owned by the active review
/// session.
pub struct ContentImageCatalog {
    api: Arc<dyn ContentApi>,
    request_seq: AtomicU64,
    current: Mutex<Option<Arc<CatalogSnapshot>>>,
}

impl ContentImageCatalog {
    pub fn new(api: Arc<dyn ContentApi>) -> Self {
        Self {
            api,
            request_seq: AtomicU64::new(0),
            current: Mutex::new(None),
        }
    }

    /// The currently installed snapshot, if any.
    pub fn current(&self) -> Option<Arc<CatalogSnapshot>> {
        self.current.lock().expect("catalog lock poisoned").clone()
    }

    /// Drops the snapshot and retires every in-flight fetch ticket, so a
    /// response for the previous category cannot land later.
    pub fn invalidate(&self) {
        self.request_seq.fetch_add(1, Ordering::SeqCst);
        *self.current.lock().expect("catalog lock poisoned") = None;
    }

    /// Fetches a category's images and installs the snapshot, replacing any
    /// previous one wholesale. No automatic retry on error — the stale
    /// snapshot (if any) is kept in preference to flapping.
    pub async fn load(
        &self,
        category: ReviewCategory,
    ) -> Result<Arc<CatalogSnapshot>, CatalogError> {
        let ticket = self.request_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let items = self.api.fetch_images(category.content_type()).await?;
        let snapshot = Arc::new(CatalogSnapshot::new(category, items));

        let mut current = self.current.lock().expect("catalog lock poisoned");
        if self.request_seq.load(Ordering::SeqCst) != ticket {
            debug!("Discarding superseded image fetch for category {category}");
            return Err(CatalogError::Superseded);
        }
        info!(
            "Loaded {} images across {} content items for category {category}",
            snapshot.total_images(),
            snapshot.items.len()
        );
        *current = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Result as ApiResult;
    use crate::model::{ContentImage, ContentType};
    use async_trait::async_trait;
    use tokio::sync::Notify;

    fn item(content_id: i64, content_type: ContentType, image_ids: &[i64]) -> ContentItem {
        ContentItem {
            content_id,
            content_name: format!("Content {content_id}"),
            content_parent_id: None,
            content_type,
            images: image_ids
                .iter()
                .map(|id| ContentImage {
                    image_id: *id,
                    image_url: format!("https://files.example.edu/{id}"),
                    image_alt_text: None,
                })
                .collect(),
        }
    }

    /// Content API that parks assignment fetches until released, so tests
    /// can interleave a slow fetch with faster ones.
    struct GatedContentApi {
        gate: Notify,
    }

    impl GatedContentApi {
        fn new() -> Self {
            Self {
                gate: Notify::new(),
            }
        }
    }

    #[async_trait]
    impl ContentApi for GatedContentApi {
        async fn fetch_images(&self, content_type: ContentType) -> ApiResult<Vec<ContentItem>> {
            if content_type == ContentType::Assignment {
                self.gate.notified().await;
            }
            Ok(vec![item(content_type as i64 + 100, content_type, &[1, 2])])
        }
    }

    #[tokio::test]
    async fn load_installs_snapshot_and_replaces_wholesale() {
        let api = Arc::new(GatedContentApi::new());
        let catalog = ContentImageCatalog::new(api.clone());

        let pages = catalog.load(ReviewCategory::Pages).await.unwrap();
        assert_eq!(pages.total_images(), 2);
        assert_eq!(catalog.current().unwrap().category, ReviewCategory::Pages);

        let quizzes = catalog.load(ReviewCategory::ClassicQuizzes).await.unwrap();
        assert_eq!(quizzes.category, ReviewCategory::ClassicQuizzes);
        // Full replace: the new snapshot is the only one installed.
        assert_eq!(
            catalog.current().unwrap().category,
            ReviewCategory::ClassicQuizzes
        );
    }

    #[tokio::test]
    async fn stale_fetch_does_not_clobber_newer_snapshot() {
        let api = Arc::new(GatedContentApi::new());
        let catalog = Arc::new(ContentImageCatalog::new(api.clone()));

        let slow = {
            let catalog = Arc::clone(&catalog);
            tokio::spawn(async move { catalog.load(ReviewCategory::Assignments).await })
        };
        tokio::task::yield_now().await;

        // The user switched category while the assignment fetch was in
        // flight; the pages fetch wins.
        catalog.load(ReviewCategory::Pages).await.unwrap();
        api.gate.notify_one();

        let result = slow.await.unwrap();
        assert!(matches!(result, Err(CatalogError::Superseded)));
        assert_eq!(catalog.current().unwrap().category, ReviewCategory::Pages);
    }

    #[tokio::test]
    async fn invalidate_discards_in_flight_fetch() {
        let api = Arc::new(GatedContentApi::new());
        let catalog = Arc::new(ContentImageCatalog::new(api.clone()));

        let slow = {
            let catalog = Arc::clone(&catalog);
            tokio::spawn(async move { catalog.load(ReviewCategory::Assignments).await })
        };
        tokio::task::yield_now().await;

        catalog.invalidate();
        api.gate.notify_one();

        let result = slow.await.unwrap();
        assert!(matches!(result, Err(CatalogError::Superseded)));
        assert!(catalog.current().is_none());
    }

    #[tokio::test]
    async fn snapshot_lookup_by_key() {
        let api = Arc::new(GatedContentApi::new());
        let catalog = ContentImageCatalog::new(api);

        let snapshot = catalog.load(ReviewCategory::Pages).await.unwrap();
        assert!(snapshot.image_by_id("1").is_some());
        assert!(snapshot.image_by_id("99").is_none());
    }
}
