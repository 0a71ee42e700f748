//! Folds review state into the content-grouped submission payload.

use std::collections::HashMap;

use crate::catalog::CatalogSnapshot;
use crate::model::{ContentReviewGroup, ReviewedImage};

use super::store::ReviewStateStore;

/// Reduces the store into the submission payload: unreviewed entries are
/// excluded, stale keys (no longer in the catalog) are skipped silently,
/// and images are grouped by `content_id` in first-seen order with the
/// group metadata taken from the first image encountered. Pure and
/// deterministic — the store iterates in seeded order.
pub fn reduce(store: &ReviewStateStore, catalog: &CatalogSnapshot) -> Vec<ContentReviewGroup> {
    let mut groups: Vec<ContentReviewGroup> = Vec::new();
    let mut index_by_content: HashMap<i64, usize> = HashMap::new();

    for (key, state) in store.iter() {
        if !state.action.is_decided() {
            continue;
        }
        let Some(image) = catalog.image_by_id(key) else {
            continue;
        };

        let group_idx = *index_by_content
            .entry(image.content_id)
            .or_insert_with(|| {
                groups.push(ContentReviewGroup {
                    content_id: image.content_id,
                    content_name: image.content_name.clone(),
                    content_parent_id: image.content_parent_id,
                    content_type: image.content_type,
                    images: Vec::new(),
                });
                groups.len() - 1
            });

        groups[group_idx].images.push(ReviewedImage {
            image_id: key.to_string(),
            image_url: image.image_url.clone(),
            action: state.action,
            approved_alt_text: state.alt_text.clone(),
        });
    }

    groups
}

/// True when no image carries an approve/skip decision; such a submission
/// is blocked client-side with a warning instead of being sent.
pub fn no_changes_to_submit(store: &ReviewStateStore) -> bool {
    store.summary().decided() == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentImage, ContentItem, ContentType, ReviewAction, ReviewCategory};

    fn item(content_id: i64, image_ids: &[i64]) -> ContentItem {
        ContentItem {
            content_id,
            content_name: format!("Content {content_id}"),
            content_parent_id: Some(content_id * 10),
            content_type: ContentType::Assignment,
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

    fn snapshot(items: Vec<ContentItem>) -> CatalogSnapshot {
        CatalogSnapshot::new(ReviewCategory::Assignments, items)
    }

    fn seeded_store(catalog: &CatalogSnapshot) -> ReviewStateStore {
        let mut store = ReviewStateStore::new();
        store.seed(&catalog.images);
        store
    }

    #[test]
    fn unreviewed_images_are_excluded() {
        let catalog = snapshot(vec![item(1, &[10, 11])]);
        let mut store = seeded_store(&catalog);
        store.set_action("10", ReviewAction::Approve);

        let payload = reduce(&store, &catalog);
        assert_eq!(payload.len(), 1);
        assert_eq!(payload[0].images.len(), 1);
        assert_eq!(payload[0].images[0].image_id, "10");
    }

    #[test]
    fn images_sharing_a_content_id_land_in_one_group() {
        let catalog = snapshot(vec![item(1, &[10, 11]), item(2, &[20])]);
        let mut store = seeded_store(&catalog);
        store.set_action("10", ReviewAction::Approve);
        store.set_action("20", ReviewAction::Skip);
        store.set_action("11", ReviewAction::Approve);

        let payload = reduce(&store, &catalog);
        // Group order is first-seen, and content 1 is never split.
        assert_eq!(
            payload.iter().map(|g| g.content_id).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(payload[0].images.len(), 2);
        assert_eq!(payload[0].content_parent_id, Some(10));
    }

    #[test]
    fn stale_keys_are_skipped_silently() {
        let catalog = snapshot(vec![item(1, &[10])]);
        let stale_catalog = snapshot(vec![item(1, &[10, 11])]);
        let mut store = seeded_store(&stale_catalog);
        store.set_action("10", ReviewAction::Approve);
        store.set_action("11", ReviewAction::Approve);

        // Image 11 no longer exists in the current catalog.
        let payload = reduce(&store, &catalog);
        assert_eq!(payload.len(), 1);
        assert_eq!(payload[0].images.len(), 1);
    }

    #[test]
    fn approved_alt_text_carries_the_edited_caption() {
        let catalog = snapshot(vec![item(1, &[10])]);
        let mut store = seeded_store(&catalog);
        store.set_alt_text("10", "a labelled axis");
        store.set_action("10", ReviewAction::Approve);

        let payload = reduce(&store, &catalog);
        assert_eq!(payload[0].images[0].approved_alt_text, "a labelled axis");
        assert_eq!(payload[0].images[0].action, ReviewAction::Approve);
    }

    #[test]
    fn all_skipped_still_counts_as_changes() {
        let catalog = snapshot(vec![item(1, &[10, 11])]);
        let mut store = seeded_store(&catalog);
        assert!(no_changes_to_submit(&store));

        store.set_action("10", ReviewAction::Skip);
        store.set_action("11", ReviewAction::Skip);
        assert!(!no_changes_to_submit(&store));

        let payload = reduce(&store, &catalog);
        assert_eq!(payload[0].images.len(), 2);
        assert!(payload[0]
            .images
            .iter()
            .all(|i| i.action == ReviewAction::Skip));
    }
}
