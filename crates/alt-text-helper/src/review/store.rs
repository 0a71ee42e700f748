//! In-memory review decision state, keyed by image id.

use std::collections::HashMap;

use crate::model::{EnrichedImage, ReviewAction};

/// Review decision and caption edit for one image. Independent of fetch
/// state: once seeded, an entry changes only through explicit user action.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewState {
    pub action: ReviewAction,
    pub alt_text: String,
    /// True iff `alt_text` differs from the image's original alt text.
    pub is_dirty: bool,
    original_alt_text: String,
}

/// Aggregate counts over the store, as shown on the summary screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewSummaryCounts {
    pub approved: usize,
    pub skipped: usize,
    pub modified: usize,
    pub unreviewed: usize,
}

impl ReviewSummaryCounts {
    pub fn decided(&self) -> usize {
        self.approved + self.skipped
    }
}

/// Insertion-ordered map from image key to review state.
///
/// Invariant: after `seed`, exactly one entry exists per image of the
/// current catalog snapshot, in catalog order; a category switch replaces
/// everything and leaves no orphans.
#[derive(Debug, Default)]
pub struct ReviewStateStore {
    entries: HashMap<String, ReviewState>,
    order: Vec<String>,
}

impl ReviewStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initializes one unreviewed entry per image, replacing any prior
    /// store contents. The caption starts as the image's original alt text
    /// (empty when absent).
    pub fn seed(&mut self, images: &[EnrichedImage]) {
        self.entries.clear();
        self.order.clear();
        for image in images {
            let key = image.key();
            let original = image.image_alt_text.clone().unwrap_or_default();
            let state = ReviewState {
                action: ReviewAction::Unreviewed,
                alt_text: original.clone(),
                is_dirty: false,
                original_alt_text: original,
            };
            if self.entries.insert(key.clone(), state).is_none() {
                self.order.push(key);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ReviewState> {
        self.entries.get(key)
    }

    /// Iterates entries in seeded (catalog) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReviewState)> {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key).map(|state| (key.as_str(), state)))
    }

    /// Sets one image's decision. Caption and dirtiness are untouched.
    /// Returns false when the key is unknown.
    pub fn set_action(&mut self, key: &str, action: ReviewAction) -> bool {
        match self.entries.get_mut(key) {
            Some(state) => {
                state.action = action;
                true
            }
            None => false,
        }
    }

    /// Sets one image's caption and recomputes dirtiness against the
    /// original alt text. The decision is untouched. Returns false when the
    /// key is unknown.
    pub fn set_alt_text(&mut self, key: &str, text: &str) -> bool {
        match self.entries.get_mut(key) {
            Some(state) => {
                state.alt_text = text.to_string();
                state.is_dirty = state.alt_text != state.original_alt_text;
                true
            }
            None => false,
        }
    }

    /// Applies one decision to every given key (the visible page), touching
    /// nothing outside the set. Returns how many entries were updated.
    pub fn set_page_action(&mut self, keys: &[String], action: ReviewAction) -> usize {
        keys.iter()
            .filter(|key| self.set_action(key, action))
            .count()
    }

    /// Count of entries with an explicit approve/skip decision.
    pub fn reviewed_count(&self) -> usize {
        self.entries
            .values()
            .filter(|state| state.action.is_decided())
            .count()
    }

    /// Review progress in percent; 0 for an empty store.
    pub fn progress_percentage(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.reviewed_count() as f64 / self.len() as f64 * 100.0
    }

    pub fn summary(&self) -> ReviewSummaryCounts {
        let mut counts = ReviewSummaryCounts::default();
        for state in self.entries.values() {
            match state.action {
                ReviewAction::Approve => counts.approved += 1,
                ReviewAction::Skip => counts.skipped += 1,
                ReviewAction::Unreviewed => counts.unreviewed += 1,
            }
            if state.is_dirty {
                counts.modified += 1;
            }
        }
        counts
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
