//! Review session orchestration.
//!
//! The session owns the catalog, the review store and the page cursor
//! exclusively; nothing else mutates them. All mutating methods take
//! `&mut self`, so user-driven changes are applied synchronously and in
//! order.

use std::sync::Arc;

use log::{info, warn};

use crate::api::{ContentApi, SubmitApi};
use crate::catalog::{CatalogSnapshot, ContentImageCatalog};
use crate::events::{EventSink, SessionEvent};
use crate::model::{ContentReviewGroup, EnrichedImage, ReviewAction, ReviewCategory};

use super::error::SessionError;
use super::paginator::Paginator;
use super::reducer;
use super::store::{ReviewStateStore, ReviewSummaryCounts};

/// Where the session currently is. Every non-idle phase remembers the
/// category so the summary round trip can return to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Reviewing(ReviewCategory),
    Summarizing(ReviewCategory),
    Submitted(ReviewCategory),
}

/// Drives one category's review from start to submission.
///
/// Transitions: `Idle → Reviewing → Summarizing → Submitted → Idle`, with
/// `Summarizing → Reviewing` as a non-destructive round trip and a failed
/// submit staying in `Summarizing` so it can be retried without re-work.
pub struct ReviewSession {
    submit_api: Arc<dyn SubmitApi>,
    catalog: ContentImageCatalog,
    store: ReviewStateStore,
    paginator: Paginator,
    sink: Arc<dyn EventSink>,
    phase: SessionPhase,
    snapshot: Option<Arc<CatalogSnapshot>>,
}

impl ReviewSession {
    pub fn new(
        content_api: Arc<dyn ContentApi>,
        submit_api: Arc<dyn SubmitApi>,
        page_size: usize,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            submit_api,
            catalog: ContentImageCatalog::new(content_api),
            store: ReviewStateStore::new(),
            paginator: Paginator::new(page_size),
            sink,
            phase: SessionPhase::Idle,
            snapshot: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn store(&self) -> &ReviewStateStore {
        &self.store
    }

    pub fn total_images(&self) -> usize {
        self.snapshot
            .as_ref()
            .map(|snapshot| snapshot.total_images())
            .unwrap_or(0)
    }

    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages(self.total_images())
    }

    pub fn pagination_visible(&self) -> bool {
        self.paginator.controls_visible(self.total_images())
    }

    /// The images on the currently visible page.
    pub fn page_images(&self) -> &[EnrichedImage] {
        match self.snapshot.as_ref() {
            Some(snapshot) => self.paginator.slice(&snapshot.images),
            None => &[],
        }
    }

    pub fn progress_percentage(&self) -> f64 {
        self.store.progress_percentage()
    }

    pub fn summary(&self) -> ReviewSummaryCounts {
        self.store.summary()
    }

    /// Fetches the category's images, seeds the store and opens page 1.
    ///
    /// Selecting a category while already reviewing performs a full
    /// replace and discards the prior category's decisions. A superseded
    /// fetch leaves the session untouched.
    pub async fn start_review(&mut self, category: ReviewCategory) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Idle | SessionPhase::Reviewing(_) => {}
            SessionPhase::Summarizing(_) | SessionPhase::Submitted(_) => {
                return Err(SessionError::NotReviewing)
            }
        }

        let snapshot = self.catalog.load(category).await?;
        self.store.seed(&snapshot.images);
        self.paginator.reset();
        self.phase = SessionPhase::Reviewing(category);
        info!(
            "Review started for category {category} with {} images",
            snapshot.total_images()
        );
        self.sink.emit(SessionEvent::ReviewStarted {
            category,
            total_images: snapshot.total_images(),
        });
        self.snapshot = Some(snapshot);
        Ok(())
    }

    /// Records one image's approve/skip decision.
    pub fn set_action(&mut self, image_id: &str, action: ReviewAction) -> Result<(), SessionError> {
        self.require_reviewing()?;
        if self.store.set_action(image_id, action) {
            Ok(())
        } else {
            Err(SessionError::UnknownImage(image_id.to_string()))
        }
    }

    /// Edits one image's caption; dirtiness is recomputed in the store.
    pub fn set_alt_text(&mut self, image_id: &str, text: &str) -> Result<(), SessionError> {
        self.require_reviewing()?;
        if self.store.set_alt_text(image_id, text) {
            Ok(())
        } else {
            Err(SessionError::UnknownImage(image_id.to_string()))
        }
    }

    /// Applies one decision to every image on the visible page. Returns how
    /// many entries were updated.
    pub fn set_page_action(&mut self, action: ReviewAction) -> Result<usize, SessionError> {
        self.require_reviewing()?;
        let keys: Vec<String> = self.page_images().iter().map(EnrichedImage::key).collect();
        Ok(self.store.set_page_action(&keys, action))
    }

    pub fn goto_page(&mut self, page: usize) -> Result<usize, SessionError> {
        self.require_reviewing()?;
        let page = self.paginator.set_page(page, self.total_images());
        self.sink.emit(SessionEvent::PageChanged { page });
        Ok(page)
    }

    pub fn next_page(&mut self) -> Result<usize, SessionError> {
        self.goto_page(self.paginator.current_page() + 1)
    }

    pub fn prev_page(&mut self) -> Result<usize, SessionError> {
        self.goto_page(self.paginator.current_page().saturating_sub(1))
    }

    /// Moves to the summary. Only reachable from the final page; no fetch
    /// happens on this transition.
    pub fn open_summary(&mut self) -> Result<(), SessionError> {
        let category = self.require_reviewing()?;
        if !self.paginator.is_last_page(self.total_images()) {
            return Err(SessionError::NotOnFinalPage);
        }
        self.phase = SessionPhase::Summarizing(category);
        self.sink.emit(SessionEvent::SummaryOpened);
        Ok(())
    }

    /// Returns from the summary to page-by-page review. Nothing is cleared.
    pub fn close_summary(&mut self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Summarizing(category) => {
                self.phase = SessionPhase::Reviewing(category);
                Ok(())
            }
            _ => Err(SessionError::NotSummarizing),
        }
    }

    /// The payload the next submit would send.
    pub fn build_payload(&self) -> Result<Vec<ContentReviewGroup>, SessionError> {
        let snapshot = self.snapshot.as_ref().ok_or(SessionError::NotReviewing)?;
        let _span = tracing::info_span!("session.reduce").entered();
        Ok(reducer::reduce(&self.store, snapshot.as_ref()))
    }

    /// Submits the reduced payload. A submission without any approve/skip
    /// decision is blocked before any request is made. On failure the
    /// session stays in `Summarizing` with all decisions intact, so the
    /// submit is retryable without re-review.
    pub async fn submit(&mut self) -> Result<(), SessionError> {
        let category = match self.phase {
            SessionPhase::Summarizing(category) => category,
            _ => return Err(SessionError::NotSummarizing),
        };
        if reducer::no_changes_to_submit(&self.store) {
            return Err(SessionError::NoChangesToSubmit);
        }

        let payload = self.build_payload()?;
        match self.submit_api.submit_review(&payload).await {
            Ok(()) => {
                let counts = self.store.summary();
                info!(
                    "Review submitted for category {category}: {} approved, {} skipped",
                    counts.approved, counts.skipped
                );
                self.phase = SessionPhase::Submitted(category);
                self.sink.emit(SessionEvent::ReviewSubmitted {
                    approved: counts.approved,
                    skipped: counts.skipped,
                });
                Ok(())
            }
            Err(e) => {
                warn!("Review submit failed for category {category}: {e}");
                Err(SessionError::Submit(e))
            }
        }
    }

    /// Acknowledges a successful submission and returns to `Idle`, clearing
    /// the store and the cached catalog.
    pub fn finish(&mut self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Submitted(_) => {
                self.reset();
                Ok(())
            }
            _ => Err(SessionError::NotSubmitted),
        }
    }

    /// Abandons the session from any non-idle phase, discarding this
    /// category's in-memory decisions and invalidating in-flight fetches.
    pub fn end_review(&mut self) {
        if self.phase != SessionPhase::Idle {
            self.reset();
        }
    }

    fn require_reviewing(&self) -> Result<ReviewCategory, SessionError> {
        match self.phase {
            SessionPhase::Reviewing(category) => Ok(category),
            _ => Err(SessionError::NotReviewing),
        }
    }

    fn reset(&mut self) {
        self.store.clear();
        self.catalog.invalidate();
        self.snapshot = None;
        self.paginator.reset();
        self.phase = SessionPhase::Idle;
        self.sink.emit(SessionEvent::SessionClosed);
    }
}
