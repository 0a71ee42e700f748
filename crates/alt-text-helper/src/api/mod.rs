//! HTTP surface of the course backend.
//!
//! The workflow talks to the backend exclusively through the seam traits
//! below, so every state machine in this crate is testable against
//! in-memory fakes. `HelperApiClient` is the production implementation.

pub mod client;
mod error;

pub use client::HelperApiClient;
pub use error::{ApiError, Result};

use async_trait::async_trait;

use crate::model::{ContentItem, ContentReviewGroup, ContentType, ScanLookup, ScanRecord};

/// Scan lifecycle endpoints.
#[async_trait]
pub trait ScanApi: Send + Sync {
    /// Fetches the course's last scan, if one has ever run.
    async fn fetch_last_scan(&self, course_id: i64) -> Result<ScanLookup>;

    /// Starts a new background scan and returns it.
    async fn start_scan(&self, course_id: i64) -> Result<ScanRecord>;
}

/// Content image listing endpoint, parameterized by content type.
#[async_trait]
pub trait ContentApi: Send + Sync {
    async fn fetch_images(&self, content_type: ContentType) -> Result<Vec<ContentItem>>;
}

/// Review submission endpoint.
#[async_trait]
pub trait SubmitApi: Send + Sync {
    async fn submit_review(&self, payload: &[ContentReviewGroup]) -> Result<()>;
}
