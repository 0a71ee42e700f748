//! Wire-compatible data model for the alt-text review workflow.
//!
//! Field names follow the backend's snake_case JSON shapes. Everything here
//! is plain data; behavior lives in the `scan`, `catalog` and `review`
//! modules.

mod content;
mod review;
mod scan;

pub use content::{
    flatten, ContentImage, ContentItem, ContentType, EnrichedImage, ReviewCategory,
};
pub use review::{ContentReviewGroup, ReviewAction, ReviewedImage};
pub use scan::{ContentCounts, LastScanResponse, ScanLookup, ScanRecord, ScanStatus};
