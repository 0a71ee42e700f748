use serde::{Deserialize, Serialize};

use super::ContentType;

/// Per-image review decision. `Unreviewed` is the seeded default and never
/// reaches the submission payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    Unreviewed,
    Approve,
    Skip,
}

impl ReviewAction {
    /// True once the user made an explicit approve/skip decision.
    pub fn is_decided(self) -> bool {
        !matches!(self, ReviewAction::Unreviewed)
    }
}

/// One reviewed image inside a submission group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewedImage {
    pub image_id: String,
    pub image_url: String,
    pub action: ReviewAction,
    pub approved_alt_text: String,
}

/// Submission payload element: all reviewed images of one content item,
/// with the item's metadata. Built once per submit attempt, not retained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentReviewGroup {
    pub content_id: i64,
    pub content_name: String,
    pub content_parent_id: Option<i64>,
    pub content_type: ContentType,
    pub images: Vec<ReviewedImage>,
}
