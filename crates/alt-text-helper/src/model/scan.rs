use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ReviewCategory;

/// Lifecycle status of the background image scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Pending,
    Running,
    Completed,
    Error,
}

impl ScanStatus {
    /// True while the scan job is still making progress on the server.
    pub fn is_active(self) -> bool {
        matches!(self, ScanStatus::Pending | ScanStatus::Running)
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScanStatus::Pending => "pending",
            ScanStatus::Running => "running",
            ScanStatus::Completed => "completed",
            ScanStatus::Error => "error",
        };
        f.write_str(s)
    }
}

/// Per-content-type image counts reported by a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentCounts {
    pub assignments: u32,
    pub pages: u32,
    pub quizzes: u32,
    pub quiz_questions: u32,
}

impl ContentCounts {
    /// Image total for one review category. Classic quizzes cover both the
    /// quiz descriptions and the individual quiz questions.
    pub fn total_for(&self, category: ReviewCategory) -> u32 {
        match category {
            ReviewCategory::Assignments => self.assignments,
            ReviewCategory::Pages => self.pages,
            ReviewCategory::ClassicQuizzes => self.quizzes + self.quiz_questions,
        }
    }
}

/// One scan job as reported by the server. Immutable client-side; only
/// `status` changes are observed across poll fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: i64,
    pub status: ScanStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub content_counts: ContentCounts,
}

/// Wire shape of the last-scan endpoint. `found == false` means no scan has
/// ever run for the course, in which case `scan_detail` is absent.
#[derive(Debug, Clone, Deserialize)]
pub struct LastScanResponse {
    pub found: bool,
    #[serde(default)]
    pub scan_detail: Option<ScanRecord>,
}

/// Decoded result of a last-scan lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanLookup {
    /// No scan has ever run for this course.
    NotFound,
    Found(ScanRecord),
}

impl ScanLookup {
    pub fn found(&self) -> Option<&ScanRecord> {
        match self {
            ScanLookup::Found(record) => Some(record),
            ScanLookup::NotFound => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_statuses() {
        assert!(ScanStatus::Pending.is_active());
        assert!(ScanStatus::Running.is_active());
        assert!(!ScanStatus::Completed.is_active());
        assert!(!ScanStatus::Error.is_active());
    }

    #[test]
    fn classic_quizzes_total_includes_questions() {
        let counts = ContentCounts {
            assignments: 3,
            pages: 5,
            quizzes: 2,
            quiz_questions: 7,
        };
        assert_eq!(counts.total_for(ReviewCategory::Assignments), 3);
        assert_eq!(counts.total_for(ReviewCategory::Pages), 5);
        assert_eq!(counts.total_for(ReviewCategory::ClassicQuizzes), 9);
    }

    #[test]
    fn deserialize_last_scan_response() {
        let json = r#"{
            "found": true,
            "scan_detail": {
                "id": 42,
                "status": "running",
                "created_at": "2026-01-10T12:00:00Z",
                "updated_at": "2026-01-10T12:05:00Z",
                "content_counts": {
                    "assignments": 1,
                    "pages": 0,
                    "quizzes": 2,
                    "quiz_questions": 4
                }
            }
        }"#;
        let response: LastScanResponse = serde_json::from_str(json).unwrap();
        assert!(response.found);
        let detail = response.scan_detail.unwrap();
        assert_eq!(detail.id, 42);
        assert_eq!(detail.status, ScanStatus::Running);
        assert_eq!(detail.content_counts.quiz_questions, 4);
    }

    #[test]
    fn deserialize_not_found_response() {
        let response: LastScanResponse = serde_json::from_str(r#"{"found": false}"#).unwrap();
        assert!(!response.found);
        assert!(response.scan_detail.is_none());
    }
}
