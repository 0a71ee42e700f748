//! Injected event capability.
//!
//! Analytics and consent live outside this crate; the workflow only emits
//! coarse session events through a sink handed in by the embedding shell.

use crate::model::{ReviewCategory, ScanStatus};

/// Session-level events the workflow reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    ScanStarted { scan_id: i64 },
    PollSettled { status: ScanStatus },
    ReviewStarted {
        category: ReviewCategory,
        total_images: usize,
    },
    PageChanged { page: usize },
    SummaryOpened,
    ReviewSubmitted { approved: usize, skipped: usize },
    SessionClosed,
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: SessionEvent);
}

/// Sink that drops every event; the default when no analytics shell is
/// attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: SessionEvent) {}
}
