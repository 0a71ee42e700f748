use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};

use crate::api::{ApiError, ScanApi};
use crate::events::{EventSink, NoopSink, SessionEvent};
use crate::model::{ReviewCategory, ScanLookup, ScanRecord};

/// Delay between status polls while a scan is pending or running.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Whether another status fetch should be scheduled, decided after every
/// successful fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollArming {
    Disarmed,
    Armed(Duration),
}

impl PollArming {
    pub fn is_armed(self) -> bool {
        matches!(self, PollArming::Armed(_))
    }
}

/// Owns the cached last-scan lookup and the polling decision.
///
/// Polling is one-shot: the next poll is armed only after the prior fetch
/// resolves, and a failed fetch never re-arms by itself — the caller
/// retries explicitly. A lookup of `NotFound` (no scan has ever run) also
/// never arms.
pub struct ScanStatusPoller {
    api: Arc<dyn ScanApi>,
    course_id: i64,
    poll_interval: Duration,
    sink: Arc<dyn EventSink>,
    last: Option<ScanLookup>,
    arming: PollArming,
}

impl ScanStatusPoller {
    pub fn new(api: Arc<dyn ScanApi>, course_id: i64) -> Self {
        Self::with_interval(api, course_id, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_interval(api: Arc<dyn ScanApi>, course_id: i64, poll_interval: Duration) -> Self {
        Self {
            api,
            course_id,
            poll_interval,
            sink: Arc::new(NoopSink),
            last: None,
            arming: PollArming::Disarmed,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The most recent successfully fetched lookup, if any.
    pub fn last_scan(&self) -> Option<&ScanLookup> {
        self.last.as_ref()
    }

    pub fn arming(&self) -> PollArming {
        self.arming
    }

    /// True while the cached lookup shows a pending or running scan.
    pub fn is_scan_active(&self) -> bool {
        self.last
            .as_ref()
            .and_then(ScanLookup::found)
            .is_some_and(|record| record.status.is_active())
    }

    /// Image total the cached scan reports for one review category. `None`
    /// until a scan has been fetched.
    pub fn category_image_total(&self, category: ReviewCategory) -> Option<u32> {
        self.last
            .as_ref()
            .and_then(ScanLookup::found)
            .map(|record| record.content_counts.total_for(category))
    }

    /// Fetches the last scan and re-derives the polling decision.
    ///
    /// On failure the cached lookup is kept and polling stays disarmed; the
    /// error is surfaced for display and the caller decides whether to
    /// retry.
    pub async fn refresh(&mut self) -> Result<ScanLookup, ApiError> {
        self.arming = PollArming::Disarmed;
        let lookup = match self.api.fetch_last_scan(self.course_id).await {
            Ok(lookup) => lookup,
            Err(e) => {
                warn!("Last-scan fetch failed for course {}: {e}", self.course_id);
                return Err(e);
            }
        };
        self.arming = self.arming_for(&lookup);
        debug!(
            "Last-scan fetch for course {} settled; polling {:?}",
            self.course_id, self.arming
        );
        self.last = Some(lookup.clone());
        Ok(lookup)
    }

    /// Starts a new scan. The cached lookup is invalidated (the caller
    /// refetches out of band) and polling is armed iff the returned status
    /// is still active. Callers disable re-entry while this is in flight.
    pub async fn start_scan(&mut self) -> Result<ScanRecord, ApiError> {
        let record = self.api.start_scan(self.course_id).await?;
        info!(
            "Scan {} started for course {} with status {}",
            record.id, self.course_id, record.status
        );
        self.last = None;
        self.arming = if record.status.is_active() {
            PollArming::Armed(self.poll_interval)
        } else {
            PollArming::Disarmed
        };
        self.sink.emit(SessionEvent::ScanStarted { scan_id: record.id });
        Ok(record)
    }

    /// Drives the poll loop: fetch, and while the status stays active sleep
    /// one interval and fetch again. Returns the settled lookup, or the
    /// first fetch error (which leaves polling disarmed).
    pub async fn poll_until_settled(&mut self) -> Result<ScanLookup, ApiError> {
        let mut lookup = self.refresh().await?;
        while let PollArming::Armed(interval) = self.arming {
            tokio::time::sleep(interval).await;
            lookup = self.refresh().await?;
        }
        if let Some(record) = lookup.found() {
            self.sink.emit(SessionEvent::PollSettled {
                status: record.status,
            });
        }
        Ok(lookup)
    }

    fn arming_for(&self, lookup: &ScanLookup) -> PollArming {
        match lookup.found() {
            Some(record) if record.status.is_active() => PollArming::Armed(self.poll_interval),
            _ => PollArming::Disarmed,
        }
    }
}
