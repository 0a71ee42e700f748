//! Scan lifecycle: last-scan lookup, scan start, and status polling.

mod poller;

pub use poller::{PollArming, ScanStatusPoller, DEFAULT_POLL_INTERVAL};
