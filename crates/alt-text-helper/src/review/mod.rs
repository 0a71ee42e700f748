//! The review workflow: per-image decision state, pagination, payload
//! reduction and the session state machine that ties them together.

mod error;
pub mod paginator;
pub mod reducer;
mod session;
mod store;

pub use error::SessionError;
pub use paginator::{total_pages, Paginator, DEFAULT_PAGE_SIZE};
pub use reducer::{no_changes_to_submit, reduce};
pub use session::{ReviewSession, SessionPhase};
pub use store::{ReviewState, ReviewStateStore, ReviewSummaryCounts};
