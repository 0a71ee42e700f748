pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod model;
pub mod review;
pub mod scan;

pub use api::{ApiError, ContentApi, HelperApiClient, ScanApi, SubmitApi};
pub use catalog::{CatalogError, CatalogSnapshot, ContentImageCatalog};
pub use config::{load_config, ConfigError, HelperConfig};
pub use error::{HelperError, Result};
pub use events::{EventSink, NoopSink, SessionEvent};
pub use model::{
    flatten, ContentImage, ContentItem, ContentReviewGroup, ContentType, EnrichedImage,
    ReviewAction, ReviewCategory, ScanLookup, ScanRecord, ScanStatus,
};
pub use review::{
    no_changes_to_submit, Paginator, ReviewSession, ReviewStateStore, SessionError, SessionPhase,
};
pub use scan::{PollArming, ScanStatusPoller};
