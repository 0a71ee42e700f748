//! Review session error types.

use thiserror::Error;

use crate::api::ApiError;
use crate::catalog::CatalogError;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No review is in progress")]
    NotReviewing,

    #[error("The summary can only be opened from the final review page")]
    NotOnFinalPage,

    #[error("No summary is open")]
    NotSummarizing,

    #[error("The review has not been submitted")]
    NotSubmitted,

    /// Zero approve/skip decisions; the submit request is never sent.
    #[error("There are no changes in this review to submit")]
    NoChangesToSubmit,

    #[error("Unknown image id '{0}'")]
    UnknownImage(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Review submit failed: {0}")]
    Submit(#[from] ApiError),
}
