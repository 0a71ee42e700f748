//! Production API client over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Response, StatusCode};
use serde_json::json;

use super::error::{ApiError, Result};
use super::{ContentApi, ScanApi, SubmitApi};
use crate::config::HelperConfig;
use crate::model::{
    ContentItem, ContentReviewGroup, ContentType, LastScanResponse, ScanLookup, ScanRecord,
};

/// Default connect timeout for HTTP requests (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default request timeout for HTTP requests (30 seconds).
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the CSRF token on mutating calls.
const CSRF_HEADER: &str = "X-CSRFTOKEN";

/// HTTP client for the alt-text endpoints of the course backend.
///
/// The CSRF token is sourced by the embedding page (cookie jar) and handed
/// in at construction; reads work without it, mutations fail fast when it
/// is absent.
pub struct HelperApiClient {
    client: Client,
    base_url: String,
    csrf_token: Option<String>,
}

impl HelperApiClient {
    /// Creates a client with default timeouts.
    pub fn new(base_url: &str, csrf_token: Option<String>) -> Result<Self> {
        Self::with_timeouts(
            base_url,
            csrf_token,
            DEFAULT_CONNECT_TIMEOUT,
            DEFAULT_REQUEST_TIMEOUT,
        )
    }

    /// Creates a client from the loaded configuration.
    pub fn from_config(config: &HelperConfig, csrf_token: Option<String>) -> Result<Self> {
        Self::with_timeouts(
            &config.base_url,
            csrf_token,
            config.connect_timeout(),
            config.request_timeout(),
        )
    }

    pub fn with_timeouts(
        base_url: &str,
        csrf_token: Option<String>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self> {
        let trimmed = base_url.trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: trimmed.to_string(),
            csrf_token,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn csrf_token(&self) -> Result<&str> {
        self.csrf_token.as_deref().ok_or(ApiError::MissingCsrfToken)
    }

    /// Converts a non-2xx response into an `ApiError::Status`.
    async fn response_error(response: Response) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        status_error(status, &body)
    }
}

/// Extracts a display message from an error body: the JSON `message` field
/// when present, else the body serialized, else the HTTP status text.
fn status_error(status: StatusCode, body: &str) -> ApiError {
    let message = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match value.get("message").and_then(|m| m.as_str()) {
            Some(message) => format!("Message: {message}"),
            None => format!("Error Body: {value}"),
        },
        Err(_) if !body.trim().is_empty() => format!("Error Body: {body}"),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };
    ApiError::Status {
        status: status.as_u16(),
        message,
    }
}

/// Decodes the last-scan wire shape, rejecting a found response that lacks
/// the detail payload.
fn decode_lookup(response: LastScanResponse) -> Result<ScanLookup> {
    match (response.found, response.scan_detail) {
        (false, _) => Ok(ScanLookup::NotFound),
        (true, Some(detail)) => Ok(ScanLookup::Found(detail)),
        (true, None) => Err(ApiError::MalformedResponse(
            "last-scan response marked found but carries no scan_detail".to_string(),
        )),
    }
}

#[async_trait]
impl ScanApi for HelperApiClient {
    async fn fetch_last_scan(&self, course_id: i64) -> Result<ScanLookup> {
        let url = self.endpoint("scan/");
        debug!("Fetching last scan for course {course_id}");
        let response = self
            .client
            .get(&url)
            .query(&[("course_id", course_id)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }
        let body: LastScanResponse = response.json().await?;
        decode_lookup(body)
    }

    async fn start_scan(&self, course_id: i64) -> Result<ScanRecord> {
        let token = self.csrf_token()?;
        let url = self.endpoint("scan/");
        info!("Starting scan for course {course_id}");
        let response = self
            .client
            .post(&url)
            .header(CSRF_HEADER, token)
            .json(&json!({ "course_id": course_id }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }
        let record: ScanRecord = response.json().await?;
        Ok(record)
    }
}

#[async_trait]
impl ContentApi for HelperApiClient {
    async fn fetch_images(&self, content_type: ContentType) -> Result<Vec<ContentItem>> {
        let url = self.endpoint("images/");
        debug!("Fetching content images for type {content_type}");
        let response = self
            .client
            .get(&url)
            .query(&[("content_type", content_type.as_str())])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }
        let items: Vec<ContentItem> = response.json().await?;
        Ok(items)
    }
}

#[async_trait]
impl SubmitApi for HelperApiClient {
    async fn submit_review(&self, payload: &[ContentReviewGroup]) -> Result<()> {
        let token = self.csrf_token()?;
        let url = self.endpoint("review/");
        info!("Submitting review for {} content groups", payload.len());
        let response = self
            .client
            .post(&url)
            .header(CSRF_HEADER, token)
            .json(payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }
        Ok(())
    }
}
