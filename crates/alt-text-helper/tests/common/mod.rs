//! Shared fakes and builders for the workflow integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;

use alt_text_helper::api::{ApiError, ContentApi, Result as ApiResult, SubmitApi};
use alt_text_helper::{ContentImage, ContentItem, ContentReviewGroup, ContentType, SessionEvent};

/// Builder for a content item with sequentially keyed images.
pub struct ContentItemBuilder {
    item: ContentItem,
}

impl ContentItemBuilder {
    pub fn new(content_id: i64, content_type: ContentType) -> Self {
        Self {
            item: ContentItem {
                content_id,
                content_name: format!("Content {content_id}"),
                content_parent_id: None,
                content_type,
                images: Vec::new(),
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.item.content_name = name.to_string();
        self
    }

    pub fn parent(mut self, parent_id: i64) -> Self {
        self.item.content_parent_id = Some(parent_id);
        self
    }

    pub fn image(mut self, image_id: i64, alt_text: Option<&str>) -> Self {
        self.item.images.push(ContentImage {
            image_id,
            image_url: format!("https://files.example.edu/{image_id}"),
            image_alt_text: alt_text.map(str::to_string),
        });
        self
    }

    pub fn images(mut self, image_ids: &[i64]) -> Self {
        for id in image_ids {
            self = self.image(*id, None);
        }
        self
    }

    pub fn build(self) -> ContentItem {
        self.item
    }
}

/// Content API serving a fixed item list and recording the content types it
/// was asked for.
pub struct FakeContentApi {
    items: Vec<ContentItem>,
    pub requested: Mutex<Vec<ContentType>>,
}

impl FakeContentApi {
    pub fn new(items: Vec<ContentItem>) -> Self {
        Self {
            items,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested_types(&self) -> Vec<ContentType> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentApi for FakeContentApi {
    async fn fetch_images(&self, content_type: ContentType) -> ApiResult<Vec<ContentItem>> {
        self.requested.lock().unwrap().push(content_type);
        Ok(self.items.clone())
    }
}

/// Submit API that records payloads and can be scripted to fail.
pub struct FakeSubmitApi {
    pub submissions: Mutex<Vec<Vec<ContentReviewGroup>>>,
    failures_remaining: Mutex<usize>,
}

impl FakeSubmitApi {
    pub fn new() -> Self {
        Self {
            submissions: Mutex::new(Vec::new()),
            failures_remaining: Mutex::new(0),
        }
    }

    /// The next `count` submit calls fail with a server error.
    pub fn fail_next(count: usize) -> Self {
        let api = Self::new();
        *api.failures_remaining.lock().unwrap() = count;
        api
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    pub fn last_submission(&self) -> Option<Vec<ContentReviewGroup>> {
        self.submissions.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SubmitApi for FakeSubmitApi {
    async fn submit_review(&self, payload: &[ContentReviewGroup]) -> ApiResult<()> {
        let mut failures = self.failures_remaining.lock().unwrap();
        if *failures > 0 {
            *failures -= 1;
            return Err(ApiError::Status {
                status: 500,
                message: "Message: alt text update failed".to_string(),
            });
        }
        self.submissions.lock().unwrap().push(payload.to_vec());
        Ok(())
    }
}

/// Event sink capturing everything emitted by the session.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<SessionEvent>>,
}

impl alt_text_helper::EventSink for RecordingSink {
    fn emit(&self, event: SessionEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl RecordingSink {
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().unwrap().clone()
    }
}
