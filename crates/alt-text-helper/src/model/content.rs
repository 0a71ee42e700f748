use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Content type used by the image fetch endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Assignment,
    Page,
    Quiz,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Assignment => "assignment",
            ContentType::Page => "page",
            ContentType::Quiz => "quiz",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reviewable content category as presented to the instructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewCategory {
    Assignments,
    Pages,
    ClassicQuizzes,
}

impl ReviewCategory {
    /// Maps the category onto the content type the image fetch expects.
    /// Total: every category resolves, classic quizzes to `quiz`.
    pub fn content_type(self) -> ContentType {
        match self {
            ReviewCategory::Assignments => ContentType::Assignment,
            ReviewCategory::Pages => ContentType::Page,
            ReviewCategory::ClassicQuizzes => ContentType::Quiz,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReviewCategory::Assignments => "assignments",
            ReviewCategory::Pages => "pages",
            ReviewCategory::ClassicQuizzes => "classic_quizzes",
        }
    }
}

impl fmt::Display for ReviewCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewCategory {
    type Err = Infallible;

    /// Category parsing never fails; anything that is not assignments or
    /// pages is treated as classic quizzes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "assignments" => ReviewCategory::Assignments,
            "pages" => ReviewCategory::Pages,
            _ => ReviewCategory::ClassicQuizzes,
        })
    }
}

/// A single image found inside a content item. `image_id` is unique only
/// within one fetch result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentImage {
    pub image_id: i64,
    pub image_url: String,
    #[serde(default)]
    pub image_alt_text: Option<String>,
}

/// One piece of course content with zero or more images. Replaced wholesale
/// on re-fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub content_id: i64,
    pub content_name: String,
    #[serde(default)]
    pub content_parent_id: Option<i64>,
    pub content_type: ContentType,
    pub images: Vec<ContentImage>,
}

/// A content image merged with its parent item's fields, addressable by a
/// uniform string key.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedImage {
    pub image_id: i64,
    pub image_url: String,
    pub image_alt_text: Option<String>,
    pub content_id: i64,
    pub content_name: String,
    pub content_parent_id: Option<i64>,
    pub content_type: ContentType,
}

impl EnrichedImage {
    /// Key used by the review store and the submission payload.
    pub fn key(&self) -> String {
        self.image_id.to_string()
    }
}

/// Flattens content items into one uniform image collection. Pure and
/// stable: item order and per-item image order are preserved.
pub fn flatten(items: &[ContentItem]) -> Vec<EnrichedImage> {
    items
        .iter()
        .flat_map(|item| {
            item.images.iter().map(|image| EnrichedImage {
                image_id: image.image_id,
                image_url: image.image_url.clone(),
                image_alt_text: image.image_alt_text.clone(),
                content_id: item.content_id,
                content_name: item.content_name.clone(),
                content_parent_id: item.content_parent_id,
                content_type: item.content_type,
            })
        })
        .collect()
}
