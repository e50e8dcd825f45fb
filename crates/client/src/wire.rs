//! Request and response bodies exchanged with the backend.

use serde::{Deserialize, Serialize};
use slideqa_core::Presentation;

/// Any backend response: either `{ "error": ... }` or the expected payload.
///
/// The error shape is tried first so a body carrying `error` is never
/// mistaken for a success.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Failure { error: String },
    Success(T),
}

/// `POST /upload` response.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub presentations: Vec<Presentation>,
}

/// `POST /ask` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    /// Always serialized, as `null` when asking about the whole document.
    pub slide_number: Option<usize>,
    pub filename: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub include_visual_elements: bool,
}

impl AskRequest {
    /// Ask about a whole document.
    pub fn new(question: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            slide_number: None,
            filename: filename.into(),
            include_visual_elements: false,
        }
    }

    /// Narrow the question to one slide or page (1-based).
    pub fn with_slide(mut self, slide_number: Option<usize>) -> Self {
        self.slide_number = slide_number;
        self
    }

    pub fn with_visual_elements(mut self, include: bool) -> Self {
        self.include_visual_elements = include;
        self
    }
}

/// `POST /ask` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    #[serde(default)]
    pub has_visual_elements: bool,
}

/// `POST /generate-image` body.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateImageRequest<'a> {
    pub prompt: &'a str,
}

/// `POST /generate-image` response.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateImageResponse {
    pub image_base64: String,
}
