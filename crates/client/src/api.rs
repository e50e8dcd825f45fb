//! Typed wrappers over every backend endpoint.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::wire::{
    AskRequest, AskResponse, Envelope, GenerateImageRequest, GenerateImageResponse, UploadResponse,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use slideqa_core::{FileType, MathAnalysis, Presentation, VisualElements};
use std::path::Path;

/// Multipart field name the upload endpoint reads files from.
const UPLOAD_FIELD: &str = "files[]";

/// Client for the question-answering backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client with a default reqwest client.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Upload documents for text extraction.
    ///
    /// Files that are not PDF, PPT or PPTX are rejected before anything is sent.
    pub async fn upload<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<Presentation>> {
        let mut form = Form::new();

        for path in paths {
            let path = path.as_ref();
            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown")
                .to_string();

            if FileType::from_path(path).is_none() {
                return Err(slideqa_core::Error::UnsupportedFormat(filename).into());
            }

            let bytes = tokio::fs::read(path).await?;
            log::debug!("Attaching {} ({} bytes)", filename, bytes.len());
            form = form.part(UPLOAD_FIELD, Part::bytes(bytes).file_name(filename));
        }

        let resp = self
            .http
            .post(self.config.endpoint("/upload"))
            .multipart(form)
            .send()
            .await?;

        let uploaded: UploadResponse = decode(resp).await?;
        log::debug!("Backend extracted {} presentations", uploaded.presentations.len());
        Ok(uploaded.presentations)
    }

    /// Ask a question about one document.
    pub async fn ask(&self, request: &AskRequest) -> Result<AskResponse> {
        log::debug!(
            "Asking {} (slide {:?}): {}",
            request.filename,
            request.slide_number,
            request.question
        );
        let resp = self
            .http
            .post(self.config.endpoint("/ask"))
            .json(request)
            .send()
            .await?;
        decode(resp).await
    }

    /// Ask a question and, when the backend reports formulas or images on the
    /// asked page, fetch them from the uploaded file `filename`.
    ///
    /// A failed follow-up fetch is logged and leaves the answer intact.
    pub async fn ask_with_visuals(
        &self,
        request: &AskRequest,
        filename: &str,
    ) -> Result<(AskResponse, Option<VisualElements>)> {
        let resp = self.ask(request).await?;

        let elements = match (resp.has_visual_elements, request.slide_number) {
            (true, Some(page)) => match self.visual_elements(filename, page).await {
                Ok(elements) => Some(elements),
                Err(e) => {
                    log::warn!("Could not load visual elements for {} page {}: {}", filename, page, e);
                    None
                }
            },
            _ => None,
        };

        Ok((resp, elements))
    }

    /// Formulas and images on one PDF page (1-based).
    pub async fn visual_elements(&self, filename: &str, page: usize) -> Result<VisualElements> {
        let url = self.config.endpoint(&format!(
            "/pdf-visual-elements/{}/{}",
            urlencoding::encode(filename),
            page
        ));
        let resp = self.http.get(url).send().await?;
        decode(resp).await
    }

    /// Raw bytes of an uploaded document.
    pub async fn original_file(&self, filename: &str) -> Result<Vec<u8>> {
        let url = self
            .config
            .endpoint(&format!("/original-file/{}", urlencoding::encode(filename)));
        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await?;
            return Err(error_from_body(status.as_u16(), body));
        }

        Ok(resp.bytes().await?.to_vec())
    }

    /// Generate an image from a prompt and return the decoded bytes.
    pub async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>> {
        let resp = self
            .http
            .post(self.config.endpoint("/generate-image"))
            .json(&GenerateImageRequest { prompt })
            .send()
            .await?;

        let generated: GenerateImageResponse = decode(resp).await?;
        Ok(STANDARD.decode(generated.image_base64.trim())?)
    }

    /// Per-page math detection report for a document.
    pub async fn analyze_math(&self, filename: &str) -> Result<MathAnalysis> {
        let url = self
            .config
            .endpoint(&format!("/analyze-math/{}", urlencoding::encode(filename)));
        let resp = self.http.get(url).send().await?;
        decode(resp).await
    }
}

/// Read a JSON body, turning `{ "error": ... }` and bad statuses into errors.
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    let body = resp.text().await?;

    match serde_json::from_str::<Envelope<T>>(&body) {
        Ok(Envelope::Failure { error }) => Err(ClientError::Server(error)),
        Ok(Envelope::Success(value)) if status.is_success() => Ok(value),
        Ok(Envelope::Success(_)) => Err(ClientError::Status {
            status: status.as_u16(),
            body,
        }),
        Err(e) if status.is_success() => Err(ClientError::InvalidJson(e)),
        Err(_) => Err(ClientError::Status {
            status: status.as_u16(),
            body,
        }),
    }
}

fn error_from_body(status: u16, body: String) -> ClientError {
    match serde_json::from_str::<Envelope<serde_json::Value>>(&body) {
        Ok(Envelope::Failure { error }) => ClientError::Server(error),
        _ => ClientError::Status { status, body },
    }
}
