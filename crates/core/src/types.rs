//! Domain types shared between the session, the ranking pass, and the
//! HTTP client.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// An uploaded document as returned by the backend after text extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    /// Filename as uploaded (with extension).
    pub filename: String,

    /// Name the backend stores the document under, if it reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basename: Option<String>,

    /// Source format reported by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileType>,

    /// Slides (or PDF pages) in document order.
    #[serde(default)]
    pub slides: Vec<Slide>,
}

impl Presentation {
    /// Create an empty presentation with the given filename.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            basename: None,
            file_type: None,
            slides: Vec::new(),
        }
    }

    /// Set the reported file type.
    pub fn with_file_type(mut self, file_type: FileType) -> Self {
        self.file_type = Some(file_type);
        self
    }

    /// Add a slide to the presentation.
    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    /// The name used both for display and as the `filename` key on `/ask`.
    ///
    /// Falls back to the uploaded filename up to its first `.`.
    pub fn display_name(&self) -> &str {
        match self.basename.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self
                .filename
                .split('.')
                .next()
                .unwrap_or(self.filename.as_str()),
        }
    }

    /// Effective file type: the reported one, else detected from the extension.
    pub fn kind(&self) -> FileType {
        match self.file_type {
            Some(kind) if kind != FileType::Unknown => kind,
            _ => FileType::from_path(Path::new(&self.filename)).unwrap_or(FileType::Unknown),
        }
    }

    /// Whether the document is a PDF (paged, rendered by page number).
    pub fn is_pdf(&self) -> bool {
        self.kind() == FileType::Pdf
    }

    /// Number of slides or pages.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Label for the n-th unit (1-based): "Page" for PDFs, "Slide" otherwise.
    pub fn unit_label(&self) -> &'static str {
        if self.is_pdf() {
            "Page"
        } else {
            "Slide"
        }
    }
}

/// The format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Portable Document Format.
    Pdf,
    /// Modern PPTX (Office Open XML).
    Pptx,
    /// Legacy PPT.
    Ppt,
    /// Anything the backend reported that we do not recognise.
    #[serde(other)]
    Unknown,
}

impl FileType {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "pptx" => Some(Self::Pptx),
            "ppt" => Some(Self::Ppt),
            _ => None,
        }
    }

    /// Detect format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Short tag used in document listings.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Pptx => "PPTX",
            Self::Ppt => "PPT",
            Self::Unknown => "?",
        }
    }
}

/// A single slide, or a single page of a PDF.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Slide title, if the extractor found one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Full extracted text.
    #[serde(default)]
    pub text: String,

    /// Speaker notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Slide {
    /// Create a slide with the given text and no title or notes.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            title: None,
            text: text.into(),
            notes: None,
        }
    }

    /// Set the slide title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the speaker notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Title with blank values treated as missing.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// Notes with blank values treated as missing.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

/// One backend answer for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAnswer {
    pub document_name: String,
    pub answer_text: String,
}

impl DocumentAnswer {
    pub fn new(document_name: impl Into<String>, answer_text: impl Into<String>) -> Self {
        Self {
            document_name: document_name.into(),
            answer_text: answer_text.into(),
        }
    }
}

/// A document answer annotated with its relevance score for one ranking pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredAnswer {
    pub document_name: String,
    pub answer_text: String,
    pub relevance_score: i64,
}

impl ScoredAnswer {
    pub fn new(answer: DocumentAnswer, relevance_score: i64) -> Self {
        Self {
            document_name: answer.document_name,
            answer_text: answer.answer_text,
            relevance_score,
        }
    }
}

/// Formulas and images the backend extracted from one PDF page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualElements {
    #[serde(default)]
    pub formulas: Vec<Formula>,
    #[serde(default)]
    pub images: Vec<PageImage>,
}

impl VisualElements {
    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty() && self.images.is_empty()
    }
}

/// A formula detected on a page, optionally with a rendered image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// An embedded page image as a data URI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageImage {
    pub data_uri: String,
    #[serde(default)]
    pub alt_text: String,
}

/// Per-document math detection report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathAnalysis {
    pub filename: String,
    pub total_pages: usize,
    #[serde(default)]
    pub analysis: Vec<PageMathAnalysis>,
}

impl MathAnalysis {
    /// Number of pages flagged as likely containing math.
    pub fn pages_with_math(&self) -> usize {
        self.analysis.iter().filter(|p| p.likely_has_math).count()
    }

    /// Share of pages with math, rounded to a whole percent.
    pub fn math_percentage(&self) -> u32 {
        if self.total_pages == 0 {
            return 0;
        }
        (self.pages_with_math() as f64 / self.total_pages as f64 * 100.0).round() as u32
    }
}

/// Math detection signals for a single page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMathAnalysis {
    pub page_number: usize,
    pub likely_has_math: bool,
    pub math_detected: bool,
    pub symbol_count: usize,
    pub greek_letter_count: usize,
    pub equation_count: usize,
    pub block_math_count: usize,
    pub is_title_page: bool,
    #[serde(default)]
    pub first_lines: String,
}
