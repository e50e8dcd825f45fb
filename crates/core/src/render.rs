//! Plain-text views of the session.
//!
//! Renders the document list, a document's table of contents, single
//! slides and PDF pages, answers, and backend analysis reports.

use crate::pager::PageCursor;
use crate::ranking::RankedAnswers;
use crate::session::{Session, View};
use crate::types::{MathAnalysis, Presentation, VisualElements};

/// Number of math symbols above which the symbol indicator counts as positive.
const SYMBOL_THRESHOLD: usize = 3;

/// Renderer for terminal views.
#[derive(Debug, Clone)]
pub struct ViewRenderer {
    /// Whether to print speaker notes under a slide.
    show_notes: bool,
    /// Whether ranked results include their relevance score.
    show_scores: bool,
}

impl Default for ViewRenderer {
    fn default() -> Self {
        Self {
            show_notes: true,
            show_scores: true,
        }
    }
}

impl ViewRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_show_notes(mut self, show: bool) -> Self {
        self.show_notes = show;
        self
    }

    pub fn with_show_scores(mut self, show: bool) -> Self {
        self.show_scores = show;
        self
    }

    /// Render whatever the session currently shows.
    pub fn render_view(&self, session: &Session) -> String {
        let docs = session.presentations();
        match session.view() {
            View::Empty => "No presentation loaded. Upload a .pdf, .ppt or .pptx file.".to_string(),
            View::Overview { document } => self.render_overview(&docs[document]),
            View::Slide { document, index } => self.render_slide(&docs[document], index),
            View::Page { document, cursor } => self.render_page(&docs[document], &cursor),
        }
    }

    /// Header line for the current view, e.g. "lecture - Slide 3: Limits".
    pub fn title_line(&self, session: &Session) -> String {
        let Some(pres) = session.active_document() else {
            return String::new();
        };
        let name = pres.display_name();
        match session.view() {
            View::Slide { index, .. } => format!("{} - {}", name, slide_heading(pres, index)),
            View::Page { cursor, .. } => {
                format!("{} - {}", name, slide_heading(pres, cursor.page().saturating_sub(1)))
            }
            _ => name.to_string(),
        }
    }

    /// Numbered list of loaded documents, marking the active one.
    pub fn render_library(&self, presentations: &[Presentation], active: Option<usize>) -> String {
        if presentations.is_empty() {
            return "No presentations uploaded.".to_string();
        }

        presentations
            .iter()
            .enumerate()
            .map(|(i, pres)| {
                let marker = if Some(i) == active { '*' } else { ' ' };
                format!(
                    "{} {}. {} [{}] ({} {}s)",
                    marker,
                    i + 1,
                    pres.display_name(),
                    pres.kind().tag(),
                    pres.slide_count(),
                    pres.unit_label().to_lowercase()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Document summary with a table of contents.
    ///
    /// # Example output
    /// ```text
    /// Presentation: lecture
    /// Total Slides: 2
    ///
    /// Table of Contents
    ///   1. Introduction
    ///   2. Slide 2
    /// ```
    pub fn render_overview(&self, pres: &Presentation) -> String {
        let mut out = format!(
            "Presentation: {}\nTotal Slides: {}\n\nTable of Contents",
            pres.display_name(),
            pres.slide_count()
        );

        for (i, slide) in pres.slides.iter().enumerate() {
            let label = match slide.title() {
                Some(title) => title.to_string(),
                None => format!("{} {}", pres.unit_label(), i + 1),
            };
            out.push_str(&format!("\n  {}. {}", i + 1, label));
        }

        out
    }

    /// One slide with its text and, optionally, its notes.
    pub fn render_slide(&self, pres: &Presentation, index: usize) -> String {
        let Some(slide) = pres.slides.get(index) else {
            return format!("{} {} does not exist", pres.unit_label(), index + 1);
        };

        let mut out = slide_heading(pres, index);
        out.push_str("\n\n");
        out.push_str(slide.text.trim_end());

        if self.show_notes {
            if let Some(notes) = slide.notes() {
                out.push_str("\n\nNotes:\n");
                out.push_str(notes);
            }
        }

        out
    }

    /// A PDF page: the page indicator and zoom, then the page text.
    pub fn render_page(&self, pres: &Presentation, cursor: &PageCursor) -> String {
        let zoom = (cursor.scale() * 100.0).round() as u32;
        let body = self.render_slide(pres, cursor.page().saturating_sub(1));
        format!("{}  (zoom {}%)\n\n{}", cursor.indicator(), zoom, body)
    }

    /// A single-document answer.
    pub fn render_answer(&self, answer: &str) -> String {
        format!("Answer:\n{}", answer.trim())
    }

    /// Answers from every document, best first, with the top one flagged.
    pub fn render_ranked(&self, question: &str, ranked: &RankedAnswers) -> String {
        if ranked.is_empty() {
            return format!("No document could answer: {}", question);
        }

        let mut out = format!(
            "Results for \"{}\" across {} documents",
            question,
            ranked.len()
        );

        for (i, answer) in ranked.answers().iter().enumerate() {
            let flag = if i == 0 { " [most relevant]" } else { "" };
            out.push_str(&format!("\n\n{}. {}{}", i + 1, answer.document_name, flag));
            if self.show_scores {
                out.push_str(&format!(" (score {})", answer.relevance_score));
            }
            out.push('\n');
            out.push_str(answer.answer_text.trim());
        }

        out
    }

    /// Formulas and images the backend found on a page.
    pub fn render_visual_elements(&self, elements: &VisualElements) -> String {
        if elements.is_empty() {
            return "No formulas or images on this page.".to_string();
        }

        let mut out = String::new();
        if !elements.formulas.is_empty() {
            out.push_str("Formulas:");
            for formula in &elements.formulas {
                out.push_str(&format!("\n  - {}", formula.text));
                if formula.image.is_some() {
                    out.push_str(" [rendered image]");
                }
            }
        }
        if !elements.images.is_empty() {
            if !out.is_empty() {
                out.push_str("\n\n");
            }
            out.push_str(&format!("Images: {}", elements.images.len()));
            for image in &elements.images {
                let alt = if image.alt_text.is_empty() {
                    "(no description)"
                } else {
                    image.alt_text.as_str()
                };
                out.push_str(&format!("\n  - {}", alt));
            }
        }
        out
    }

    /// Math content detection report.
    pub fn render_math_analysis(&self, analysis: &MathAnalysis) -> String {
        let mut out = format!(
            "Math Content Detection Analysis\nFilename: {}\nTotal Pages: {}\nPages with Math Content: {} ({}%)",
            analysis.filename,
            analysis.total_pages,
            analysis.pages_with_math(),
            analysis.math_percentage()
        );

        for page in &analysis.analysis {
            out.push_str(&format!(
                "\n\nPage {}\n  First lines: {}\n  {} Algorithm Detection: {}\n  {} Math Symbols: {}\n  {} Greek Letters: {}\n  {} Equations: {}\n  {} Block Math: {}\n  Title Page: {}\n  Conclusion: {}",
                page.page_number,
                page.first_lines.trim(),
                indicator(page.math_detected),
                yes_no(page.math_detected),
                indicator(page.symbol_count > SYMBOL_THRESHOLD),
                page.symbol_count,
                indicator(page.greek_letter_count > 0),
                page.greek_letter_count,
                indicator(page.equation_count > 0),
                page.equation_count,
                indicator(page.block_math_count > 0),
                page.block_math_count,
                yes_no(page.is_title_page),
                if page.likely_has_math {
                    "Contains mathematical content"
                } else {
                    "No mathematical content detected"
                }
            ));
        }

        out
    }
}

/// "Slide 3: Limits", or just "Slide 3" when untitled.
fn slide_heading(pres: &Presentation, index: usize) -> String {
    let title = pres.slides.get(index).and_then(|s| s.title());
    match title {
        Some(title) => format!("{} {}: {}", pres.unit_label(), index + 1, title),
        None => format!("{} {}", pres.unit_label(), index + 1),
    }
}

fn indicator(positive: bool) -> char {
    if positive {
        '+'
    } else {
        '-'
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "YES"
    } else {
        "NO"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::rank_answers;
    use crate::types::{DocumentAnswer, FileType, Formula, PageImage, PageMathAnalysis, Slide};

    fn lecture() -> Presentation {
        let mut pres = Presentation::new("lecture.pptx").with_file_type(FileType::Pptx);
        pres.add_slide(Slide::new("Welcome\nto the course").with_title("Introduction"));
        pres.add_slide(Slide::new("Body text").with_notes("Remember the demo"));
        pres
    }

    #[test]
    fn test_render_overview() {
        let renderer = ViewRenderer::new();
        let expected = "Presentation: lecture\nTotal Slides: 2\n\nTable of Contents\n  1. Introduction\n  2. Slide 2";
        assert_eq!(renderer.render_overview(&lecture()), expected);
    }

    #[test]
    fn test_render_overview_pdf_counts_slides_lists_pages() {
        let mut pres = Presentation::new("notes.pdf");
        pres.add_slide(Slide::new("x"));
        let out = ViewRenderer::new().render_overview(&pres);
        assert!(out.contains("Total Slides: 1"));
        assert!(!out.contains("Total Pages"));
        assert!(out.ends_with("1. Page 1"));
    }

    #[test]
    fn test_render_slide_with_notes() {
        let renderer = ViewRenderer::new();
        assert_eq!(
            renderer.render_slide(&lecture(), 1),
            "Slide 2\n\nBody text\n\nNotes:\nRemember the demo"
        );
        assert_eq!(
            renderer.with_show_notes(false).render_slide(&lecture(), 1),
            "Slide 2\n\nBody text"
        );
    }

    #[test]
    fn test_render_slide_out_of_range() {
        assert_eq!(
            ViewRenderer::new().render_slide(&lecture(), 9),
            "Slide 10 does not exist"
        );
    }

    #[test]
    fn test_title_line_and_view() {
        let renderer = ViewRenderer::new();
        let mut session = Session::new();
        assert!(renderer.render_view(&session).starts_with("No presentation loaded"));

        session.load(vec![lecture()]).unwrap();
        assert_eq!(renderer.title_line(&session), "lecture");

        session.select_slide(1).unwrap();
        assert_eq!(renderer.title_line(&session), "lecture - Slide 1: Introduction");
        assert!(renderer.render_view(&session).starts_with("Slide 1: Introduction\n\nWelcome"));
    }

    #[test]
    fn test_render_page() {
        let mut pres = Presentation::new("calc.pdf");
        pres.add_slide(Slide::new("Limits"));
        pres.add_slide(Slide::new("Derivatives"));
        let mut cursor = PageCursor::new(2);
        cursor.next_page();

        assert_eq!(
            ViewRenderer::new().render_page(&pres, &cursor),
            "Page: 2 / 2  (zoom 150%)\n\nPage 2\n\nDerivatives"
        );
    }

    #[test]
    fn test_render_library() {
        let mut pdf = Presentation::new("calc.pdf");
        pdf.add_slide(Slide::new("x"));
        let out = ViewRenderer::new().render_library(&[lecture(), pdf], Some(1));
        assert_eq!(out, "  1. lecture [PPTX] (2 slides)\n* 2. calc [PDF] (1 pages)");
    }

    #[test]
    fn test_render_ranked_flags_top() {
        let ranked = rank_answers(
            "gradient",
            vec![
                DocumentAnswer::new("other", "unrelated"),
                DocumentAnswer::new("ml", "gradient"),
            ],
        );
        let out = ViewRenderer::new().render_ranked("gradient", &ranked);
        assert!(out.contains("1. ml [most relevant] (score 5)\ngradient"));
        assert!(out.contains("2. other (score 0)\nunrelated"));

        let quiet = ViewRenderer::new().with_show_scores(false).render_ranked("gradient", &ranked);
        assert!(!quiet.contains("score"));
    }

    #[test]
    fn test_render_ranked_empty() {
        let out = ViewRenderer::new().render_ranked("why", &RankedAnswers::default());
        assert_eq!(out, "No document could answer: why");
    }

    #[test]
    fn test_render_visual_elements() {
        let elements = VisualElements {
            formulas: vec![Formula {
                text: "E = mc^2".to_string(),
                image: Some("data:image/png;base64,AA==".to_string()),
            }],
            images: vec![PageImage {
                data_uri: "data:image/png;base64,AA==".to_string(),
                alt_text: String::new(),
            }],
        };
        assert_eq!(
            ViewRenderer::new().render_visual_elements(&elements),
            "Formulas:\n  - E = mc^2 [rendered image]\n\nImages: 1\n  - (no description)"
        );
        assert_eq!(
            ViewRenderer::new().render_visual_elements(&VisualElements::default()),
            "No formulas or images on this page."
        );
    }

    #[test]
    fn test_render_math_analysis() {
        let analysis = MathAnalysis {
            filename: "calc.pdf".to_string(),
            total_pages: 2,
            analysis: vec![
                PageMathAnalysis {
                    page_number: 1,
                    is_title_page: true,
                    first_lines: "Calculus I".to_string(),
                    ..Default::default()
                },
                PageMathAnalysis {
                    page_number: 2,
                    likely_has_math: true,
                    math_detected: true,
                    symbol_count: 4,
                    greek_letter_count: 1,
                    ..Default::default()
                },
            ],
        };
        let out = ViewRenderer::new().render_math_analysis(&analysis);

        assert!(out.contains("Pages with Math Content: 1 (50%)"));
        assert!(out.contains("Page 1\n  First lines: Calculus I"));
        assert!(out.contains("Title Page: YES\n  Conclusion: No mathematical content detected"));
        assert!(out.contains("+ Math Symbols: 4"));
        assert!(out.contains("Conclusion: Contains mathematical content"));
    }
}
