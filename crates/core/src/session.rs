//! Explicit application state: loaded documents and what is on screen.
//!
//! Transitions follow the viewer flow: upload (load) → select a document
//! (overview) → select a slide or page, with back/next/prev in between.
//! Documents and slides are addressed by stable indices.

use crate::error::{Error, Result};
use crate::pager::PageCursor;
use crate::types::Presentation;

/// What the viewer is currently showing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    /// Nothing uploaded or selected yet.
    Empty,
    /// Table of contents of one document.
    Overview { document: usize },
    /// One slide of a deck (0-based index).
    Slide { document: usize, index: usize },
    /// One page of a PDF, with zoom.
    Page { document: usize, cursor: PageCursor },
}

/// Parameters for a single-document `/ask` derived from the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskTarget {
    /// Key the backend answers questions under (the display name).
    pub filename: String,
    /// Uploaded filename with extension, for file-based endpoints.
    pub source_file: String,
    /// 1-based slide/page number on screen, or None on the overview.
    pub slide_number: Option<usize>,
    /// Set when a PDF page is shown so the backend can report formulas and images.
    pub include_visual_elements: bool,
}

/// Loaded documents plus the current view.
#[derive(Debug, Clone)]
pub struct Session {
    presentations: Vec<Presentation>,
    view: View,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            presentations: Vec::new(),
            view: View::Empty,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presentations(&self) -> &[Presentation] {
        &self.presentations
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Index of the document on screen.
    pub fn active_index(&self) -> Option<usize> {
        match self.view {
            View::Empty => None,
            View::Overview { document }
            | View::Slide { document, .. }
            | View::Page { document, .. } => Some(document),
        }
    }

    /// The document on screen.
    pub fn active_document(&self) -> Option<&Presentation> {
        self.active_index().and_then(|i| self.presentations.get(i))
    }

    /// Names sent as `filename` when asking every loaded document.
    pub fn document_names(&self) -> Vec<String> {
        self.presentations
            .iter()
            .map(|p| p.display_name().to_string())
            .collect()
    }

    /// Add freshly uploaded presentations and show the first of them.
    ///
    /// A re-uploaded file replaces the earlier entry in place.
    pub fn load(&mut self, uploaded: Vec<Presentation>) -> Result<&Presentation> {
        let mut first = None;

        for presentation in uploaded {
            let index = match self
                .presentations
                .iter()
                .position(|p| p.filename == presentation.filename)
            {
                Some(existing) => {
                    log::debug!("Replacing {} with re-uploaded copy", presentation.filename);
                    self.presentations[existing] = presentation;
                    existing
                }
                None => {
                    self.presentations.push(presentation);
                    self.presentations.len() - 1
                }
            };
            first.get_or_insert(index);
        }

        let index = first.ok_or(Error::NoPresentations)?;
        self.select_document(index)
    }

    /// Show the table of contents of a document.
    pub fn select_document(&mut self, index: usize) -> Result<&Presentation> {
        if self.presentations.is_empty() {
            return Err(Error::NoPresentations);
        }
        let count = self.presentations.len();
        if index >= count {
            return Err(Error::DocumentOutOfRange { index, count });
        }
        self.view = View::Overview { document: index };
        Ok(&self.presentations[index])
    }

    /// Show a slide or page of the active document (1-based).
    pub fn select_slide(&mut self, number: usize) -> Result<()> {
        let document = self.active_index().ok_or(Error::NoDocumentSelected)?;
        let presentation = &self.presentations[document];
        let count = presentation.slide_count();
        if number == 0 || number > count {
            return Err(Error::SlideOutOfRange { number, count });
        }

        self.view = if presentation.is_pdf() {
            let mut cursor = match self.view {
                View::Page { cursor, .. } => cursor,
                _ => PageCursor::new(count),
            };
            cursor.go_to(number);
            View::Page { document, cursor }
        } else {
            View::Slide {
                document,
                index: number - 1,
            }
        };
        Ok(())
    }

    /// Return from a slide or page to the document overview.
    pub fn back(&mut self) -> Result<()> {
        let document = self.active_index().ok_or(Error::NoDocumentSelected)?;
        self.view = View::Overview { document };
        Ok(())
    }

    /// Advance one slide or page. Returns false at the last one.
    pub fn next(&mut self) -> Result<bool> {
        self.step(true)
    }

    /// Go back one slide or page. Returns false at the first one.
    pub fn prev(&mut self) -> Result<bool> {
        self.step(false)
    }

    fn step(&mut self, forward: bool) -> Result<bool> {
        match &mut self.view {
            View::Empty => Err(Error::NoDocumentSelected),
            View::Overview { .. } => Err(Error::NoSlideShown),
            View::Page { cursor, .. } => Ok(if forward {
                cursor.next_page()
            } else {
                cursor.prev_page()
            }),
            View::Slide { document, index } => {
                let count = self.presentations[*document].slide_count();
                if forward && *index + 1 < count {
                    *index += 1;
                    Ok(true)
                } else if !forward && *index > 0 {
                    *index -= 1;
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
        }
    }

    /// Zoom the PDF page on screen.
    pub fn zoom(&mut self, delta: f64) -> Result<f64> {
        match &mut self.view {
            View::Page { cursor, .. } => Ok(cursor.zoom(delta)),
            View::Slide { document, .. } | View::Overview { document } => Err(Error::NotAPdf(
                self.presentations[*document].display_name().to_string(),
            )),
            View::Empty => Err(Error::NoDocumentSelected),
        }
    }

    /// 1-based slide or page number on screen.
    pub fn current_slide_number(&self) -> Option<usize> {
        match self.view {
            View::Slide { index, .. } => Some(index + 1),
            View::Page { cursor, .. } => Some(cursor.page()),
            View::Empty | View::Overview { .. } => None,
        }
    }

    /// Build the single-document question target for the current view.
    pub fn ask_target(&self) -> Result<AskTarget> {
        let presentation = self.active_document().ok_or(Error::NoDocumentSelected)?;
        Ok(AskTarget {
            filename: presentation.display_name().to_string(),
            source_file: presentation.filename.clone(),
            slide_number: self.current_slide_number(),
            include_visual_elements: matches!(self.view, View::Page { .. }),
        })
    }
}
