//! Page cursor for paging through PDF documents.

/// Default render scale for a freshly opened PDF.
pub const DEFAULT_SCALE: f64 = 1.5;
/// Zoom increment for one zoom-in or zoom-out step.
pub const ZOOM_STEP: f64 = 0.25;
pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 3.0;

/// Current page and zoom of a PDF being viewed.
///
/// Pages are 1-based. Navigation never leaves `1..=total`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageCursor {
    page: usize,
    total: usize,
    scale: f64,
}

impl PageCursor {
    /// Open a document with `total` pages on its first page, or on page 0
    /// when there are none.
    pub fn new(total: usize) -> Self {
        Self {
            page: total.min(1),
            total,
            scale: DEFAULT_SCALE,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Move to the next page. Returns false when already on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.page >= self.total {
            return false;
        }
        self.page += 1;
        log::debug!("Navigating to next page: {}", self.page);
        true
    }

    /// Move to the previous page. Returns false when already on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.page -= 1;
        log::debug!("Navigating to previous page: {}", self.page);
        true
    }

    /// Jump to a page, clamped into range. Returns whether the page changed.
    pub fn go_to(&mut self, page: usize) -> bool {
        if self.total == 0 {
            return false;
        }
        let target = page.clamp(1, self.total);
        if target == self.page {
            return false;
        }
        log::debug!("Jumping to page {}", target);
        self.page = target;
        true
    }

    /// Change zoom by `delta`, clamped to the supported range.
    pub fn zoom(&mut self, delta: f64) -> f64 {
        self.scale = (self.scale + delta).clamp(MIN_SCALE, MAX_SCALE);
        log::debug!("Changing zoom to: {}", self.scale);
        self.scale
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.zoom(ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.zoom(-ZOOM_STEP)
    }

    /// Page indicator text, e.g. "Page: 2 / 10".
    pub fn indicator(&self) -> String {
        format!("Page: {} / {}", self.page, self.total)
    }
}
