//! Core domain types, session state, relevance ranking, and text views
//! for asking questions about uploaded slide decks and PDFs.

pub mod error;
pub mod keywords;
pub mod pager;
pub mod ranking;
pub mod render;
pub mod session;
pub mod types;

pub use error::{Error, Result};
pub use keywords::extract_keywords;
pub use pager::PageCursor;
pub use ranking::{rank_answers, MatchMode, RankedAnswers, Ranker};
pub use render::ViewRenderer;
pub use session::{AskTarget, Session, View};
pub use types::{
    DocumentAnswer, FileType, Formula, MathAnalysis, PageImage, PageMathAnalysis, Presentation,
    ScoredAnswer, Slide, VisualElements,
};
