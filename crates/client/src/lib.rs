//! HTTP client for the slide question-answering backend, plus the
//! scatter-gather dispatcher that asks every document at once.

pub mod api;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod wire;

pub use api::ApiClient;
pub use config::{ClientConfig, DEFAULT_SERVER};
pub use dispatch::{ask_all, GatheredAnswers, QuestionBackend};
pub use error::{ClientError, Result};
pub use wire::{AskRequest, AskResponse};
