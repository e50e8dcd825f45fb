//! Scatter-gather over documents: ask every document the same question
//! concurrently, keep whatever answered, and rank the answers.

use crate::api::ApiClient;
use crate::error::{ClientError, Result};
use crate::wire::{AskRequest, AskResponse};
use futures_util::future::join_all;
use slideqa_core::{DocumentAnswer, RankedAnswers, Ranker};
use std::future::Future;

/// Prefix the backend puts on answers when its model call failed.
const BACKEND_ERROR_PREFIX: &str = "Error:";

/// Anything that can answer a question about one document.
pub trait QuestionBackend {
    fn ask_document(&self, request: AskRequest) -> impl Future<Output = Result<AskResponse>>;
}

impl QuestionBackend for ApiClient {
    fn ask_document(&self, request: AskRequest) -> impl Future<Output = Result<AskResponse>> {
        async move { self.ask(&request).await }
    }
}

/// Ranked answers plus the documents that did not contribute one.
#[derive(Debug, Default)]
pub struct GatheredAnswers {
    pub ranked: RankedAnswers,
    pub failed: Vec<(String, ClientError)>,
}

/// Ask every document the same question and rank what comes back.
///
/// All requests run concurrently and are awaited together; a failed or
/// empty answer is logged and left out instead of aborting the others.
pub async fn ask_all<B: QuestionBackend>(
    backend: &B,
    ranker: &Ranker,
    question: &str,
    documents: &[String],
) -> GatheredAnswers {
    log::debug!("Asking {} documents: {}", documents.len(), question);

    let requests = documents.iter().map(|name| async move {
        let result = backend
            .ask_document(AskRequest::new(question, name.as_str()))
            .await;
        (name, result)
    });

    let mut answers = Vec::new();
    let mut failed = Vec::new();

    // join_all yields results in request order, not completion order
    for (name, result) in join_all(requests).await {
        match result.and_then(usable_answer) {
            Ok(text) => answers.push(DocumentAnswer::new(name.clone(), text)),
            Err(e) => {
                log::warn!("Dropping {} from results: {}", name, e);
                failed.push((name.clone(), e));
            }
        }
    }

    GatheredAnswers {
        ranked: ranker.rank(question, answers),
        failed,
    }
}

fn usable_answer(resp: AskResponse) -> Result<String> {
    let trimmed = resp.answer.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Server("empty answer".to_string()));
    }
    if let Some(reason) = trimmed.strip_prefix(BACKEND_ERROR_PREFIX) {
        return Err(ClientError::Server(reason.trim().to_string()));
    }
    Ok(resp.answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Canned answers per document; `None` fails the request.
    struct FakeBackend {
        answers: HashMap<String, (Option<&'static str>, u64)>,
    }

    impl FakeBackend {
        fn new(entries: &[(&str, Option<&'static str>, u64)]) -> Self {
            Self {
                answers: entries
                    .iter()
                    .map(|(name, answer, delay)| (name.to_string(), (*answer, *delay)))
                    .collect(),
            }
        }
    }

    impl QuestionBackend for FakeBackend {
        fn ask_document(&self, request: AskRequest) -> impl Future<Output = Result<AskResponse>> {
            let entry = self.answers.get(&request.filename).copied();
            async move {
                let (answer, delay_ms) = entry.unwrap_or((None, 0));
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                match answer {
                    Some(text) => Ok(AskResponse {
                        answer: text.to_string(),
                        has_visual_elements: false,
                    }),
                    None => Err(ClientError::Server(format!("{} unavailable", request.filename))),
                }
            }
        }
    }

    fn names(docs: &[&str]) -> Vec<String> {
        docs.iter().map(|d| d.to_string()).collect()
    }

    #[tokio::test]
    async fn test_ranks_all_answers() {
        let backend = FakeBackend::new(&[
            ("intro", Some("Nothing about it"), 0),
            ("calculus", Some("A derivative measures change. Slide 2"), 0),
        ]);
        let gathered = ask_all(
            &backend,
            &Ranker::new(),
            "What is a derivative?",
            &names(&["intro", "calculus"]),
        )
        .await;

        assert!(gathered.failed.is_empty());
        let top = gathered.ranked.most_relevant().unwrap();
        assert_eq!(top.document_name, "calculus");
        assert_eq!(top.relevance_score, 8);
    }

    #[tokio::test]
    async fn test_failures_are_dropped() {
        let backend = FakeBackend::new(&[
            ("a", Some("fine"), 0),
            ("b", None, 0),
            ("c", Some("   "), 0),
            ("d", Some("Error: Failed to get response from model"), 0),
        ]);
        let gathered = ask_all(&backend, &Ranker::new(), "q", &names(&["a", "b", "c", "d"])).await;

        assert_eq!(gathered.ranked.len(), 1);
        assert_eq!(gathered.ranked.answers()[0].document_name, "a");
        let failed: Vec<&str> = gathered.failed.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(failed, vec!["b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_all_failing_yields_empty_ranking() {
        let backend = FakeBackend::new(&[]);
        let gathered = ask_all(&backend, &Ranker::new(), "q", &names(&["x", "y"])).await;
        assert!(gathered.ranked.is_empty());
        assert_eq!(gathered.failed.len(), 2);
    }

    #[tokio::test]
    async fn test_completion_order_does_not_affect_ties() {
        // "first" finishes last; equal scores still keep document order
        let backend = FakeBackend::new(&[
            ("first", Some("same answer"), 30),
            ("second", Some("same answer"), 0),
        ]);
        let gathered =
            ask_all(&backend, &Ranker::new(), "unrelated", &names(&["first", "second"])).await;

        let order: Vec<&str> = gathered
            .ranked
            .answers()
            .iter()
            .map(|a| a.document_name.as_str())
            .collect();
        assert_eq!(order, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_requests_run_concurrently() {
        let backend = FakeBackend::new(&[
            ("a", Some("one"), 100),
            ("b", Some("two"), 100),
            ("c", Some("three"), 100),
        ]);
        let started = std::time::Instant::now();
        let gathered = ask_all(&backend, &Ranker::new(), "q", &names(&["a", "b", "c"])).await;

        assert_eq!(gathered.ranked.len(), 3);
        assert!(started.elapsed() < Duration::from_millis(250));
    }
}
