//! Relevance ranking for answers gathered from several documents.
//!
//! Each answer gets an additive heuristic score built from keyword hits,
//! answer length, slide citations, and confidence or uncertainty phrasing.
//! Answers are then stably sorted by descending score.

use crate::keywords::extract_keywords;
use crate::types::{DocumentAnswer, ScoredAnswer};
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// Matches a slide citation such as "Slide 12".
static CITATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Slide \d+").expect("citation pattern is valid"));

const KEYWORD_HIT_POINTS: i64 = 5;
const KEYWORD_IN_NAME_POINTS: i64 = 10;
const MEDIUM_ANSWER_POINTS: i64 = 5;
const LONG_ANSWER_POINTS: i64 = 10;
const CITATION_POINTS: i64 = 3;
const CONFIDENCE_POINTS: i64 = 15;
const UNCERTAINTY_PENALTY: i64 = 20;

/// Answers must be longer than this many words to earn a length bonus.
const SHORT_ANSWER_WORDS: usize = 10;
/// Answers with at least this many words earn the long-answer bonus.
const LONG_ANSWER_WORDS: usize = 300;

const CONFIDENCE_PHRASES: &[&str] = &["i found", "the answer is", "according to the slides"];

const UNCERTAINTY_PHRASES: &[&str] = &[
    "not found",
    "couldn't find",
    "no information",
    "is not explicitly",
    "implicitly",
    "no mention",
];

/// How keywords are matched against answer text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Count every case-insensitive occurrence, including inside longer words.
    #[default]
    Substring,
    /// Count only occurrences bounded by word boundaries.
    WholeWord,
}

/// Scores and orders per-document answers for one question.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    match_mode: MatchMode,
}

impl Ranker {
    /// Create a ranker using substring keyword matching.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how keywords are matched.
    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    /// Score one answer against the question's keywords.
    pub fn score(&self, keywords: &[String], answer: &DocumentAnswer) -> i64 {
        let lowered = answer.answer_text.to_lowercase();
        let name = answer.document_name.to_lowercase();

        let mut score = 0;

        for keyword in keywords {
            let hits = self.count_keyword(keyword, &answer.answer_text, &lowered);
            score += KEYWORD_HIT_POINTS * hits as i64;

            if name.contains(keyword.as_str()) {
                score += KEYWORD_IN_NAME_POINTS;
            }
        }

        score += length_bonus(answer.answer_text.split_whitespace().count());
        score += CITATION_POINTS * CITATION_REGEX.find_iter(&answer.answer_text).count() as i64;

        if CONFIDENCE_PHRASES.iter().any(|p| lowered.contains(p)) {
            score += CONFIDENCE_POINTS;
        }
        if UNCERTAINTY_PHRASES.iter().any(|p| lowered.contains(p)) {
            score -= UNCERTAINTY_PENALTY;
        }

        score
    }

    /// Score every answer and sort them, most relevant first.
    pub fn rank(&self, question: &str, answers: Vec<DocumentAnswer>) -> RankedAnswers {
        let keywords = extract_keywords(question);
        log::debug!("Ranking {} answers with keywords {:?}", answers.len(), keywords);

        let mut scored: Vec<ScoredAnswer> = answers
            .into_iter()
            .map(|answer| {
                let score = self.score(&keywords, &answer);
                ScoredAnswer::new(answer, score)
            })
            .collect();

        // sort_by is stable: equal scores keep arrival order
        scored.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));

        RankedAnswers { answers: scored }
    }

    fn count_keyword(&self, keyword: &str, original: &str, lowered: &str) -> usize {
        match self.match_mode {
            MatchMode::Substring => lowered.matches(keyword).count(),
            MatchMode::WholeWord => {
                let pattern = format!(r"\b{}\b", regex::escape(keyword));
                match RegexBuilder::new(&pattern).case_insensitive(true).build() {
                    Ok(re) => re.find_iter(original).count(),
                    Err(e) => {
                        log::warn!("Skipping keyword {:?}: {}", keyword, e);
                        0
                    }
                }
            }
        }
    }
}

fn length_bonus(word_count: usize) -> i64 {
    if word_count >= LONG_ANSWER_WORDS {
        LONG_ANSWER_POINTS
    } else if word_count > SHORT_ANSWER_WORDS {
        MEDIUM_ANSWER_POINTS
    } else {
        0
    }
}

/// Rank answers with the default substring matching.
pub fn rank_answers(question: &str, answers: Vec<DocumentAnswer>) -> RankedAnswers {
    Ranker::new().rank(question, answers)
}

/// Answers in descending relevance order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedAnswers {
    answers: Vec<ScoredAnswer>,
}

impl RankedAnswers {
    /// The answer to highlight, if any document answered.
    pub fn most_relevant(&self) -> Option<&ScoredAnswer> {
        self.answers.first()
    }

    pub fn answers(&self) -> &[ScoredAnswer] {
        &self.answers
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_one(question: &str, name: &str, text: &str) -> i64 {
        let ranked = rank_answers(question, vec![DocumentAnswer::new(name, text)]);
        ranked.answers()[0].relevance_score
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_capital_of_france_example() {
        let score = score_one(
            "What is the capital of France?",
            "geo",
            "The capital is Paris. Slide 3 mentions Paris.",
        );
        assert_eq!(score, 8);
    }

    #[test]
    fn test_uncertainty_penalty() {
        let score = score_one("Who wrote it?", "doc", "No information available.");
        assert_eq!(score, -20);
    }

    #[test]
    fn test_confidence_bonus_applied_once() {
        let score = score_one(
            "Tell me",
            "doc",
            "According to the slides, the answer is 42.",
        );
        // "tell" does not occur; 8 words earns no length bonus
        assert_eq!(score, 15);
    }

    #[test]
    fn test_confidence_and_uncertainty_both_apply() {
        let score = score_one("", "doc", "I found that it is not explicitly stated");
        assert_eq!(score, 15 - 20);
    }

    #[test]
    fn test_keyword_in_document_name() {
        let score = score_one("Explain entropy", "Entropy_Lecture", "Nothing relevant");
        assert_eq!(score, 10);
    }

    #[test]
    fn test_keyword_occurrences_are_counted() {
        let score = score_one("entropy", "doc", "Entropy rises. ENTROPY never falls.");
        assert_eq!(score, 10);
    }

    #[test]
    fn test_substring_matching_counts_inner_words() {
        // "cat" inside "concatenate" still counts
        let score = score_one("cat", "doc", "concatenate the cat");
        assert_eq!(score, 10);
    }

    #[test]
    fn test_whole_word_mode() {
        let ranker = Ranker::new().with_match_mode(MatchMode::WholeWord);
        let keywords = extract_keywords("cat");
        let score = ranker.score(&keywords, &DocumentAnswer::new("doc", "concatenate the Cat"));
        assert_eq!(score, 5);
    }

    #[test]
    fn test_length_boundaries() {
        assert_eq!(score_one("", "doc", &words(10)), 0);
        assert_eq!(score_one("", "doc", &words(11)), 5);
        assert_eq!(score_one("", "doc", &words(299)), 5);
        assert_eq!(score_one("", "doc", &words(300)), 10);
    }

    #[test]
    fn test_citations_are_case_sensitive() {
        assert_eq!(score_one("", "doc", "See Slide 2 and Slide 10"), 6);
        assert_eq!(score_one("", "doc", "see slide 2"), 0);
        assert_eq!(score_one("", "doc", "Slide two"), 0);
    }

    #[test]
    fn test_stop_word_question_scores_only_shape() {
        let score = score_one("What is the?", "the", "I found it on Slide 1");
        assert_eq!(score, 15 + 3);
    }

    #[test]
    fn test_sorted_descending_and_permutation() {
        let answers = vec![
            DocumentAnswer::new("a", "No mention of it"),
            DocumentAnswer::new("b", "Gradient descent on Slide 4"),
            DocumentAnswer::new("c", "gradient"),
        ];
        let ranked = rank_answers("gradient descent", answers.clone());

        let names: Vec<&str> = ranked.answers().iter().map(|a| a.document_name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
        assert_eq!(ranked.len(), answers.len());
        for answer in &answers {
            assert!(ranked
                .answers()
                .iter()
                .any(|s| s.document_name == answer.document_name && s.answer_text == answer.answer_text));
        }

        let top = ranked.most_relevant().unwrap();
        assert!(ranked.answers().iter().all(|a| top.relevance_score >= a.relevance_score));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let answers = vec![
            DocumentAnswer::new("first", "same"),
            DocumentAnswer::new("second", "same"),
            DocumentAnswer::new("third", "same"),
        ];
        let ranked = rank_answers("unrelated", answers);
        let names: Vec<&str> = ranked.answers().iter().map(|a| a.document_name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_empty_input() {
        let ranked = rank_answers("anything", Vec::new());
        assert!(ranked.is_empty());
        assert!(ranked.most_relevant().is_none());
    }
}
