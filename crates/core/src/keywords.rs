//! Keyword extraction for question relevance scoring.
//!
//! Lowercases the question, strips punctuation, and drops short tokens and
//! common English stop words.

/// Characters removed from a question before tokenizing.
const PUNCTUATION_CHARS: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', // Basic punctuation
    '{', '}', '(', ')', // Brackets
    '=', '-', '_', '`', '~', // Other punctuation
    '?', // Questions almost always end with one
];

/// Words that carry no topical signal.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", // Articles and conjunctions
    "is", "are", "was", "were", // Copulas
    "in", "on", "at", "to", "for", "with", "by", "about", "from", "of", // Prepositions
    "what", "when", "where", "which", "who", "why", "how", // Wh-words
];

/// Tokens this short or shorter are never keywords.
const MIN_KEYWORD_LEN: usize = 3;

/// Check whether a lowercased token is a stop word.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Strip punctuation from a lowercased question.
fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| !PUNCTUATION_CHARS.contains(c))
        .collect()
}

/// Extract scoring keywords from a question.
///
/// Duplicates are kept so a repeated word weighs more.
pub fn extract_keywords(question: &str) -> Vec<String> {
    let lowered = question.to_lowercase();
    strip_punctuation(&lowered)
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_KEYWORD_LEN)
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capital_of_france() {
        assert_eq!(
            extract_keywords("What is the capital of France?"),
            vec!["capital", "france"]
        );
    }

    #[test]
    fn test_strip_punctuation() {
        assert_eq!(
            extract_keywords("derivative(x) = slope; tangent-line!"),
            vec!["derivativex", "slope", "tangentline"]
        );
    }

    #[test]
    fn test_drop_short_tokens() {
        assert_eq!(extract_keywords("is pi an ok value"), vec!["value"]);
    }

    #[test]
    fn test_stop_words_only() {
        assert!(extract_keywords("What is the, and where?").is_empty());
        assert!(extract_keywords("").is_empty());
    }

    #[test]
    fn test_keeps_duplicates() {
        assert_eq!(
            extract_keywords("Graph GRAPH graph"),
            vec!["graph", "graph", "graph"]
        );
    }

    #[test]
    fn test_is_stop_word() {
        assert!(is_stop_word("which"));
        assert!(is_stop_word("about"));
        assert!(!is_stop_word("theorem"));
    }
}
