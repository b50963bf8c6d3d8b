//! Query keyword extraction and keyword presence tests.

use std::collections::BTreeSet;

/// Lowercased query keywords, ordered for deterministic logging.
pub type Keywords = BTreeSet<String>;

/// Common English words that carry little signal for keyword matching.
///
/// Articles, prepositions, pronouns, auxiliary verbs, conjunctions and
/// interrogatives.
pub const STOPWORDS: &[&str] = &[
    "a", "an", "the", // articles
    "about", "above", "after", "against", "at", "before", "below", "between", "by", "during",
    "for", "from", "in", "into", "of", "off", "on", "onto", "out", "over", "to", "under",
    "until", "up", "upon", "with", "within", "without", // prepositions
    "i", "me", "my", "mine", "myself", "we", "us", "our", "ours", "you", "your", "yours", "he",
    "him", "his", "she", "her", "hers", "it", "its", "they", "them", "their", "theirs", "this",
    "that", "these", "those", // pronouns
    "am", "is", "are", "was", "were", "be", "been", "being", "do", "does", "did", "have", "has",
    "had", "can", "could", "will", "would", "shall", "should", "may", "might", "must", // auxiliaries
    "and", "or", "but", "nor", "so", "if", "than", "then", "as", // conjunctions
    "what", "which", "who", "whom", "whose", "when", "where", "why", "how", // interrogatives
];

/// Returns `true` if `token` (already lowercased) is a stopword.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Extract keywords from a query.
///
/// The query is lowercased and split on whitespace. Punctuation at either end
/// of a token is stripped, so `"sky?"` yields `"sky"`. Empty tokens and
/// stopwords are dropped.
pub fn extract_keywords(query: &str) -> Keywords {
    query
        .to_lowercase()
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|token| !token.is_empty() && !is_stopword(token))
        .map(str::to_string)
        .collect()
}

/// Returns `true` if any keyword occurs anywhere in `text`, ignoring case.
///
/// Matching is plain substring containment: `"cat"` matches `"category"`.
pub fn contains_any_keyword(text: &str, keywords: &Keywords) -> bool {
    if keywords.is_empty() {
        return false;
    }
    let text = text.to_lowercase();
    keywords.iter().any(|keyword| text.contains(keyword.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(words: &[&str]) -> Keywords {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn stopwords_and_punctuation_are_removed() {
        let extracted = extract_keywords("What color is the sky?");
        assert_eq!(extracted, keywords(&["color", "sky"]));
    }

    #[test]
    fn query_of_only_stopwords_yields_nothing() {
        assert!(extract_keywords("what is it").is_empty());
        assert!(extract_keywords("   ").is_empty());
    }

    #[test]
    fn tokens_are_lowercased() {
        assert_eq!(extract_keywords("Rust TOKIO"), keywords(&["rust", "tokio"]));
    }

    #[test]
    fn containment_ignores_case() {
        assert!(contains_any_keyword("The SKY is blue.", &keywords(&["sky"])));
    }

    #[test]
    fn containment_matches_partial_words() {
        assert!(contains_any_keyword("Pick a category", &keywords(&["cat"])));
    }

    #[test]
    fn empty_keywords_never_match() {
        assert!(!contains_any_keyword("anything at all", &Keywords::new()));
    }

    #[test]
    fn absent_keywords_do_not_match() {
        assert!(!contains_any_keyword("The grass is green.", &keywords(&["sky", "ocean"])));
    }
}
