//! Bundled English function words. None of them is ever offered as a hint.

use std::collections::HashSet;

pub fn english() -> HashSet<String> {
    [
        // articles & determiners
        "a", "an", "the", "this", "that", "these", "those", "some", "any", "each", "every",
        "either", "neither", "all", "both", "few", "many", "much", "more", "most", "other",
        "another", "such", "no", "own", "same",
        // be-verbs & auxiliaries
        "is", "are", "was", "were", "be", "been", "being", "am", "have", "has", "had",
        "having", "do", "does", "did", "doing", "done",
        // modals
        "will", "would", "shall", "should", "may", "might", "can", "could", "must",
        // prepositions
        "to", "of", "in", "for", "on", "with", "at", "by", "from", "into", "onto", "about",
        "above", "below", "over", "under", "between", "through", "during", "before", "after",
        "against", "among", "around", "without", "within", "upon", "off", "out", "up", "down",
        // conjunctions & negation
        "and", "or", "but", "nor", "not", "if", "then", "than", "so", "as", "because",
        "while", "although", "though", "unless", "until", "whether",
        // pronouns
        "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my",
        "your", "his", "our", "their", "its", "mine", "yours", "hers", "ours", "theirs",
        "myself", "yourself", "himself", "herself", "itself", "ourselves", "themselves",
        // interrogatives & relatives
        "who", "whom", "whose", "what", "which", "when", "where", "why", "how",
        // adverbs & fillers
        "very", "also", "just", "too", "only", "here", "there", "now", "again", "once",
        "ever", "never", "always", "often", "still", "yet", "already", "even", "quite",
        "rather", "almost",
        // indefinites
        "something", "someone", "anything", "anyone", "nothing", "nobody", "everything",
        "everyone",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_words_contain_basics() {
        let sw = english();
        assert!(sw.contains("the"));
        assert!(sw.contains("with"));
        assert!(sw.contains("their"));
        assert!(!sw.contains("shade"));
        assert!(!sw.contains("umbrella"));
    }

    #[test]
    fn stop_words_are_lowercase() {
        assert!(english().iter().all(|w| w.chars().all(char::is_lowercase)));
    }
}
