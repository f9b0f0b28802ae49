use std::collections::HashSet;

use crate::tagger::{PartOfSpeech, PartOfSpeechTagger};

/// Validity predicates over candidate hint words.
///
/// Holds no per-request state: the board is passed to every call.
#[derive(Clone, Copy)]
pub struct LexicalFilter<'a> {
    stop_words: &'a HashSet<String>,
    tagger: Option<&'a dyn PartOfSpeechTagger>,
}

impl<'a> LexicalFilter<'a> {
    #[must_use]
    pub fn new(stop_words: &'a HashSet<String>) -> Self {
        Self {
            stop_words,
            tagger: None,
        }
    }

    #[must_use]
    pub fn with_tagger(mut self, tagger: &'a dyn PartOfSpeechTagger) -> Self {
        self.tagger = Some(tagger);
        self
    }

    /// Rejects stop words, tokens overlapping any board word by substring
    /// (either direction, case-insensitive) and, with a tagger, proper nouns.
    #[must_use]
    pub fn is_valid_hint(&self, candidate: &str, board_words: &[String]) -> bool {
        let lower = candidate.to_lowercase();
        if lower.is_empty() || self.stop_words.contains(&lower) {
            return false;
        }
        if overlaps_board(&lower, board_words) {
            return false;
        }
        match self.tagger {
            Some(tagger) => tagger.tag(candidate) != PartOfSpeech::ProperNoun,
            None => true,
        }
    }
}

/// Alphabetic, single token, no embedded whitespace or punctuation.
#[must_use]
pub fn is_single_alphabetic_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

fn overlaps_board(candidate_lower: &str, board_words: &[String]) -> bool {
    board_words.iter().any(|word| {
        let word = word.to_lowercase();
        !word.is_empty() && (word.contains(candidate_lower) || candidate_lower.contains(&word))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stop_words;
    use crate::tagger::CapitalizationTagger;

    fn board() -> Vec<String> {
        ["lamp", "sun", "umbrella", "car"]
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    }

    #[test]
    fn rejects_stop_words() {
        let stop = stop_words::english();
        let filter = LexicalFilter::new(&stop);
        assert!(!filter.is_valid_hint("the", &board()));
        assert!(!filter.is_valid_hint("The", &board()));
        assert!(filter.is_valid_hint("shade", &board()));
    }

    #[test]
    fn rejects_substring_overlap_in_both_directions() {
        let stop = stop_words::english();
        let filter = LexicalFilter::new(&stop);
        // contains a board word
        assert!(!filter.is_valid_hint("sunlight", &board()));
        assert!(!filter.is_valid_hint("Streetlamp", &board()));
        // contained in a board word
        assert!(!filter.is_valid_hint("umbrel", &board()));
        assert!(!filter.is_valid_hint("ca", &board()));
        assert!(filter.is_valid_hint("parasol", &board()));
    }

    #[test]
    fn proper_nouns_rejected_only_with_tagger() {
        let stop = stop_words::english();
        let tagger = CapitalizationTagger;
        let plain = LexicalFilter::new(&stop);
        let tagged = LexicalFilter::new(&stop).with_tagger(&tagger);
        assert!(plain.is_valid_hint("Paris", &board()));
        assert!(!tagged.is_valid_hint("Paris", &board()));
        assert!(tagged.is_valid_hint("paris", &board()));
    }

    #[test]
    fn empty_candidate_is_invalid() {
        let stop = HashSet::new();
        assert!(!LexicalFilter::new(&stop).is_valid_hint("", &board()));
    }

    #[test]
    fn single_alphabetic_tokens() {
        assert!(is_single_alphabetic_token("shade"));
        assert!(is_single_alphabetic_token("café"));
        assert!(!is_single_alphabetic_token("sun lamp"));
        assert!(!is_single_alphabetic_token("sun-lamp"));
        assert!(!is_single_alphabetic_token("r2d2"));
        assert!(!is_single_alphabetic_token(""));
    }
}
