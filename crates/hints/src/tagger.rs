use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    ProperNoun,
    Other,
}

/// Part-of-speech tagging used to keep proper nouns out of the candidate pool.
pub trait PartOfSpeechTagger {
    fn tag(&self, token: &str) -> PartOfSpeech;
}

/// Tags capitalized tokens as proper nouns and everything else as [`PartOfSpeech::Other`].
///
/// Only meaningful for cased vocabularies (word2vec); GloVe is lowercased.
#[derive(Debug, Default, Clone, Copy)]
pub struct CapitalizationTagger;

impl PartOfSpeechTagger for CapitalizationTagger {
    fn tag(&self, token: &str) -> PartOfSpeech {
        match token.chars().next() {
            Some(first) if first.is_uppercase() => PartOfSpeech::ProperNoun,
            _ => PartOfSpeech::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalized_tokens_are_proper_nouns() {
        let tagger = CapitalizationTagger;
        assert_eq!(tagger.tag("Paris"), PartOfSpeech::ProperNoun);
        assert_eq!(tagger.tag("paris"), PartOfSpeech::Other);
        assert_eq!(tagger.tag(""), PartOfSpeech::Other);
    }
}
