use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::stop_words;

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("Failed to read lexicon {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed lexicon: {0}")]
    Malformed(String),

    #[error("Lexical lookup failed for '{token}': {reason}")]
    Lookup { token: String, reason: String },
}

/// Stop words and synonym sets consulted by the lexical filter and the
/// candidate generator.
pub trait LexicalResource {
    fn stop_words(&self) -> &HashSet<String>;

    /// Synonyms of `token`, excluding `token` itself. Unknown tokens have none.
    fn synonyms(&self, token: &str) -> Result<Vec<String>, LexiconError>;
}

/// In-memory thesaurus with the bundled English stop-word list.
#[derive(Debug, Clone)]
pub struct SynonymTable {
    stop_words: HashSet<String>,
    synonyms: HashMap<String, Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLexicon {
    #[serde(default)]
    stop_words: Vec<String>,
    #[serde(default)]
    synonyms: HashMap<String, Vec<String>>,
}

impl SynonymTable {
    /// Stop words only; every synonym lookup comes back empty.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            stop_words: stop_words::english(),
            synonyms: HashMap::new(),
        }
    }

    /// Small general-purpose thesaurus bundled with the crate.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::empty();

        // Light & weather
        table.insert("light", ["glow", "illumination", "brightness", "lamp"]);
        table.insert("sunlight", ["sunshine", "daylight", "sun"]);
        table.insert("shade", ["shadow", "shelter", "canopy", "tint"]);
        table.insert("rain", ["shower", "drizzle", "downpour", "precipitation"]);
        table.insert("storm", ["tempest", "gale", "squall", "thunderstorm"]);
        table.insert("cold", ["chilly", "freezing", "frosty", "icy"]);

        // Nature
        table.insert("forest", ["woods", "woodland", "jungle", "grove"]);
        table.insert("sea", ["ocean", "waters", "marine", "deep"]);
        table.insert("mountain", ["peak", "summit", "mount", "alp"]);
        table.insert("fruit", ["produce", "harvest", "berry"]);

        // Objects & places
        table.insert("seat", ["chair", "bench", "stool", "throne"]);
        table.insert("music", ["melody", "tune", "harmony", "song"]);
        table.insert("instrument", ["tool", "device", "implement"]);
        table.insert("hospital", ["clinic", "infirmary", "sanatorium"]);
        table.insert("news", ["report", "bulletin", "headline", "press"]);
        table.insert("royal", ["regal", "kingly", "majestic", "queenly"]);
        table.insert("machine", ["engine", "apparatus", "mechanism", "robot"]);

        table
    }

    /// Load a JSON or TOML lexicon of the form
    /// `{ "stop_words": [...], "synonyms": { "word": ["syn", ...] } }`.
    /// Extra stop words are added to the bundled list.
    pub fn from_file(path: &Path) -> Result<Self, LexiconError> {
        let bytes = std::fs::read(path).map_err(|source| LexiconError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LexiconError> {
        let raw: RawLexicon = match serde_json::from_slice(bytes) {
            Ok(raw) => raw,
            Err(json_err) => {
                let utf8 = std::str::from_utf8(bytes)
                    .map_err(|err| LexiconError::Malformed(format!("{json_err}; {err}")))?;
                toml::from_str(utf8).map_err(|toml_err| {
                    LexiconError::Malformed(format!(
                        "not valid JSON ({json_err}) or TOML ({toml_err})"
                    ))
                })?
            }
        };

        let mut table = Self::empty();
        for word in raw.stop_words {
            let word = word.trim().to_lowercase();
            if word.is_empty() {
                return Err(LexiconError::Malformed("empty stop word".to_string()));
            }
            table.stop_words.insert(word);
        }
        for (word, synonyms) in raw.synonyms {
            if word.trim().is_empty() || synonyms.iter().any(|s| s.trim().is_empty()) {
                return Err(LexiconError::Malformed(format!(
                    "empty token in synonym entry '{word}'"
                )));
            }
            table.insert(&word, synonyms.iter().map(String::as_str));
        }
        Ok(table)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.synonyms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.synonyms.is_empty()
    }

    fn insert<'a>(&mut self, word: &str, synonyms: impl IntoIterator<Item = &'a str>) {
        let word = word.trim().to_lowercase();
        let entry = self.synonyms.entry(word.clone()).or_default();
        for synonym in synonyms {
            let synonym = synonym.trim().to_lowercase();
            if synonym != word && !entry.contains(&synonym) {
                entry.push(synonym);
            }
        }
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LexicalResource for SynonymTable {
    fn stop_words(&self) -> &HashSet<String> {
        &self.stop_words
    }

    fn synonyms(&self, token: &str) -> Result<Vec<String>, LexiconError> {
        Ok(self
            .synonyms
            .get(&token.to_lowercase())
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_table_has_synonyms_and_stop_words() {
        let table = SynonymTable::builtin();
        assert!(table.stop_words().contains("the"));
        let synonyms = table.synonyms("Shade").unwrap();
        assert!(synonyms.contains(&"canopy".to_string()));
        assert!(table.synonyms("xylophone").unwrap().is_empty());
    }

    #[test]
    fn empty_table_keeps_stop_words() {
        let table = SynonymTable::empty();
        assert!(table.is_empty());
        assert!(table.stop_words().contains("and"));
    }

    #[test]
    fn loads_json_lexicon() {
        let bytes = br#"{
            "stop_words": ["Thing"],
            "synonyms": { "glow": ["shine", "Gleam", "glow"] }
        }"#;
        let table = SynonymTable::from_bytes(bytes).unwrap();
        assert!(table.stop_words().contains("thing"));
        assert_eq!(table.synonyms("glow").unwrap(), vec!["shine", "gleam"]);
    }

    #[test]
    fn loads_toml_lexicon() {
        let bytes = br#"
            [synonyms]
            boat = ["ship", "vessel"]
        "#;
        let table = SynonymTable::from_bytes(bytes).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.synonyms("boat").unwrap(), vec!["ship", "vessel"]);
    }

    #[test]
    fn rejects_malformed_lexicon() {
        assert!(SynonymTable::from_bytes(br#"{ "synonyms": { "boat": [""] } }"#).is_err());
        assert!(SynonymTable::from_bytes(br#"{ "antonyms": {} }"#).is_err());
        assert!(SynonymTable::from_bytes(b"not a lexicon [").is_err());
    }
}
