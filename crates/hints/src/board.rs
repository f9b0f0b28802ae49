use crate::error::{HintError, Result};
use std::collections::{HashMap, HashSet};

/// Unvalidated hint request as handed over by a transport layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HintRequest {
    pub team_words: Vec<String>,
    pub opponent_words: Vec<String>,
    /// Part of the board but never scored against.
    pub neutral_words: Vec<String>,
    pub assassin_word: Option<String>,
}

impl HintRequest {
    pub fn new<I, S>(team_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            team_words: team_words.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn opponents<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.opponent_words = words.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn neutrals<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.neutral_words = words.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn assassin(mut self, word: impl Into<String>) -> Self {
        self.assassin_word = Some(word.into());
        self
    }
}

/// A validated board: lowercase, trimmed, non-empty tokens, each in at most one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    team: Vec<String>,
    opponent: Vec<String>,
    neutral: Vec<String>,
    assassin: Option<String>,
}

impl Board {
    #[must_use]
    pub fn team(&self) -> &[String] {
        &self.team
    }

    #[must_use]
    pub fn opponent(&self) -> &[String] {
        &self.opponent
    }

    #[must_use]
    pub fn neutral(&self) -> &[String] {
        &self.neutral
    }

    #[must_use]
    pub fn assassin(&self) -> Option<&str> {
        self.assassin.as_deref()
    }

    /// Every token on the board, team words first.
    #[must_use]
    pub fn all_words(&self) -> Vec<String> {
        self.team
            .iter()
            .chain(&self.opponent)
            .chain(&self.neutral)
            .chain(&self.assassin)
            .cloned()
            .collect()
    }
}

impl TryFrom<&HintRequest> for Board {
    type Error = HintError;

    fn try_from(request: &HintRequest) -> Result<Self> {
        let team = normalize_words(&request.team_words);
        if team.is_empty() {
            return Err(HintError::InvalidInput("No team words provided".to_string()));
        }
        let board = Self {
            team,
            opponent: normalize_words(&request.opponent_words),
            neutral: normalize_words(&request.neutral_words),
            assassin: request
                .assassin_word
                .as_deref()
                .map(normalize_word)
                .filter(|word| !word.is_empty()),
        };
        board.check_disjoint()?;
        Ok(board)
    }
}

impl Board {
    fn check_disjoint(&self) -> Result<()> {
        let mut owner: HashMap<&str, &'static str> = HashMap::new();
        let groups: [(&'static str, &[String]); 4] = [
            ("team", &self.team),
            ("opponent", &self.opponent),
            ("neutral", &self.neutral),
            ("assassin", self.assassin.as_slice()),
        ];
        for (group, words) in groups {
            for word in words {
                if let Some(previous) = owner.insert(word.as_str(), group) {
                    return Err(HintError::InvalidInput(format!(
                        "Word '{word}' appears in both {previous} and {group} words"
                    )));
                }
            }
        }
        Ok(())
    }
}

fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Trim, lowercase, drop empties and in-group duplicates, keeping first-seen order.
fn normalize_words(words: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    words
        .iter()
        .map(|word| normalize_word(word))
        .filter(|word| !word.is_empty())
        .filter(|word| seen.insert(word.clone()))
        .collect()
}
