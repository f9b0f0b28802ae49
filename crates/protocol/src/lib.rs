use std::collections::BTreeMap;

use anyhow::Result;
use codecracker_hints::{GenerationStats, HintReport, HintRequest, HintResult, ScoredHint};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

pub const ERROR_INVALID_REQUEST: &str = "invalid_request";
pub const ERROR_INTERNAL: &str = "internal";

/// A list of board words, given either as a JSON array or as one
/// comma-separated string (`"lamp, sun,umbrella"`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
#[serde(untagged)]
pub enum WordList {
    List(Vec<String>),
    Csv(String),
}

impl Default for WordList {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl WordList {
    pub fn into_words(self) -> Vec<String> {
        match self {
            Self::List(words) => words,
            Self::Csv(raw) => split_csv(&raw),
        }
    }
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Body of `POST /generate-hints` and of the `hints` command.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GenerateHintsRequest {
    #[serde(default, alias = "my_words")]
    pub team_words: WordList,
    #[serde(default)]
    pub opponent_words: WordList,
    #[serde(default)]
    pub neutral_words: WordList,
    #[serde(default)]
    pub assassin_word: Option<String>,
}

impl From<GenerateHintsRequest> for HintRequest {
    fn from(request: GenerateHintsRequest) -> Self {
        HintRequest {
            team_words: request.team_words.into_words(),
            opponent_words: request.opponent_words.into_words(),
            neutral_words: request.neutral_words.into_words(),
            assassin_word: request.assassin_word,
        }
    }
}

/// Query string of `GET /generate-hints`; every list is comma-separated.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct GenerateHintsQuery {
    #[serde(default)]
    pub my_words: Option<String>,
    #[serde(default)]
    pub opponent_words: Option<String>,
    #[serde(default)]
    pub neutral_words: Option<String>,
    #[serde(default)]
    pub assassin_word: Option<String>,
}

impl From<GenerateHintsQuery> for GenerateHintsRequest {
    fn from(query: GenerateHintsQuery) -> Self {
        let csv = |value: Option<String>| value.map(WordList::Csv).unwrap_or_default();
        Self {
            team_words: csv(query.my_words),
            opponent_words: csv(query.opponent_words),
            neutral_words: csv(query.neutral_words),
            assassin_word: query.assassin_word,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct HintDto {
    pub hint: String,
    pub score: f32,
    pub words: Vec<String>,
}

impl From<&ScoredHint> for HintDto {
    fn from(hint: &ScoredHint) -> Self {
        Self {
            hint: hint.hint.clone(),
            score: hint.score,
            words: hint.words.clone(),
        }
    }
}

/// `{ "2": [...], "3": [...], "4": [...] }`, each list best-first.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, JsonSchema)]
#[serde(transparent)]
pub struct GenerateHintsResponse(pub BTreeMap<usize, Vec<HintDto>>);

impl From<&HintResult> for GenerateHintsResponse {
    fn from(result: &HintResult) -> Self {
        Self(
            result
                .iter()
                .map(|(size, hints)| (size, hints.iter().map(HintDto::from).collect()))
                .collect(),
        )
    }
}

/// Similarity lookups served from cache, computed, or out of vocabulary.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, JsonSchema)]
pub struct OracleStatsDto {
    pub hits: u64,
    pub misses: u64,
    pub unknown: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct GenerationStatsDto {
    pub policy: String,
    pub candidates: usize,
    pub skipped_team_words: Vec<String>,
    pub combinations: usize,
    pub evaluations: usize,
    pub accepted: usize,
    pub oracle: OracleStatsDto,
    pub elapsed_ms: u64,
}

impl From<&GenerationStats> for GenerationStatsDto {
    fn from(stats: &GenerationStats) -> Self {
        Self {
            policy: stats.policy.clone(),
            candidates: stats.candidates,
            skipped_team_words: stats.skipped_team_words.clone(),
            combinations: stats.combinations,
            evaluations: stats.evaluations,
            accepted: stats.accepted,
            oracle: OracleStatsDto {
                hits: stats.oracle.hits,
                misses: stats.oracle.misses,
                unknown: stats.oracle.unknown,
            },
            elapsed_ms: stats.elapsed_ms,
        }
    }
}

/// Hints plus the generation statistics, printed by `hints --stats`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct GenerateHintsReport {
    pub hints: GenerateHintsResponse,
    pub stats: GenerationStatsDto,
}

impl From<&HintReport> for GenerateHintsReport {
    fn from(report: &HintReport) -> Self {
        Self {
            hints: GenerateHintsResponse::from(&report.hints),
            stats: GenerationStatsDto::from(&report.stats),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
    pub hint: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        let hint = match code {
            ERROR_INVALID_REQUEST => Some(
                "Provide at least one team word and keep every word in a single group."
                    .to_string(),
            ),
            _ => None,
        };
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
            hint,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct HealthResponse {
    pub status: String,
    pub vocabulary: usize,
    pub dimension: usize,
    pub policy: String,
}

/// JSON schemas of every wire type, keyed by role.
pub fn schema_bundle() -> Result<serde_json::Value> {
    Ok(serde_json::json!({
        "schema_version": SCHEMA_VERSION,
        "request": serde_json::to_value(schemars::schema_for!(GenerateHintsRequest))?,
        "query": serde_json::to_value(schemars::schema_for!(GenerateHintsQuery))?,
        "response": serde_json::to_value(schemars::schema_for!(GenerateHintsResponse))?,
        "report": serde_json::to_value(schemars::schema_for!(GenerateHintsReport))?,
        "error": serde_json::to_value(schemars::schema_for!(ErrorEnvelope))?,
        "health": serde_json::to_value(schemars::schema_for!(HealthResponse))?,
    }))
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}

pub fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}
