use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

const BUILTIN_BALANCED: &str = include_str!("../profiles/balanced.json");
const BUILTIN_CONSERVATIVE: &str = include_str!("../profiles/conservative.json");
const BUILTIN_LEGACY: &str = include_str!("../profiles/legacy.json");
const BUILTIN_EXPANDED: &str = include_str!("../profiles/expanded.json");

pub const DEFAULT_POLICY: &str = "balanced";
pub const BUILTIN_POLICIES: &[&str] = &["balanced", "conservative", "legacy", "expanded"];

const SCHEMA_VERSION: u32 = 1;

/// Named scoring policy: coherence amplification, the adaptive threshold and
/// candidate-generation knobs.
///
/// Policies load from bundled JSON profiles or from user files (JSON or TOML)
/// layered over the `balanced` base.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoringPolicy {
    name: String,
    description: Option<String>,
    exponent: f32,
    threshold: ThresholdRule,
    top_n: usize,
    synonyms: bool,
    synonym_min_similarity: f32,
}

/// Minimum coherence a hint needs for a subset of size `k`.
///
/// Both rules are non-increasing in `k`: larger subsets get a lower bar.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ThresholdRule {
    /// `base - k * decay`
    Linear { base: f32, decay: f32 },
    /// `small` for `k <= small_max`, `large` otherwise.
    Step {
        small: f32,
        large: f32,
        small_max: usize,
    },
}

impl ThresholdRule {
    #[must_use]
    pub fn at(&self, k: usize) -> f32 {
        match *self {
            Self::Linear { base, decay } => base - k as f32 * decay,
            Self::Step {
                small,
                large,
                small_max,
            } => {
                if k <= small_max {
                    small
                } else {
                    large
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum ThresholdKind {
    Linear,
    Step,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPolicy {
    schema_version: Option<u32>,
    name: Option<String>,
    description: Option<String>,
    #[serde(default)]
    coherence: Option<RawCoherence>,
    #[serde(default)]
    threshold: Option<RawThreshold>,
    #[serde(default)]
    candidates: Option<RawCandidates>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCoherence {
    exponent: Option<f32>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawThreshold {
    kind: Option<ThresholdKind>,
    base: Option<f32>,
    decay: Option<f32>,
    small: Option<f32>,
    large: Option<f32>,
    small_max: Option<usize>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCandidates {
    top_n: Option<usize>,
    synonyms: Option<bool>,
    synonym_min_similarity: Option<f32>,
}

impl ScoringPolicy {
    #[must_use]
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "balanced" => Some(
                Self::from_bytes("balanced", BUILTIN_BALANCED.as_bytes(), None)
                    .expect("builtin balanced policy must parse"),
            ),
            "conservative" => Self::from_bytes(
                "conservative",
                BUILTIN_CONSERVATIVE.as_bytes(),
                Some(DEFAULT_POLICY),
            )
            .ok(),
            "legacy" => {
                Self::from_bytes("legacy", BUILTIN_LEGACY.as_bytes(), Some(DEFAULT_POLICY)).ok()
            }
            "expanded" => {
                Self::from_bytes("expanded", BUILTIN_EXPANDED.as_bytes(), Some(DEFAULT_POLICY))
                    .ok()
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn balanced() -> Self {
        Self::builtin(DEFAULT_POLICY).expect("balanced policy is bundled")
    }

    /// A bundled policy name, or a path to a JSON/TOML policy file.
    pub fn resolve(name_or_path: &str) -> Result<Self> {
        if let Some(policy) = Self::builtin(name_or_path) {
            return Ok(policy);
        }
        let path = Path::new(name_or_path);
        if path.is_file() {
            let name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or(name_or_path);
            return Self::from_file(name, path);
        }
        Err(anyhow!(
            "Unknown scoring policy '{name_or_path}' (bundled: {})",
            BUILTIN_POLICIES.join(", ")
        ))
    }

    /// User files always layer over the bundled `balanced` policy, whatever
    /// their name.
    pub fn from_file(policy_name: &str, path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read policy file {}", path.display()))?;
        Self::from_bytes(policy_name, &bytes, Some(DEFAULT_POLICY))
    }

    pub fn from_bytes(policy_name: &str, bytes: &[u8], base: Option<&str>) -> Result<Self> {
        let raw = parse_raw(bytes).with_context(|| {
            format!("Policy '{policy_name}' is not valid JSON/TOML configuration")
        })?;
        let merged_raw = if let Some(base_name) = base {
            let base_raw = builtin_raw(base_name)?;
            merge_raw_policies(base_raw, raw)
        } else {
            raw
        };
        Self::from_raw(merged_raw, policy_name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Size amplification exponent `p` in `mean * |subset|^p`.
    #[must_use]
    pub fn exponent(&self) -> f32 {
        self.exponent
    }

    #[must_use]
    pub fn threshold_rule(&self) -> ThresholdRule {
        self.threshold
    }

    #[must_use]
    pub fn threshold(&self, k: usize) -> f32 {
        self.threshold.at(k)
    }

    #[must_use]
    pub fn top_n(&self) -> usize {
        self.top_n
    }

    #[must_use]
    pub fn synonyms_enabled(&self) -> bool {
        self.synonyms
    }

    #[must_use]
    pub fn synonym_min_similarity(&self) -> f32 {
        self.synonym_min_similarity
    }

    pub fn with_top_n(mut self, top_n: usize) -> Result<Self> {
        self.top_n = top_n;
        self.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn with_synonyms(mut self, enabled: bool) -> Self {
        self.synonyms = enabled;
        self
    }

    fn from_raw(raw: RawPolicy, fallback_name: &str) -> Result<Self> {
        if let Some(version) = raw.schema_version {
            if version != SCHEMA_VERSION {
                return Err(anyhow!(
                    "policy.schema_version {version} is not supported (expected {SCHEMA_VERSION})"
                ));
            }
        }

        let coherence = raw.coherence.unwrap_or_default();
        let candidates = raw.candidates.unwrap_or_default();
        let policy = Self {
            name: raw.name.unwrap_or_else(|| fallback_name.to_string()),
            description: raw.description,
            exponent: coherence
                .exponent
                .ok_or_else(|| anyhow!("policy.coherence.exponent is required"))?,
            threshold: threshold_from_raw(raw.threshold)?,
            top_n: candidates.top_n.unwrap_or(100),
            synonyms: candidates.synonyms.unwrap_or(false),
            synonym_min_similarity: candidates.synonym_min_similarity.unwrap_or(0.3),
        };
        policy.validate()?;
        Ok(policy)
    }

    fn validate(&self) -> Result<()> {
        if !self.exponent.is_finite() {
            return Err(anyhow!("policy.coherence.exponent must be finite"));
        }
        if self.top_n == 0 {
            return Err(anyhow!("policy.candidates.top_n must be at least 1"));
        }
        if !(-1.0..=1.0).contains(&self.synonym_min_similarity) {
            return Err(anyhow!(
                "policy.candidates.synonym_min_similarity must lie in [-1, 1]"
            ));
        }
        match self.threshold {
            ThresholdRule::Linear { base, decay } => {
                if !base.is_finite() || !decay.is_finite() {
                    return Err(anyhow!("policy.threshold base/decay must be finite"));
                }
                if decay < 0.0 {
                    return Err(anyhow!(
                        "policy.threshold.decay must be >= 0 (threshold may not grow with subset size)"
                    ));
                }
            }
            ThresholdRule::Step { small, large, .. } => {
                if !small.is_finite() || !large.is_finite() {
                    return Err(anyhow!("policy.threshold small/large must be finite"));
                }
                if large > small {
                    return Err(anyhow!(
                        "policy.threshold.large must be <= small (threshold may not grow with subset size)"
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::balanced()
    }
}

fn threshold_from_raw(raw: Option<RawThreshold>) -> Result<ThresholdRule> {
    let raw = raw.ok_or_else(|| anyhow!("policy.threshold is required"))?;
    let kind = raw.kind.unwrap_or(ThresholdKind::Linear);
    let foreign = match kind {
        ThresholdKind::Linear => [
            ("small", raw.small.is_some()),
            ("large", raw.large.is_some()),
            ("small_max", raw.small_max.is_some()),
        ]
        .into_iter()
        .find(|(_, present)| *present)
        .map(|(field, _)| (field, "linear")),
        ThresholdKind::Step => [("base", raw.base.is_some()), ("decay", raw.decay.is_some())]
            .into_iter()
            .find(|(_, present)| *present)
            .map(|(field, _)| (field, "step")),
    };
    if let Some((field, kind_name)) = foreign {
        return Err(anyhow!(
            "policy.threshold.{field} does not apply to kind={kind_name}"
        ));
    }
    match kind {
        ThresholdKind::Linear => Ok(ThresholdRule::Linear {
            base: raw
                .base
                .ok_or_else(|| anyhow!("policy.threshold.base is required for kind=linear"))?,
            decay: raw
                .decay
                .ok_or_else(|| anyhow!("policy.threshold.decay is required for kind=linear"))?,
        }),
        ThresholdKind::Step => Ok(ThresholdRule::Step {
            small: raw
                .small
                .ok_or_else(|| anyhow!("policy.threshold.small is required for kind=step"))?,
            large: raw
                .large
                .ok_or_else(|| anyhow!("policy.threshold.large is required for kind=step"))?,
            small_max: raw.small_max.unwrap_or(2),
        }),
    }
}

fn builtin_raw(name: &str) -> Result<RawPolicy> {
    match name {
        "balanced" => parse_raw(BUILTIN_BALANCED.as_bytes()),
        other => Err(anyhow!("Base policy '{other}' not bundled")),
    }
}

fn merge_raw_policies(base: RawPolicy, overlay: RawPolicy) -> RawPolicy {
    let coherence = match (base.coherence, overlay.coherence) {
        (Some(base_cfg), Some(overlay_cfg)) => Some(RawCoherence {
            exponent: overlay_cfg.exponent.or(base_cfg.exponent),
        }),
        (base_cfg, overlay_cfg) => overlay_cfg.or(base_cfg),
    };

    let threshold = match (base.threshold, overlay.threshold) {
        (Some(base_cfg), Some(overlay_cfg)) => Some(merge_threshold(base_cfg, overlay_cfg)),
        (base_cfg, overlay_cfg) => overlay_cfg.or(base_cfg),
    };

    let candidates = match (base.candidates, overlay.candidates) {
        (Some(base_cfg), Some(overlay_cfg)) => Some(RawCandidates {
            top_n: overlay_cfg.top_n.or(base_cfg.top_n),
            synonyms: overlay_cfg.synonyms.or(base_cfg.synonyms),
            synonym_min_similarity: overlay_cfg
                .synonym_min_similarity
                .or(base_cfg.synonym_min_similarity),
        }),
        (base_cfg, overlay_cfg) => overlay_cfg.or(base_cfg),
    };

    RawPolicy {
        schema_version: overlay.schema_version.or(base.schema_version),
        // Identity belongs to the overlay, never the base.
        name: overlay.name,
        description: overlay.description,
        coherence,
        threshold,
        candidates,
    }
}

fn merge_threshold(base: RawThreshold, overlay: RawThreshold) -> RawThreshold {
    let base_kind = base.kind.unwrap_or(ThresholdKind::Linear);
    match overlay.kind {
        // Switching rule kinds replaces the whole section.
        Some(kind) if kind != base_kind => overlay,
        _ => RawThreshold {
            kind: Some(base_kind),
            base: overlay.base.or(base.base),
            decay: overlay.decay.or(base.decay),
            small: overlay.small.or(base.small),
            large: overlay.large.or(base.large),
            small_max: overlay.small_max.or(base.small_max),
        },
    }
}

fn parse_raw(bytes: &[u8]) -> Result<RawPolicy> {
    match serde_json::from_slice::<RawPolicy>(bytes) {
        Ok(raw) => Ok(raw),
        Err(json_err) => {
            let utf8 = std::str::from_utf8(bytes).map_err(|err| anyhow!("{json_err}; {err}"))?;
            toml::from_str(utf8).map_err(|toml_err| {
                anyhow!("Policy is not valid JSON ({json_err}) or TOML ({toml_err})")
            })
        }
    }
}
