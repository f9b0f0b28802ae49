use serde::Serialize;
use std::collections::BTreeMap;

pub const MIN_SUBSET_SIZE: usize = 2;
pub const MAX_SUBSET_SIZE: usize = 4;

/// Cap on hints returned per subset size.
pub const MAX_HINTS_PER_SIZE: usize = 5;

/// A hint together with its coherence score and the team words it covers,
/// in board order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredHint {
    pub hint: String,
    pub score: f32,
    pub words: Vec<String>,
}

/// Ranked hints grouped by subset size. Every size in
/// `MIN_SUBSET_SIZE..=MAX_SUBSET_SIZE` is present, possibly empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HintResult {
    by_size: BTreeMap<usize, Vec<ScoredHint>>,
}

impl HintResult {
    pub(crate) fn from_map(mut by_size: BTreeMap<usize, Vec<ScoredHint>>) -> Self {
        for size in MIN_SUBSET_SIZE..=MAX_SUBSET_SIZE {
            by_size.entry(size).or_default();
        }
        Self { by_size }
    }

    #[must_use]
    pub fn hints(&self, size: usize) -> &[ScoredHint] {
        self.by_size.get(&size).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, &[ScoredHint])> {
        self.by_size
            .iter()
            .map(|(size, hints)| (*size, hints.as_slice()))
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.by_size.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl Default for HintResult {
    fn default() -> Self {
        Self::from_map(BTreeMap::new())
    }
}
