use serde::{Deserialize, Serialize};

/// A vocabulary entry returned by a nearest-neighbor query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub token: String,
    pub score: f32,
}

/// Unordered token pair, stored in canonical (sorted) order so that
/// `(a, b)` and `(b, a)` address the same cache slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    first: String,
    second: String,
}

impl PairKey {
    #[must_use]
    pub fn new(a: &str, b: &str) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self {
            first: first.to_string(),
            second: second.to_string(),
        }
    }

    #[must_use]
    pub fn first(&self) -> &str {
        &self.first
    }

    #[must_use]
    pub fn second(&self) -> &str {
        &self.second
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_key_is_order_independent() {
        assert_eq!(PairKey::new("sun", "lamp"), PairKey::new("lamp", "sun"));
        let key = PairKey::new("sun", "lamp");
        assert_eq!(key.first(), "lamp");
        assert_eq!(key.second(), "sun");
    }

    #[test]
    fn pair_key_allows_identical_tokens() {
        let key = PairKey::new("echo", "echo");
        assert_eq!(key.first(), key.second());
    }
}
