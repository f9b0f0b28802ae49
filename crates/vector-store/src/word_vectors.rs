use crate::error::{Result, VectorStoreError};
use crate::space::EmbeddingSpace;
use crate::types::Neighbor;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// In-memory word embeddings with brute-force cosine search.
///
/// Vectors are L2-normalized on insert, so cosine similarity reduces to a dot product.
#[derive(Debug)]
pub struct WordVectors {
    dimension: usize,
    tokens: Vec<String>,
    vectors: Vec<Vec<f32>>,
    index: HashMap<String, usize>,
}

impl WordVectors {
    /// Load a GloVe-style text file (`token v1 v2 ... vn` per line).
    ///
    /// A word2vec header line (`<count> <dim>`) is detected and skipped.
    /// `max_words` caps the number of rows read; embedding files are usually
    /// frequency-ordered, so this keeps the most common words.
    pub fn load(path: impl AsRef<Path>, max_words: Option<usize>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading word vectors from {}", path.display());
        let file = File::open(path)?;
        let vectors = Self::from_reader(BufReader::new(file), max_words)?;
        log::info!(
            "Loaded {} word vectors (dimension {})",
            vectors.len(),
            vectors.dimension()
        );
        Ok(vectors)
    }

    pub fn from_reader<R: BufRead>(reader: R, max_words: Option<usize>) -> Result<Self> {
        let mut builder = Builder::default();
        let limit = max_words.unwrap_or(usize::MAX);

        for (idx, line) in reader.lines().enumerate() {
            if builder.len() >= limit {
                break;
            }
            let line = line?;
            let line_no = idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if line_no == 1 && is_word2vec_header(trimmed) {
                log::debug!("Skipping word2vec header: {trimmed}");
                continue;
            }

            let mut parts = trimmed.split_whitespace();
            let Some(token) = parts.next() else {
                continue;
            };
            let vector = parts
                .map(str::parse::<f32>)
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|err| VectorStoreError::Malformed {
                    line: line_no,
                    reason: format!("component for '{token}' is not a float: {err}"),
                })?;
            builder.push(line_no, token, vector)?;
        }

        builder.finish()
    }

    /// Build a space from in-memory rows. Later duplicates of a token are ignored.
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let mut builder = Builder::default();
        for (idx, (token, vector)) in entries.into_iter().enumerate() {
            let token = token.into();
            builder.push(idx + 1, &token, vector)?;
        }
        builder.finish()
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn lookup(&self, token: &str) -> Result<usize> {
        self.index
            .get(token)
            .copied()
            .ok_or_else(|| VectorStoreError::UnknownToken(token.to_string()))
    }
}

impl EmbeddingSpace for WordVectors {
    fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    fn similarity(&self, a: &str, b: &str) -> Result<f32> {
        let a = &self.vectors[self.lookup(a)?];
        let b = &self.vectors[self.lookup(b)?];
        Ok(dot(a, b).clamp(-1.0, 1.0))
    }

    fn nearest_neighbors(&self, token: &str, top_n: usize) -> Result<Vec<Neighbor>> {
        let query_idx = self.lookup(token)?;
        if top_n == 0 {
            return Ok(Vec::new());
        }
        let query = &self.vectors[query_idx];

        // Brute force: O(vocabulary) per query.
        let mut scores: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != query_idx)
            .map(|(idx, vector)| (idx, dot(query, vector)))
            .collect();

        let by_rank = |a: &(usize, f32), b: &(usize, f32)| {
            b.1.total_cmp(&a.1)
                .then_with(|| self.tokens[a.0].cmp(&self.tokens[b.0]))
        };
        if top_n < scores.len() {
            scores.select_nth_unstable_by(top_n, by_rank);
            scores.truncate(top_n);
        }
        scores.sort_by(by_rank);

        Ok(scores
            .into_iter()
            .map(|(idx, score)| Neighbor {
                token: self.tokens[idx].clone(),
                score,
            })
            .collect())
    }
}

#[derive(Default)]
struct Builder {
    dimension: Option<usize>,
    tokens: Vec<String>,
    vectors: Vec<Vec<f32>>,
    index: HashMap<String, usize>,
}

impl Builder {
    fn len(&self) -> usize {
        self.tokens.len()
    }

    fn push(&mut self, line: usize, token: &str, mut vector: Vec<f32>) -> Result<()> {
        if vector.is_empty() {
            return Err(VectorStoreError::Malformed {
                line,
                reason: format!("token '{token}' has no components"),
            });
        }
        if vector.iter().any(|v| !v.is_finite()) {
            return Err(VectorStoreError::Malformed {
                line,
                reason: format!("token '{token}' has non-finite components"),
            });
        }
        let expected = *self.dimension.get_or_insert(vector.len());
        if vector.len() != expected {
            return Err(VectorStoreError::InvalidDimension {
                line,
                expected,
                actual: vector.len(),
            });
        }
        if self.index.contains_key(token) {
            log::debug!("Duplicate token '{token}' at line {line} ignored");
            return Ok(());
        }

        normalize(&mut vector);
        self.index.insert(token.to_string(), self.tokens.len());
        self.tokens.push(token.to_string());
        self.vectors.push(vector);
        Ok(())
    }

    fn finish(self) -> Result<WordVectors> {
        let Some(dimension) = self.dimension else {
            return Err(VectorStoreError::Other("no word vectors found".to_string()));
        };
        Ok(WordVectors {
            dimension,
            tokens: self.tokens,
            vectors: self.vectors,
            index: self.index,
        })
    }
}

fn is_word2vec_header(line: &str) -> bool {
    let parts: Vec<&str> = line.split_whitespace().collect();
    parts.len() == 2 && parts.iter().all(|p| p.parse::<usize>().is_ok())
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn normalize(vec: &mut [f32]) {
    let norm = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    for value in vec {
        *value /= norm;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn sample() -> WordVectors {
        WordVectors::from_entries([
            ("sun", vec![1.0, 0.0, 0.0]),
            ("sunlight", vec![0.9, 0.1, 0.0]),
            ("moon", vec![0.5, 0.5, 0.0]),
            ("car", vec![0.0, 0.0, 1.0]),
        ])
        .unwrap()
    }

    #[test]
    fn similarity_is_symmetric_cosine() {
        let space = sample();
        let ab = space.similarity("sun", "moon").unwrap();
        let ba = space.similarity("moon", "sun").unwrap();
        assert!((ab - ba).abs() < 1e-6);
        assert!((ab - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-5);
        assert!(space.similarity("sun", "car").unwrap().abs() < 1e-6);
    }

    #[test]
    fn unknown_tokens_are_reported() {
        let space = sample();
        let err = space.similarity("sun", "zebra").unwrap_err();
        assert!(err.is_unknown_token());
        assert!(space.nearest_neighbors("zebra", 3).unwrap_err().is_unknown_token());
    }

    #[test]
    fn nearest_neighbors_exclude_query_and_sort_descending() {
        let space = sample();
        let neighbors = space.nearest_neighbors("sun", 2).unwrap();
        let tokens: Vec<&str> = neighbors.iter().map(|n| n.token.as_str()).collect();
        assert_eq!(tokens, vec!["sunlight", "moon"]);
        assert!(neighbors[0].score >= neighbors[1].score);
    }

    #[test]
    fn nearest_neighbors_select_the_top_slice_and_break_ties_by_token() {
        let space = WordVectors::from_entries([
            ("sun", vec![1.0, 0.0, 0.0]),
            ("far", vec![0.0, 0.0, 1.0]),
            ("ray", vec![0.8, 0.6, 0.0]),
            ("glow", vec![0.8, 0.6, 0.0]),
            ("sunlight", vec![0.9, 0.1, 0.0]),
            ("dusk", vec![0.1, 0.9, 0.3]),
        ])
        .unwrap();

        let top: Vec<String> = space
            .nearest_neighbors("sun", 3)
            .unwrap()
            .into_iter()
            .map(|n| n.token)
            .collect();
        assert_eq!(top, vec!["sunlight", "glow", "ray"]);

        let all = space.nearest_neighbors("sun", 50).unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all[4].token, "far");
        assert!(all.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn nearest_neighbors_with_zero_breadth_is_empty() {
        let space = sample();
        assert!(space.nearest_neighbors("sun", 0).unwrap().is_empty());
    }

    #[test]
    fn reader_skips_word2vec_header_and_blank_lines() {
        let text = "3 2\nsun 1.0 0.0\n\nmoon 0.0 1.0\nstar 0.7 0.7\n";
        let space = WordVectors::from_reader(Cursor::new(text), None).unwrap();
        assert_eq!(space.len(), 3);
        assert_eq!(space.dimension(), 2);
        assert!(space.contains("star"));
    }

    #[test]
    fn reader_respects_max_words() {
        let text = "sun 1.0 0.0\nmoon 0.0 1.0\nstar 0.7 0.7\n";
        let space = WordVectors::from_reader(Cursor::new(text), Some(2)).unwrap();
        assert_eq!(space.len(), 2);
        assert!(!space.contains("star"));
    }

    #[test]
    fn reader_rejects_dimension_mismatch() {
        let text = "sun 1.0 0.0\nmoon 0.0 1.0 0.5\n";
        let err = WordVectors::from_reader(Cursor::new(text), None).unwrap_err();
        assert!(matches!(
            err,
            VectorStoreError::InvalidDimension {
                line: 2,
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn reader_rejects_non_numeric_components() {
        let text = "sun 1.0 abc\n";
        let err = WordVectors::from_reader(Cursor::new(text), None).unwrap_err();
        assert!(matches!(err, VectorStoreError::Malformed { line: 1, .. }));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(WordVectors::from_reader(Cursor::new(""), None).is_err());
    }

    #[test]
    fn zero_vectors_have_zero_similarity() {
        let space =
            WordVectors::from_entries([("void", vec![0.0, 0.0]), ("sun", vec![1.0, 0.0])])
                .unwrap();
        assert_eq!(space.similarity("void", "sun").unwrap(), 0.0);
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "lamp 0.2 0.8").unwrap();
        writeln!(file, "shade 0.3 0.7").unwrap();
        let space = WordVectors::load(file.path(), None).unwrap();
        assert_eq!(space.len(), 2);
        assert!(space.similarity("lamp", "shade").unwrap() > 0.9);
    }
}
