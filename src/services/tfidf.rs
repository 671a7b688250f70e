use std::collections::HashMap;

/// Sparse TF-IDF weight vector for a single document.
///
/// Construction L2-normalizes the raw weights, so any non-degenerate
/// vector has unit Euclidean norm and `dot` equals cosine similarity.
/// Documents with no tokens stay empty and contribute 0 to every
/// comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    weights: HashMap<String, f64>,
}

impl SparseVector {
    fn from_raw(mut weights: HashMap<String, f64>) -> Self {
        let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in weights.values_mut() {
                *weight /= norm;
            }
            Self { weights }
        } else {
            Self::default()
        }
    }

    /// Dot product with another sparse vector.
    ///
    /// Iterates the smaller map and probes the larger one; the swap never
    /// changes the result.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (small, large) = if self.weights.len() <= other.weights.len() {
            (&self.weights, &other.weights)
        } else {
            (&other.weights, &self.weights)
        };

        small
            .iter()
            .filter_map(|(term, weight)| large.get(term).map(|w| weight * w))
            .sum()
    }

    /// Normalized weight of a term, if present.
    pub fn get(&self, term: &str) -> Option<f64> {
        self.weights.get(term).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights
            .iter()
            .map(|(term, weight)| (term.as_str(), *weight))
    }
}

/// Splits text into lowercase word-character runs of length >= 2.
///
/// Punctuation, whitespace and single-character tokens are discarded.
/// No stemming and no stop-word removal.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_owned)
        .collect()
}

/// From-scratch TF-IDF vectorizer.
///
/// Refits on every call: the IDF table is derived from the supplied batch
/// alone, so callers comparing two document sets must combine them into a
/// single corpus before fitting to share one term space.
#[derive(Debug, Default)]
pub struct TfidfVectorizer {
    idf: HashMap<String, f64>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fitted IDF weight for a term, if it appeared in the corpus.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.idf.get(term).copied()
    }

    /// Fits on `documents` and returns one normalized vector per
    /// document, index-aligned to the input.
    pub fn fit_transform(&mut self, documents: &[&str]) -> Vec<SparseVector> {
        let total_docs = documents.len();

        // Per-document term counts plus corpus document frequency, each
        // document counted at most once per term.
        let mut doc_counts = Vec::with_capacity(total_docs);
        let mut df: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            let mut counts: HashMap<String, usize> = HashMap::new();
            for token in tokenize(doc) {
                *counts.entry(token).or_insert(0) += 1;
            }
            for term in counts.keys() {
                *df.entry(term.clone()).or_insert(0) += 1;
            }
            doc_counts.push(counts);
        }

        // Smoothed IDF: ln(N / (1 + df)) + 1. The 1 + df denominator and
        // the trailing + 1 keep every weight positive, including terms
        // present in all documents.
        self.idf = df
            .into_iter()
            .map(|(term, count)| {
                let weight = (total_docs as f64 / (1.0 + count as f64)).ln() + 1.0;
                (term, weight)
            })
            .collect();

        let idf = &self.idf;
        doc_counts
            .into_iter()
            .map(|counts| {
                let raw = counts
                    .into_iter()
                    .filter_map(|(term, count)| {
                        idf.get(&term).map(|weight| (term, count as f64 * weight))
                    })
                    .collect();
                SparseVector::from_raw(raw)
            })
            .collect()
    }
}
