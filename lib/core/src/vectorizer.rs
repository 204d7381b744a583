//! TF-IDF text vectorizer
//!
//! A pre-fitted term-frequency / inverse-document-frequency transformer. The
//! vocabulary and IDF weights are fixed when the artifact is produced; this
//! module only applies them to new documents.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sparse::SparseVector;
use crate::tokenizer;

/// Largest accepted IDF weight. Smoothed IDF is `ln((1 + n) / (1 + df)) + 1`,
/// so real vocabularies stay far below this.
pub const MAX_IDF: f32 = 1.0e6;

/// Turns raw text into a fixed-width numeric feature vector
pub trait TextVectorizer: Send + Sync {
    /// Vectorize one document. Terms outside the vocabulary are dropped.
    fn vectorize(&self, text: &str) -> Result<SparseVector>;

    /// Width of every vector this vectorizer produces
    fn n_features(&self) -> usize;

    /// Term behind a feature index
    fn feature_name(&self, index: usize) -> Option<&str>;
}

/// Row normalization applied after TF-IDF weighting
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Norm {
    L1,
    #[default]
    L2,
    None,
}

/// Serialized form of [`TfidfVectorizer`]; the lookup tables are rebuilt on load
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTfidf {
    terms: Vec<String>,
    idf: Vec<f32>,
    lowercase: bool,
    ngram_range: (usize, usize),
    stop_words: Vec<String>,
    sublinear_tf: bool,
    norm: Norm,
}

/// A fitted TF-IDF vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawTfidf", into = "RawTfidf")]
pub struct TfidfVectorizer {
    // index -> term
    terms: Vec<String>,
    // term -> index
    vocabulary: AHashMap<String, u32>,
    idf: Vec<f32>,
    lowercase: bool,
    ngram_range: (usize, usize),
    stop_words: AHashSet<String>,
    sublinear_tf: bool,
    norm: Norm,
}

impl TfidfVectorizer {
    /// Build from feature names (index order) and their IDF weights, with
    /// default settings: lowercase unigrams, raw counts, L2 norm.
    pub fn new(terms: Vec<String>, idf: Vec<f32>) -> Result<Self> {
        Self::try_from(RawTfidf {
            terms,
            idf,
            lowercase: true,
            ngram_range: (1, 1),
            stop_words: Vec::new(),
            sublinear_tf: false,
            norm: Norm::L2,
        })
    }

    #[must_use]
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    #[must_use]
    pub fn with_sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }

    #[must_use]
    pub fn with_norm(mut self, norm: Norm) -> Self {
        self.norm = norm;
        self
    }

    #[must_use]
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Result<Self> {
        if min_n == 0 || min_n > max_n {
            return Err(Error::InvalidArtifact(format!(
                "invalid ngram range ({}, {})",
                min_n, max_n
            )));
        }
        self.ngram_range = (min_n, max_n);
        Ok(self)
    }

    /// Feature index of a term
    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).map(|&idx| idx as usize)
    }

    /// Feature names in index order
    #[inline]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[inline]
    pub fn idf(&self) -> &[f32] {
        &self.idf
    }

    /// Apply the fitted weights to one document
    pub fn transform(&self, text: &str) -> Result<SparseVector> {
        let grams = tokenizer::analyze(text, self.lowercase, &self.stop_words, self.ngram_range);

        // Count term frequencies
        let mut term_freqs: AHashMap<u32, u32> = AHashMap::new();
        for gram in &grams {
            if let Some(&idx) = self.vocabulary.get(gram) {
                *term_freqs.entry(idx).or_insert(0) += 1;
            }
        }

        let weighted: Vec<(u32, f32)> = term_freqs
            .into_iter()
            .map(|(idx, count)| {
                let tf = if self.sublinear_tf {
                    1.0 + (count as f32).ln()
                } else {
                    count as f32
                };
                (idx, tf * self.idf[idx as usize])
            })
            .collect();
        let mut vector = SparseVector::from_pairs(self.terms.len(), weighted)?;

        // Summed in feature order (and in f64), so the result does not depend on hash order
        let norm = match self.norm {
            Norm::L2 => vector.iter().map(|(_, w)| (w as f64) * (w as f64)).sum::<f64>().sqrt(),
            Norm::L1 => vector.iter().map(|(_, w)| (w as f64).abs()).sum::<f64>(),
            Norm::None => 1.0,
        };
        if norm > f64::from(f32::EPSILON) {
            for w in vector.values_mut() {
                *w = (f64::from(*w) / norm) as f32;
            }
        }

        if vector.iter().any(|(_, w)| !w.is_finite()) {
            return Err(Error::InvalidArtifact(
                "vectorizer produced non-finite feature weights".to_string(),
            ));
        }
        Ok(vector)
    }
}

impl TextVectorizer for TfidfVectorizer {
    fn vectorize(&self, text: &str) -> Result<SparseVector> {
        self.transform(text)
    }

    #[inline]
    fn n_features(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    fn feature_name(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }
}

impl TryFrom<RawTfidf> for TfidfVectorizer {
    type Error = Error;

    fn try_from(raw: RawTfidf) -> Result<Self> {
        if raw.terms.len() != raw.idf.len() {
            return Err(Error::InvalidArtifact(format!(
                "vectorizer has {} terms but {} idf weights",
                raw.terms.len(),
                raw.idf.len()
            )));
        }
        if raw.terms.len() > u32::MAX as usize {
            return Err(Error::InvalidArtifact("vocabulary too large".to_string()));
        }
        if let Some(bad) = raw
            .idf
            .iter()
            .find(|w| !w.is_finite() || **w < 0.0 || **w > MAX_IDF)
        {
            return Err(Error::InvalidArtifact(format!("invalid idf weight {}", bad)));
        }
        if raw.ngram_range.0 == 0 || raw.ngram_range.0 > raw.ngram_range.1 {
            return Err(Error::InvalidArtifact(format!(
                "invalid ngram range ({}, {})",
                raw.ngram_range.0, raw.ngram_range.1
            )));
        }

        let mut vocabulary = AHashMap::with_capacity(raw.terms.len());
        for (idx, term) in raw.terms.iter().enumerate() {
            if vocabulary.insert(term.clone(), idx as u32).is_some() {
                return Err(Error::InvalidArtifact(format!("duplicate term '{}'", term)));
            }
        }

        Ok(Self {
            terms: raw.terms,
            vocabulary,
            idf: raw.idf,
            lowercase: raw.lowercase,
            ngram_range: raw.ngram_range,
            stop_words: raw.stop_words.into_iter().collect(),
            sublinear_tf: raw.sublinear_tf,
            norm: raw.norm,
        })
    }
}

impl From<TfidfVectorizer> for RawTfidf {
    fn from(v: TfidfVectorizer) -> Self {
        let mut stop_words: Vec<String> = v.stop_words.into_iter().collect();
        stop_words.sort();
        Self {
            terms: v.terms,
            idf: v.idf,
            lowercase: v.lowercase,
            ngram_range: v.ngram_range,
            stop_words,
            sublinear_tf: v.sublinear_tf,
            norm: v.norm,
        }
    }
}
