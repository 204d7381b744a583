//! Explanation of a prediction by its highest-weighted terms
//!
//! This is a ranking heuristic over the review's own TF-IDF weights, not a
//! feature-attribution method: it says which vocabulary terms dominate the
//! vectorized review, not how much each one moved the classifier.

use serde::Serialize;

use crate::classifier::Label;
use crate::sparse::SparseVector;
use crate::vectorizer::TextVectorizer;

/// How many terms an explanation cites
pub const TOP_TERMS: usize = 5;

/// A vocabulary term present in the review, with its TF-IDF weight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopTerm {
    pub term: String,
    pub weight: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "terms", rename_all = "snake_case")]
pub enum Explanation {
    /// The review contains these (ranked) vocabulary terms
    Indicators(Vec<String>),
    /// No vocabulary term was found in the review
    Neutral,
}

impl Explanation {
    pub fn from_terms(terms: &[TopTerm]) -> Self {
        if terms.is_empty() {
            Explanation::Neutral
        } else {
            Explanation::Indicators(terms.iter().map(|t| t.term.clone()).collect())
        }
    }

    #[inline]
    pub fn is_neutral(&self) -> bool {
        matches!(self, Explanation::Neutral)
    }

    /// Sentence shown under the result
    pub fn sentence(&self, label: Label) -> String {
        match self {
            Explanation::Indicators(terms) => {
                let word_list = terms
                    .iter()
                    .map(|t| format!("'{}'", t))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "The review was classified as {} primarily due to the presence of words like {}, \
                     which influenced the sentiment prediction.",
                    label.display_name().to_lowercase(),
                    word_list
                )
            }
            Explanation::Neutral => "The review was classified as neutral because it did not \
                                     contain strong indicators of positive or negative sentiment."
                .to_string(),
        }
    }
}

/// Highest-weighted nonzero features of `features`, at most `limit` of them.
///
/// Sorted by weight descending; equal weights keep feature order.
pub fn top_terms(
    features: &SparseVector,
    vectorizer: &dyn TextVectorizer,
    limit: usize,
) -> Vec<TopTerm> {
    let mut ranked: Vec<(usize, f32)> = features.iter().filter(|(_, w)| *w > 0.0).collect();

    // Stable sort, so ties stay in index order
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(limit);

    ranked
        .into_iter()
        .filter_map(|(idx, weight)| {
            vectorizer.feature_name(idx).map(|term| TopTerm {
                term: term.to_string(),
                weight,
            })
        })
        .collect()
}
