//! Review inference pipeline
//!
//! Turns one review into one [`AnalysisResult`]:
//!
//! 1. lexicon polarity/subjectivity of the raw text
//! 2. TF-IDF vectorization with the fitted vocabulary
//! 3. classification into label + class probabilities
//! 4. confidence = max class probability
//! 5. explanation from the top weighted terms of the review
//!
//! The loaded artifacts are an explicit, immutable context. A pipeline built
//! without them still exists and reports [`Error::ArtifactUnavailable`] on use.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::classifier::{Classifier, Label};
use crate::error::{Error, Result};
use crate::explain::{top_terms, Explanation, TopTerm, TOP_TERMS};
use crate::lexicon::LexiconScorer;
use crate::vectorizer::TextVectorizer;

/// The two pre-built artifacts the pipeline needs
#[derive(Clone)]
pub struct Artifacts {
    pub vectorizer: Arc<dyn TextVectorizer>,
    pub classifier: Arc<dyn Classifier>,
}

impl Artifacts {
    /// Pair a vectorizer with a classifier trained on its feature space
    pub fn new(vectorizer: Arc<dyn TextVectorizer>, classifier: Arc<dyn Classifier>) -> Result<Self> {
        if vectorizer.n_features() != classifier.n_features() {
            return Err(Error::InvalidDimension {
                expected: classifier.n_features(),
                actual: vectorizer.n_features(),
            });
        }
        Ok(Self { vectorizer, classifier })
    }
}

impl std::fmt::Debug for Artifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Artifacts")
            .field("n_features", &self.vectorizer.n_features())
            .field("classifier", &self.classifier.kind())
            .finish()
    }
}

/// Outcome of analyzing one review
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub label: Label,
    /// `[P(negative), P(positive)]`
    pub probabilities: [f32; 2],
    /// Maximum of `probabilities`, in 0..=1
    pub confidence: f32,
    pub polarity: f32,
    pub subjectivity: f32,
    /// At most [`TOP_TERMS`] entries, all with positive weight
    pub top_terms: Vec<TopTerm>,
    pub explanation: Explanation,
}

impl AnalysisResult {
    /// Confidence on a 0..=100 scale
    #[inline]
    pub fn confidence_percent(&self) -> f32 {
        self.confidence * 100.0
    }

    pub fn explanation_text(&self) -> String {
        self.explanation.sentence(self.label)
    }
}

#[derive(Debug, Clone)]
pub struct SentimentPipeline {
    artifacts: std::result::Result<Artifacts, String>,
    scorer: LexiconScorer,
}

impl SentimentPipeline {
    pub fn new(artifacts: Artifacts) -> Self {
        Self {
            artifacts: Ok(artifacts),
            scorer: LexiconScorer::default(),
        }
    }

    /// A pipeline whose artifacts failed to load; every analysis reports `reason`
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            artifacts: Err(reason.into()),
            scorer: LexiconScorer::default(),
        }
    }

    #[must_use]
    pub fn with_scorer(mut self, scorer: LexiconScorer) -> Self {
        self.scorer = scorer;
        self
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.artifacts.is_ok()
    }

    /// Why analysis is disabled, if it is
    #[inline]
    pub fn unavailable_reason(&self) -> Option<&str> {
        self.artifacts.as_ref().err().map(String::as_str)
    }

    #[inline]
    pub fn artifacts(&self) -> Option<&Artifacts> {
        self.artifacts.as_ref().ok()
    }

    /// Analyze one review.
    ///
    /// Whitespace-only input is rejected with [`Error::InvalidInput`] before
    /// anything runs. Text with no vocabulary terms is still classified.
    pub fn analyze(&self, review: &str) -> Result<AnalysisResult> {
        if review.trim().is_empty() {
            return Err(Error::InvalidInput("Please enter a valid review.".to_string()));
        }
        let artifacts = self
            .artifacts
            .as_ref()
            .map_err(|reason| Error::ArtifactUnavailable(reason.clone()))?;

        let scores = self.scorer.score(review);

        let features = artifacts.vectorizer.vectorize(review)?;
        let prediction = artifacts.classifier.classify(&features)?;
        let confidence = prediction.confidence();

        let top_terms = top_terms(&features, artifacts.vectorizer.as_ref(), TOP_TERMS);
        let explanation = Explanation::from_terms(&top_terms);

        debug!(
            label = %prediction.label,
            confidence,
            features = features.nnz(),
            "Review analyzed"
        );

        Ok(AnalysisResult {
            label: prediction.label,
            probabilities: prediction.probabilities,
            confidence,
            polarity: scores.polarity,
            subjectivity: scores.subjectivity,
            top_terms,
            explanation,
        })
    }
}
