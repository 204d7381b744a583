//! Binary sentiment classification over TF-IDF feature vectors
//!
//! [`Classifier`] is the seam between the inference pipeline and whatever
//! pre-trained model family produced the artifact. [`Model`] is the
//! serializable set of families the loader understands.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::forest::RandomForest;
use crate::linear::LogisticRegression;
use crate::sparse::SparseVector;

/// Predicted sentiment class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Class 0
    Negative,
    /// Class 1
    Positive,
}

impl Label {
    /// Map a class index to a label. Anything but 0/1 is not a binary class.
    pub fn from_class(class: usize) -> Option<Self> {
        match class {
            0 => Some(Label::Negative),
            1 => Some(Label::Positive),
            _ => None,
        }
    }

    #[inline]
    pub fn class_index(&self) -> usize {
        match self {
            Label::Negative => 0,
            Label::Positive => 1,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Label::Negative => "Negative Review",
            Label::Positive => "Positive Review",
        }
    }

    pub fn emotion(&self) -> &'static str {
        match self {
            Label::Negative => "Sad 😢",
            Label::Positive => "Happy 😊",
        }
    }

    /// Illustration shown next to the result, relative to the assets directory
    pub fn image(&self) -> &'static str {
        match self {
            Label::Negative => "sad.png",
            Label::Positive => "happy.jpg",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Negative => write!(f, "negative"),
            Label::Positive => write!(f, "positive"),
        }
    }
}

/// Label plus the per-class probability distribution it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub label: Label,
    /// `[P(negative), P(positive)]`
    pub probabilities: [f32; 2],
}

impl Prediction {
    /// Argmax over the distribution; on a tie the lower class wins
    pub fn from_probabilities(probabilities: [f32; 2]) -> Self {
        let label = if probabilities[1] > probabilities[0] {
            Label::Positive
        } else {
            Label::Negative
        };
        Self { label, probabilities }
    }

    /// Highest class probability
    #[inline]
    pub fn confidence(&self) -> f32 {
        self.probabilities[0].max(self.probabilities[1])
    }
}

/// A pre-trained binary classifier
pub trait Classifier: Send + Sync {
    /// Width of the feature vectors this model was trained on
    fn n_features(&self) -> usize;

    /// `[P(negative), P(positive)]` for one feature vector
    fn predict_proba(&self, features: &SparseVector) -> Result<[f32; 2]>;

    /// Short human-readable model family name
    fn kind(&self) -> &'static str;

    fn classify(&self, features: &SparseVector) -> Result<Prediction> {
        if features.dim() != self.n_features() {
            return Err(Error::InvalidDimension {
                expected: self.n_features(),
                actual: features.dim(),
            });
        }
        let probabilities = self.predict_proba(features)?;
        if probabilities.iter().any(|p| !p.is_finite()) {
            return Err(Error::InvalidArtifact(format!(
                "{} produced non-finite probabilities",
                self.kind()
            )));
        }
        Ok(Prediction::from_probabilities(probabilities))
    }
}

/// Every model family that can be stored as a classifier artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Model {
    RandomForest(RandomForest),
    LogisticRegression(LogisticRegression),
}

impl Model {
    /// Structural checks run once after an artifact is decoded
    pub fn validate(&self) -> Result<()> {
        match self {
            Model::RandomForest(forest) => forest.validate(),
            Model::LogisticRegression(model) => model.validate(),
        }
    }
}

impl Classifier for Model {
    fn n_features(&self) -> usize {
        match self {
            Model::RandomForest(forest) => forest.n_features(),
            Model::LogisticRegression(model) => model.n_features(),
        }
    }

    fn predict_proba(&self, features: &SparseVector) -> Result<[f32; 2]> {
        match self {
            Model::RandomForest(forest) => forest.predict_proba(features),
            Model::LogisticRegression(model) => model.predict_proba(features),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Model::RandomForest(forest) => forest.kind(),
            Model::LogisticRegression(model) => model.kind(),
        }
    }
}

impl From<RandomForest> for Model {
    fn from(forest: RandomForest) -> Self {
        Model::RandomForest(forest)
    }
}

impl From<LogisticRegression> for Model {
    fn from(model: LogisticRegression) -> Self {
        Model::LogisticRegression(model)
    }
}
