//! Logistic regression inference over sparse TF-IDF features

use serde::{Deserialize, Serialize};

use crate::classifier::Classifier;
use crate::error::{Error, Result};
use crate::sparse::SparseVector;

/// Binary logistic regression: `P(positive) = sigmoid(w·x + b)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    weights: Vec<f32>,
    intercept: f32,
}

impl LogisticRegression {
    pub fn new(weights: Vec<f32>, intercept: f32) -> Result<Self> {
        let model = Self { weights, intercept };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.intercept.is_finite() || self.weights.iter().any(|w| !w.is_finite()) {
            return Err(Error::InvalidArtifact(
                "logistic regression has non-finite parameters".to_string(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    #[inline]
    pub fn intercept(&self) -> f32 {
        self.intercept
    }
}

#[inline]
fn sigmoid(z: f32) -> f32 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LogisticRegression {
    #[inline]
    fn n_features(&self) -> usize {
        self.weights.len()
    }

    fn predict_proba(&self, features: &SparseVector) -> Result<[f32; 2]> {
        let positive = sigmoid(features.dot(&self.weights) + self.intercept);
        Ok([1.0 - positive, positive])
    }

    fn kind(&self) -> &'static str {
        "logistic-regression"
    }
}
