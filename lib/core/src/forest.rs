//! Random forest inference
//!
//! Trees are stored as flat node arrays with the root at index 0. A sample
//! goes left when `x[feature] <= threshold`. Each tree votes with its leaf's
//! normalized class distribution, and the forest averages the votes.

use serde::{Deserialize, Serialize};

use crate::classifier::Classifier;
use crate::error::{Error, Result};
use crate::sparse::SparseVector;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TreeNode {
    Split {
        feature: u32,
        threshold: f32,
        left: u32,
        right: u32,
    },
    Leaf {
        /// Weighted training samples per class, `[negative, positive]`
        counts: [f32; 2],
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    #[inline]
    #[must_use]
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children must point forward, which also rules out cycles
    fn validate(&self, n_features: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(Error::InvalidArtifact("decision tree has no nodes".to_string()));
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split { feature, threshold, left, right } => {
                    if *feature as usize >= n_features {
                        return Err(Error::InvalidArtifact(format!(
                            "node {} splits on feature {} but the model has {} features",
                            idx, feature, n_features
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(Error::InvalidArtifact(format!(
                            "node {} has a non-finite threshold",
                            idx
                        )));
                    }
                    for child in [*left as usize, *right as usize] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(Error::InvalidArtifact(format!(
                                "node {} has invalid child {}",
                                idx, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { counts } => {
                    let total = counts[0] + counts[1];
                    if counts.iter().any(|c| !c.is_finite() || *c < 0.0)
                        || !total.is_finite()
                        || total <= 0.0
                    {
                        return Err(Error::InvalidArtifact(format!(
                            "leaf {} has an invalid class distribution",
                            idx
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Normalized class distribution of the leaf this sample lands in
    fn predict_proba(&self, features: &SparseVector) -> Result<[f32; 2]> {
        let mut idx = 0usize;
        loop {
            match self.nodes.get(idx) {
                Some(TreeNode::Split { feature, threshold, left, right }) => {
                    idx = if features.get(*feature as usize) <= *threshold {
                        *left as usize
                    } else {
                        *right as usize
                    };
                }
                Some(TreeNode::Leaf { counts }) => {
                    let total = counts[0] + counts[1];
                    return Ok([counts[0] / total, counts[1] / total]);
                }
                None => {
                    return Err(Error::InvalidArtifact(format!(
                        "tree traversal reached missing node {}",
                        idx
                    )));
                }
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    n_features: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(n_features: usize, trees: Vec<DecisionTree>) -> Result<Self> {
        let forest = Self { n_features, trees };
        forest.validate()?;
        Ok(forest)
    }

    pub fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(Error::InvalidArtifact("random forest has no trees".to_string()));
        }
        for tree in &self.trees {
            tree.validate(self.n_features)?;
        }
        Ok(())
    }

    #[inline]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Classifier for RandomForest {
    #[inline]
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, features: &SparseVector) -> Result<[f32; 2]> {
        let mut sum = [0.0f32; 2];
        for tree in &self.trees {
            let p = tree.predict_proba(features)?;
            sum[0] += p[0];
            sum[1] += p[1];
        }
        let n = self.trees.len() as f32;
        Ok([sum[0] / n, sum[1] / n])
    }

    fn kind(&self) -> &'static str {
        "random-forest"
    }
}
