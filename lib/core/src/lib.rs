//! # ReviewLens Core
//!
//! Core library for the ReviewLens movie review sentiment analyzer.
//!
//! This crate provides the inference side of the system:
//!
//! - [`TfidfVectorizer`] - Pre-fitted TF-IDF text vectorizer producing [`SparseVector`]s
//! - [`Model`] - Pre-trained binary classifiers ([`RandomForest`], [`LogisticRegression`])
//! - [`LexiconScorer`] - Rule-based polarity and subjectivity
//! - [`SentimentPipeline`] - Review in, [`AnalysisResult`] out
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use reviewlens_core::{Artifacts, Label, LogisticRegression, SentimentPipeline, TfidfVectorizer};
//!
//! let terms = vec!["boring".to_string(), "wonderful".to_string()];
//! let vectorizer = TfidfVectorizer::new(terms, vec![1.5, 1.5]).unwrap();
//! let model = LogisticRegression::new(vec![-3.0, 3.0], 0.0).unwrap();
//!
//! let artifacts = Artifacts::new(Arc::new(vectorizer), Arc::new(model)).unwrap();
//! let pipeline = SentimentPipeline::new(artifacts);
//!
//! let result = pipeline.analyze("A wonderful film").unwrap();
//! assert_eq!(result.label, Label::Positive);
//! assert_eq!(result.top_terms[0].term, "wonderful");
//! ```

pub mod classifier;
pub mod error;
pub mod explain;
pub mod forest;
pub mod lexicon;
pub mod linear;
pub mod pipeline;
pub mod sparse;
pub mod tokenizer;
pub mod vectorizer;

pub use classifier::{Classifier, Label, Model, Prediction};
pub use error::{Error, Result};
pub use explain::{top_terms, Explanation, TopTerm, TOP_TERMS};
pub use forest::{DecisionTree, RandomForest, TreeNode};
pub use lexicon::{Lexicon, LexiconScorer, SentimentScores};
pub use linear::LogisticRegression;
pub use pipeline::{AnalysisResult, Artifacts, SentimentPipeline};
pub use sparse::SparseVector;
pub use vectorizer::{Norm, TextVectorizer, TfidfVectorizer};
