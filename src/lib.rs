//! # ReviewLens
//!
//! An interactive movie review sentiment analyzer.
//!
//! A review goes through a pre-fitted TF-IDF vectorizer and a pre-trained
//! binary classifier (random forest or logistic regression) to get a
//! Positive/Negative label with a confidence score. A lexicon scorer adds
//! polarity and subjectivity, and the highest-weighted review terms explain
//! the result.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! reviewlens --artifacts-dir ./artifacts --http-port 8501
//! ```
//!
//! The artifacts directory must contain `classifier.bin` and
//! `vectorizer.bin`, written with [`save_artifact`]. If either is missing or
//! corrupt the UI still starts, shows the reason, and keeps analysis disabled.
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use reviewlens::prelude::*;
//!
//! let store = ArtifactStore::open(ArtifactPaths::new("./artifacts"));
//! let pipeline = store.pipeline();
//!
//! match pipeline.analyze("This movie was absolutely wonderful, a masterpiece!") {
//!     Ok(result) => println!("{} ({:.2}%)", result.label, result.confidence_percent()),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - [`reviewlens-core`](reviewlens_core) - Vectorizer, classifiers, lexicon scorer, pipeline
//! - [`reviewlens-storage`](reviewlens_storage) - Artifact files and startup loading
//! - [`reviewlens-api`](reviewlens_api) - Web UI

// Re-export core types
pub use reviewlens_core::{
    AnalysisResult, Artifacts, Classifier, Explanation, Label, Lexicon, LexiconScorer,
    LogisticRegression, Model, RandomForest, SentimentPipeline, SparseVector, TextVectorizer,
    TfidfVectorizer, TopTerm,
    Error, Result,
};

// Re-export storage
pub use reviewlens_storage::{load_artifacts, save_artifact, ArtifactKind, ArtifactPaths, ArtifactStore};

// Re-export API
pub use reviewlens_api::{RestApi, ServerConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AnalysisResult, Artifacts, Classifier, Label, SentimentPipeline, TextVectorizer,
        Error, Result,
        ArtifactPaths, ArtifactStore,
        RestApi, ServerConfig,
    };
}
