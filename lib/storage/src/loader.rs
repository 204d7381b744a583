use reviewlens_core::{Artifacts, Classifier, Error, Model, Result, SentimentPipeline, TextVectorizer, TfidfVectorizer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

use crate::artifact::{read_artifact, ArtifactKind};

pub const DEFAULT_ARTIFACTS_DIR: &str = "./artifacts";
pub const DEFAULT_CLASSIFIER_FILE: &str = "classifier.bin";
pub const DEFAULT_VECTORIZER_FILE: &str = "vectorizer.bin";

/// Fixed location of the two artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub dir: PathBuf,
    pub classifier_file: String,
    pub vectorizer_file: String,
}

impl ArtifactPaths {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            classifier_file: DEFAULT_CLASSIFIER_FILE.to_string(),
            vectorizer_file: DEFAULT_VECTORIZER_FILE.to_string(),
        }
    }

    #[must_use]
    pub fn with_classifier_file(mut self, name: impl Into<String>) -> Self {
        self.classifier_file = name.into();
        self
    }

    #[must_use]
    pub fn with_vectorizer_file(mut self, name: impl Into<String>) -> Self {
        self.vectorizer_file = name.into();
        self
    }

    #[inline]
    pub fn classifier_path(&self) -> PathBuf {
        self.dir.join(&self.classifier_file)
    }

    #[inline]
    pub fn vectorizer_path(&self) -> PathBuf {
        self.dir.join(&self.vectorizer_file)
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::new(DEFAULT_ARTIFACTS_DIR)
    }
}

fn unavailable(path: &Path, cause: Error) -> Error {
    let cause = match cause {
        Error::InvalidArtifact(msg) => msg,
        other => other.to_string(),
    };
    Error::ArtifactUnavailable(format!("{} could not be loaded: {}", path.display(), cause))
}

/// Load and cross-check both artifacts.
///
/// Every failure (missing file, unreadable, wrong kind, corrupt, or a
/// classifier trained on a different feature space) is reported as
/// [`Error::ArtifactUnavailable`] with a message naming the file.
pub fn load_artifacts(paths: &ArtifactPaths) -> Result<Artifacts> {
    let classifier_path = paths.classifier_path();
    let vectorizer_path = paths.vectorizer_path();

    let missing: Vec<String> = [&classifier_path, &vectorizer_path]
        .iter()
        .filter(|p| !p.is_file())
        .map(|p| p.display().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(Error::ArtifactUnavailable(format!(
            "Model or vectorizer files not found. Ensure '{}' and '{}' are in {}. Missing: {}",
            paths.classifier_file,
            paths.vectorizer_file,
            paths.dir.display(),
            missing.join(", ")
        )));
    }

    let model: Model = read_artifact(&classifier_path, ArtifactKind::Classifier)
        .and_then(|m: Model| m.validate().map(|_| m))
        .map_err(|e| unavailable(&classifier_path, e))?;
    let vectorizer: TfidfVectorizer = read_artifact(&vectorizer_path, ArtifactKind::Vectorizer)
        .map_err(|e| unavailable(&vectorizer_path, e))?;

    info!(
        "Loaded {} classifier ({} features) and vectorizer ({} terms)",
        model.kind(),
        model.n_features(),
        vectorizer.n_features()
    );

    Artifacts::new(Arc::new(vectorizer), Arc::new(model)).map_err(|e| match e {
        Error::InvalidDimension { expected, actual } => Error::ArtifactUnavailable(format!(
            "classifier expects {} features but the vectorizer produces {}",
            expected, actual
        )),
        other => other,
    })
}

/// Outcome of the one-time startup load, held for the process lifetime
#[derive(Debug)]
pub struct ArtifactStore {
    paths: ArtifactPaths,
    artifacts: std::result::Result<Artifacts, String>,
}

impl ArtifactStore {
    /// Attempt the load once. Never fails: an unavailable store is a valid
    /// state in which analysis is disabled. There is no retry.
    pub fn open(paths: ArtifactPaths) -> Self {
        let artifacts = match load_artifacts(&paths) {
            Ok(artifacts) => {
                info!("Artifacts ready from {:?}", paths.dir);
                Ok(artifacts)
            }
            Err(e) => {
                error!("Sentiment analysis disabled: {}", e);
                Err(match e {
                    Error::ArtifactUnavailable(reason) => reason,
                    other => other.to_string(),
                })
            }
        };
        Self { paths, artifacts }
    }

    #[inline]
    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.artifacts.is_ok()
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        self.artifacts.as_ref().err().map(String::as_str)
    }

    /// Build the inference pipeline over whatever was loaded
    pub fn pipeline(&self) -> SentimentPipeline {
        match &self.artifacts {
            Ok(artifacts) => SentimentPipeline::new(artifacts.clone()),
            Err(reason) => SentimentPipeline::unavailable(reason.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::save_artifact;
    use reviewlens_core::{DecisionTree, Label, LogisticRegression, RandomForest, TreeNode};
    use tempfile::TempDir;

    fn write_fixture(dir: &Path, model: Model) {
        let terms = vec!["dreadful".to_string(), "superb".to_string()];
        let vectorizer = TfidfVectorizer::new(terms, vec![1.0, 1.0]).unwrap();
        save_artifact(&dir.join(DEFAULT_VECTORIZER_FILE), ArtifactKind::Vectorizer, &vectorizer).unwrap();
        save_artifact(&dir.join(DEFAULT_CLASSIFIER_FILE), ArtifactKind::Classifier, &model).unwrap();
    }

    fn forest() -> Model {
        let tree = DecisionTree::new(vec![
            TreeNode::Split { feature: 1, threshold: 0.0, left: 1, right: 2 },
            TreeNode::Leaf { counts: [7.0, 3.0] },
            TreeNode::Leaf { counts: [1.0, 9.0] },
        ]);
        Model::from(RandomForest::new(2, vec![tree]).unwrap())
    }

    #[test]
    fn test_load_forest_artifacts() {
        let dir = TempDir::new().unwrap();
        write_fixture(dir.path(), forest());

        let store = ArtifactStore::open(ArtifactPaths::new(dir.path()));
        assert!(store.is_available());
        let result = store.pipeline().analyze("Superb!").unwrap();
        assert_eq!(result.label, Label::Positive);
        assert!((result.confidence - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_missing_files_reported() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::open(ArtifactPaths::new(dir.path()));
        assert!(!store.is_available());
        let reason = store.unavailable_reason().unwrap();
        assert!(reason.contains("not found"));
        assert!(reason.contains(DEFAULT_CLASSIFIER_FILE));

        let err = store.pipeline().analyze("a fine film").unwrap_err();
        assert!(matches!(err, Error::ArtifactUnavailable(_)));
    }

    #[test]
    fn test_one_file_missing() {
        let dir = TempDir::new().unwrap();
        write_fixture(dir.path(), forest());
        std::fs::remove_file(dir.path().join(DEFAULT_VECTORIZER_FILE)).unwrap();

        let err = load_artifacts(&ArtifactPaths::new(dir.path())).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Missing"));
        assert!(msg.contains(DEFAULT_VECTORIZER_FILE));
    }

    #[test]
    fn test_corrupt_file_reported() {
        let dir = TempDir::new().unwrap();
        write_fixture(dir.path(), forest());
        std::fs::write(dir.path().join(DEFAULT_CLASSIFIER_FILE), b"garbage").unwrap();

        let err = load_artifacts(&ArtifactPaths::new(dir.path())).unwrap_err();
        assert!(matches!(err, Error::ArtifactUnavailable(ref msg) if msg.contains(DEFAULT_CLASSIFIER_FILE)));
    }

    #[test]
    fn test_swapped_files_reported() {
        let dir = TempDir::new().unwrap();
        write_fixture(dir.path(), forest());
        let paths = ArtifactPaths::new(dir.path())
            .with_classifier_file(DEFAULT_VECTORIZER_FILE)
            .with_vectorizer_file(DEFAULT_CLASSIFIER_FILE);

        let err = load_artifacts(&paths).unwrap_err();
        assert!(err.to_string().contains("expected a classifier"));
    }

    #[test]
    fn test_feature_space_mismatch() {
        let dir = TempDir::new().unwrap();
        let model = Model::from(LogisticRegression::new(vec![1.0, 1.0, 1.0], 0.0).unwrap());
        write_fixture(dir.path(), model);

        let err = load_artifacts(&ArtifactPaths::new(dir.path())).unwrap_err();
        assert!(matches!(err, Error::ArtifactUnavailable(ref msg) if msg.contains("3 features")));
    }

    #[test]
    fn test_default_paths() {
        let paths = ArtifactPaths::default();
        assert_eq!(paths.classifier_path(), Path::new("./artifacts/classifier.bin"));
        assert_eq!(paths.vectorizer_path(), Path::new("./artifacts/vectorizer.bin"));
    }
}
