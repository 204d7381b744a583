// Integration tests for ReviewLens
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reviewlens_core::{
    DecisionTree, Error, Label, LogisticRegression, Model, RandomForest, SentimentPipeline,
    TfidfVectorizer, TreeNode,
};
use reviewlens_storage::{load_artifacts, save_artifact, ArtifactKind, ArtifactPaths, ArtifactStore};
use std::path::Path;
use tempfile::TempDir;

const TERMS: [&str; 16] = [
    "absolutely", "acting", "awful", "boring", "complete", "great", "masterpiece", "movie",
    "of", "plot", "terrible", "this", "time", "was", "waste", "wonderful",
];
const IDF: [f32; 16] = [
    2.0, 1.6, 2.4, 2.2, 1.9, 1.7, 3.0, 1.2, 1.0, 1.5, 2.5, 1.1, 1.3, 1.1, 2.1, 2.8,
];
const WEIGHTS: [f32; 16] = [
    0.5, 0.0, -3.0, -2.5, -0.2, 2.5, 3.0, 0.0, 0.0, 0.0, -3.0, 0.0, -0.2, 0.0, -2.5, 3.0,
];

const POSITIVE_REVIEW: &str = "This movie was absolutely wonderful, a masterpiece!";
const NEGATIVE_REVIEW: &str = "Terrible, boring, a complete waste of time.";

fn vectorizer() -> TfidfVectorizer {
    TfidfVectorizer::new(TERMS.iter().map(|s| s.to_string()).collect(), IDF.to_vec()).unwrap()
}

fn logistic() -> Model {
    Model::from(LogisticRegression::new(WEIGHTS.to_vec(), 0.1).unwrap())
}

fn forest() -> Model {
    // masterpiece (6) then terrible (10)
    let a = DecisionTree::new(vec![
        TreeNode::Split { feature: 6, threshold: 0.0, left: 1, right: 2 },
        TreeNode::Split { feature: 10, threshold: 0.0, left: 3, right: 4 },
        TreeNode::Leaf { counts: [1.0, 9.0] },
        TreeNode::Leaf { counts: [4.0, 6.0] },
        TreeNode::Leaf { counts: [9.0, 1.0] },
    ]);
    // wonderful (15) then boring (3)
    let b = DecisionTree::new(vec![
        TreeNode::Split { feature: 15, threshold: 0.0, left: 1, right: 2 },
        TreeNode::Split { feature: 3, threshold: 0.0, left: 3, right: 4 },
        TreeNode::Leaf { counts: [2.0, 8.0] },
        TreeNode::Leaf { counts: [5.0, 5.0] },
        TreeNode::Leaf { counts: [8.0, 2.0] },
    ]);
    Model::from(RandomForest::new(TERMS.len(), vec![a, b]).unwrap())
}

fn write_artifacts(dir: &Path, model: &Model) -> ArtifactPaths {
    let paths = ArtifactPaths::new(dir);
    save_artifact(&paths.vectorizer_path(), ArtifactKind::Vectorizer, &vectorizer()).unwrap();
    save_artifact(&paths.classifier_path(), ArtifactKind::Classifier, model).unwrap();
    paths
}

fn pipeline_for(model: Model) -> (TempDir, SentimentPipeline) {
    let dir = TempDir::new().unwrap();
    let paths = write_artifacts(dir.path(), &model);
    let store = ArtifactStore::open(paths);
    assert!(store.is_available(), "{:?}", store.unavailable_reason());
    let pipeline = store.pipeline();
    (dir, pipeline)
}

#[test]
fn test_positive_review() {
    for model in [logistic(), forest()] {
        let (_dir, pipeline) = pipeline_for(model);
        let result = pipeline.analyze(POSITIVE_REVIEW).unwrap();

        assert_eq!(result.label, Label::Positive);
        assert!(result.polarity > 0.0);
        let terms: Vec<_> = result.top_terms.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(terms, vec!["masterpiece", "wonderful", "absolutely", "movie", "this"]);
        assert!(result.explanation_text().contains("positive review"));
    }
}

#[test]
fn test_negative_review() {
    for model in [logistic(), forest()] {
        let (_dir, pipeline) = pipeline_for(model);
        let result = pipeline.analyze(NEGATIVE_REVIEW).unwrap();

        assert_eq!(result.label, Label::Negative);
        assert!(result.polarity < 0.0);
        assert_eq!(result.top_terms[0].term, "terrible");
        assert!(result.explanation_text().contains("negative review"));
    }
}

#[test]
fn test_forest_confidence_is_max_probability() {
    let (_dir, pipeline) = pipeline_for(forest());
    let result = pipeline.analyze(POSITIVE_REVIEW).unwrap();
    assert!((result.probabilities[1] - 0.85).abs() < 1e-6);
    assert!((result.confidence - 0.85).abs() < 1e-6);
    assert!((result.confidence_percent() - 85.0).abs() < 1e-4);
}

#[test]
fn test_whitespace_only_review() {
    let (_dir, pipeline) = pipeline_for(logistic());
    let err = pipeline.analyze("   ").unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn test_missing_artifacts() {
    let dir = TempDir::new().unwrap();
    let paths = ArtifactPaths::new(dir.path());

    assert!(matches!(load_artifacts(&paths), Err(Error::ArtifactUnavailable(_))));

    let store = ArtifactStore::open(paths);
    assert!(!store.is_available());
    let pipeline = store.pipeline();
    assert!(matches!(
        pipeline.analyze(POSITIVE_REVIEW),
        Err(Error::ArtifactUnavailable(_))
    ));
    // Still usable for input validation afterwards
    assert!(matches!(pipeline.analyze(" "), Err(Error::InvalidInput(_))));
}

#[test]
fn test_out_of_vocabulary_review() {
    for model in [logistic(), forest()] {
        let (_dir, pipeline) = pipeline_for(model);
        let result = pipeline.analyze("#$%^ &*() ~~~ qwzx").unwrap();

        assert!(result.top_terms.is_empty());
        assert!(result.explanation.is_neutral());
        assert!(result.explanation_text().contains("neutral"));
        assert!(result.confidence >= 0.5);
    }

    let (_dir, pipeline) = pipeline_for(forest());
    let result = pipeline.analyze("#$%^").unwrap();
    assert_eq!(result.label, Label::Positive);
    assert!((result.confidence - 0.55).abs() < 1e-6);
}

#[test]
fn test_result_properties_hold_for_varied_input() {
    let mut inputs: Vec<String> = vec![
        "wonderful".to_string(),
        "!!!".to_string(),
        "...?".to_string(),
        "not great, not terrible".to_string(),
        "Ünïcödé wörds 🎬 only".to_string(),
        "great ".repeat(200),
        format!("{}wonderful {}terrible", "extremely ".repeat(250), "extremely ".repeat(250)),
    ];

    let mut rng = StdRng::seed_from_u64(7);
    let vocab: Vec<&str> = TERMS.iter().copied().chain(["film", "the", "and", ":)", "!"]).collect();
    for _ in 0..50 {
        let len = rng.random_range(1..20);
        let words: Vec<&str> = (0..len).map(|_| vocab[rng.random_range(0..vocab.len())]).collect();
        inputs.push(words.join(" "));
    }

    for model in [logistic(), forest()] {
        let (_dir, pipeline) = pipeline_for(model);
        for input in &inputs {
            let result = pipeline.analyze(input).unwrap();

            assert!(matches!(result.label, Label::Positive | Label::Negative));
            let max = result.probabilities[0].max(result.probabilities[1]);
            assert_eq!(result.confidence, max);
            assert!((50.0..=100.0).contains(&result.confidence_percent()), "{}", input);
            assert!((-1.0..=1.0).contains(&result.polarity), "{}", input);
            assert!((0.0..=1.0).contains(&result.subjectivity), "{}", input);
            assert!(result.top_terms.len() <= 5);
            assert!(result.top_terms.iter().all(|t| t.weight > 0.0));
            assert_eq!(result.explanation.is_neutral(), result.top_terms.is_empty());

            let again = pipeline.analyze(input).unwrap();
            assert_eq!(result, again);
        }
    }
}

#[test]
fn test_corrupt_classifier_disables_analysis() {
    let dir = TempDir::new().unwrap();
    let paths = write_artifacts(dir.path(), &logistic());
    std::fs::write(paths.classifier_path(), b"\x00\x01truncated").unwrap();

    let store = ArtifactStore::open(paths);
    assert!(!store.is_available());
    assert!(store.unavailable_reason().unwrap().contains("classifier.bin"));
}

#[test]
fn test_result_serializes_to_json() {
    let (_dir, pipeline) = pipeline_for(logistic());
    let result = pipeline.analyze(POSITIVE_REVIEW).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["label"], "Positive");
    assert_eq!(json["explanation"]["kind"], "indicators");
    assert_eq!(json["top_terms"].as_array().unwrap().len(), 5);
    assert_eq!(json["top_terms"][0]["term"], "masterpiece");

    let neutral = serde_json::to_value(pipeline.analyze("qwzx").unwrap()).unwrap();
    assert_eq!(neutral["explanation"]["kind"], "neutral");
}
