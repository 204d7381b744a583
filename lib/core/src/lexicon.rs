//! Lexicon-based polarity and subjectivity scoring
//!
//! Pattern-style scorer: every word found in the lexicon contributes a
//! polarity in [-1, 1] and a subjectivity in [0, 1]. Intensifiers scale the
//! word that follows them, negations flip and dampen it. The document score
//! is the mean over all assessed words.
//!
//! This runs independently of the trained classifier and never influences
//! the predicted label.

use ahash::{AHashMap, AHashSet};
use serde::Serialize;

/// Polarity multiplier applied to a negated sentiment word
const NEGATION_FACTOR: f32 = -0.5;
/// How many tokens after a negation word it can still apply
const NEGATION_WINDOW: usize = 3;
/// Upper bound on the combined multiplier of chained intensifiers
const MAX_INTENSITY: f32 = 4.0;

/// Polarity and subjectivity of a single lexicon word
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    pub polarity: f32,
    pub subjectivity: f32,
}

/// Document-level lexicon scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct SentimentScores {
    /// -1 (most negative) to 1 (most positive)
    pub polarity: f32,
    /// 0 (factual) to 1 (opinion-based)
    pub subjectivity: f32,
}

// (word, polarity, subjectivity)
const WORDS: &[(&str, f32, f32)] = &[
    // positive
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("beautiful", 0.85, 1.0),
    ("best", 1.0, 0.3),
    ("brilliant", 0.9, 1.0),
    ("captivating", 0.7, 0.9),
    ("charming", 0.5, 0.7),
    ("enjoy", 0.4, 0.5),
    ("enjoyable", 0.5, 0.6),
    ("enjoyed", 0.4, 0.5),
    ("excellent", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("fun", 0.3, 0.2),
    ("funny", 0.25, 0.75),
    ("gorgeous", 0.7, 0.9),
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("happy", 0.8, 1.0),
    ("hilarious", 0.5, 0.8),
    ("impressive", 1.0, 1.0),
    ("incredible", 0.9, 0.9),
    ("interesting", 0.5, 0.5),
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("lovely", 0.5, 0.75),
    ("masterpiece", 0.9, 0.9),
    ("memorable", 0.6, 0.7),
    ("moving", 0.4, 0.6),
    ("nice", 0.6, 1.0),
    ("perfect", 1.0, 1.0),
    ("pleasant", 0.73, 0.97),
    ("powerful", 0.3, 1.0),
    ("recommend", 0.5, 0.5),
    ("stunning", 0.5, 1.0),
    ("superb", 1.0, 1.0),
    ("touching", 0.5, 0.7),
    ("well", 0.3, 0.4),
    ("wonderful", 1.0, 1.0),
    ("worth", 0.3, 0.1),
    // negative
    ("annoying", -0.8, 0.9),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.67),
    ("bland", -0.5, 0.6),
    ("boring", -1.0, 1.0),
    ("disappointed", -0.75, 0.75),
    ("disappointing", -0.6, 0.7),
    ("dreadful", -0.9, 1.0),
    ("dull", -0.31, 0.69),
    ("forgettable", -0.5, 0.6),
    ("garbage", -0.8, 0.8),
    ("hate", -0.8, 0.9),
    ("hated", -0.9, 0.7),
    ("horrible", -1.0, 1.0),
    ("mediocre", -0.5, 0.6),
    ("mess", -0.4, 0.6),
    ("poor", -0.4, 0.6),
    ("pointless", -0.5, 0.6),
    ("predictable", -0.3, 0.6),
    ("ridiculous", -0.33, 0.67),
    ("sad", -0.5, 1.0),
    ("silly", -0.5, 0.9),
    ("slow", -0.3, 0.39),
    ("stupid", -0.8, 1.0),
    ("terrible", -1.0, 1.0),
    ("unwatchable", -0.9, 0.9),
    ("waste", -0.2, 0.1),
    ("weak", -0.38, 0.63),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    // emoticons
    (":)", 0.5, 1.0),
    (":-)", 0.5, 1.0),
    (":d", 0.8, 1.0),
    ("<3", 0.9, 1.0),
    (":(", -0.75, 1.0),
    (":-(", -0.75, 1.0),
    (":'(", -0.75, 1.0),
];

// (word, multiplier)
const INTENSIFIERS: &[(&str, f32)] = &[
    ("absolutely", 1.3),
    ("completely", 1.3),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("incredibly", 1.4),
    ("quite", 1.1),
    ("really", 1.3),
    ("so", 1.3),
    ("somewhat", 0.8),
    ("slightly", 0.7),
    ("too", 1.2),
    ("totally", 1.3),
    ("truly", 1.3),
    ("very", 1.3),
];

const NEGATIONS: &[&str] = &["not", "no", "never", "neither", "nor", "nothing", "cannot"];

/// Word list the scorer consults
#[derive(Debug, Clone)]
pub struct Lexicon {
    words: AHashMap<String, Assessment>,
    intensifiers: AHashMap<String, f32>,
    negations: AHashSet<String>,
}

impl Lexicon {
    /// Bundled English lexicon tuned for review vocabulary
    pub fn english() -> Self {
        Self::from_entries(
            WORDS.iter().map(|(w, p, s)| (w.to_string(), *p, *s)),
            INTENSIFIERS.iter().map(|(w, m)| (w.to_string(), *m)),
        )
    }

    /// Build a custom lexicon. Words are matched lowercase; polarity and
    /// subjectivity are clamped into their ranges.
    pub fn from_entries<W, I>(words: W, intensifiers: I) -> Self
    where
        W: IntoIterator<Item = (String, f32, f32)>,
        I: IntoIterator<Item = (String, f32)>,
    {
        let words = words
            .into_iter()
            .map(|(word, polarity, subjectivity)| {
                (
                    word.to_lowercase(),
                    Assessment {
                        polarity: polarity.clamp(-1.0, 1.0),
                        subjectivity: subjectivity.clamp(0.0, 1.0),
                    },
                )
            })
            .collect();
        let intensifiers = intensifiers
            .into_iter()
            .map(|(word, multiplier)| (word.to_lowercase(), multiplier.max(0.0)))
            .collect();
        let negations = NEGATIONS.iter().map(|w| w.to_string()).collect();

        Self { words, intensifiers, negations }
    }

    #[inline]
    pub fn assessment(&self, word: &str) -> Option<Assessment> {
        self.words.get(word).copied()
    }

    #[inline]
    pub fn intensity(&self, word: &str) -> Option<f32> {
        self.intensifiers.get(word).copied()
    }

    #[inline]
    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word) || word.ends_with("n't")
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::english()
    }
}

/// Rule-based polarity/subjectivity scorer
#[derive(Debug, Clone, Default)]
pub struct LexiconScorer {
    lexicon: Lexicon,
}

impl LexiconScorer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Lowercased whitespace tokens with surrounding punctuation removed.
    /// Tokens that are lexicon entries as written (emoticons) are kept whole.
    fn tokens<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        text.split_whitespace().filter_map(move |raw| {
            let lower = raw.to_lowercase().replace('\u{2019}', "'");
            if self.lexicon.words.contains_key(&lower) {
                return Some(lower);
            }
            let trimmed = lower.trim_matches(|c: char| !c.is_alphanumeric());
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    pub fn score(&self, text: &str) -> SentimentScores {
        let mut polarities = Vec::new();
        let mut subjectivities = Vec::new();

        let mut intensity = 1.0f32;
        // tokens seen since the last negation word
        let mut since_negation: Option<usize> = None;

        for token in self.tokens(text) {
            if self.lexicon.is_negation(&token) {
                since_negation = Some(0);
                intensity = 1.0;
                continue;
            }

            if let Some(multiplier) = self.lexicon.intensity(&token) {
                intensity = (intensity * multiplier).min(MAX_INTENSITY);
            } else if let Some(assessment) = self.lexicon.assessment(&token) {
                let mut polarity = assessment.polarity * intensity;
                let subjectivity = (assessment.subjectivity * intensity).min(1.0);
                if since_negation.is_some_and(|n| n < NEGATION_WINDOW) {
                    polarity *= NEGATION_FACTOR;
                    since_negation = None;
                }
                polarities.push(polarity.clamp(-1.0, 1.0));
                subjectivities.push(subjectivity);
                intensity = 1.0;
            } else {
                // Intensifiers only reach the word right after them
                intensity = 1.0;
            }

            if let Some(n) = since_negation.as_mut() {
                *n += 1;
                if *n > NEGATION_WINDOW {
                    since_negation = None;
                }
            }
        }

        if polarities.is_empty() {
            return SentimentScores::default();
        }

        let n = polarities.len() as f32;
        SentimentScores {
            polarity: (polarities.iter().sum::<f32>() / n).clamp(-1.0, 1.0),
            subjectivity: (subjectivities.iter().sum::<f32>() / n).clamp(0.0, 1.0),
        }
    }
}
