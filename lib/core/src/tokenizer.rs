// Word tokenization shared by the TF-IDF vectorizer
use ahash::AHashSet;

/// Tokenize text into words.
///
/// A token is a maximal run of alphanumeric characters or `_` that is at
/// least two characters long, matching the default word pattern fitted
/// vectorizers are trained with.
#[inline]
pub fn tokenize(text: &str, lowercase: bool) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|s| s.chars().count() > 1) // Filter single chars
        .map(|s| if lowercase { s.to_lowercase() } else { s.to_string() })
        .collect()
}

/// Expand tokens into word n-grams for `min_n..=max_n`, joined with a single space
pub fn ngrams(tokens: &[String], min_n: usize, max_n: usize) -> Vec<String> {
    let min_n = min_n.max(1);
    if max_n == 1 {
        return tokens.to_vec();
    }

    let mut grams = Vec::new();
    for n in min_n..=max_n {
        if n > tokens.len() {
            break;
        }
        for window in tokens.windows(n) {
            grams.push(window.join(" "));
        }
    }
    grams
}

/// Tokenize, drop stop words, then expand into n-grams
pub fn analyze(
    text: &str,
    lowercase: bool,
    stop_words: &AHashSet<String>,
    ngram_range: (usize, usize),
) -> Vec<String> {
    let mut tokens = tokenize(text, lowercase);
    if !stop_words.is_empty() {
        tokens.retain(|t| !stop_words.contains(t));
    }
    ngrams(&tokens, ngram_range.0, ngram_range.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_punctuation_and_single_chars() {
        let tokens = tokenize("This movie was absolutely wonderful, a masterpiece!", true);
        assert_eq!(
            tokens,
            vec!["this", "movie", "was", "absolutely", "wonderful", "masterpiece"]
        );
    }

    #[test]
    fn test_tokenize_splits_on_apostrophes() {
        assert_eq!(tokenize("Don't MISS it", true), vec!["don", "miss", "it"]);
        assert_eq!(tokenize("Don't MISS it", false), vec!["Don", "MISS", "it"]);
    }

    #[test]
    fn test_tokenize_symbols_only() {
        assert!(tokenize("@#$ %%% ^^^ !!", true).is_empty());
    }

    #[test]
    fn test_ngrams() {
        let tokens: Vec<String> = ["not", "very", "good"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            ngrams(&tokens, 1, 2),
            vec!["not", "very", "good", "not very", "very good"]
        );
        assert_eq!(ngrams(&tokens, 2, 2), vec!["not very", "very good"]);
        assert_eq!(ngrams(&tokens, 1, 1), tokens);
    }

    #[test]
    fn test_analyze_removes_stop_words_before_ngrams() {
        let stop: AHashSet<String> = ["the"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            analyze("the plot the twist", true, &stop, (1, 2)),
            vec!["plot", "twist", "plot twist"]
        );
    }
}
