//! Word-level polarity estimation.
//!
//! The estimator averages the polarity and subjectivity of every known
//! sentiment word in a text. An intensifier right before a word scales it;
//! a negator within the two preceding words flips it at half strength.

use std::collections::HashMap;

use unicode_segmentation::UnicodeSegmentation;

/// Polarity and subjectivity of a text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Estimate {
    /// -1.0 to 1.0
    pub polarity: f64,
    /// 0.0 to 1.0
    pub subjectivity: f64,
}

/// One sentence with its own estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSentence {
    pub text: String,
    pub estimate: Estimate,
    pub word_count: usize,
}

/// Scores free text for polarity and subjectivity.
pub trait PolarityEstimator {
    /// Estimate for the text as a whole.
    fn estimate(&self, text: &str) -> Estimate;

    /// Split the text into sentences and estimate each one.
    fn sentences(&self, text: &str) -> Vec<ScoredSentence>;
}

/// (word, polarity, subjectivity)
const ADJECTIVES: &[(&str, f64, f64)] = &[
    // positive
    ("amazing", 0.6, 0.9),
    ("beautiful", 0.85, 1.0),
    ("best", 1.0, 0.3),
    ("bold", 0.4, 0.6),
    ("brilliant", 0.9, 1.0),
    ("captivating", 0.7, 0.9),
    ("compelling", 0.6, 0.8),
    ("delightful", 0.8, 0.9),
    ("elegant", 0.6, 0.8),
    ("engaging", 0.5, 0.6),
    ("excellent", 1.0, 1.0),
    ("exceptional", 0.7, 0.9),
    ("exciting", 0.6, 0.8),
    ("fantastic", 0.7, 0.9),
    ("fresh", 0.3, 0.5),
    ("gorgeous", 0.8, 1.0),
    ("great", 0.8, 0.75),
    ("groundbreaking", 0.7, 0.8),
    ("good", 0.7, 0.6),
    ("impressive", 0.8, 1.0),
    ("innovative", 0.6, 0.7),
    ("inventive", 0.6, 0.7),
    ("lovely", 0.5, 0.75),
    ("lush", 0.4, 0.6),
    ("masterful", 0.8, 0.9),
    ("masterpiece", 0.9, 0.9),
    ("memorable", 0.5, 0.7),
    ("outstanding", 0.9, 0.9),
    ("perfect", 1.0, 1.0),
    ("powerful", 0.5, 0.7),
    ("remarkable", 0.75, 0.75),
    ("rich", 0.4, 0.6),
    ("solid", 0.3, 0.5),
    ("spectacular", 0.8, 0.9),
    ("standout", 0.6, 0.7),
    ("strong", 0.4, 0.6),
    ("stunning", 0.8, 0.9),
    ("superb", 1.0, 1.0),
    ("thrilling", 0.7, 0.9),
    ("visionary", 0.7, 0.8),
    ("wonderful", 1.0, 1.0),
    // negative
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.67),
    ("bland", -0.5, 0.7),
    ("boring", -0.8, 1.0),
    ("clumsy", -0.5, 0.7),
    ("derivative", -0.5, 0.6),
    ("disappointing", -0.6, 0.7),
    ("dull", -0.6, 0.8),
    ("empty", -0.3, 0.5),
    ("flat", -0.3, 0.5),
    ("forgettable", -0.5, 0.6),
    ("generic", -0.4, 0.6),
    ("lackluster", -0.6, 0.8),
    ("lifeless", -0.6, 0.8),
    ("mediocre", -0.6, 0.8),
    ("messy", -0.4, 0.6),
    ("monotonous", -0.5, 0.7),
    ("pointless", -0.6, 0.8),
    ("poor", -0.4, 0.6),
    ("pretentious", -0.5, 0.9),
    ("redundant", -0.4, 0.5),
    ("tedious", -0.6, 0.8),
    ("terrible", -1.0, 1.0),
    ("tired", -0.4, 0.7),
    ("underwhelming", -0.6, 0.8),
    ("unimaginative", -0.6, 0.8),
    ("uninspired", -0.6, 0.8),
    ("weak", -0.4, 0.6),
    ("worst", -1.0, 1.0),
];

/// (word, multiplier)
const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.5),
    ("deeply", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("really", 1.3),
    ("so", 1.3),
    ("truly", 1.3),
    ("utterly", 1.5),
    ("very", 1.3),
];

const NEGATORS: &[&str] = &["not", "never", "no", "nothing", "hardly", "barely"];

/// Polarity flip applied to a negated word.
const NEGATION_FACTOR: f64 = -0.5;

/// Lexicon-driven `PolarityEstimator`.
#[derive(Debug, Clone)]
pub struct LexiconEstimator {
    words: HashMap<&'static str, (f64, f64)>,
    intensifiers: HashMap<&'static str, f64>,
}

impl LexiconEstimator {
    pub fn new() -> Self {
        Self {
            words: ADJECTIVES.iter().map(|&(w, p, s)| (w, (p, s))).collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    fn estimate_words(&self, words: &[String]) -> Estimate {
        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut hits = 0usize;

        for (i, word) in words.iter().enumerate() {
            let Some(&(polarity, subjectivity)) = self.words.get(word.as_str()) else {
                continue;
            };

            let mut polarity = polarity;
            let mut subjectivity = subjectivity;

            if let Some(prev) = i.checked_sub(1).map(|j| words[j].as_str()) {
                if let Some(&factor) = self.intensifiers.get(prev) {
                    polarity *= factor;
                    subjectivity *= factor;
                }
            }

            let window = &words[i.saturating_sub(2)..i];
            if window.iter().any(|w| is_negator(w)) {
                polarity *= NEGATION_FACTOR;
            }

            polarity_sum += polarity.clamp(-1.0, 1.0);
            subjectivity_sum += subjectivity.clamp(0.0, 1.0);
            hits += 1;
        }

        if hits == 0 {
            return Estimate::default();
        }

        Estimate {
            polarity: (polarity_sum / hits as f64).clamp(-1.0, 1.0),
            subjectivity: (subjectivity_sum / hits as f64).clamp(0.0, 1.0),
        }
    }
}

impl Default for LexiconEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityEstimator for LexiconEstimator {
    fn estimate(&self, text: &str) -> Estimate {
        self.estimate_words(&words(text))
    }

    fn sentences(&self, text: &str) -> Vec<ScoredSentence> {
        text.unicode_sentences()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|sentence| {
                let words = words(sentence);
                ScoredSentence {
                    text: sentence.to_string(),
                    estimate: self.estimate_words(&words),
                    word_count: words.len(),
                }
            })
            .collect()
    }
}

/// Lowercased words of a text.
fn words(text: &str) -> Vec<String> {
    text.unicode_words().map(str::to_lowercase).collect()
}

fn is_negator(word: &str) -> bool {
    NEGATORS.contains(&word) || word.ends_with("n't")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_sentiment_words() {
        let estimator = LexiconEstimator::new();
        let estimate = estimator.estimate("The album was released on a Tuesday.");
        assert_eq!(estimate, Estimate::default());
    }

    #[test]
    fn test_positive_text() {
        let estimator = LexiconEstimator::new();
        let estimate = estimator.estimate("This brilliant album is a masterpiece.");
        assert!(estimate.polarity > 0.5);
        assert!(estimate.subjectivity > 0.5);
    }

    #[test]
    fn test_negation_flips() {
        let estimator = LexiconEstimator::new();
        let plain = estimator.estimate("The record is good.");
        let negated = estimator.estimate("The record is not good.");
        assert!(plain.polarity > 0.0);
        assert!(negated.polarity < 0.0);
    }

    #[test]
    fn test_contraction_negates() {
        let estimator = LexiconEstimator::new();
        let negated = estimator.estimate("It isn't great.");
        assert!(negated.polarity < 0.0);
    }

    #[test]
    fn test_intensifier_is_clamped() {
        let estimator = LexiconEstimator::new();
        let estimate = estimator.estimate("Absolutely perfect.");
        assert_eq!(estimate.polarity, 1.0);
        assert!(estimate.subjectivity <= 1.0);
    }

    #[test]
    fn test_sentence_segmentation() {
        let estimator = LexiconEstimator::new();
        let sentences = estimator.sentences("A dull record. Some songs are brilliant and bold!");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "A dull record.");
        assert_eq!(sentences[0].word_count, 3);
        assert!(sentences[0].estimate.polarity < 0.0);
        assert!(sentences[1].estimate.polarity > 0.0);
    }
}
