//! Batch statistics over reviews that already carry sentiment.

use crate::models::{Review, SentimentSample, SentimentSummary};

use super::round2;

/// Summarize the sentiment of a batch of reviews.
///
/// Reviews without sentiment are skipped. Returns `None` when none are left.
pub fn summary_stats(reviews: &[Review]) -> Option<SentimentSummary> {
    let samples: Vec<SentimentSample> = reviews
        .iter()
        .filter_map(|review| {
            review.sentiment.as_ref().map(|s| SentimentSample {
                title: review.title.clone(),
                artist: review.artist.clone(),
                score: review.score,
                polarity: s.polarity,
                subjectivity: s.subjectivity,
            })
        })
        .collect();

    let first = samples.first()?;
    let n = samples.len() as f64;

    let mut most_positive = first;
    let mut most_negative = first;
    for sample in &samples[1..] {
        if sample.polarity > most_positive.polarity {
            most_positive = sample;
        }
        if sample.polarity < most_negative.polarity {
            most_negative = sample;
        }
    }

    let pairs: Vec<(f64, f64)> = samples
        .iter()
        .filter_map(|s| s.score.map(|score| (score, s.polarity)))
        .collect();

    Some(SentimentSummary {
        avg_polarity: round2(samples.iter().map(|s| s.polarity).sum::<f64>() / n),
        avg_subjectivity: round2(samples.iter().map(|s| s.subjectivity).sum::<f64>() / n),
        correlation_score_sentiment: pearson(&pairs).map(round2),
        most_positive: most_positive.clone(),
        most_negative: most_negative.clone(),
    })
}

/// Pearson correlation coefficient.
///
/// Undefined (None) for fewer than two pairs or a constant series.
fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for &(x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}
