use serde::{Deserialize, Serialize};

use crate::catalog::Emotion;
use crate::error::{EmotionError, Result};

/// One (label, score) pair out of the model's distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub label: String,
    pub score: f64,
}

/// Seam for the external model: text in, label distribution out. The model
/// itself lives outside this crate.
pub trait EmotionClassifier {
    fn classify(&self, text: &str) -> Result<Vec<EmotionScore>>;
}

/// Outcome of a check-in analysis. The distribution is sorted by descending
/// score, with the top label resolved against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub emotion: Emotion,
    pub label: String,
    pub confidence: f64,
    pub distribution: Vec<EmotionScore>,
}

pub fn analyze<C: EmotionClassifier>(classifier: &C, text: &str) -> Result<Analysis> {
    if text.trim().is_empty() {
        return Err(EmotionError::BlankInput);
    }
    analyze_scores(classifier.classify(text)?)
}

pub fn analyze_scores(mut distribution: Vec<EmotionScore>) -> Result<Analysis> {
    if distribution.is_empty() {
        return Err(EmotionError::EmptyDistribution);
    }

    distribution.sort_by(|a, b| b.score.total_cmp(&a.score));
    let top = distribution[0].clone();

    Ok(Analysis {
        emotion: Emotion::from_label(&top.label),
        label: top.label,
        confidence: top.score,
        distribution,
    })
}
