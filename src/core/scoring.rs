//! Scoring engine: similarity, agreement, back-translation fidelity, and
//! the weighted final-score selection.
//!
//! Pure synchronous computation over already-collected provider results.

use std::collections::HashMap;

use crate::core::config::ScoringWeights;
use crate::core::models::{ProviderResult, WordAggregate};

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Normalized edit-based similarity between two strings, in [0, 1].
///
/// Uses the indel distance (insertions and deletions only) over chars:
/// `1 - indel(a, b) / (|a| + |b|)`. Two empty strings compare as 1.0.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let total = a.len() + b.len();
    let indel = total - 2 * lcs_length(&a, &b);
    1.0 - indel as f64 / total as f64
}

/// Longest-common-subsequence length, single-row DP.
fn lcs_length(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut prev_diag = 0;
        for (j, &cb) in b.iter().enumerate() {
            let current = row[j + 1];
            row[j + 1] = if ca == cb {
                prev_diag + 1
            } else {
                row[j + 1].max(row[j])
            };
            prev_diag = current;
        }
    }
    row[b.len()]
}

/// Mean pairwise similarity of each provider's translation against every
/// other provider's translation.
///
/// A provider without a candidate scores 0.0. A provider whose comparison
/// set is empty (it is the only one with a candidate) also scores 0.0;
/// isolation is not rewarded.
pub fn compute_agreement_scores(results: &[ProviderResult]) -> HashMap<String, f64> {
    let mut scores = HashMap::new();
    for (i, result) in results.iter().enumerate() {
        let Some(translation) = result.translation() else {
            scores.insert(result.provider.clone(), 0.0);
            continue;
        };
        let similarities: Vec<f64> = results
            .iter()
            .enumerate()
            .filter(|(j, other)| *j != i && other.candidate.is_some())
            .map(|(_, other)| similarity_ratio(translation, other.translation().unwrap_or("")))
            .collect();
        let score = if similarities.is_empty() {
            0.0
        } else {
            similarities.iter().sum::<f64>() / similarities.len() as f64
        };
        scores.insert(result.provider.clone(), score);
    }
    scores
}

/// Similarity of each provider's back-translation to the original word;
/// 0.0 when the back-translation is absent.
pub fn compute_back_translation_scores(
    word: &str,
    results: &[ProviderResult],
) -> HashMap<String, f64> {
    results
        .iter()
        .map(|result| {
            let score = match result.back_translation.as_deref() {
                Some(back) if !back.is_empty() => similarity_ratio(word, back),
                _ => 0.0,
            };
            (result.provider.clone(), score)
        })
        .collect()
}

/// Combine the three signals per provider and select the winner.
///
/// Iterates results in collection order keeping a running maximum; the final
/// fields are updated only on a strict improvement, so the first provider
/// reaching the maximum wins ties. Leaves the final fields unset when
/// `results` is empty.
pub fn apply_final_scores(weights: &ScoringWeights, aggregate: &mut WordAggregate) {
    let mut best: Option<(f64, usize)> = None;
    for (i, result) in aggregate.results.iter().enumerate() {
        let self_confidence = result
            .candidate
            .as_ref()
            .map(|c| c.self_confidence)
            .unwrap_or(0.0);
        let agreement = aggregate
            .agreement_scores
            .get(&result.provider)
            .copied()
            .unwrap_or(0.0);
        let back = aggregate
            .back_translation_scores
            .get(&result.provider)
            .copied()
            .unwrap_or(0.0);
        let score = clamp01(
            weights.self_confidence * self_confidence
                + weights.agreement * agreement
                + weights.back_translation * back,
        );
        // strict improvement only: first-seen wins ties
        if best.map_or(true, |(max, _)| score > max) {
            best = Some((score, i));
        }
    }

    if let Some((score, i)) = best {
        let winner = &aggregate.results[i];
        aggregate.final_score = Some(score);
        aggregate.final_choice_provider = Some(winner.provider.clone());
        aggregate.final_translation = winner.translation().map(str::to_string);
        aggregate.final_gloss = winner.candidate.as_ref().and_then(|c| c.gloss.clone());
    }
}
