use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{ScoreResult, TestType};
use super::error::ScoringError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeFrequency {
    pub label: String,
    pub count: usize,
    /// Percent of respondents carrying this label.
    pub share: f64,
}

/// Aggregate view over many respondents of one instrument, for branch or
/// organization level review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSummary {
    pub test_type: TestType,
    pub respondents: usize,
    pub mean_normalized: BTreeMap<String, f64>,
    /// Most frequent first, ties ordered by label.
    pub primary_types: Vec<TypeFrequency>,
}

impl CohortSummary {
    pub fn from_results(results: &[ScoreResult]) -> Result<Self, ScoringError> {
        let first = results.first().ok_or(ScoringError::EmptyScores)?;
        let test_type = first.test_type;

        let mut totals: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        let mut labels: BTreeMap<String, usize> = BTreeMap::new();

        for result in results {
            if result.test_type != test_type {
                return Err(ScoringError::MixedInstruments {
                    expected: test_type,
                    found: result.test_type,
                });
            }

            for (key, value) in &result.normalized_scores {
                let entry = totals.entry(key.clone()).or_insert((0.0, 0));
                entry.0 += value;
                entry.1 += 1;
            }

            if let Some(label) = &result.primary_type {
                *labels.entry(label.clone()).or_insert(0) += 1;
            }
        }

        let respondents = results.len();
        let mean_normalized = totals
            .into_iter()
            .map(|(key, (sum, count))| (key, sum / count as f64))
            .collect();

        let mut primary_types: Vec<TypeFrequency> = labels
            .into_iter()
            .map(|(label, count)| TypeFrequency {
                label,
                count,
                share: count as f64 / respondents as f64 * 100.0,
            })
            .collect();
        primary_types.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));

        Ok(Self {
            test_type,
            respondents,
            mean_normalized,
            primary_types,
        })
    }

    pub fn dominant_type(&self) -> Option<&TypeFrequency> {
        self.primary_types.first()
    }
}
