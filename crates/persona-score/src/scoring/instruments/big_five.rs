use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::InstrumentScorer;
use crate::scoring::domain::{Contribution, InstrumentDetails, ScoreResult, TestType};
use crate::scoring::error::ScoringError;
use crate::scoring::keys::{BigFiveTrait, InstrumentKey};
use crate::scoring::normalizer::{accumulate, scale_all, ScaleMaxima};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BigFiveConfig {
    /// Highest raw sum each trait can reach with the current question bank.
    pub maxima: ScaleMaxima,
}

pub struct BigFiveScorer;

impl InstrumentScorer for BigFiveScorer {
    type Config = BigFiveConfig;

    fn test_type(&self) -> TestType {
        TestType::BigFive
    }

    fn score(
        &self,
        contributions: &[Contribution],
        config: &BigFiveConfig,
    ) -> Result<ScoreResult, ScoringError> {
        let maxima = config.maxima.resolve::<BigFiveTrait>()?;
        let tally = accumulate::<BigFiveTrait>(contributions)?;

        if let Some(negative) = contributions.iter().find(|answer| answer.points < 0.0) {
            return Err(ScoringError::InvalidAnswerValue {
                test_type: TestType::BigFive,
                key: negative.key.clone(),
                value: negative.points,
            });
        }

        let underpowered: Vec<String> = tally
            .unanswered()
            .iter()
            .map(|trait_key| trait_key.code().to_string())
            .collect();
        if !underpowered.is_empty() {
            warn!(traits = ?underpowered, "big five traits scored without answers");
        }

        let normalized = scale_all(&tally.sums, &maxima)?;
        debug!(answers = contributions.len(), "scored big five");

        // Multi-dimensional profile, never reduced to a single type label.
        ScoreResult::from_scores(
            &tally.sums,
            &normalized,
            None,
            InstrumentDetails::BigFive { underpowered },
        )
    }
}
