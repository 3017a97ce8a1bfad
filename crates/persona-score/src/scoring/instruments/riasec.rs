use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::InstrumentScorer;
use crate::scoring::domain::{Contribution, InstrumentDetails, ScoreResult, TestType};
use crate::scoring::error::ScoringError;
use crate::scoring::keys::{InstrumentKey, RiasecType};
use crate::scoring::normalizer::{accumulate, rank_descending, scale_all, ScaleMaxima};
use RiasecType::{A, C, E, I, R, S};

/// Relationship between the two leading themes on the Holland hexagon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Consistency {
    High,
    Medium,
    Low,
    Insufficient,
}

impl Consistency {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Insufficient => "Insufficient",
        }
    }
}

/// Every unordered pair of distinct themes. Neighbors on the hexagon are
/// High, one step removed Medium, opposite corners Low.
const CONSISTENCY_TABLE: [(RiasecType, RiasecType, Consistency); 15] = [
    (R, I, Consistency::High),
    (I, A, Consistency::High),
    (A, S, Consistency::High),
    (S, E, Consistency::High),
    (E, C, Consistency::High),
    (C, R, Consistency::High),
    (R, A, Consistency::Medium),
    (I, S, Consistency::Medium),
    (A, E, Consistency::Medium),
    (S, C, Consistency::Medium),
    (E, R, Consistency::Medium),
    (C, I, Consistency::Medium),
    (R, S, Consistency::Low),
    (I, E, Consistency::Low),
    (A, C, Consistency::Low),
];

/// Looks the pair up in either order. Identical letters are `Insufficient`.
pub fn classify_consistency(first: RiasecType, second: RiasecType) -> Consistency {
    CONSISTENCY_TABLE
        .iter()
        .find(|(a, b, _)| (*a == first && *b == second) || (*a == second && *b == first))
        .map(|(_, _, tier)| *tier)
        .unwrap_or(Consistency::Insufficient)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiasecConfig {
    pub maxima: ScaleMaxima,
}

pub struct RiasecScorer;

impl InstrumentScorer for RiasecScorer {
    type Config = RiasecConfig;

    fn test_type(&self) -> TestType {
        TestType::Riasec
    }

    fn score(
        &self,
        contributions: &[Contribution],
        config: &RiasecConfig,
    ) -> Result<ScoreResult, ScoringError> {
        let maxima = config.maxima.resolve::<RiasecType>()?;
        let tally = accumulate::<RiasecType>(contributions)?;

        if let Some(negative) = contributions.iter().find(|answer| answer.points < 0.0) {
            return Err(ScoringError::InvalidAnswerValue {
                test_type: TestType::Riasec,
                key: negative.key.clone(),
                value: negative.points,
            });
        }

        let underpowered: Vec<String> = tally
            .unanswered()
            .iter()
            .map(|kind| kind.code().to_string())
            .collect();
        if !underpowered.is_empty() {
            warn!(types = ?underpowered, "riasec types scored without answers");
        }

        let ranking = rank_descending(&tally.sums, |a, b| a.letter().cmp(&b.letter()));
        let holland_code = holland_code(&ranking);
        let consistency = match ranking.as_slice() {
            [first, second, ..] => classify_consistency(*first, *second),
            _ => Consistency::Insufficient,
        };

        let normalized = scale_all(&tally.sums, &maxima)?;
        debug!(%holland_code, consistency = consistency.label(), "scored riasec");

        ScoreResult::from_scores(
            &tally.sums,
            &normalized,
            Some(holland_code.clone()),
            InstrumentDetails::Riasec {
                ranking,
                holland_code,
                consistency,
                underpowered,
            },
        )
    }
}

fn holland_code(ranking: &[RiasecType]) -> String {
    ranking.iter().take(3).map(|kind| kind.letter()).collect()
}
