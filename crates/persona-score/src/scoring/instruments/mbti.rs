use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::InstrumentScorer;
use crate::scoring::domain::{Contribution, InstrumentDetails, ScoreResult, TestType};
use crate::scoring::error::ScoringError;
use crate::scoring::keys::{InstrumentKey, MbtiDimension};
use crate::scoring::normalizer::{accumulate, bipolar_percent};

/// Pole picked for a dimension whose net score is exactly zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MidpointRule {
    /// Zero sits on the `>= 50%` side, so the positive pole wins.
    #[default]
    PositivePole,
    NegativePole,
    /// Refuse to label a perfectly balanced dimension.
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MbtiConfig {
    #[serde(default)]
    pub midpoint: MidpointRule,
}

/// Resolved preference for one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionPreference {
    pub dimension: MbtiDimension,
    pub pole: char,
    /// Position on the 0-100 display scale, measured towards the positive pole.
    pub percent: f64,
    /// True when the net score was exactly zero and the midpoint rule decided.
    pub balanced: bool,
}

pub struct MbtiScorer;

impl InstrumentScorer for MbtiScorer {
    type Config = MbtiConfig;

    fn test_type(&self) -> TestType {
        TestType::Oejts
    }

    fn score(
        &self,
        contributions: &[Contribution],
        config: &MbtiConfig,
    ) -> Result<ScoreResult, ScoringError> {
        let tally = accumulate::<MbtiDimension>(contributions)?;

        let unanswered = tally.unanswered();
        if !unanswered.is_empty() {
            return Err(ScoringError::IncompleteInstrumentData {
                test_type: TestType::Oejts,
                missing: unanswered
                    .iter()
                    .map(|dimension| dimension.code().to_string())
                    .collect(),
            });
        }

        let normalized: BTreeMap<MbtiDimension, f64> = tally
            .sums
            .iter()
            .map(|(dimension, raw)| (*dimension, bipolar_percent(*raw)))
            .collect();

        let (code, preferences) = resolve_type(&tally.sums, config.midpoint)?;
        debug!(primary_type = %code, answers = contributions.len(), "scored mbti");

        ScoreResult::from_scores(
            &tally.sums,
            &normalized,
            Some(code),
            InstrumentDetails::Mbti { preferences },
        )
    }
}

/// Derives the four-letter type in `E/I, S/N, T/F, J/P` order.
pub fn resolve_type(
    raw: &BTreeMap<MbtiDimension, f64>,
    midpoint: MidpointRule,
) -> Result<(String, Vec<DimensionPreference>), ScoringError> {
    let mut code = String::with_capacity(4);
    let mut preferences = Vec::with_capacity(4);

    for dimension in MbtiDimension::ALL {
        let score = raw
            .get(&dimension)
            .copied()
            .ok_or_else(|| ScoringError::IncompleteInstrumentData {
                test_type: TestType::Oejts,
                missing: vec![dimension.code().to_string()],
            })?;

        let balanced = score == 0.0;
        let pole = if score > 0.0 {
            dimension.positive_pole()
        } else if score < 0.0 {
            dimension.negative_pole()
        } else {
            match midpoint {
                MidpointRule::PositivePole => dimension.positive_pole(),
                MidpointRule::NegativePole => dimension.negative_pole(),
                MidpointRule::Reject => {
                    return Err(ScoringError::UndecidedDimension {
                        dimension: dimension.code().to_string(),
                    })
                }
            }
        };

        code.push(pole);
        preferences.push(DimensionPreference {
            dimension,
            pole,
            percent: bipolar_percent(score),
            balanced,
        });
    }

    Ok((code, preferences))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contributions(ei: f64, sn: f64, tf: f64, jp: f64) -> Vec<Contribution> {
        vec![
            Contribution::new("EI", ei),
            Contribution::new("SN", sn),
            Contribution::new("TF", tf),
            Contribution::new("JP", jp),
        ]
    }

    #[test]
    fn sums_signed_contributions_per_dimension() {
        let answers = vec![
            Contribution::new("EI", 1.0),
            Contribution::new("EI", 0.5),
            Contribution::new("SN", -1.0),
            Contribution::new("TF", 0.75),
            Contribution::new("TF", -0.25),
            Contribution::new("JP", -0.5),
        ];

        let result = MbtiScorer
            .score(&answers, &MbtiConfig::default())
            .expect("scored");

        assert_eq!(result.raw("EI"), Some(1.5));
        assert_eq!(result.raw("TF"), Some(0.5));
        assert_eq!(result.normalized("EI"), Some(87.5));
        assert_eq!(result.normalized("JP"), Some(37.5));
        assert_eq!(result.primary_type.as_deref(), Some("ESFJ"));
    }

    #[test]
    fn missing_dimension_is_incomplete() {
        let answers = vec![
            Contribution::new("EI", 1.0),
            Contribution::new("SN", 1.0),
            Contribution::new("TF", 1.0),
        ];

        match MbtiScorer.score(&answers, &MbtiConfig::default()) {
            Err(ScoringError::IncompleteInstrumentData { test_type, missing }) => {
                assert_eq!(test_type, TestType::Oejts);
                assert_eq!(missing, vec!["JP".to_string()]);
            }
            other => panic!("expected incomplete data, got {other:?}"),
        }
    }

    #[test]
    fn zero_score_resolves_by_midpoint_rule() {
        let answers = contributions(0.0, 0.0, 0.0, 0.0);

        let positive = MbtiScorer
            .score(&answers, &MbtiConfig::default())
            .expect("positive pole default");
        assert_eq!(positive.primary_type.as_deref(), Some("ENFP"));
        assert_eq!(positive.normalized("EI"), Some(50.0));
        match &positive.details {
            InstrumentDetails::Mbti { preferences } => {
                assert!(preferences.iter().all(|preference| preference.balanced));
            }
            other => panic!("unexpected details {other:?}"),
        }

        let negative = MbtiScorer
            .score(
                &answers,
                &MbtiConfig {
                    midpoint: MidpointRule::NegativePole,
                },
            )
            .expect("negative pole");
        assert_eq!(negative.primary_type.as_deref(), Some("ISTJ"));

        let rejected = MbtiScorer.score(
            &answers,
            &MbtiConfig {
                midpoint: MidpointRule::Reject,
            },
        );
        assert_eq!(
            rejected,
            Err(ScoringError::UndecidedDimension {
                dimension: "EI".to_string()
            })
        );
    }

    #[test]
    fn out_of_range_raw_scores_are_not_clamped() {
        let result = MbtiScorer
            .score(&contributions(3.0, -3.0, 1.0, 1.0), &MbtiConfig::default())
            .expect("scored");
        assert_eq!(result.raw("EI"), Some(3.0));
        assert_eq!(result.normalized("EI"), Some(125.0));
        assert_eq!(result.normalized("SN"), Some(-25.0));
    }

    #[test]
    fn unknown_dimension_is_invalid_encoding() {
        let error = MbtiScorer
            .score(&[Contribution::new("XY", 1.0)], &MbtiConfig::default())
            .expect_err("invalid key");
        assert!(matches!(error, ScoringError::InvalidEncoding { .. }));
    }
}
