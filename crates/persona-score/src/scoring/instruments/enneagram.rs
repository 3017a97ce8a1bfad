use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::InstrumentScorer;
use crate::scoring::domain::{Contribution, InstrumentDetails, ScoreResult, TestType};
use crate::scoring::error::ScoringError;
use crate::scoring::keys::{EnneagramType, InstrumentKey};
use crate::scoring::normalizer::{accumulate, rank_descending, scale_all, ScaleMaxima};

/// Wing of a primary type, chosen between its two neighbors on the circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Wing {
    Single {
        wing: EnneagramType,
    },
    /// Both neighbors scored and tied.
    Balanced {
        lower: EnneagramType,
        upper: EnneagramType,
    },
    /// Neither neighbor has a score.
    Absent,
}

impl Wing {
    pub fn is_balanced(&self) -> bool {
        matches!(self, Self::Balanced { .. })
    }
}

/// Primary type plus wing, as resolved from a score map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnneagramProfile {
    pub primary: EnneagramType,
    pub wing: Wing,
    /// True when the primary type came from the caller instead of the scores.
    pub overridden: bool,
}

impl EnneagramProfile {
    /// `"4w3"`, `"4w3/5"` for balanced wings, or `"4"` with no scored neighbor.
    pub fn label(&self) -> String {
        match self.wing {
            Wing::Single { wing } => format!("{}w{}", self.primary, wing),
            Wing::Balanced { lower, upper } => format!("{}w{}/{}", self.primary, lower, upper),
            Wing::Absent => self.primary.to_string(),
        }
    }
}

/// Resolves primary type and wing from whatever scores are present.
///
/// A type missing from `scores` has no score at all, which is different from a
/// score of zero. Ties for the primary go to the lowest type number. An
/// override replaces the primary and therefore the neighbors compared.
pub fn resolve_enneagram(
    scores: &BTreeMap<EnneagramType, f64>,
    primary_override: Option<EnneagramType>,
) -> Result<EnneagramProfile, ScoringError> {
    if scores.is_empty() {
        return Err(ScoringError::EmptyScores);
    }

    if let Some((kind, value)) = scores.iter().find(|(_, value)| !value.is_finite()) {
        return Err(ScoringError::InvalidAnswerValue {
            test_type: TestType::Enneagram,
            key: kind.code().to_string(),
            value: *value,
        });
    }

    let (primary, overridden) = match primary_override {
        Some(primary) => (primary, true),
        None => {
            let ranked = rank_descending(scores, |a, b| a.cmp(b));
            let top = ranked.first().copied().ok_or(ScoringError::EmptyScores)?;
            (top, false)
        }
    };

    let (lower, upper) = primary.neighbors();
    let wing = match (scores.get(&lower), scores.get(&upper)) {
        (Some(low), Some(high)) if low > high => Wing::Single { wing: lower },
        (Some(low), Some(high)) if high > low => Wing::Single { wing: upper },
        (Some(_), Some(_)) => Wing::Balanced { lower, upper },
        (Some(_), None) => Wing::Single { wing: lower },
        (None, Some(_)) => Wing::Single { wing: upper },
        (None, None) => Wing::Absent,
    };

    Ok(EnneagramProfile {
        primary,
        wing,
        overridden,
    })
}

/// Decodes externally keyed scores (`"1".."9"` or `"A".."I"`) and resolves them.
pub fn resolve_encoded(
    scores: &BTreeMap<String, f64>,
    primary_override: Option<EnneagramType>,
) -> Result<EnneagramProfile, ScoringError> {
    let mut decoded = BTreeMap::new();
    for (raw_key, value) in scores {
        let kind = EnneagramType::parse(raw_key).ok_or_else(|| ScoringError::InvalidEncoding {
            test_type: TestType::Enneagram,
            key: raw_key.clone(),
        })?;
        if decoded.insert(kind, *value).is_some() {
            return Err(ScoringError::InvalidEncoding {
                test_type: TestType::Enneagram,
                key: raw_key.clone(),
            });
        }
    }

    resolve_enneagram(&decoded, primary_override)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnneagramConfig {
    pub maxima: ScaleMaxima,
    /// Authoritative primary type, when one is already known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_override: Option<EnneagramType>,
}

pub struct EnneagramScorer;

impl InstrumentScorer for EnneagramScorer {
    type Config = EnneagramConfig;

    fn test_type(&self) -> TestType {
        TestType::Enneagram
    }

    fn score(
        &self,
        contributions: &[Contribution],
        config: &EnneagramConfig,
    ) -> Result<ScoreResult, ScoringError> {
        let maxima = config.maxima.resolve::<EnneagramType>()?;
        let tally = accumulate::<EnneagramType>(contributions)?;

        if tally.is_empty() {
            return Err(ScoringError::EmptyScores);
        }

        if let Some(negative) = contributions.iter().find(|answer| answer.points < 0.0) {
            return Err(ScoringError::InvalidAnswerValue {
                test_type: TestType::Enneagram,
                key: negative.key.clone(),
                value: negative.points,
            });
        }

        // Full key set: the label must follow from `raw_scores` alone.
        let profile = resolve_enneagram(&tally.sums, config.primary_override)?;
        let label = profile.label();
        let normalized = scale_all(&tally.sums, &maxima)?;
        debug!(
            primary_type = %label,
            overridden = profile.overridden,
            "scored enneagram"
        );

        ScoreResult::from_scores(
            &tally.sums,
            &normalized,
            Some(label),
            InstrumentDetails::Enneagram {
                primary: profile.primary,
                wing: profile.wing,
                primary_overridden: profile.overridden,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(number: u8) -> EnneagramType {
        EnneagramType::new(number).expect("valid type")
    }

    fn scores(entries: &[(u8, f64)]) -> BTreeMap<EnneagramType, f64> {
        entries
            .iter()
            .map(|(number, value)| (kind(*number), *value))
            .collect()
    }

    fn config() -> EnneagramConfig {
        EnneagramConfig {
            maxima: ScaleMaxima::uniform::<EnneagramType>(10.0),
            primary_override: None,
        }
    }

    #[test]
    fn higher_neighbor_becomes_the_wing() {
        let profile = resolve_enneagram(
            &scores(&[
                (1, 7.0),
                (2, 5.0),
                (3, 8.0),
                (4, 9.0),
                (5, 3.0),
                (6, 6.0),
                (7, 4.0),
                (8, 2.0),
                (9, 1.0),
            ]),
            None,
        )
        .expect("resolved");

        assert_eq!(profile.primary, kind(4));
        assert_eq!(profile.wing, Wing::Single { wing: kind(3) });
        assert_eq!(profile.label(), "4w3");
    }

    #[test]
    fn tied_neighbors_are_balanced() {
        let profile =
            resolve_enneagram(&scores(&[(3, 8.0), (4, 9.0), (5, 8.0)]), None).expect("resolved");

        assert_eq!(
            profile.wing,
            Wing::Balanced {
                lower: kind(3),
                upper: kind(5)
            }
        );
        assert!(profile.wing.is_balanced());
        assert_eq!(profile.label(), "4w3/5");
    }

    #[test]
    fn present_neighbor_wins_over_missing_one() {
        let profile = resolve_enneagram(&scores(&[(9, 4.0), (1, 6.0)]), None).expect("resolved");
        assert_eq!(profile.primary, kind(1));
        assert_eq!(profile.label(), "1w9");

        let lonely = resolve_enneagram(&scores(&[(6, 2.0)]), None).expect("resolved");
        assert_eq!(lonely.wing, Wing::Absent);
        assert_eq!(lonely.label(), "6");
    }

    #[test]
    fn primary_ties_go_to_lowest_number() {
        let profile =
            resolve_enneagram(&scores(&[(2, 0.0), (7, 0.0), (5, 0.0)]), None).expect("resolved");
        assert_eq!(profile.primary, kind(2));
    }

    #[test]
    fn override_changes_the_neighbors_compared() {
        let map = scores(&[(1, 2.0), (3, 8.0), (4, 9.0), (5, 3.0), (6, 7.0)]);
        let profile = resolve_enneagram(&map, Some(kind(5))).expect("resolved");

        assert!(profile.overridden);
        assert_eq!(profile.primary, kind(5));
        assert_eq!(profile.wing, Wing::Single { wing: kind(4) });
        assert_eq!(profile.label(), "5w4");
    }

    #[test]
    fn empty_map_is_an_error() {
        assert_eq!(
            resolve_enneagram(&BTreeMap::new(), None),
            Err(ScoringError::EmptyScores)
        );
        assert_eq!(
            EnneagramScorer.score(&[], &config()),
            Err(ScoringError::EmptyScores)
        );
    }

    #[test]
    fn letter_and_numeric_keys_resolve_identically() {
        let numeric: BTreeMap<String, f64> = [("3", 8.0), ("4", 9.0), ("5", 3.0)]
            .iter()
            .map(|(key, value)| (key.to_string(), *value))
            .collect();
        let lettered: BTreeMap<String, f64> = [("C", 8.0), ("D", 9.0), ("E", 3.0)]
            .iter()
            .map(|(key, value)| (key.to_string(), *value))
            .collect();

        assert_eq!(
            resolve_encoded(&numeric, None).expect("numeric"),
            resolve_encoded(&lettered, None).expect("letters")
        );

        let invalid: BTreeMap<String, f64> = [("J".to_string(), 1.0)].into_iter().collect();
        assert!(matches!(
            resolve_encoded(&invalid, None),
            Err(ScoringError::InvalidEncoding { .. })
        ));
    }

    #[test]
    fn scorer_keeps_full_key_set_and_compares_unanswered_neighbors_as_zero() {
        let answers = vec![
            Contribution::new("D", 6.0),
            Contribution::new("D", 3.0),
            Contribution::new("5", 0.0),
        ];
        let result = EnneagramScorer.score(&answers, &config()).expect("scored");

        assert_eq!(result.raw_scores.len(), 9);
        assert_eq!(result.raw("3"), Some(0.0));
        assert_eq!(result.raw("4"), Some(9.0));
        assert_eq!(result.normalized("4"), Some(90.0));
        assert_eq!(result.primary_type.as_deref(), Some("4w3/5"));

        let without_zero_answer = EnneagramScorer
            .score(&answers[..2], &config())
            .expect("scored");
        assert_eq!(without_zero_answer.raw_scores, result.raw_scores);
        assert_eq!(without_zero_answer.primary_type, result.primary_type);
    }

    #[test]
    fn scored_label_matches_resolving_the_raw_scores() {
        let cases = [
            vec![Contribution::new("4", 9.0), Contribution::new("5", 0.0)],
            vec![Contribution::new("4", 9.0)],
            vec![Contribution::new("7", 0.0)],
            vec![Contribution::new("B", 4.0), Contribution::new("9", 4.0)],
        ];

        for answers in cases {
            let result = EnneagramScorer.score(&answers, &config()).expect("scored");
            let resolved = resolve_encoded(&result.raw_scores, None).expect("resolved");
            assert_eq!(result.primary_type, Some(resolved.label()), "{answers:?}");
        }
    }

    #[test]
    fn single_zero_answer_falls_back_to_type_one() {
        let result = EnneagramScorer
            .score(&[Contribution::new("7", 0.0)], &config())
            .expect("scored");
        assert_eq!(result.primary_type.as_deref(), Some("1w9/2"));
    }

    #[test]
    fn all_zero_answers_resolve_to_type_one() {
        let answers: Vec<Contribution> = EnneagramType::all()
            .iter()
            .map(|kind| Contribution::new(kind.code(), 0.0))
            .collect();
        let result = EnneagramScorer.score(&answers, &config()).expect("scored");
        match result.details {
            InstrumentDetails::Enneagram { primary, wing, .. } => {
                assert_eq!(primary, kind(1));
                assert!(wing.is_balanced());
            }
            other => panic!("unexpected details {other:?}"),
        }
    }
}
