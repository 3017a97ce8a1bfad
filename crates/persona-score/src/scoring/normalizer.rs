use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::Contribution;
use super::error::ScoringError;
use super::keys::InstrumentKey;

/// Maximum attainable raw score per key, as dictated by the question bank.
///
/// Keys stay in their external spelling until [`ScaleMaxima::resolve`] decodes
/// them for a specific instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScaleMaxima(BTreeMap<String, f64>);

impl ScaleMaxima {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same maximum for every key of `K`.
    pub fn uniform<K: InstrumentKey>(maximum: f64) -> Self {
        K::all()
            .iter()
            .map(|key| (key.code().to_string(), maximum))
            .collect()
    }

    pub fn with(mut self, key: impl Into<String>, maximum: f64) -> Self {
        self.0.insert(key.into(), maximum);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn resolve<K: InstrumentKey>(&self) -> Result<BTreeMap<K, f64>, ScoringError> {
        let mut resolved = BTreeMap::new();
        for (raw_key, maximum) in &self.0 {
            let key = K::parse(raw_key).ok_or_else(|| ScoringError::InvalidEncoding {
                test_type: K::TEST_TYPE,
                key: raw_key.clone(),
            })?;

            if !maximum.is_finite() || *maximum <= 0.0 {
                return Err(ScoringError::InvalidConfiguration {
                    test_type: K::TEST_TYPE,
                    reason: format!("maximum for '{raw_key}' must be positive, got {maximum}"),
                });
            }

            if resolved.insert(key, *maximum).is_some() {
                return Err(ScoringError::InvalidConfiguration {
                    test_type: K::TEST_TYPE,
                    reason: format!("'{raw_key}' duplicates the maximum for {}", key.code()),
                });
            }
        }

        if let Some(missing) = K::all().iter().find(|key| !resolved.contains_key(key)) {
            return Err(ScoringError::MissingConfiguration {
                test_type: K::TEST_TYPE,
                key: missing.code().to_string(),
            });
        }

        Ok(resolved)
    }
}

impl FromIterator<(String, f64)> for ScaleMaxima {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Scales a unipolar raw sum into a whole percent of `maximum`, clamped to `[0, 100]`.
pub fn percent_of_max(raw: f64, maximum: f64) -> f64 {
    ((raw / maximum) * 100.0).clamp(0.0, 100.0).round()
}

/// Maps a bipolar score on `[-2, 2]` onto `[0, 100]`. Exact, neither clamped nor rounded.
pub fn bipolar_percent(raw: f64) -> f64 {
    ((raw + 2.0) / 4.0) * 100.0
}

/// Per-key sums and answer counts for one instrument.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Tally<K: InstrumentKey> {
    pub(crate) sums: BTreeMap<K, f64>,
    pub(crate) counts: BTreeMap<K, usize>,
}

impl<K: InstrumentKey> Tally<K> {
    pub(crate) fn unanswered(&self) -> Vec<K> {
        K::all()
            .iter()
            .copied()
            .filter(|key| self.counts.get(key).copied().unwrap_or(0) == 0)
            .collect()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.counts.values().all(|count| *count == 0)
    }
}

/// Sums contributions per key. Every key of `K` is present, zero when unanswered.
pub(crate) fn accumulate<K: InstrumentKey>(
    contributions: &[Contribution],
) -> Result<Tally<K>, ScoringError> {
    let mut sums: BTreeMap<K, f64> = K::all().iter().map(|key| (*key, 0.0)).collect();
    let mut counts: BTreeMap<K, usize> = K::all().iter().map(|key| (*key, 0)).collect();

    for contribution in contributions {
        let key = K::parse(&contribution.key).ok_or_else(|| ScoringError::InvalidEncoding {
            test_type: K::TEST_TYPE,
            key: contribution.key.clone(),
        })?;

        if !contribution.points.is_finite() {
            return Err(ScoringError::InvalidAnswerValue {
                test_type: K::TEST_TYPE,
                key: contribution.key.clone(),
                value: contribution.points,
            });
        }

        *sums.entry(key).or_insert(0.0) += contribution.points;
        *counts.entry(key).or_insert(0) += 1;
    }

    Ok(Tally { sums, counts })
}

/// Orders keys by score, highest first, falling back to `tie_order` on equal scores.
pub fn rank_descending<K, F>(scores: &BTreeMap<K, f64>, tie_order: F) -> Vec<K>
where
    K: Copy + Ord,
    F: Fn(&K, &K) -> Ordering,
{
    let mut ranked: Vec<(K, f64)> = scores.iter().map(|(key, score)| (*key, *score)).collect();
    ranked.sort_by(|(left_key, left), (right_key, right)| {
        right
            .total_cmp(left)
            .then_with(|| tie_order(left_key, right_key))
    });
    ranked.into_iter().map(|(key, _)| key).collect()
}

/// Scales every key of `raw` against its resolved maximum.
pub(crate) fn scale_all<K: InstrumentKey>(
    raw: &BTreeMap<K, f64>,
    maxima: &BTreeMap<K, f64>,
) -> Result<BTreeMap<K, f64>, ScoringError> {
    raw.iter()
        .map(|(key, value)| {
            let maximum = maxima
                .get(key)
                .ok_or_else(|| ScoringError::MissingConfiguration {
                    test_type: K::TEST_TYPE,
                    key: key.code().to_string(),
                })?;
            Ok((*key, percent_of_max(*value, *maximum)))
        })
        .collect()
}
