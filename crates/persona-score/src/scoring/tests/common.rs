use crate::scoring::domain::Contribution;
use crate::scoring::instruments::{BigFiveConfig, EnneagramConfig, MbtiConfig, RiasecConfig};
use crate::scoring::keys::{BigFiveTrait, EnneagramType, InstrumentKey, RiasecType};
use crate::scoring::normalizer::ScaleMaxima;

pub(super) fn mbti_config() -> MbtiConfig {
    MbtiConfig::default()
}

pub(super) fn big_five_config() -> BigFiveConfig {
    BigFiveConfig {
        maxima: ScaleMaxima::uniform::<BigFiveTrait>(42.0),
    }
}

pub(super) fn riasec_config() -> RiasecConfig {
    RiasecConfig {
        maxima: ScaleMaxima::uniform::<RiasecType>(7.0),
    }
}

pub(super) fn enneagram_config() -> EnneagramConfig {
    EnneagramConfig {
        maxima: ScaleMaxima::uniform::<EnneagramType>(10.0),
        primary_override: None,
    }
}

/// One contribution per key of `K`, in key order.
pub(super) fn keyed<K: InstrumentKey>(values: &[f64]) -> Vec<Contribution> {
    K::all()
        .iter()
        .zip(values)
        .map(|(key, value)| Contribution::new(key.code(), *value))
        .collect()
}

/// Enneagram contributions spelled with the letter encoding.
pub(super) fn enneagram_lettered(values: &[f64]) -> Vec<Contribution> {
    EnneagramType::all()
        .iter()
        .zip(values)
        .map(|(kind, value)| Contribution::new(kind.letter().to_string(), *value))
        .collect()
}

pub(super) fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("score present");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
