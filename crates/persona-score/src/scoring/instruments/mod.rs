pub mod big_five;
pub mod enneagram;
pub mod mbti;
pub mod riasec;

pub use big_five::{BigFiveConfig, BigFiveScorer};
pub use enneagram::{
    resolve_encoded, resolve_enneagram, EnneagramConfig, EnneagramProfile, EnneagramScorer, Wing,
};
pub use mbti::{DimensionPreference, MbtiConfig, MbtiScorer, MidpointRule};
pub use riasec::{classify_consistency, Consistency, RiasecConfig, RiasecScorer};

use super::domain::{Contribution, ScoreResult, TestType};
use super::error::ScoringError;

/// Contract shared by the four instrument scorers. Implementations are stateless.
pub trait InstrumentScorer {
    type Config;

    fn test_type(&self) -> TestType;

    fn score(
        &self,
        contributions: &[Contribution],
        config: &Self::Config,
    ) -> Result<ScoreResult, ScoringError>;
}

pub fn score_mbti(
    contributions: &[Contribution],
    config: &MbtiConfig,
) -> Result<ScoreResult, ScoringError> {
    MbtiScorer.score(contributions, config)
}

pub fn score_big_five(
    contributions: &[Contribution],
    config: &BigFiveConfig,
) -> Result<ScoreResult, ScoringError> {
    BigFiveScorer.score(contributions, config)
}

pub fn score_riasec(
    contributions: &[Contribution],
    config: &RiasecConfig,
) -> Result<ScoreResult, ScoringError> {
    RiasecScorer.score(contributions, config)
}

pub fn score_enneagram(
    contributions: &[Contribution],
    config: &EnneagramConfig,
) -> Result<ScoreResult, ScoringError> {
    EnneagramScorer.score(contributions, config)
}
