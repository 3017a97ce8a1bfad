use serde::{Deserialize, Serialize};

use super::domain::{RawAnswer, ScoreResult, TestType};
use super::error::ScoringError;
use super::instruments::{
    BigFiveConfig, BigFiveScorer, EnneagramConfig, EnneagramScorer, InstrumentScorer, MbtiConfig,
    MbtiScorer, RiasecConfig, RiasecScorer,
};
use super::question_bank::QuestionBank;

/// Configuration for exactly one instrument, selected by test type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "test_type", rename_all = "snake_case")]
pub enum InstrumentConfig {
    Oejts(MbtiConfig),
    BigFive(BigFiveConfig),
    Riasec(RiasecConfig),
    Enneagram(EnneagramConfig),
}

impl InstrumentConfig {
    pub fn test_type(&self) -> TestType {
        match self {
            Self::Oejts(_) => TestType::Oejts,
            Self::BigFive(_) => TestType::BigFive,
            Self::Riasec(_) => TestType::Riasec,
            Self::Enneagram(_) => TestType::Enneagram,
        }
    }
}

/// Turns raw answers into a [`ScoreResult`] through a caller supplied question bank.
pub struct ScoringEngine<Q> {
    question_bank: Q,
}

impl<Q: QuestionBank> ScoringEngine<Q> {
    pub fn new(question_bank: Q) -> Self {
        Self { question_bank }
    }

    pub fn question_bank(&self) -> &Q {
        &self.question_bank
    }

    pub fn score(
        &self,
        test_type: TestType,
        answers: &[RawAnswer],
        config: &InstrumentConfig,
    ) -> Result<ScoreResult, ScoringError> {
        if test_type == TestType::Qualtrics {
            return Err(ScoringError::UnsupportedInstrument(test_type));
        }

        if config.test_type() != test_type {
            return Err(ScoringError::MissingConfiguration {
                test_type,
                key: test_type.code().to_string(),
            });
        }

        let contributions = self.question_bank.contributions(answers)?;
        match config {
            InstrumentConfig::Oejts(config) => MbtiScorer.score(&contributions, config),
            InstrumentConfig::BigFive(config) => BigFiveScorer.score(&contributions, config),
            InstrumentConfig::Riasec(config) => RiasecScorer.score(&contributions, config),
            InstrumentConfig::Enneagram(config) => EnneagramScorer.score(&contributions, config),
        }
    }
}
