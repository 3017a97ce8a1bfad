use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::TestType;
use super::engine::{InstrumentConfig, ScoringEngine};
use super::error::ScoringError;
use super::instruments::{BigFiveConfig, EnneagramConfig, MbtiConfig, RiasecConfig};
use super::question_bank::StaticQuestionBank;

/// Question bank and scaling configuration for one instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentProfile<C> {
    pub questions: StaticQuestionBank,
    pub config: C,
}

/// Everything needed to score the supported instruments, usually loaded from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringProfile {
    #[serde(default, alias = "mbti", skip_serializing_if = "Option::is_none")]
    pub oejts: Option<InstrumentProfile<MbtiConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub big_five: Option<InstrumentProfile<BigFiveConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub riasec: Option<InstrumentProfile<RiasecConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enneagram: Option<InstrumentProfile<EnneagramConfig>>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("failed to read scoring profile: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid scoring profile: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScoringProfile {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ProfileError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ProfileError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn configured(&self) -> Vec<TestType> {
        let mut configured = Vec::new();
        if self.oejts.is_some() {
            configured.push(TestType::Oejts);
        }
        if self.big_five.is_some() {
            configured.push(TestType::BigFive);
        }
        if self.riasec.is_some() {
            configured.push(TestType::Riasec);
        }
        if self.enneagram.is_some() {
            configured.push(TestType::Enneagram);
        }
        configured
    }

    /// Builds an engine over the instrument's question bank along with its config.
    pub fn engine_for(
        &self,
        test_type: TestType,
    ) -> Result<(ScoringEngine<StaticQuestionBank>, InstrumentConfig), ScoringError> {
        let missing = || ScoringError::MissingConfiguration {
            test_type,
            key: test_type.code().to_string(),
        };

        let (questions, config) = match test_type {
            TestType::Oejts => {
                let profile = self.oejts.as_ref().ok_or_else(missing)?;
                (
                    profile.questions.clone(),
                    InstrumentConfig::Oejts(profile.config.clone()),
                )
            }
            TestType::BigFive => {
                let profile = self.big_five.as_ref().ok_or_else(missing)?;
                (
                    profile.questions.clone(),
                    InstrumentConfig::BigFive(profile.config.clone()),
                )
            }
            TestType::Riasec => {
                let profile = self.riasec.as_ref().ok_or_else(missing)?;
                (
                    profile.questions.clone(),
                    InstrumentConfig::Riasec(profile.config.clone()),
                )
            }
            TestType::Enneagram => {
                let profile = self.enneagram.as_ref().ok_or_else(missing)?;
                (
                    profile.questions.clone(),
                    InstrumentConfig::Enneagram(profile.config.clone()),
                )
            }
            TestType::Qualtrics => return Err(ScoringError::UnsupportedInstrument(test_type)),
        };

        Ok((ScoringEngine::new(questions), config))
    }
}
