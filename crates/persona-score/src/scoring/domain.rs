use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::error::ScoringError;
use super::instruments::enneagram::Wing;
use super::instruments::mbti::DimensionPreference;
use super::instruments::riasec::Consistency;
use super::keys::{EnneagramType, InstrumentKey, RiasecType};

/// Instrument a result was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    /// Open Extended Jungian Type Scales, reported as an MBTI four-letter type.
    Oejts,
    BigFive,
    Riasec,
    Enneagram,
    /// Legacy label seen on stored results. Not scored by this engine.
    Qualtrics,
}

impl TestType {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Oejts => "oejts",
            Self::BigFive => "big_five",
            Self::Riasec => "riasec",
            Self::Enneagram => "enneagram",
            Self::Qualtrics => "qualtrics",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Oejts => "MBTI (OEJTS)",
            Self::BigFive => "Big Five",
            Self::Riasec => "RIASEC",
            Self::Enneagram => "Enneagram",
            Self::Qualtrics => "Qualtrics",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "oejts" | "mbti" => Some(Self::Oejts),
            "big_five" | "bigfive" => Some(Self::BigFive),
            "riasec" | "holland" => Some(Self::Riasec),
            "enneagram" => Some(Self::Enneagram),
            "qualtrics" => Some(Self::Qualtrics),
            _ => None,
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Question identifier as issued by the question bank.
///
/// Integer-looking text always deserializes to [`QuestionId::Number`] so ids
/// read from JSON object keys and CSV cells compare equal to numeric ids.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(i64),
    Text(String),
}

impl QuestionId {
    /// Integer-looking identifiers become [`QuestionId::Number`].
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(number) => Self::Number(number),
            Err(_) => Self::Text(trimmed.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct QuestionIdVisitor;

        impl Visitor<'_> for QuestionIdVisitor {
            type Value = QuestionId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer or string question id")
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(QuestionId::Number(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                i64::try_from(value)
                    .map(QuestionId::Number)
                    .map_err(|_| E::custom(format!("question id {value} out of range")))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(QuestionId::parse(value))
            }
        }

        deserializer.deserialize_any(QuestionIdVisitor)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// What the respondent picked: a Likert value or an option code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Numeric(f64),
    Option(String),
}

impl AnswerValue {
    /// Numeric text becomes [`AnswerValue::Numeric`], anything else an option code.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Self::Numeric(value),
            _ => Self::Option(trimmed.to_string()),
        }
    }
}

/// A single respondent answer to one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAnswer {
    pub question_id: QuestionId,
    pub value: AnswerValue,
}

impl RawAnswer {
    pub fn new(question_id: QuestionId, value: AnswerValue) -> Self {
        Self { question_id, value }
    }
}

/// An answer after the question bank mapped it onto an instrument key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub key: String,
    pub points: f64,
}

impl Contribution {
    pub fn new(key: impl Into<String>, points: f64) -> Self {
        Self {
            key: key.into(),
            points,
        }
    }
}

/// Instrument specific part of a [`ScoreResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "instrument", rename_all = "snake_case")]
pub enum InstrumentDetails {
    Mbti {
        preferences: Vec<DimensionPreference>,
    },
    BigFive {
        underpowered: Vec<String>,
    },
    Riasec {
        ranking: Vec<RiasecType>,
        holland_code: String,
        consistency: Consistency,
        underpowered: Vec<String>,
    },
    Enneagram {
        primary: EnneagramType,
        wing: Wing,
        primary_overridden: bool,
    },
}

/// Outcome of scoring one instrument for one respondent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub test_type: TestType,
    pub raw_scores: BTreeMap<String, f64>,
    pub normalized_scores: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_type: Option<String>,
    pub details: InstrumentDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<String>,
}

impl ScoreResult {
    /// Builds a result carrying exactly the key set of `K`.
    pub(crate) fn from_scores<K: InstrumentKey>(
        raw: &BTreeMap<K, f64>,
        normalized: &BTreeMap<K, f64>,
        primary_type: Option<String>,
        details: InstrumentDetails,
    ) -> Result<Self, ScoringError> {
        Ok(Self {
            test_type: K::TEST_TYPE,
            raw_scores: complete_map(raw)?,
            normalized_scores: complete_map(normalized)?,
            primary_type,
            details,
            interpretation: None,
        })
    }

    /// Attaches externally authored interpretation text.
    pub fn with_interpretation(mut self, text: impl Into<String>) -> Self {
        self.interpretation = Some(text.into());
        self
    }

    pub fn raw(&self, code: &str) -> Option<f64> {
        self.raw_scores.get(code).copied()
    }

    pub fn normalized(&self, code: &str) -> Option<f64> {
        self.normalized_scores.get(code).copied()
    }
}

fn complete_map<K: InstrumentKey>(
    scores: &BTreeMap<K, f64>,
) -> Result<BTreeMap<String, f64>, ScoringError> {
    let mut missing = Vec::new();
    let mut out = BTreeMap::new();
    for key in K::all() {
        match scores.get(key) {
            Some(value) => {
                out.insert(key.code().to_string(), *value);
            }
            None => missing.push(key.code().to_string()),
        }
    }

    if missing.is_empty() {
        Ok(out)
    } else {
        Err(ScoringError::IncompleteInstrumentData {
            test_type: K::TEST_TYPE,
            missing,
        })
    }
}
