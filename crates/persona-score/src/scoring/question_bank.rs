use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{AnswerValue, Contribution, QuestionId, RawAnswer};
use super::error::ScoringError;

/// Source of per-question keys and weights.
///
/// The engine never owns a question table; callers supply one through this
/// trait so question bank revisions never touch scoring code.
pub trait QuestionBank: Send + Sync {
    fn contribution(&self, answer: &RawAnswer) -> Result<Contribution, ScoringError>;

    fn contributions(&self, answers: &[RawAnswer]) -> Result<Vec<Contribution>, ScoringError> {
        answers
            .iter()
            .map(|answer| self.contribution(answer))
            .collect()
    }
}

/// Inclusive Likert range used for reverse keyed items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LikertScale {
    pub min: f64,
    pub max: f64,
}

impl LikertScale {
    pub fn reverse(&self, value: f64) -> f64 {
        self.min + self.max - value
    }
}

/// How one question feeds its instrument key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionKey {
    pub key: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_scale: Option<LikertScale>,
    /// Points awarded per option code, for multiple choice questions.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, f64>,
}

fn default_weight() -> f64 {
    1.0
}

impl QuestionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            weight: default_weight(),
            reverse_scale: None,
            options: BTreeMap::new(),
        }
    }

    pub fn weighted(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn reversed(mut self, min: f64, max: f64) -> Self {
        self.reverse_scale = Some(LikertScale { min, max });
        self
    }

    pub fn option(mut self, code: impl Into<String>, points: f64) -> Self {
        self.options.insert(code.into(), points);
        self
    }
}

/// In-memory question bank keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticQuestionBank {
    questions: BTreeMap<QuestionId, QuestionKey>,
}

impl StaticQuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_question(mut self, question_id: QuestionId, key: QuestionKey) -> Self {
        self.questions.insert(question_id, key);
        self
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl FromIterator<(QuestionId, QuestionKey)> for StaticQuestionBank {
    fn from_iter<T: IntoIterator<Item = (QuestionId, QuestionKey)>>(iter: T) -> Self {
        Self {
            questions: iter.into_iter().collect(),
        }
    }
}

impl QuestionBank for StaticQuestionBank {
    fn contribution(&self, answer: &RawAnswer) -> Result<Contribution, ScoringError> {
        let question = self
            .questions
            .get(&answer.question_id)
            .ok_or_else(|| ScoringError::UnknownQuestion(answer.question_id.clone()))?;

        let base = match &answer.value {
            AnswerValue::Numeric(value) => match question.reverse_scale {
                Some(scale) => scale.reverse(*value),
                None => *value,
            },
            AnswerValue::Option(code) => {
                *question
                    .options
                    .get(code)
                    .ok_or_else(|| ScoringError::UnknownOption {
                        question_id: answer.question_id.clone(),
                        option: code.clone(),
                    })?
            }
        };

        Ok(Contribution::new(question.key.clone(), base * question.weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> StaticQuestionBank {
        StaticQuestionBank::new()
            .with_question(QuestionId::Number(1), QuestionKey::new("openness"))
            .with_question(
                QuestionId::Number(2),
                QuestionKey::new("openness").reversed(1.0, 5.0),
            )
            .with_question(
                QuestionId::Text("ei-3".to_string()),
                QuestionKey::new("EI").weighted(-0.25),
            )
            .with_question(
                QuestionId::Number(4),
                QuestionKey::new("R").option("like", 1.0).option("dislike", 0.0),
            )
    }

    #[test]
    fn numeric_answers_apply_reverse_keying_and_weight() {
        let bank = bank();
        let reversed = bank
            .contribution(&RawAnswer::new(QuestionId::Number(2), AnswerValue::Numeric(4.0)))
            .expect("reverse keyed");
        assert_eq!(reversed, Contribution::new("openness", 2.0));

        let weighted = bank
            .contribution(&RawAnswer::new(
                QuestionId::Text("ei-3".to_string()),
                AnswerValue::Numeric(2.0),
            ))
            .expect("weighted");
        assert_eq!(weighted, Contribution::new("EI", -0.5));
    }

    #[test]
    fn option_codes_map_to_configured_points() {
        let bank = bank();
        let liked = bank
            .contribution(&RawAnswer::new(
                QuestionId::Number(4),
                AnswerValue::Option("like".to_string()),
            ))
            .expect("option");
        assert_eq!(liked.points, 1.0);

        let error = bank
            .contribution(&RawAnswer::new(
                QuestionId::Number(4),
                AnswerValue::Option("maybe".to_string()),
            ))
            .expect_err("unknown option");
        assert!(matches!(error, ScoringError::UnknownOption { .. }));
    }

    #[test]
    fn unknown_questions_are_rejected() {
        let error = bank()
            .contributions(&[RawAnswer::new(
                QuestionId::Number(99),
                AnswerValue::Numeric(3.0),
            )])
            .expect_err("unknown question");
        assert_eq!(error, ScoringError::UnknownQuestion(QuestionId::Number(99)));
    }
}
