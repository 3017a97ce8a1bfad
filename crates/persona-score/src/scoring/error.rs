use super::domain::{QuestionId, TestType};

/// Validation failures raised while scoring. None of them is ever turned into a
/// zeroed or partial result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("{test_type} answers never reached key(s): {}", .missing.join(", "))]
    IncompleteInstrumentData {
        test_type: TestType,
        missing: Vec<String>,
    },
    #[error("{test_type} configuration has no scaling maximum for '{key}'")]
    MissingConfiguration { test_type: TestType, key: String },
    #[error("{test_type} configuration rejected: {reason}")]
    InvalidConfiguration { test_type: TestType, reason: String },
    #[error("no scores to resolve")]
    EmptyScores,
    #[error("'{key}' is not a valid {test_type} key")]
    InvalidEncoding { test_type: TestType, key: String },
    #[error("{test_type} contribution to '{key}' is not acceptable: {value}")]
    InvalidAnswerValue {
        test_type: TestType,
        key: String,
        value: f64,
    },
    #[error("question {0} is not in the question bank")]
    UnknownQuestion(QuestionId),
    #[error("question {question_id} has no option '{option}'")]
    UnknownOption {
        question_id: QuestionId,
        option: String,
    },
    #[error("dimension {dimension} is exactly balanced and the midpoint rule rejects it")]
    UndecidedDimension { dimension: String },
    #[error("{0} results cannot be scored by this engine")]
    UnsupportedInstrument(TestType),
    #[error("cannot combine {expected} and {found} results")]
    MixedInstruments { expected: TestType, found: TestType },
}
