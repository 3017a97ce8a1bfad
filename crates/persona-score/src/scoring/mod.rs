//! Instrument scorers, the shared normalizer and the type resolvers.
//!
//! Raw answers flow through a [`QuestionBank`] into keyed [`Contribution`]s,
//! are summed and scaled by the normalizer, and are labelled by the
//! instrument's resolver. Configuration is always passed in by the caller.

pub mod answer_sheet;
pub mod cohort;
pub mod domain;
pub mod engine;
pub mod error;
pub mod instruments;
pub mod keys;
pub mod normalizer;
pub mod profile;
pub mod question_bank;

#[cfg(test)]
mod tests;

pub use answer_sheet::{read_answers, read_answers_from_path, AnswerSheetError};
pub use cohort::{CohortSummary, TypeFrequency};
pub use domain::{
    AnswerValue, Contribution, InstrumentDetails, QuestionId, RawAnswer, ScoreResult, TestType,
};
pub use engine::{InstrumentConfig, ScoringEngine};
pub use error::ScoringError;
pub use instruments::{
    classify_consistency, resolve_encoded, resolve_enneagram, score_big_five, score_enneagram,
    score_mbti, score_riasec, BigFiveConfig, Consistency, DimensionPreference, EnneagramConfig,
    EnneagramProfile, InstrumentScorer, MbtiConfig, MidpointRule, RiasecConfig, Wing,
};
pub use keys::{BigFiveTrait, EnneagramType, InstrumentKey, MbtiDimension, RiasecType};
pub use normalizer::{bipolar_percent, percent_of_max, rank_descending, ScaleMaxima};
pub use profile::{InstrumentProfile, ProfileError, ScoringProfile};
pub use question_bank::{LikertScale, QuestionBank, QuestionKey, StaticQuestionBank};
