use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{AnswerValue, QuestionId, RawAnswer};

#[derive(Debug, thiserror::Error)]
pub enum AnswerSheetError {
    #[error("failed to read answer sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid answer sheet CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("answer sheet row {row} has no value")]
    EmptyValue { row: usize },
}

#[derive(Debug, Deserialize)]
struct AnswerRow {
    question_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    value: Option<String>,
}

/// Reads `question_id,value` rows exported by the test-taking client.
pub fn read_answers<R: Read>(reader: R) -> Result<Vec<RawAnswer>, AnswerSheetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut answers = Vec::new();

    for (index, record) in csv_reader.deserialize::<AnswerRow>().enumerate() {
        let row = record?;
        // Header is line 1, so data rows start at 2.
        let value = row
            .value
            .ok_or(AnswerSheetError::EmptyValue { row: index + 2 })?;

        answers.push(RawAnswer::new(
            QuestionId::parse(&row.question_id),
            AnswerValue::parse(&value),
        ));
    }

    Ok(answers)
}

pub fn read_answers_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<RawAnswer>, AnswerSheetError> {
    let file = std::fs::File::open(path)?;
    read_answers(file)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_numeric_and_option_answers() {
        let answers = read_answers(Cursor::new(
            "question_id,value\n1, 4\nei-2,-1.5\n3,agree\n",
        ))
        .expect("parse");

        assert_eq!(
            answers,
            vec![
                RawAnswer::new(QuestionId::Number(1), AnswerValue::Numeric(4.0)),
                RawAnswer::new(
                    QuestionId::Text("ei-2".to_string()),
                    AnswerValue::Numeric(-1.5)
                ),
                RawAnswer::new(
                    QuestionId::Number(3),
                    AnswerValue::Option("agree".to_string())
                ),
            ]
        );
    }

    #[test]
    fn blank_values_are_rejected_with_row_number() {
        let error = read_answers(Cursor::new("question_id,value\n1,3\n2,  \n"))
            .expect_err("blank value");
        match error {
            AnswerSheetError::EmptyValue { row } => assert_eq!(row, 3),
            other => panic!("expected empty value, got {other:?}"),
        }
    }

    #[test]
    fn missing_columns_surface_csv_errors() {
        let error = read_answers(Cursor::new("id,answer\n1,3\n")).expect_err("bad header");
        assert!(matches!(error, AnswerSheetError::Csv(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let error = read_answers_from_path("./does-not-exist.csv").expect_err("io error");
        assert!(matches!(error, AnswerSheetError::Io(_)));
    }
}
