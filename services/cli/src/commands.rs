use clap::Args;
use persona_score::config::AppConfig;
use persona_score::error::AppError;
use persona_score::scoring::{
    read_answers_from_path, CohortSummary, EnneagramType, InstrumentConfig, InstrumentKey,
    ScoreResult, ScoringProfile, TestType,
};
use persona_score::telemetry;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Scoring profile with question banks and scale maxima. Defaults to APP_SCORING_PROFILE.
    #[arg(long)]
    pub(crate) profile: Option<PathBuf>,
    /// Instrument to score: oejts, big_five, riasec or enneagram
    #[arg(long, value_parser = parse_test_type)]
    pub(crate) test_type: TestType,
    /// CSV answer sheet with question_id and value columns
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Enneagram primary type to use instead of the highest scoring one
    #[arg(long)]
    pub(crate) primary: Option<String>,
    /// Free text interpretation attached to the result
    #[arg(long)]
    pub(crate) interpretation: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct SummarizeArgs {
    /// Result files previously written by `score`
    #[arg(required = true)]
    pub(crate) results: Vec<PathBuf>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let ScoreArgs {
        profile,
        test_type,
        answers,
        primary,
        interpretation,
    } = args;

    let profile_path = profile
        .or(config.scoring.profile_path)
        .ok_or_else(|| {
            AppError::Usage("pass --profile or set APP_SCORING_PROFILE".to_string())
        })?;

    let profile = ScoringProfile::from_path(&profile_path)?;
    let answers = read_answers_from_path(&answers)?;
    let (engine, instrument_config) = profile.engine_for(test_type)?;
    let instrument_config = apply_primary_override(instrument_config, primary.as_deref())?;

    info!(
        test_type = %test_type,
        answers = answers.len(),
        profile = %profile_path.display(),
        "scoring answer sheet"
    );

    let mut result = engine.score(test_type, &answers, &instrument_config)?;
    if let Some(text) = interpretation {
        result = result.with_interpretation(text);
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub(crate) fn run_summarize(args: SummarizeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let mut results = Vec::with_capacity(args.results.len());
    for path in &args.results {
        let reader = BufReader::new(File::open(path)?);
        let result: ScoreResult = serde_json::from_reader(reader)?;
        results.push(result);
    }

    let summary = CohortSummary::from_results(&results)?;
    info!(
        test_type = %summary.test_type,
        respondents = summary.respondents,
        "summarized cohort"
    );

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

pub(crate) fn parse_test_type(raw: &str) -> Result<TestType, String> {
    TestType::parse(raw).ok_or_else(|| format!("unknown test type '{raw}'"))
}

fn apply_primary_override(
    config: InstrumentConfig,
    primary: Option<&str>,
) -> Result<InstrumentConfig, AppError> {
    let Some(raw) = primary else {
        return Ok(config);
    };

    match config {
        InstrumentConfig::Enneagram(mut enneagram) => {
            let primary = EnneagramType::parse(raw).ok_or_else(|| {
                AppError::Usage(format!("'{raw}' is not an enneagram type (1-9 or A-I)"))
            })?;
            enneagram.primary_override = Some(primary);
            Ok(InstrumentConfig::Enneagram(enneagram))
        }
        other => Err(AppError::Usage(format!(
            "--primary only applies to enneagram, not {}",
            other.test_type()
        ))),
    }
}
