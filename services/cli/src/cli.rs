use crate::commands::{run_score, run_summarize, ScoreArgs, SummarizeArgs};
use clap::{Parser, Subcommand};
use persona_score::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "persona-score",
    about = "Score personality and career assessments from answer sheets",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one respondent's answer sheet and print the result as JSON
    Score(ScoreArgs),
    /// Aggregate previously scored results for one instrument
    Summarize(SummarizeArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Score(args) => run_score(args),
        Command::Summarize(args) => run_summarize(args),
    }
}
