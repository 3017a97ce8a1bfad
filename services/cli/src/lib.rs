mod cli;
mod commands;

use persona_score::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
