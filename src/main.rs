//! locbook binary entry point.

use std::process::ExitCode;

use locbook::ui::output;

fn main() -> ExitCode {
    match locbook::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
