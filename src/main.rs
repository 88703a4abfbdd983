//! Binary entrypoint for the `tether` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match tether::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
