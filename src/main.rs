//! listkeep - Local-first to-do list and image gallery

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = listkeep::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
