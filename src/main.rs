//! Evaluar CLI
//!
//! Offline scoring entry point for the evaluar library.
//!
//! # Usage
//!
//! ```bash
//! # Corpus-level WER between two line-parallel transcript files
//! evaluar score reference.txt hypothesis.txt
//!
//! # Character error rate, with per-utterance lines
//! evaluar score reference.txt hypothesis.txt --char --per-utt
//! ```

use clap::Parser;
use evaluar::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
