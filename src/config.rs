//! CLI argument definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI arguments
#[derive(Parser)]
#[command(name = "evaluar", version, about = "ASR evaluation harness")]
pub struct Cli {
    /// Verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress all output
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand)]
pub enum Command {
    /// Score a hypothesis transcript against a reference transcript
    Score(ScoreArgs),
}

/// Arguments for the `score` command
#[derive(Args)]
pub struct ScoreArgs {
    /// Reference transcript, one utterance per line
    pub reference: PathBuf,

    /// Hypothesis transcript, line-parallel with the reference
    pub hypothesis: PathBuf,

    /// Score characters instead of words
    #[arg(long = "char")]
    pub characters: bool,

    /// Print a per-utterance line alongside the aggregate report
    #[arg(long)]
    pub per_utt: bool,
}
