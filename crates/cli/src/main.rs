// geovet - geo-compliance vetting for product feature descriptions.
// Reads a feature CSV, asks a language model whether each feature needs
// geo-specific compliance logic, and writes the verdicts back as CSV.

mod classify;
mod doctor;
mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{EXIT_INPUT_READ, EXIT_INPUT_SCHEMA, EXIT_OUTPUT_IO, EXIT_SUCCESS};

#[derive(Parser)]
#[command(name = "geovet")]
#[command(about = "Classify product features for geo-specific compliance requirements")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every feature in a CSV and write verdicts alongside the input columns
    #[command(after_help = "\
Exit code 0 indicates the run completed, even when individual rows failed
to classify; failed rows are marked 'unknown' in the output for manual
follow-up. Fatal startup errors (missing key, unreadable input) exit
non-zero before any API call is made.

Examples:
  geovet classify
  geovet classify --input features.csv --output verdicts.csv
  geovet classify --input features.csv --glossary terms.csv
  OPENAI_API_KEY=sk-... geovet classify --quiet")]
    Classify {
        /// Input CSV with feature_name and feature_description columns
        #[arg(long, default_value = "sample_data.csv")]
        input: PathBuf,

        /// Output CSV path (overwritten if present)
        #[arg(long, default_value = "analysis_results.csv")]
        output: PathBuf,

        /// Glossary CSV with term and definition columns (skipped if absent)
        #[arg(long, default_value = "glossary.csv")]
        glossary: PathBuf,

        /// OpenAI API key (default: OPENAI_API_KEY env)
        #[arg(long)]
        api_key: Option<String>,

        /// Model name
        #[arg(long, default_value = classify::client::DEFAULT_MODEL)]
        model: String,

        /// Base URL of an OpenAI-compatible chat-completions endpoint
        #[arg(long, default_value = classify::client::DEFAULT_API_BASE)]
        base_url: String,

        /// Suppress progress on stderr
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Show classifier configuration and credential status (no network call)
    Doctor,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Classify {
            input,
            output,
            glossary,
            api_key,
            model,
            base_url,
            quiet,
        } => classify::cmd_classify(classify::ClassifyArgs {
            input,
            output,
            glossary,
            api_key,
            model,
            base_url,
            quiet,
        }),
        Commands::Doctor => doctor::cmd_doctor(),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// Fatal error carrying its exit code. Per-row classifier/parse failures
/// never become a CliError; they degrade the affected row instead.
#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn input(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_INPUT_READ,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_INPUT_SCHEMA,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn output(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_OUTPUT_IO,
            message: msg.into(),
            hint: None,
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
