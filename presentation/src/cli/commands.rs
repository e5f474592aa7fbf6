//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for debate results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every round followed by the synthesis
    Full,
    /// Only the final architecture
    Synthesis,
    /// JSON report
    Json,
}

impl From<OutputFormat> for debate_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => debate_domain::OutputFormat::Full,
            OutputFormat::Synthesis => debate_domain::OutputFormat::Synthesis,
            OutputFormat::Json => debate_domain::OutputFormat::Json,
        }
    }
}

/// Where the debate transcript is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MemoryChoice {
    /// In-process only
    Memory,
    /// One JSONL file per session
    Jsonl,
}

/// CLI arguments for disagree-commit
#[derive(Parser, Debug)]
#[command(name = "disagree-commit")]
#[command(author, version, about = "Expert panel debate - three AWS personas argue, then agree on an architecture")]
#[command(long_about = r#"
disagree-commit puts a problem in front of a panel of three personas
(Jeff Barr, Swami Sivasubramanian, Werner Vogels) and lets them argue.

The debate has a fixed shape:
1. Round 1 (debate):    each persona gives an opening position
2. Round 2 (debate):    each persona responds to the others
3. Round 3 (consensus): the panel converges
4. Synthesis:           the transcript becomes one architecture document

Configuration files are loaded from (in priority order):
1. DISAGREE_COMMIT_* environment variables
2. --config <path>     Explicit config file
3. ./debate.toml       Project-level config
4. ~/.config/disagree-commit/config.toml   Global config

Example:
  disagree-commit "Design a URL shortener for 1B links/day"
  disagree-commit --problem-id mars_currency --offline
  disagree-commit --list-problems
"#)]
pub struct Cli {
    /// The problem for the panel to debate
    #[arg(conflicts_with = "problem_id")]
    pub problem: Option<String>,

    /// Debate a canned problem instead of free text
    #[arg(short = 'p', long, value_name = "KEY")]
    pub problem_id: Option<String>,

    /// List the canned problems and exit
    #[arg(long)]
    pub list_problems: bool,

    /// Use built-in replies instead of calling a model provider
    #[arg(long)]
    pub offline: bool,

    /// Seconds to wait between persona turns
    #[arg(long, value_name = "SECONDS")]
    pub pacing: Option<u64>,

    /// Attempts per collaborator call (1 disables retries)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: Option<u32>,

    /// Model for every persona (overrides config)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Model for the synthesis step
    #[arg(long, value_name = "MODEL")]
    pub synthesis_model: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Memory backend for the transcript
    #[arg(long, value_enum)]
    pub memory: Option<MemoryChoice>,

    /// Directory for JSONL session files
    #[arg(long, value_name = "DIR")]
    pub memory_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write logs to daily files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_problem_text() {
        let cli = Cli::try_parse_from(["disagree-commit", "Build a todo app", "-o", "json"]).unwrap();
        assert_eq!(cli.problem.as_deref(), Some("Build a todo app"));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert!(!cli.offline);
    }

    #[test]
    fn test_parse_canned_problem_offline() {
        let cli = Cli::try_parse_from([
            "disagree-commit",
            "--problem-id",
            "mars_currency",
            "--offline",
            "--pacing",
            "0",
            "--memory",
            "jsonl",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.problem_id.as_deref(), Some("mars_currency"));
        assert_eq!(cli.pacing, Some(0));
        assert_eq!(cli.memory, Some(MemoryChoice::Jsonl));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_problem_and_key_conflict() {
        let result =
            Cli::try_parse_from(["disagree-commit", "text", "--problem-id", "mars_currency"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let result = Cli::try_parse_from(["disagree-commit", "text", "--max-attempts", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_format_maps_to_domain() {
        assert_eq!(
            debate_domain::OutputFormat::from(OutputFormat::Synthesis),
            debate_domain::OutputFormat::Synthesis
        );
    }
}
