//! CLI command definitions for talkscope.
//!
//! Provides the command-line interface for analyzing KakaoTalk exports and
//! managing the configuration file.

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Main CLI application.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Logging verbosity
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "TALKSCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a KakaoTalk transcript
    Analyze(AnalyzeArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Transcript analysis arguments.
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["path", "text", "stdin"]),
))]
pub struct AnalyzeArgs {
    /// Exported transcript file
    pub path: Option<PathBuf>,

    /// Transcript text given inline
    #[arg(long)]
    pub text: Option<String>,

    /// Read the transcript text from standard input
    #[arg(long, default_value_t = false)]
    pub stdin: bool,

    /// Output format
    #[arg(short, long, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Number of keywords to show
    #[arg(long)]
    pub top: Option<usize>,
}

/// Configuration management arguments.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Configuration subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write the default configuration file
    Init {
        /// Destination, defaults to the user configuration directory
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Print the effective configuration as TOML
    Show,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// JSON format
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
