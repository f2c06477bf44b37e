//! CLI application entry point and configuration.
//!
//! This module provides the main CLI application logic, including argument parsing,
//! configuration loading, and command dispatch.

use crate::commands::{AnalyzeArgs, Cli, Commands, ConfigArgs, ConfigCommand, OutputFormat};
use crate::error::{CliError, Result};
use clap::Parser;
use std::fmt;
use std::path::{Path, PathBuf};
use talkscope_analysis::{ChatAnalyzer, TranscriptSource};
use talkscope_core::config::LogLevel;
use talkscope_core::{AnalysisReport, TalkscopeConfig};
use tracing::{debug, Level};

const HISTOGRAM_WIDTH: u64 = 30;

/// Configuration for the CLI application.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Path of the loaded configuration file, if any.
    pub config_path: Option<PathBuf>,
    /// Logging verbosity level.
    pub verbosity: u8,
    /// Analysis settings.
    pub settings: TalkscopeConfig,
}

/// Main CLI application.
#[derive(Debug)]
pub struct App {
    /// Application configuration.
    pub config: AppConfig,
    /// Parsed CLI arguments.
    pub cli: Cli,
}

impl App {
    /// Create a new application instance from command line arguments.
    pub fn new() -> Result<Self> {
        Self::from_cli(Cli::parse())
    }

    /// Create an application instance from already parsed arguments.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let config = Self::load_config(&cli)?;
        Ok(Self { config, cli })
    }

    /// Load configuration from the given file or the default location.
    fn load_config(cli: &Cli) -> Result<AppConfig> {
        let mut config = AppConfig {
            verbosity: cli.verbose,
            ..AppConfig::default()
        };

        if let Some(config_path) = &cli.config {
            if !config_path.exists() {
                return Err(CliError::Config(format!(
                    "Configuration file not found: {}",
                    config_path.display()
                )));
            }
            config.settings = TalkscopeConfig::load(config_path)?;
            config.config_path = Some(config_path.clone());
        } else if let Ok(default_path) = TalkscopeConfig::default_path() {
            if default_path.exists() {
                config.settings = TalkscopeConfig::load(&default_path)?;
                config.config_path = Some(default_path);
            }
        }

        Ok(config)
    }

    /// Run the application.
    pub fn run(self) -> Result<()> {
        self.setup_logging();
        if let Some(path) = &self.config.config_path {
            debug!("Using configuration from {}", path.display());
        }

        match &self.cli.command {
            Commands::Analyze(args) => self.handle_analyze(args),
            Commands::Config(args) => self.handle_config(args),
        }
    }

    /// Set up logging based on verbosity level.
    fn setup_logging(&self) {
        let level = log_level(self.config.verbosity, self.config.settings.logging.level);

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init()
            .ok(); // Ignore errors if a subscriber is already installed
    }

    fn handle_analyze(&self, args: &AnalyzeArgs) -> Result<()> {
        let source = transcript_source(args)?;

        let mut analyzer = ChatAnalyzer::new(&self.config.settings)?;
        if let Some(top) = args.top {
            analyzer = analyzer.with_display_size(top);
        }
        let report = analyzer.analyze(&source)?;

        match args.format {
            OutputFormat::Text => print!("{}", TextReport(&report)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        }
        Ok(())
    }

    fn handle_config(&self, args: &ConfigArgs) -> Result<()> {
        match &args.command {
            ConfigCommand::Init { path, force } => {
                let path = match path {
                    Some(path) => path.clone(),
                    None => TalkscopeConfig::default_path()?,
                };
                write_default_config(&path, *force)?;
                println!("Wrote default configuration to {}", path.display());
            }
            ConfigCommand::Show => print!("{}", self.config.settings.to_toml()?),
        }
        Ok(())
    }
}

/// Resolve the single transcript source named on the command line.
fn transcript_source(args: &AnalyzeArgs) -> Result<TranscriptSource> {
    if let Some(path) = &args.path {
        return Ok(TranscriptSource::Path(path.clone()));
    }
    if let Some(text) = &args.text {
        return Ok(TranscriptSource::Text(text.clone()));
    }
    if args.stdin {
        let text = std::io::read_to_string(std::io::stdin())?;
        return Ok(TranscriptSource::Text(text));
    }
    Err(CliError::Argument(
        "one of PATH, --text or --stdin is required".to_string(),
    ))
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists, use --force to overwrite",
            path.display()
        )));
    }
    TalkscopeConfig::default().save(path)?;
    Ok(())
}

/// Map `-v` occurrences to a level, falling back to the configured one.
pub fn log_level(verbosity: u8, configured: LogLevel) -> Level {
    match verbosity {
        0 => match configured {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Console rendering of an analysis report.
pub struct TextReport<'a>(pub &'a AnalysisReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "✅ 총 {}개의 메시지를 분석했습니다.", report.total_messages)?;
        writeln!(f, "{}", "-".repeat(40))?;

        writeln!(f, "\n📊 [참여자별 발화량]")?;
        for (rank, entry) in report.participation.iter().enumerate() {
            writeln!(
                f,
                "{}. {}: {}회 ({:.1}%)",
                rank + 1,
                entry.sender,
                entry.count,
                entry.ratio
            )?;
        }

        writeln!(f, "\n🔑 [핵심 키워드]")?;
        if report.keywords.is_empty() {
            writeln!(f, "👉 분석할 만한 명사가 충분하지 않습니다.")?;
        }
        for (rank, keyword) in report.keywords.iter().enumerate() {
            writeln!(f, "{}. {} ({}회)", rank + 1, keyword.word, keyword.count)?;
        }

        writeln!(f, "\n💡 [대화 분위기]")?;
        writeln!(f, "{} ({}점)", report.interest_label, report.interest_score)?;
        writeln!(f, "👉 {}", report.topic)?;
        writeln!(f, "{}", report.summary)?;

        writeln!(f, "\n🕒 [시간대별 대화량]")?;
        let peak = report
            .time_distribution
            .iter()
            .map(|bucket| bucket.count)
            .max()
            .unwrap_or(0);
        for bucket in &report.time_distribution {
            let width = if peak == 0 {
                0
            } else {
                (bucket.count * HISTOGRAM_WIDTH).div_ceil(peak)
            };
            writeln!(
                f,
                "{:02}시 | {} {}",
                bucket.hour,
                "█".repeat(width as usize),
                bucket.count
            )?;
        }
        Ok(())
    }
}

/// Parse arguments, load configuration and run the requested command.
pub fn run() -> Result<()> {
    App::new()?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use talkscope_core::{KeywordEntry, ParticipationEntry, TimeBucket};

    fn sample_report() -> AnalysisReport {
        let mut time_distribution: Vec<TimeBucket> =
            (0..24).map(|hour| TimeBucket { hour, count: 0 }).collect();
        time_distribution[15].count = 4;
        time_distribution[21].count = 1;

        AnalysisReport {
            participation: vec![
                ParticipationEntry {
                    sender: "김철수".to_string(),
                    count: 3,
                    ratio: 60.0,
                },
                ParticipationEntry {
                    sender: "이영희".to_string(),
                    count: 2,
                    ratio: 40.0,
                },
            ],
            keywords: vec![KeywordEntry {
                word: "영화".to_string(),
                count: 2,
            }],
            total_messages: 5,
            interest_score: 60,
            interest_label: "호감 있는 편 💗".to_string(),
            topic: "topic".to_string(),
            summary: "summary".to_string(),
            time_distribution,
        }
    }

    #[test]
    fn verbosity_overrides_configured_level() {
        assert_eq!(log_level(0, LogLevel::Warn), Level::WARN);
        assert_eq!(log_level(0, LogLevel::Error), Level::ERROR);
        assert_eq!(log_level(1, LogLevel::Error), Level::INFO);
        assert_eq!(log_level(2, LogLevel::Warn), Level::DEBUG);
        assert_eq!(log_level(5, LogLevel::Warn), Level::TRACE);
    }

    #[test]
    fn text_rendering_lists_every_section() {
        let text = TextReport(&sample_report()).to_string();

        assert!(text.contains("총 5개의 메시지"));
        assert!(text.contains("1. 김철수: 3회 (60.0%)"));
        assert!(text.contains("2. 이영희: 2회 (40.0%)"));
        assert!(text.contains("1. 영화 (2회)"));
        assert!(text.contains("호감 있는 편 💗 (60점)"));
        assert!(text.contains(&format!("15시 | {} 4", "█".repeat(30))));
        assert!(text.contains(&format!("21시 | {} 1", "█".repeat(8))));
        assert!(text.contains("00시 |  0"));
    }

    #[test]
    fn text_rendering_notes_missing_keywords() {
        let mut report = sample_report();
        report.keywords.clear();
        assert!(TextReport(&report).to_string().contains("분석할 만한 명사가 충분하지 않습니다"));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let missing = missing.to_string_lossy();
        let cli =
            Cli::try_parse_from(["talkscope", "-c", &*missing, "config", "show"]).unwrap();

        assert!(matches!(App::from_cli(cli), Err(CliError::Config(_))));
    }

    #[test]
    fn explicit_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("talkscope.toml");
        let mut settings = TalkscopeConfig::default();
        settings.keywords.display_size = 3;
        settings.save(&path).unwrap();

        let path_arg = path.to_string_lossy().into_owned();
        let cli = Cli::try_parse_from(["talkscope", "--config", path_arg.as_str(), "config", "show"])
            .unwrap();
        let app = App::from_cli(cli).unwrap();

        assert_eq!(app.config.settings.keywords.display_size, 3);
        assert_eq!(app.config.config_path, Some(path));
    }

    #[test]
    fn default_config_is_not_overwritten_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        write_default_config(&path, false).unwrap();
        assert_eq!(
            TalkscopeConfig::load(&path).unwrap(),
            TalkscopeConfig::default()
        );

        assert!(matches!(
            write_default_config(&path, false),
            Err(CliError::Config(_))
        ));
        write_default_config(&path, true).unwrap();
    }

    #[test]
    fn inline_text_becomes_text_source() {
        let cli = Cli::try_parse_from(["talkscope", "analyze", "--text", "hello"]).unwrap();
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(
            transcript_source(&args).unwrap(),
            TranscriptSource::Text("hello".to_string())
        );
    }
}
