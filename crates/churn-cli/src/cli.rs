//! CLI argument definitions for the churn pipeline.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use churn_cli::logging::{LogConfig, LogFormat};
use churn_model::StageKind;
use clap::{ColorChoice, Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "churn",
    version,
    about = "Run the churn artifact pipeline",
    long_about = "Run the churn artifact pipeline.\n\n\
                  Pulls the configured dataset from the source database, drops the\n\
                  columns the schema marks as insignificant, and writes raw and\n\
                  interim CSV artifacts under the project root."
)]
pub struct Cli {
    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Append logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: <PROJECT_ROOT>/settings/pipeline.toml).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run the stage sequence up to and including this stage.
    #[arg(long = "through", value_enum, value_name = "STAGE")]
    pub through: Option<StageArg>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

/// `--log-level` wins over `-v`/`-q`; either one disables `RUST_LOG`.
impl From<&Cli> for LogConfig {
    fn from(cli: &Cli) -> Self {
        let level_filter = cli
            .log_level
            .map_or_else(|| cli.verbosity.tracing_level_filter(), LevelFilter::from);
        let with_ansi = match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
        };
        LogConfig {
            level_filter,
            use_env_filter: !(cli.verbosity.is_present() || cli.log_level.is_some()),
            with_ansi,
            format: cli.log_format.into(),
            log_file: cli.log_file.clone(),
            ..LogConfig::default()
        }
    }
}

/// Pipeline stages, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StageArg {
    DataIngestion,
    DataValidation,
    DataPreprocessing,
    DataSplit,
    ModelTrainer,
    ModelEvaluation,
    ModelValidation,
}

impl From<StageArg> for StageKind {
    fn from(arg: StageArg) -> Self {
        match arg {
            StageArg::DataIngestion => StageKind::DataIngestion,
            StageArg::DataValidation => StageKind::DataValidation,
            StageArg::DataPreprocessing => StageKind::DataPreprocessing,
            StageArg::DataSplit => StageKind::DataSplit,
            StageArg::ModelTrainer => StageKind::ModelTrainer,
            StageArg::ModelEvaluation => StageKind::ModelEvaluation,
            StageArg::ModelValidation => StageKind::ModelValidation,
        }
    }
}
