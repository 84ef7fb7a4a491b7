//! reach - social metrics from the command line
//!
//! # Usage
//!
//! ```bash
//! # Chart YouTube followers for two performers over the last week
//! reach chart --data dashboard.json --platform youtube -p "Artist A" -p "Artist B" --period 7d
//!
//! # Growth badge for Spotify monthly listeners
//! reach growth --data dashboard.json --platform spotify --metric monthly_listeners
//!
//! # Share of each performer
//! reach breakdown --data dashboard.json --platform instagram
//!
//! # Re-render as filters change (reads commands from stdin)
//! reach explore --data dashboard.json
//! ```

mod cmd;

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reach_config::{Config, LogFormat, LogLevel, LogOutput};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// reach - social metrics from the command line
#[derive(Parser, Debug)]
#[command(name = "reach")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (error if specified but not found)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chart series for a platform metric
    Chart(cmd::chart::ChartArgs),

    /// Growth of a platform metric over a period
    Growth(cmd::growth::GrowthArgs),

    /// Per-performer breakdown of a platform metric
    Breakdown(cmd::breakdown::BreakdownArgs),

    /// List performers and their platforms
    Performers(cmd::performers::PerformersArgs),

    /// Re-render chart and growth as filters change (commands on stdin)
    Explore(cmd::explore::ExploreArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("failed to load config '{}'", path.display()),
        None => "failed to load config".to_string(),
    })?;
    let directive = resolve_log_filter(cli.log_level.as_deref(), &config)?;
    init_logging(&directive, &config)?;

    match cli.command {
        Command::Chart(args) => cmd::chart::run(args, &config),
        Command::Growth(args) => cmd::growth::run(args, &config),
        Command::Breakdown(args) => cmd::breakdown::run(args, &config),
        Command::Performers(args) => cmd::performers::run(args, &config),
        Command::Explore(args) => cmd::explore::run(args, &config),
    }
}

/// Filter directive: `--log-level` > `[log].level` > info
///
/// `RUST_LOG`, when set, replaces the whole directive.
fn resolve_log_filter(cli_level: Option<&str>, config: &Config) -> Result<String> {
    if let Ok(env) = std::env::var(EnvFilter::DEFAULT_ENV)
        && !env.trim().is_empty()
    {
        return Ok(env);
    }

    let level = cli_level
        .map(str::parse::<LogLevel>)
        .transpose()
        .context("invalid --log-level")?;
    Ok(config.log.filter_directive(level))
}

/// Install the global subscriber described by `[log]`
fn init_logging(directive: &str, config: &Config) -> Result<()> {
    let filter = EnvFilter::try_new(directive)
        .map_err(|e| anyhow::anyhow!("invalid log filter '{}': {}", directive, e))?;
    let registry = tracing_subscriber::registry().with(filter);

    match (&config.log.output, config.log.format) {
        (LogOutput::Stdout, LogFormat::Console) => registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stdout))
            .init(),
        (LogOutput::Stdout, LogFormat::Json) => registry
            .with(fmt::layer().json().with_writer(std::io::stdout))
            .init(),
        (LogOutput::Stderr, LogFormat::Console) => registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init(),
        (LogOutput::Stderr, LogFormat::Json) => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        (LogOutput::File(path), format) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file '{}'", path))?;
            let writer = Mutex::new(file);
            match format {
                LogFormat::Console => registry
                    .with(fmt::layer().with_ansi(false).with_writer(writer))
                    .init(),
                LogFormat::Json => registry.with(fmt::layer().json().with_writer(writer)).init(),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // RUST_LOG is not set under `cargo test` unless the caller exports it
    fn no_env() -> bool {
        std::env::var(EnvFilter::DEFAULT_ENV).is_err()
    }

    #[test]
    fn test_cli_level_overrides_config() {
        if !no_env() {
            return;
        }
        let config: Config = "[log]\nlevel = \"warn\"".parse().unwrap();
        let directive = resolve_log_filter(Some("debug"), &config).unwrap();
        assert!(directive.contains("reach=debug"));
    }

    #[test]
    fn test_config_level_used_without_flag() {
        if !no_env() {
            return;
        }
        let config: Config = "[log]\nlevel = \"warn\"".parse().unwrap();
        let directive = resolve_log_filter(None, &config).unwrap();
        assert!(directive.contains("reach_analytics=warn"));

        let directive = resolve_log_filter(None, &Config::default()).unwrap();
        assert!(directive.contains("reach=info"));
    }

    #[test]
    fn test_invalid_cli_level() {
        if !no_env() {
            return;
        }
        assert!(resolve_log_filter(Some("loud"), &Config::default()).is_err());
    }

    #[test]
    fn test_cli_parses_chart() {
        let cli = Cli::try_parse_from([
            "reach", "chart", "--data", "d.json", "--platform", "youtube", "-p", "Artist A", "-p",
            "Artist B", "--period", "7d",
        ])
        .unwrap();

        match cli.command {
            Command::Chart(args) => {
                assert_eq!(args.selection.performers, vec!["Artist A", "Artist B"]);
                assert_eq!(args.selection.metric, "followers");
                assert_eq!(args.selection.period.as_deref(), Some("7d"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "reach", "performers", "--data", "d.json", "--config", "reach.toml", "-l", "trace",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("trace"));
        assert!(cli.config.is_some());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
