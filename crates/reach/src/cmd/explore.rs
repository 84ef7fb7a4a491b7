//! Explore command - re-render chart and growth as filters change
//!
//! Reads one command per line from stdin and prints the chart and growth
//! views after every change. Series are memoized in a [`ChartCache`], so
//! flipping back to an earlier filter does not rebuild anything.
//!
//! # Commands
//!
//! ```text
//! period 7d                   switch period (today, 7d, 30d)
//! platform spotify            switch platform
//! metric monthly_listeners    switch metric
//! select Artist A, Artist B   select performers (comma separated)
//! toggle Artist C             add or remove one performer
//! all                         clear the selection
//! reload                      re-read the dashboard file
//! stats                       print cache statistics
//! quit
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use clap::Args;
use reach_analytics::{
    ChartCache, Dashboard, FilterState, Metric, Period, Platform, SeriesStats,
};
use reach_config::{Config, OutputFormat};
use tracing::{info, warn};

use super::chart::{ChartReport, write_chart};
use super::growth::{GrowthReport, write_growth};
use super::{SelectionArgs, load_dashboard};

/// Explore command arguments
#[derive(Args, Debug)]
pub struct ExploreArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// One interactive command
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Period(Period),
    Platform(Platform),
    Metric(Metric),
    Select(Vec<String>),
    Toggle(String),
    All,
    Reload,
    Stats,
    Quit,
}

impl Action {
    /// Parse a command line; `None` for blank lines and comments
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(v, r)| (v, r.trim()));

        let action = match verb.to_lowercase().as_str() {
            "period" => Self::Period(Period::parse(rest)?),
            "platform" => Self::Platform(Platform::parse(rest)?),
            "metric" => Self::Metric(Metric::parse(rest)?),
            "select" => Self::Select(
                rest.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            "toggle" if !rest.is_empty() => Self::Toggle(rest.to_string()),
            "toggle" => bail!("toggle needs a performer name"),
            "all" => Self::All,
            "reload" => Self::Reload,
            "stats" => Self::Stats,
            "quit" | "exit" => Self::Quit,
            other => bail!("unknown command '{}'", other),
        };

        Ok(Some(action))
    }
}

/// Interactive state: the loaded dashboard plus current filters
pub struct Session {
    path: PathBuf,
    dashboard: Dashboard,
    version: u64,
    platform: Platform,
    metric: Metric,
    filter: FilterState,
    fixed_now: Option<DateTime<Utc>>,
    cache: ChartCache,
}

impl Session {
    pub fn open(args: &SelectionArgs, config: &Config) -> Result<Self> {
        let resolved = args.resolve(config)?;
        let loaded = load_dashboard(&args.data)?;

        Ok(Self {
            path: args.data.clone(),
            dashboard: loaded.dashboard,
            version: loaded.version,
            platform: resolved.platform,
            metric: resolved.metric,
            filter: FilterState::new(resolved.period).with_performers(resolved.performers),
            fixed_now: args.now.is_some().then_some(resolved.now),
            cache: ChartCache::new(config.dashboard.cache_capacity),
        })
    }

    /// Current filter selections
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Chart series cache
    pub fn cache(&self) -> &ChartCache {
        &self.cache
    }

    /// Apply an action; returns false when the session should end
    pub fn apply(&mut self, action: Action, out: &mut impl Write) -> Result<bool> {
        match action {
            Action::Period(period) => self.filter.period = period,
            Action::Platform(platform) => self.platform = platform,
            Action::Metric(metric) => self.metric = metric,
            Action::Select(names) => self.filter.selected = names,
            Action::Toggle(name) => {
                if let Some(pos) = self.filter.selected.iter().position(|n| *n == name) {
                    self.filter.selected.remove(pos);
                } else {
                    self.filter.selected.push(name);
                }
            }
            Action::All => self.filter.selected.clear(),
            Action::Reload => {
                let loaded = load_dashboard(&self.path)?;
                if loaded.version == self.version {
                    info!("dashboard unchanged");
                }
                self.dashboard = loaded.dashboard;
                self.version = loaded.version;
            }
            Action::Stats => {
                let stats = self.cache.stats();
                writeln!(
                    out,
                    "cache: {} series, {} lookups, {:.0}% hits",
                    self.cache.len(),
                    stats.total_lookups.load(std::sync::atomic::Ordering::Relaxed),
                    stats.hit_rate() * 100.0
                )?;
                return Ok(true);
            }
            Action::Quit => return Ok(false),
        }

        self.render(out)?;
        Ok(true)
    }

    /// Print chart and growth for the current filters
    pub fn render(&self, out: &mut impl Write) -> Result<()> {
        let now = self.fixed_now.unwrap_or_else(Utc::now);
        let query = self.filter.chart_query(self.platform, self.metric);
        let points = self
            .cache
            .get_or_build(self.version, &self.dashboard, &query, now);

        let report = ChartReport {
            platform: self.platform.as_str(),
            metric: self.metric.as_str(),
            period: self.filter.period,
            performers: &self.filter.selected,
            points: &points,
            stats: SeriesStats::from_points(&points),
        };
        write_chart(out, &report, OutputFormat::Table)?;
        writeln!(out)?;

        let growth = GrowthReport::build(
            &self.dashboard,
            self.platform,
            self.metric,
            &self.filter.selected,
            self.filter.period,
            now,
        );
        write_growth(out, &growth, OutputFormat::Table)?;
        writeln!(out)?;
        Ok(())
    }
}

/// Drive a session from line input until `quit` or end of input
pub fn run_session(session: &mut Session, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    session.render(out)?;

    for line in input.lines() {
        let line = line?;
        let action = match Action::parse(&line) {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(e) => {
                warn!(line = %line, error = %e, "ignoring command");
                writeln!(out, "error: {}", e)?;
                continue;
            }
        };

        if !session.apply(action, out)? {
            break;
        }
    }

    Ok(())
}

pub fn run(args: ExploreArgs, config: &Config) -> Result<()> {
    let mut session = Session::open(&args.selection, config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut session, stdin.lock(), &mut stdout.lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    const PAYLOAD: &str = r#"{
        "Artist A": {
            "youtube": {
                "followers": {
                    "latest": 120,
                    "entries": [
                        {"value": 100, "datetime": "2026-01-01T09:00:00Z"},
                        {"value": 120, "datetime": "2026-01-02T09:00:00Z"}
                    ]
                }
            }
        },
        "total": {
            "youtube": {
                "followers": {
                    "latest": 120,
                    "entries": [
                        {"value": 100, "datetime": "2026-01-01T09:00:00Z", "performer": "Artist A"},
                        {"value": 120, "datetime": "2026-01-02T09:00:00Z", "performer": "Artist A"}
                    ]
                }
            }
        }
    }"#;

    fn session() -> (tempfile::NamedTempFile, Session) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PAYLOAD.as_bytes()).unwrap();

        let args = SelectionArgs {
            data: file.path().to_path_buf(),
            platform: "youtube".to_string(),
            metric: "followers".to_string(),
            performers: Vec::new(),
            period: Some("7d".to_string()),
            now: Some("2026-01-02T18:00:00Z".to_string()),
            format: None,
        };
        let session = Session::open(&args, &Config::default()).unwrap();
        (file, session)
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(
            Action::parse("period today").unwrap(),
            Some(Action::Period(Period::Today))
        );
        assert_eq!(
            Action::parse("select Artist A, Artist B").unwrap(),
            Some(Action::Select(vec![
                "Artist A".to_string(),
                "Artist B".to_string()
            ]))
        );
        assert_eq!(
            Action::parse("toggle Artist C").unwrap(),
            Some(Action::Toggle("Artist C".to_string()))
        );
        assert_eq!(Action::parse("  ").unwrap(), None);
        assert_eq!(Action::parse("# note").unwrap(), None);
        assert_eq!(Action::parse("QUIT").unwrap(), Some(Action::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(Action::parse("period 90d").is_err());
        assert!(Action::parse("toggle").is_err());
        assert!(Action::parse("zoom in").is_err());
    }

    #[test]
    fn test_toggle() {
        let (_file, mut session) = session();
        let mut out = Vec::new();

        session
            .apply(Action::Toggle("Artist A".to_string()), &mut out)
            .unwrap();
        assert_eq!(session.filter().selected, vec!["Artist A"]);

        session
            .apply(Action::Toggle("Artist A".to_string()), &mut out)
            .unwrap();
        assert!(session.filter().is_all());
    }

    #[test]
    fn test_revisited_filter_hits_cache() {
        let (_file, mut session) = session();
        let input = "period today\nperiod 7d\nquit\nperiod 30d\n";
        let mut out = Vec::new();

        run_session(&mut session, input.as_bytes(), &mut out).unwrap();

        // initial 7d render, today, 7d again; quit stops before 30d
        assert_eq!(session.filter().period, Period::SevenDays);
        assert_eq!(session.cache().len(), 2);
        assert_eq!(
            session
                .cache()
                .stats()
                .hits
                .load(std::sync::atomic::Ordering::Relaxed),
            1
        );
    }

    #[test]
    fn test_bad_command_is_reported() {
        let (_file, mut session) = session();
        let mut out = Vec::new();

        run_session(&mut session, "bogus\n".as_bytes(), &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("error: unknown command 'bogus'"));
    }

    #[test]
    fn test_render_shows_growth() {
        let (_file, session) = session();
        let mut out = Vec::new();

        session.render(&mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("2026-01-02"));
        assert!(output.contains("+20.00%"));
    }
}
