//! Performers command - list performers and the platforms they have data for

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use reach_analytics::{Dashboard, Platform};
use reach_config::{Config, OutputFormat};
use serde::Serialize;

use super::{load_dashboard, resolve_format};

/// Performers command arguments
#[derive(Args, Debug)]
pub struct PerformersArgs {
    /// Dashboard payload (JSON) to read
    #[arg(short, long)]
    pub data: PathBuf,

    /// Output format (table, json, csv). Defaults to [dashboard].format
    #[arg(short, long)]
    pub format: Option<String>,
}

/// One performer and its platforms
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformerRow {
    pub name: String,
    pub platforms: Vec<Platform>,
}

/// Rows for every performer, in name order
pub fn performer_rows(dashboard: &Dashboard) -> Vec<PerformerRow> {
    dashboard
        .performers
        .iter()
        .map(|(name, data)| PerformerRow {
            name: name.clone(),
            platforms: data.platforms().collect(),
        })
        .collect()
}

pub fn run(args: PerformersArgs, config: &Config) -> Result<()> {
    let format = resolve_format(args.format.as_deref(), config)?;
    let loaded = load_dashboard(&args.data)?;
    let rows = performer_rows(&loaded.dashboard);

    let stdout = io::stdout();
    write_performers(&mut stdout.lock(), &rows, format)
}

/// Write performer rows in the requested format
pub fn write_performers(out: &mut impl Write, rows: &[PerformerRow], format: OutputFormat) -> Result<()> {
    let joined = |row: &PerformerRow, sep: &str| {
        row.platforms
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(sep)
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(rows)?;
            writeln!(out, "{}", json)?;
        }
        OutputFormat::Csv => {
            writeln!(out, "performer,platforms")?;
            for row in rows {
                writeln!(out, "{},{}", row.name, joined(row, ";"))?;
            }
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                writeln!(out, "(no performers)")?;
                return Ok(());
            }

            writeln!(out, "{:<30} {}", "Performer", "Platforms")?;
            writeln!(out, "{}", "-".repeat(60))?;
            for row in rows {
                writeln!(out, "{:<30} {}", row.name, joined(row, ", "))?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_skip_total() {
        let dashboard = Dashboard::from_json(
            r#"{
                "total": {"youtube": {}},
                "Beta": {"spotify": {}},
                "Alpha": {"youtube": {}, "instagram": {}}
            }"#,
        )
        .unwrap();

        let rows = performer_rows(&dashboard);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Alpha");
        assert_eq!(rows[0].platforms, vec![Platform::Youtube, Platform::Instagram]);
        assert_eq!(rows[1].platforms, vec![Platform::Spotify]);
    }

    #[test]
    fn test_csv() {
        let rows = vec![PerformerRow {
            name: "Alpha".to_string(),
            platforms: vec![Platform::Youtube, Platform::Spotify],
        }];

        let mut out = Vec::new();
        write_performers(&mut out, &rows, OutputFormat::Csv).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "performer,platforms\nAlpha,youtube;spotify\n"
        );
    }
}
