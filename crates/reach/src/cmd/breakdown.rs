//! Breakdown command - each performer's share of a platform metric
//!
//! # Usage
//!
//! ```bash
//! reach breakdown --data dashboard.json --platform youtube --metric views
//! ```

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use reach_analytics::{Breakdown, format_compact_number, performer_breakdown};
use reach_config::{Config, OutputFormat};
use tracing::debug;

use super::{SelectionArgs, load_dashboard};

/// Breakdown command arguments
#[derive(Args, Debug)]
pub struct BreakdownArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

pub fn run(args: BreakdownArgs, config: &Config) -> Result<()> {
    let resolved = args.selection.resolve(config)?;
    let loaded = load_dashboard(&args.selection.data)?;

    let breakdown = performer_breakdown(
        &loaded.dashboard,
        resolved.platform,
        resolved.metric,
        &resolved.performers,
    );
    debug!(shares = breakdown.shares.len(), total = breakdown.total, "built breakdown");

    let stdout = io::stdout();
    write_breakdown(&mut stdout.lock(), &breakdown, resolved.format)
}

/// Write a breakdown in the requested format
pub fn write_breakdown(out: &mut impl Write, breakdown: &Breakdown, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(breakdown)?;
            writeln!(out, "{}", json)?;
        }
        OutputFormat::Csv => {
            writeln!(out, "performer,value,percentage")?;
            for share in &breakdown.shares {
                writeln!(out, "{},{},{:.2}", share.performer, share.value, share.percentage)?;
            }
        }
        OutputFormat::Table => {
            if breakdown.is_empty() {
                writeln!(out, "(no data)")?;
                return Ok(());
            }

            writeln!(out, "{:<30} {:>12} {:>8}", "Performer", "Value", "Share")?;
            writeln!(out, "{}", "-".repeat(52))?;
            for share in &breakdown.shares {
                writeln!(
                    out,
                    "{:<30} {:>12} {:>7.1}%",
                    share.performer,
                    format_compact_number(share.value),
                    share.percentage
                )?;
            }
            writeln!(out, "{}", "-".repeat(52))?;
            writeln!(out, "Total: {}", format_compact_number(breakdown.total))?;
        }
    }

    Ok(())
}
