//! Plain-text report adapter implementing ReportPort.
//!
//! Renders the three setup sections followed by any skipped tickers.

use std::io::Write;

use crate::domain::error::ScannerError;
use crate::domain::report::{ScanReport, chart_url};
use crate::ports::report_port::ReportPort;

pub struct TextReportAdapter;

fn section(out: &mut dyn Write, title: &str, lines: &[String]) -> std::io::Result<()> {
    writeln!(out, "=== {} ({}) ===", title, lines.len())?;
    if lines.is_empty() {
        writeln!(out, "  none found")?;
    }
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    writeln!(out)
}

fn render(report: &ScanReport, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        out,
        "Catalyst scan as of {}: {} scanned, {} skipped",
        report.as_of,
        report.tickers_scanned,
        report.skipped.len()
    )?;
    writeln!(out)?;

    let ep: Vec<String> = report
        .ep
        .iter()
        .map(|hit| {
            let marker = if hit.low_confidence {
                " [low confidence]"
            } else {
                ""
            };
            format!(
                "  {:<6} gap {:+.2}%  vol {:.1}x  close {:.2}{}\n         {}",
                hit.ticker,
                hit.gap_pct,
                hit.vol_ratio,
                hit.close,
                marker,
                chart_url(&hit.ticker)
            )
        })
        .collect();
    section(out, "EP ALERT", &ep)?;

    let momentum: Vec<String> = report
        .momentum
        .iter()
        .map(|hit| {
            format!(
                "  {:<6} ADR {:.2}%  close {:.2}\n         {}",
                hit.ticker,
                hit.adr20,
                hit.close,
                chart_url(&hit.ticker)
            )
        })
        .collect();
    section(out, "MOMENTUM", &momentum)?;

    let swing: Vec<String> = report
        .swing
        .iter()
        .map(|hit| {
            format!(
                "  {:<6} range {:.2}%  close {:.2}\n         {}",
                hit.ticker,
                hit.range_pct,
                hit.close,
                chart_url(&hit.ticker)
            )
        })
        .collect();
    section(out, "SWING WATCH", &swing)?;

    if !report.skipped.is_empty() {
        writeln!(out, "Skipped:")?;
        for skipped in &report.skipped {
            writeln!(out, "  {}: {}", skipped.ticker, skipped.reason)?;
        }
    }
    Ok(())
}

impl ReportPort for TextReportAdapter {
    fn write(&self, report: &ScanReport, out: &mut dyn Write) -> Result<(), ScannerError> {
        render(report, out).map_err(|e| ScannerError::Report {
            reason: format!("failed to write text report: {}", e),
        })
    }
}
