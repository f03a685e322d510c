//! CLI definition and dispatch.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::earnings_csv_adapter::EarningsCsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::config_validation::validate_scan_config;
use crate::domain::earnings::earnings_dates;
use crate::domain::error::ScannerError;
use crate::domain::report::{ScanReport, SkipReason, chart_url};
use crate::domain::scan_config::ScanConfig;
use crate::domain::scanner::{Scanner, TickerOutcome, TickerScan};
use crate::domain::universe::{is_plausible_ticker, normalize_ticker, parse_tickers};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::earnings_port::EarningsPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "catalyst-scanner", about = "Post-earnings technical setup scanner")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan recent earnings reporters (or an explicit list) for setups
    Scan {
        #[arg(short, long)]
        config: PathBuf,
        /// Comma-separated tickers; skips the earnings calendar
        #[arg(short, long)]
        tickers: Option<String>,
        /// Scan date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        as_of: Option<NaiveDate>,
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show indicators and classifier results for one ticker
    Check {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: String,
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Validate a scanner configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Scan {
            config,
            tickers,
            as_of,
            format,
            output,
        } => run_scan(&config, tickers.as_deref(), as_of, format, output.as_deref()),
        Command::Check {
            config,
            ticker,
            as_of,
        } => run_check(&config, &ticker, as_of),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

/// Loads and validates the INI file, returning the adapter and the parsed
/// scan settings.
pub fn load_scan_config(path: &Path) -> Result<(FileConfigAdapter, ScanConfig), ExitCode> {
    info!(path = %path.display(), "loading config");
    let adapter = load_config(path)?;
    if let Err(e) = validate_scan_config(&adapter) {
        eprintln!("error: {e}");
        return Err((&e).into());
    }
    let scan_config = ScanConfig::from_config(&adapter);
    Ok((adapter, scan_config))
}

pub fn resolve_as_of(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| Local::now().date_naive())
}

pub fn bars_dir(config: &dyn ConfigPort) -> Result<PathBuf, ScannerError> {
    config
        .get_string("data", "bars_dir")
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| ScannerError::ConfigMissing {
            section: "data".into(),
            key: "bars_dir".into(),
        })
}

/// Tickers that reported in the lookback window ending at `as_of`, sorted.
pub fn collect_earnings_tickers(
    earnings_port: &dyn EarningsPort,
    as_of: NaiveDate,
    lookback_days: u32,
) -> Vec<String> {
    let dates = earnings_dates(as_of, lookback_days);
    info!(days = dates.len(), "collecting earnings reporters");
    earnings_port
        .fetch_earnings_tickers(&dates)
        .into_iter()
        .collect()
}

/// An explicit `--tickers` list wins; otherwise the earnings calendar at
/// `[data] earnings_file` is consulted.
pub fn resolve_tickers(
    tickers_override: Option<&str>,
    config: &dyn ConfigPort,
    scan_config: &ScanConfig,
    as_of: NaiveDate,
) -> Result<Vec<String>, ScannerError> {
    if let Some(list) = tickers_override {
        return parse_tickers(list).map_err(|e| ScannerError::ConfigInvalid {
            section: "cli".into(),
            key: "tickers".into(),
            reason: e.to_string(),
        });
    }

    let earnings_file = config
        .get_string("data", "earnings_file")
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ScannerError::ConfigMissing {
            section: "data".into(),
            key: "earnings_file".into(),
        })?;
    let calendar = EarningsCsvAdapter::from_file(&earnings_file)?;
    Ok(collect_earnings_tickers(
        &calendar,
        as_of,
        scan_config.settings.earnings_lookback_days,
    ))
}

fn run_scan(
    config_path: &Path,
    tickers_override: Option<&str>,
    as_of: Option<NaiveDate>,
    format: ReportFormat,
    output: Option<&Path>,
) -> ExitCode {
    let (adapter, scan_config) = match load_scan_config(config_path) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    let as_of = resolve_as_of(as_of);

    let tickers = match resolve_tickers(tickers_override, &adapter, &scan_config, as_of) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_port = match bars_dir(&adapter) {
        Ok(dir) => CsvAdapter::new(dir),
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    run_scan_pipeline(&data_port, &scan_config, &tickers, as_of, format, output)
}

pub fn run_scan_pipeline(
    data_port: &dyn DataPort,
    scan_config: &ScanConfig,
    tickers: &[String],
    as_of: NaiveDate,
    format: ReportFormat,
    output: Option<&Path>,
) -> ExitCode {
    if tickers.is_empty() {
        warn!(%as_of, "no tickers to scan");
    } else {
        info!(count = tickers.len(), %as_of, "scanning tickers");
    }

    let report = Scanner::new(data_port, scan_config).scan(tickers, as_of);

    match write_report(&report, format, output) {
        Ok(()) => {
            if let Some(path) = output {
                info!(path = %path.display(), "report written");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn write_report(
    report: &ScanReport,
    format: ReportFormat,
    output: Option<&Path>,
) -> Result<(), ScannerError> {
    let port: &dyn ReportPort = match format {
        ReportFormat::Text => &TextReportAdapter,
        ReportFormat::Json => &JsonReportAdapter,
    };

    match output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            port.write(report, &mut out)?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            port.write(report, &mut out)?;
        }
    }
    Ok(())
}

fn skip_error(ticker: &str, reason: SkipReason) -> ScannerError {
    match reason {
        SkipReason::NoData => ScannerError::NoData {
            ticker: ticker.to_string(),
        },
        SkipReason::InsufficientBars { bars, minimum } => ScannerError::InsufficientHistory {
            ticker: ticker.to_string(),
            bars,
            minimum,
        },
        SkipReason::FetchFailed { reason } | SkipReason::InvalidSeries { reason } => {
            ScannerError::DataSource { reason }
        }
    }
}

/// Runs the full per-ticker pipeline for `check`, turning a skip into an error.
pub fn check_ticker(
    data_port: &dyn DataPort,
    scan_config: &ScanConfig,
    ticker: &str,
    as_of: NaiveDate,
) -> Result<TickerScan, ScannerError> {
    let ticker = normalize_ticker(ticker);
    if !is_plausible_ticker(&ticker) {
        return Err(ScannerError::ConfigInvalid {
            section: "cli".into(),
            key: "ticker".into(),
            reason: format!("invalid ticker symbol: {}", ticker),
        });
    }

    match Scanner::new(data_port, scan_config).scan_ticker(&ticker, as_of) {
        TickerOutcome::Scanned(scan) => Ok(scan),
        TickerOutcome::Skipped(skipped) => Err(skip_error(&skipped.ticker, skipped.reason)),
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v))
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "YES" } else { "no" }
}

pub fn write_check(scan: &TickerScan, out: &mut dyn Write) -> io::Result<()> {
    let series = &scan.series;
    writeln!(
        out,
        "{}: {} bars, {} flagged",
        series.ticker(),
        series.len(),
        series.flagged().len()
    )?;

    if let Some(latest) = series.latest() {
        let bar = &latest.bar;
        writeln!(
            out,
            "Latest {}: O {:.2}  H {:.2}  L {:.2}  C {:.2}  V {}",
            bar.date, bar.open, bar.high, bar.low, bar.close, bar.volume
        )?;
        writeln!(out, "  {:<10} {}", "RANGE%", fmt_opt(latest.daily_range_pct))?;
        for (indicator, value) in latest.indicators() {
            writeln!(out, "  {:<10} {}", indicator.to_string(), fmt_opt(value))?;
        }
    }

    if !series.flagged().is_empty() {
        writeln!(out, "Flagged bars:")?;
        for flagged in series.flagged() {
            writeln!(out, "  {}: {}", flagged.date, flagged.issue)?;
        }
    }

    let signals = &scan.signals;
    writeln!(out)?;
    writeln!(
        out,
        "Episodic pivot: {}  gap {:+.2}%  vol {:.1}x{}",
        yes_no(signals.ep.is_ep),
        signals.ep.gap_pct,
        signals.ep.vol_ratio,
        if signals.ep.low_confidence {
            " [low confidence]"
        } else {
            ""
        }
    )?;
    writeln!(
        out,
        "Momentum:       {}  ADR {:.2}%",
        yes_no(signals.momentum.is_momentum),
        signals.momentum.adr20
    )?;
    writeln!(
        out,
        "Swing:          {}  range {:.2}%",
        yes_no(signals.swing.is_swing),
        signals.swing.range_pct
    )?;
    writeln!(out, "Chart: {}", chart_url(series.ticker()))
}

fn run_check(config_path: &Path, ticker: &str, as_of: Option<NaiveDate>) -> ExitCode {
    let (adapter, scan_config) = match load_scan_config(config_path) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    let data_port = match bars_dir(&adapter) {
        Ok(dir) => CsvAdapter::new(dir),
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let scan = match check_ticker(&data_port, &scan_config, ticker, resolve_as_of(as_of)) {
        Ok(scan) => scan,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let stdout = io::stdout();
    if let Err(e) = write_check(&scan, &mut stdout.lock()) {
        let err = ScannerError::Io(e);
        eprintln!("error: {err}");
        return (&err).into();
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &Path) -> ExitCode {
    let (_, scan_config) = match load_scan_config(config_path) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let ScanConfig {
        ep,
        momentum,
        swing,
        settings,
    } = scan_config;
    eprintln!(
        "Episodic pivot: gap >= {}%, volume >= {}x, low confidence allowed: {}",
        ep.gap_pct, ep.volume_ratio, ep.allow_low_confidence
    );
    eprintln!("Momentum:       ADR > {}%", momentum.adr_pct);
    eprintln!(
        "Swing:          range < {}% over {} bars, close >= {} x 52w high ({})",
        swing.tightness_pct, swing.tightness_window, swing.near_high_fraction, swing.high_fallback
    );
    eprintln!(
        "Scanner:        {} earnings days, {} history days, {} min bars, {}ms delay",
        settings.earnings_lookback_days,
        settings.history_days,
        settings.min_history_bars,
        settings.request_delay_ms
    );
    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_scan_arguments() {
        let cli = Cli::try_parse_from([
            "catalyst-scanner",
            "scan",
            "--config",
            "scanner.ini",
            "--tickers",
            "NVDA,AMD",
            "--as-of",
            "2024-08-15",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Command::Scan {
                config,
                tickers,
                as_of,
                format,
                output,
            } => {
                assert_eq!(config, PathBuf::from("scanner.ini"));
                assert_eq!(tickers.as_deref(), Some("NVDA,AMD"));
                assert_eq!(as_of, NaiveDate::from_ymd_opt(2024, 8, 15));
                assert_eq!(format, ReportFormat::Json);
                assert!(output.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn rejects_malformed_as_of() {
        let result = Cli::try_parse_from([
            "catalyst-scanner",
            "check",
            "--config",
            "scanner.ini",
            "--ticker",
            "NVDA",
            "--as-of",
            "15/08/2024",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn resolve_as_of_prefers_explicit_date() {
        let date = NaiveDate::from_ymd_opt(2024, 8, 15).unwrap();
        assert_eq!(resolve_as_of(Some(date)), date);
    }

    #[test]
    fn skip_error_maps_to_exit_codes() {
        let exit = |e: &ScannerError| format!("{:?}", ExitCode::from(e));

        let no_data = skip_error("NVDA", SkipReason::NoData);
        assert_eq!(exit(&no_data), format!("{:?}", ExitCode::from(5)));

        let short = skip_error(
            "NVDA",
            SkipReason::InsufficientBars {
                bars: 3,
                minimum: 50,
            },
        );
        assert!(matches!(
            short,
            ScannerError::InsufficientHistory { bars: 3, minimum: 50, .. }
        ));

        let fetch = skip_error(
            "NVDA",
            SkipReason::FetchFailed {
                reason: "gone".into(),
            },
        );
        assert_eq!(exit(&fetch), format!("{:?}", ExitCode::from(3)));
    }
}
