//! FundFlow CLI: scriptable access to the dashboard data.
//!
//! Commands:
//! - `funds`: list the catalog with hotspot status
//! - `history` / `intraday` / `compare`: print the generated series as JSON
//! - `stats`: headline statistics and hotspot for one fund
//! - `analyze`: request AI commentary for one fund

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use fundflow_core::analysis::FundAnalyst;
use fundflow_core::catalog::{FundRepository, InMemoryCatalog};
use fundflow_core::config::DashboardConfig;
use fundflow_core::dashboard::{DashboardBuilder, FundView};

#[derive(Parser)]
#[command(name = "fundflow", about = "FundFlow CLI: fund monitoring data and analysis")]
struct Cli {
    /// Path to a TOML config file. Defaults to the user config dir.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Master seed for synthetic series (overrides `[rng] master_seed`).
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Last history date (YYYY-MM-DD). Defaults to today.
    #[arg(long, global = true)]
    end_date: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog funds with hotspot status.
    Funds,
    /// Daily NAV history for a fund.
    History { code: String },
    /// Intraday session (price and IOPV) for a fund.
    Intraday { code: String },
    /// Percent change of a fund against its peers.
    Compare { code: String },
    /// Headline statistics and hotspot for a fund.
    Stats { code: String },
    /// Generate AI commentary for a fund.
    Analyze { code: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = DashboardConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let config = with_overrides(&cli, config);
    let catalog = config.open_catalog().context("opening fund catalog")?;

    match &cli.command {
        Commands::Funds => {
            let builder = builder(&cli, &config, &catalog)?;
            let rows: Vec<_> = catalog
                .funds()
                .iter()
                .zip(builder.hotspots())
                .map(|(fund, hotspot)| json!({ "fund": fund, "hotspot": hotspot }))
                .collect();
            print_json(&rows)
        }
        Commands::History { code } => {
            let view = build_view(&cli, &config, &catalog, code)?;
            print_json(&json!({
                "code": view.fund.code,
                "source": view.history_source,
                "points": view.history,
            }))
        }
        Commands::Intraday { code } => {
            let view = build_view(&cli, &config, &catalog, code)?;
            print_json(&json!({
                "code": view.fund.code,
                "implied_open": view.implied_open,
                "close": view.close(),
                "points": view.intraday,
            }))
        }
        Commands::Compare { code } => {
            let view = build_view(&cli, &config, &catalog, code)?;
            let peers: Vec<&str> = view.peers.iter().map(|p| p.code.as_str()).collect();
            print_json(&json!({
                "code": view.fund.code,
                "peers": peers,
                "points": view.comparison,
            }))
        }
        Commands::Stats { code } => {
            let view = build_view(&cli, &config, &catalog, code)?;
            print_json(&json!({
                "code": view.fund.code,
                "stats": view.stats,
                "hotspot": view.hotspot,
            }))
        }
        Commands::Analyze { code } => run_analyze(&cli, &config, &catalog, code),
    }
}

fn run_analyze(
    cli: &Cli,
    config: &DashboardConfig,
    catalog: &InMemoryCatalog,
    code: &str,
) -> Result<()> {
    let view = build_view(cli, config, catalog, code)?;
    let analyst = FundAnalyst::from_config(&config.analysis).context("building analysis client")?;
    eprintln!("Analyzing {} with {}...", view.fund.code, analyst.model());
    match analyst.analyze(&view.fund, &view.history) {
        Ok(text) => {
            println!("{text}");
            Ok(())
        }
        // Details are in the log; the user only sees the generic message.
        Err(failure) => bail!("{failure}"),
    }
}

/// Command-line flags win over the config file.
fn with_overrides(cli: &Cli, mut config: DashboardConfig) -> DashboardConfig {
    if let Some(seed) = cli.seed {
        config.rng.master_seed = Some(seed);
    }
    config
}

fn builder<'a>(
    cli: &Cli,
    config: &DashboardConfig,
    catalog: &'a InMemoryCatalog,
) -> Result<DashboardBuilder<'a>> {
    let mut builder = DashboardBuilder::from_config(catalog, config)?;
    if let Some(end) = cli.end_date {
        builder = builder.with_end_date(end);
    }
    Ok(builder)
}

fn build_view(
    cli: &Cli,
    config: &DashboardConfig,
    catalog: &InMemoryCatalog,
    code: &str,
) -> Result<FundView> {
    let view = builder(cli, config, catalog)?.build(code)?;
    Ok(view)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}

/// stdout carries JSON, so logs go to stderr.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "fundflow", "stats", "TECH-001", "--seed", "7", "--end-date", "2025-06-30",
        ])
        .unwrap();
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.end_date, NaiveDate::from_ymd_opt(2025, 6, 30));
        assert!(matches!(cli.command, Commands::Stats { ref code } if code == "TECH-001"));
    }

    #[test]
    fn subcommand_requires_code() {
        assert!(Cli::try_parse_from(["fundflow", "history"]).is_err());
        assert!(Cli::try_parse_from(["fundflow", "funds"]).is_ok());
    }

    #[test]
    fn end_date_is_validated_by_the_parser() {
        let cli = Cli::try_parse_from(["fundflow", "funds", "--end-date", "2025-01-02"]).unwrap();
        assert_eq!(cli.end_date, NaiveDate::from_ymd_opt(2025, 1, 2));
        assert!(Cli::try_parse_from(["fundflow", "funds", "--end-date", "02/01/2025"]).is_err());
    }

    #[test]
    fn seeded_builder_is_deterministic() {
        let cli = Cli::try_parse_from([
            "fundflow", "history", "TECH-001", "--seed", "3", "--end-date", "2025-06-30",
        ])
        .unwrap();
        let config = with_overrides(&cli, DashboardConfig::default());
        assert_eq!(config.rng.master_seed, Some(3));
        let catalog = InMemoryCatalog::builtin();
        let a = build_view(&cli, &config, &catalog, "TECH-001").unwrap();
        let b = build_view(&cli, &config, &catalog, "TECH-001").unwrap();
        assert_eq!(a.history, b.history);
        assert_eq!(a.history.last().unwrap().date, NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
    }

    #[test]
    fn unknown_fund_is_an_error() {
        let cli = Cli::try_parse_from(["fundflow", "stats", "NOPE", "--seed", "1"]).unwrap();
        let config = DashboardConfig::default();
        let catalog = InMemoryCatalog::builtin();
        assert!(build_view(&cli, &config, &catalog, "NOPE").is_err());
    }
}
