use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use tracing::debug;

use fisco_cli::config::ConfigFile;
use fisco_cli::report::{Report, render_json, render_regions, render_text};
use fisco_cli::state::{AppState, Overrides};
use fisco_cli::{csv_loader, logging, utils};
use fisco_core::PaymentCount;
use fisco_core::calculations::ViewMode;
use fisco_data::TaxTables;
use fisco_data::catalog::reference_household;

// ─── CLI definition ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ViewArg {
    Annual,
    Monthly,
}

impl From<ViewArg> for ViewMode {
    fn from(value: ViewArg) -> Self {
        match value {
            ViewArg::Annual => ViewMode::Annual,
            ViewArg::Monthly => ViewMode::Monthly,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    #[default]
    Text,
    Json,
}

fn parse_gross(s: &str) -> Result<Decimal, String> {
    utils::parse_amount(s).map_err(|e| e.to_string())
}

fn parse_payments(s: &str) -> Result<PaymentCount, String> {
    let count: u8 = s.parse().map_err(|e| format!("{e}"))?;
    PaymentCount::try_from(count)
}

/// Where a Spanish salary goes: IRPF, Social Security and the indirect
/// taxes inside everyday spending.
///
/// Inputs come from an optional TOML file; flags override it.
#[derive(Debug, Parser)]
#[command(name = "fisco", version)]
struct Cli {
    /// TOML file with `[profile]`, `view` and `[[categories]]`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Gross annual salary, e.g. `30000` or `30.000,50`.
    #[arg(long, value_parser = parse_gross)]
    gross: Option<Decimal>,

    /// Region id (see `--list-regions`).
    #[arg(long)]
    region: Option<String>,

    #[arg(long)]
    children: Option<u32>,

    #[arg(long)]
    children_under_three: Option<u32>,

    /// Salary payments per year: 12 or 14.
    #[arg(long, value_parser = parse_payments)]
    payments: Option<PaymentCount>,

    #[arg(long, value_enum)]
    view: Option<ViewArg>,

    /// Monthly expenses as CSV; replaces the config categories.
    #[arg(long, conflicts_with = "sample_expenses")]
    expenses: Option<PathBuf>,

    /// Use a reference household's monthly expenses.
    #[arg(long)]
    sample_expenses: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print the known regions and exit.
    #[arg(long)]
    list_regions: bool,

    /// Log filter, e.g. `debug` or `fisco_core=trace`. Overrides RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())
        .context("failed to initialize logging")?;

    let tables = TaxTables::load().context("failed to load tax tables")?;

    if cli.list_regions {
        print!("{}", render_regions(&tables));
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => ConfigFile::load(path)
            .with_context(|| format!("failed to load config '{}'", path.display()))?,
        None => ConfigFile::default(),
    };

    let expenses = match (&cli.expenses, cli.sample_expenses) {
        (Some(path), _) => Some(
            csv_loader::load_from_file(path)
                .with_context(|| format!("failed to load expenses '{}'", path.display()))?,
        ),
        (None, true) => Some(reference_household()),
        (None, false) => None,
    };

    let overrides = Overrides {
        gross: cli.gross,
        region: cli.region,
        children: cli.children,
        children_under_three: cli.children_under_three,
        payments: cli.payments,
        view: cli.view.map(ViewMode::from),
        expenses,
    };
    let state = AppState::resolve(config, overrides).context("incomplete input")?;
    debug!(region = %state.profile.region_id, view = state.view.as_str(), "inputs resolved");

    let report = Report::build(&tables, &state).context("cannot compute the report")?;

    match cli.format {
        Format::Text => print!("{}", render_text(&report)),
        Format::Json => println!("{}", render_json(&report).context("failed to serialize report")?),
    }

    Ok(())
}
