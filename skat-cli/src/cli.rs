use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Danish salary-after-tax calculator.
///
/// Breaks a gross salary down into AM-bidrag, the deduction chain, every tax
/// line and the resulting net pay.
#[derive(Debug, Parser)]
#[command(name = "skat", version, about, long_about = None)]
pub struct Cli {
    /// TOML settings file with default year, municipality, pension and output.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Municipality CSV replacing the built-in dataset.
    #[arg(long, global = true)]
    pub municipalities: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute one salary breakdown.
    Calculate(CalculateArgs),

    /// Compute every scenario in a CSV file.
    Batch(BatchArgs),

    /// List the municipality dataset.
    Municipalities(MunicipalitiesArgs),

    /// List supported income years and their parameters.
    Years,
}

#[derive(Debug, Clone, Default, Args)]
pub struct CalculateArgs {
    /// Gross salary, annual unless --monthly is given.
    #[arg(short, long, required_unless_present = "request")]
    pub gross: Option<Decimal>,

    /// Treat --gross as a monthly amount.
    #[arg(short, long)]
    pub monthly: bool,

    /// Employee pension contribution as a fraction of gross (e.g. 0.05).
    #[arg(long)]
    pub pension_rate: Option<Decimal>,

    /// Annual ATP contribution.
    #[arg(long)]
    pub atp: Option<Decimal>,

    /// Extra annual deductions, applied after jobfradrag.
    #[arg(long)]
    pub other_deductions: Option<Decimal>,

    /// Municipality id, or `average`.
    #[arg(long)]
    pub municipality: Option<String>,

    /// Member of the Folkekirke.
    #[arg(long, conflicts_with = "no_church")]
    pub church: bool,

    /// Not a member, overriding the settings file.
    #[arg(long)]
    pub no_church: bool,

    /// Income year.
    #[arg(short, long)]
    pub year: Option<i32>,

    /// JSON request file (camelCase fields) instead of the flags above.
    #[arg(long, conflicts_with = "gross")]
    pub request: Option<PathBuf>,

    /// Output as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    /// Scenario CSV file.
    #[arg(short, long)]
    pub file: PathBuf,

    /// Output as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct MunicipalitiesArgs {
    /// Municipality CSV to list instead of the active dataset.
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}
