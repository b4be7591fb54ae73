mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::emi::EmiArgs;
use commands::retirement::RetirementArgs;
use commands::sip::SipArgs;
use commands::tax::{SlabsArgs, TaxArgs};

/// Personal-finance calculations
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Personal-finance calculations",
    long_about = "A CLI for personal-finance calculations with decimal precision. \
                  Supports SIP projections, loan EMI schedules, old vs new income-tax \
                  regime comparison and retirement corpus planning."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter (e.g. "debug", "fincalc_core=trace"); overrides FINCALC_LOG and RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a monthly SIP: future value, gain and month-by-month growth
    Sip(SipArgs),
    /// Loan EMI, total interest and outstanding-balance schedule
    Emi(EmiArgs),
    /// Compare income tax under the old and new regimes
    Tax(TaxArgs),
    /// Print the slab table for a regime
    Slabs(SlabsArgs),
    /// Retirement corpus and the monthly savings needed to reach it
    Retirement(RetirementArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.log_level.as_deref()) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(2);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Sip(args) => commands::sip::run_sip(args),
        Commands::Emi(args) => commands::emi::run_emi(args),
        Commands::Tax(args) => commands::tax::run_tax(args),
        Commands::Slabs(args) => commands::tax::run_slabs(args),
        Commands::Retirement(args) => commands::retirement::run_retirement(args),
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
