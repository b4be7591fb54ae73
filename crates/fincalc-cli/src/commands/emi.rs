use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::emi::{self, EmiInput};

use crate::input;

/// Arguments for a loan EMI schedule
#[derive(Args)]
pub struct EmiArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 8.5)
    #[arg(long)]
    pub annual_rate: Option<Decimal>,

    /// Tenure in years
    #[arg(long)]
    pub years: Option<u32>,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let emi_input: EmiInput = match input::from_file_or_stdin(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => EmiInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_pct: args
                .annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
        },
    };

    let result = emi::amortize_loan(&emi_input)?;
    Ok(serde_json::to_value(result)?)
}
