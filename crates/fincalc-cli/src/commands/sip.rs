use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::sip::{self, SipInput};

use crate::input;

/// Arguments for a SIP projection
#[derive(Args)]
pub struct SipArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount invested at the start of every month
    #[arg(long)]
    pub monthly_investment: Option<Decimal>,

    /// Expected annual return in percent (e.g. 12)
    #[arg(long)]
    pub annual_return: Option<Decimal>,

    /// Investment horizon in years
    #[arg(long)]
    pub years: Option<u32>,
}

pub fn run_sip(args: SipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sip_input: SipInput = match input::from_file_or_stdin(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => SipInput {
            monthly_investment: args
                .monthly_investment
                .ok_or("--monthly-investment is required (or provide --input)")?,
            annual_return_pct: args
                .annual_return
                .ok_or("--annual-return is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
        },
    };

    let result = sip::project_sip(&sip_input)?;
    Ok(serde_json::to_value(result)?)
}
