use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::retirement::{self, RetirementInput};

use crate::input;

/// Arguments for retirement planning
#[derive(Args)]
pub struct RetirementArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Current monthly household expense
    #[arg(long)]
    pub monthly_expense: Option<Decimal>,

    #[arg(long)]
    pub current_age: Option<u32>,

    #[arg(long)]
    pub retirement_age: Option<u32>,

    /// Age up to which the corpus must last
    #[arg(long)]
    pub life_expectancy: Option<u32>,

    /// Annual inflation in percent
    #[arg(long, default_value = "6")]
    pub inflation: Decimal,

    /// Annual return before retirement in percent
    #[arg(long, default_value = "12")]
    pub pre_return: Decimal,

    /// Annual return after retirement in percent
    #[arg(long, default_value = "8")]
    pub post_return: Decimal,
}

pub fn run_retirement(args: RetirementArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ret_input: RetirementInput = match input::from_file_or_stdin(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => RetirementInput {
            current_monthly_expense: args
                .monthly_expense
                .ok_or("--monthly-expense is required (or provide --input)")?,
            current_age: args
                .current_age
                .ok_or("--current-age is required (or provide --input)")?,
            retirement_age: args
                .retirement_age
                .ok_or("--retirement-age is required (or provide --input)")?,
            life_expectancy_age: args
                .life_expectancy
                .ok_or("--life-expectancy is required (or provide --input)")?,
            inflation_pct: args.inflation,
            post_retirement_return_pct: args.post_return,
            pre_retirement_return_pct: args.pre_return,
        },
    };

    let result = retirement::plan_retirement(&ret_input)?;
    Ok(serde_json::to_value(result)?)
}
