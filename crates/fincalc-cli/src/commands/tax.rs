use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use fincalc_core::tax::{self, slabs, AgeBand, AssessmentYear, Regime, TaxInput};

use crate::input;

/// Arguments for the old vs new regime comparison
#[derive(Args)]
pub struct TaxArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Annual cost to company
    #[arg(long)]
    pub ctc: Option<Decimal>,

    /// Basic salary as percent of CTC
    #[arg(long, default_value = "40")]
    pub basic_pct: Decimal,

    /// Employee PF contribution per month
    #[arg(long, default_value = "0")]
    pub employee_pf: Decimal,

    /// Employer PF contribution per month
    #[arg(long, default_value = "0")]
    pub employer_pf: Decimal,

    /// Other annual employer retirals inside CTC
    #[arg(long, default_value = "0")]
    pub retirals: Decimal,

    /// Annual HRA received
    #[arg(long, default_value = "0")]
    pub hra_received: Decimal,

    /// Annual rent paid
    #[arg(long, default_value = "0")]
    pub rent_paid: Decimal,

    #[arg(long, default_value = "0")]
    pub lta: Decimal,

    /// ELSS and other 80C investments
    #[arg(long, default_value = "0")]
    pub elss: Decimal,

    /// Employer NPS contribution (annual)
    #[arg(long, default_value = "0")]
    pub employer_nps: Decimal,

    /// Other old-regime deductions (80D, 80G, ...)
    #[arg(long, default_value = "0")]
    pub other_deductions: Decimal,

    /// Assessment year: 2025-26 or 2026-27
    #[arg(long, default_value = "2026-27")]
    pub assessment_year: AssessmentYear,

    /// Age band: under60, 60-79 or 80+
    #[arg(long, default_value = "under60")]
    pub age_band: AgeBand,
}

/// Arguments for printing a slab table
#[derive(Args)]
pub struct SlabsArgs {
    /// old or new
    #[arg(long)]
    pub regime: Regime,

    #[arg(long, default_value = "2026-27")]
    pub assessment_year: AssessmentYear,

    #[arg(long, default_value = "under60")]
    pub age_band: AgeBand,
}

pub fn run_tax(args: TaxArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let tax_input: TaxInput = match input::from_file_or_stdin(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => TaxInput {
            ctc: args.ctc.ok_or("--ctc is required (or provide --input)")?,
            basic_pct: args.basic_pct,
            employee_pf_monthly: args.employee_pf,
            employer_pf_monthly: args.employer_pf,
            retirals: args.retirals,
            hra_received: args.hra_received,
            rent_paid: args.rent_paid,
            lta: args.lta,
            elss: args.elss,
            employer_nps: args.employer_nps,
            other_deductions: args.other_deductions,
            assessment_year: args.assessment_year,
            age_band: args.age_band,
        },
    };

    let result = tax::compare_regimes(&tax_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_slabs(args: SlabsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let table = tax::slab_table(args.regime, args.assessment_year, args.age_band);
    slabs::validate_slab_table(table)?;
    let rebate = tax::rebate_rule(args.regime, args.assessment_year);
    Ok(json!({
        "result": {
            "regime": args.regime,
            "assessment_year": args.assessment_year,
            "age_band": args.age_band,
            "rebate_income_ceiling": rebate.income_ceiling,
            "max_rebate": rebate.max_rebate,
            "cess_rate": tax::CESS_RATE,
            "slabs": table,
        }
    }))
}
