use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::FinCalcError;
use crate::time_value::{
    annuity_due_factor, checked_mul, growth_factors, months_in, monthly_rate, MAX_HORIZON_YEARS,
};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for a systematic investment plan projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipInput {
    /// Fixed contribution made at the start of every month.
    pub monthly_investment: Money,
    /// Expected annual return as a percentage (12 = 12% p.a.).
    pub annual_return_pct: Decimal,
    /// Investment horizon in whole years.
    pub years: u32,
}

/// Portfolio value after a given month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub month: u32,
    pub value: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipOutput {
    pub monthly_rate: Rate,
    pub months: u32,
    pub future_value: Money,
    pub invested: Money,
    pub gain: Money,
    pub growth_series: Vec<GrowthPoint>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project the future value of a monthly SIP, compounding monthly with
/// contributions at the start of each month (annuity due).
pub fn project_sip(input: &SipInput) -> FinCalcResult<ComputationOutput<SipOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_sip_input(input)?;

    let r = monthly_rate(input.annual_return_pct);
    let months = months_in(input.years)?;
    debug!(%r, months, monthly_investment = %input.monthly_investment, "projecting SIP");

    if r.is_zero() {
        warnings.push("Zero return rate: future value equals total invested".into());
    }

    let factors = growth_factors(r, months)?;
    let growth_series = factors
        .iter()
        .zip(1..=months)
        .map(|(growth, month)| -> FinCalcResult<GrowthPoint> {
            let factor = annuity_due_factor(r, *growth, month)?;
            Ok(GrowthPoint {
                month,
                value: checked_mul(input.monthly_investment, factor, "SIP portfolio value")?,
            })
        })
        .collect::<FinCalcResult<Vec<_>>>()?;

    // years > 0 guarantees a non-empty series
    let future_value = growth_series
        .last()
        .map(|p| p.value)
        .unwrap_or(Decimal::ZERO);
    let invested = checked_mul(
        input.monthly_investment,
        Decimal::from(months),
        "SIP invested total",
    )?;
    let gain = future_value - invested;

    let output = SipOutput {
        monthly_rate: r,
        months,
        future_value,
        invested,
        gain,
        growth_series,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "SIP future value (monthly compounding, contributions at start of month)",
        &serde_json::json!({
            "monthly_investment": input.monthly_investment.to_string(),
            "annual_return_pct": input.annual_return_pct.to_string(),
            "years": input.years,
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn validate_sip_input(input: &SipInput) -> FinCalcResult<()> {
    if input.monthly_investment < Decimal::ZERO {
        return Err(FinCalcError::invalid(
            "monthly_investment",
            "monthly investment must be >= 0",
        ));
    }
    if input.annual_return_pct < Decimal::ZERO {
        return Err(FinCalcError::invalid(
            "annual_return_pct",
            "annual return must be >= 0",
        ));
    }
    if input.years == 0 {
        return Err(FinCalcError::invalid("years", "duration must be > 0 years"));
    }
    if input.years > MAX_HORIZON_YEARS {
        return Err(FinCalcError::invalid(
            "years",
            format!("duration must be at most {MAX_HORIZON_YEARS} years"),
        ));
    }
    Ok(())
}
