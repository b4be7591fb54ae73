use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::FinCalcError;
use crate::time_value::{
    annual_rate, annuity_due_factor, checked_div, checked_mul, compound, months_in, monthly_rate,
    pv_annuity_factor,
};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinCalcResult;

/// Oldest age accepted for any of the three ages.
pub const MAX_AGE: u32 = 150;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for retirement corpus planning. Rates are annual
/// percentages (6 = 6% p.a.).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementInput {
    pub current_monthly_expense: Money,
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy_age: u32,
    pub inflation_pct: Decimal,
    pub post_retirement_return_pct: Decimal,
    pub pre_retirement_return_pct: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementOutput {
    pub current_monthly_expense: Money,
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy_age: u32,
    pub inflation_pct: Decimal,
    pub post_retirement_return_pct: Decimal,
    pub pre_retirement_return_pct: Decimal,
    pub years_to_retirement: u32,
    pub years_post_retirement: u32,
    pub monthly_expense_at_retirement: Money,
    /// Monthly post-retirement return net of monthly inflation.
    pub monthly_real_return: Rate,
    pub corpus_required: Money,
    pub monthly_savings_required: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Size the corpus needed at retirement to fund inflated monthly expenses
/// until life expectancy, and the level monthly SIP that reaches it.
pub fn plan_retirement(
    input: &RetirementInput,
) -> FinCalcResult<ComputationOutput<RetirementOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_retirement_input(input)?;

    let years_to_retirement = input.retirement_age - input.current_age;
    let years_post_retirement = input.life_expectancy_age - input.retirement_age;

    // --- Expense at retirement (annual inflation) ---
    let inflation = annual_rate(input.inflation_pct);
    let monthly_expense_at_retirement = checked_mul(
        input.current_monthly_expense,
        compound(inflation, years_to_retirement)?,
        "expense at retirement",
    )?;

    // --- Corpus: PV of the expense stream at the real monthly rate ---
    let monthly_real_return =
        monthly_rate(input.post_retirement_return_pct) - monthly_rate(input.inflation_pct);
    if monthly_real_return <= dec!(-1) {
        return Err(FinCalcError::invalid(
            "inflation_pct",
            "inflation exceeds post-retirement return by more than 100% per month",
        ));
    }
    let months_post = months_in(years_post_retirement)?;
    if monthly_real_return.is_zero() {
        warnings.push(
            "Post-retirement return equals inflation: corpus is expenses times months".into(),
        );
    } else if monthly_real_return < Decimal::ZERO {
        warnings.push("Post-retirement return is below inflation: corpus erodes in real terms".into());
    }
    let corpus_required = checked_mul(
        monthly_expense_at_retirement,
        pv_annuity_factor(monthly_real_return, months_post)?,
        "retirement corpus",
    )?;

    // --- Monthly savings: invert the SIP (annuity due) future value ---
    let pre_rate = monthly_rate(input.pre_retirement_return_pct);
    let months_to_retirement = months_in(years_to_retirement)?;
    if pre_rate.is_zero() {
        warnings.push("Zero pre-retirement return: savings are corpus / months".into());
    }
    let growth_factor = annuity_due_factor(
        pre_rate,
        compound(pre_rate, months_to_retirement)?,
        months_to_retirement,
    )?;
    let monthly_savings_required =
        checked_div(corpus_required, growth_factor, "monthly savings")?;

    debug!(
        years_to_retirement,
        years_post_retirement,
        %monthly_expense_at_retirement,
        %corpus_required,
        %monthly_savings_required,
        "planned retirement"
    );

    let output = RetirementOutput {
        current_monthly_expense: input.current_monthly_expense,
        current_age: input.current_age,
        retirement_age: input.retirement_age,
        life_expectancy_age: input.life_expectancy_age,
        inflation_pct: input.inflation_pct,
        post_retirement_return_pct: input.post_retirement_return_pct,
        pre_retirement_return_pct: input.pre_retirement_return_pct,
        years_to_retirement,
        years_post_retirement,
        monthly_expense_at_retirement,
        monthly_real_return,
        corpus_required,
        monthly_savings_required,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Retirement corpus (PV of inflated expenses at real return) and SIP savings",
        &serde_json::json!({
            "current_age": input.current_age,
            "retirement_age": input.retirement_age,
            "life_expectancy_age": input.life_expectancy_age,
            "inflation_pct": input.inflation_pct.to_string(),
            "pre_retirement_return_pct": input.pre_retirement_return_pct.to_string(),
            "post_retirement_return_pct": input.post_retirement_return_pct.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn validate_retirement_input(input: &RetirementInput) -> FinCalcResult<()> {
    if input.current_monthly_expense <= Decimal::ZERO {
        return Err(FinCalcError::invalid(
            "current_monthly_expense",
            "monthly expense must be > 0",
        ));
    }
    if input.retirement_age <= input.current_age {
        return Err(FinCalcError::invalid(
            "retirement_age",
            "retirement age must be after current age",
        ));
    }
    if input.life_expectancy_age <= input.retirement_age {
        return Err(FinCalcError::invalid(
            "life_expectancy_age",
            "life expectancy must be after retirement age",
        ));
    }
    if input.life_expectancy_age > MAX_AGE {
        return Err(FinCalcError::invalid(
            "life_expectancy_age",
            format!("life expectancy must be at most {MAX_AGE}"),
        ));
    }

    let rates = [
        ("inflation_pct", input.inflation_pct),
        ("post_retirement_return_pct", input.post_retirement_return_pct),
        ("pre_retirement_return_pct", input.pre_retirement_return_pct),
    ];
    for (field, value) in rates {
        if value < Decimal::ZERO {
            return Err(FinCalcError::invalid(field, "rate must be >= 0"));
        }
    }
    Ok(())
}
