use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::FinCalcError;
use crate::time_value::{
    checked_div, checked_mul, growth_factors, installment, months_in, monthly_rate,
    MAX_HORIZON_YEARS,
};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for a level-installment loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiInput {
    pub principal: Money,
    /// Annual interest rate as a percentage (10 = 10% p.a.).
    pub annual_rate_pct: Decimal,
    /// Loan tenure in whole years.
    pub years: u32,
}

/// Outstanding principal right after the installment for `month` is paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationPoint {
    pub month: u32,
    pub balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiOutput {
    pub monthly_rate: Rate,
    pub months: u32,
    pub principal: Money,
    pub emi: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub balance_series: Vec<AmortizationPoint>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Compute the equated monthly installment and the outstanding-balance
/// schedule for a fully amortizing loan.
pub fn amortize_loan(input: &EmiInput) -> FinCalcResult<ComputationOutput<EmiOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_emi_input(input)?;

    let r = monthly_rate(input.annual_rate_pct);
    let months = months_in(input.years)?;
    debug!(%r, months, principal = %input.principal, "amortizing loan");

    if r.is_zero() {
        warnings.push("Zero interest rate: installment is principal / months".into());
    }

    let factors = growth_factors(r, months)?;
    let full_growth = factors.last().copied().unwrap_or(Decimal::ONE);
    let emi = installment(input.principal, r, full_growth, months)?;

    let balance_series = factors
        .iter()
        .zip(1..=months)
        .map(|(growth, month)| -> FinCalcResult<AmortizationPoint> {
            Ok(AmortizationPoint {
                month,
                balance: outstanding_balance(input.principal, emi, r, *growth, month)?,
            })
        })
        .collect::<FinCalcResult<Vec<_>>>()?;

    let total_payment = checked_mul(emi, Decimal::from(months), "total loan payment")?;
    let total_interest = total_payment - input.principal;

    let output = EmiOutput {
        monthly_rate: r,
        months,
        principal: input.principal,
        emi,
        total_payment,
        total_interest,
        balance_series,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "EMI (reducing balance, monthly rests)",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_pct": input.annual_rate_pct.to_string(),
            "years": input.years,
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// `P (1+r)^m - EMI ((1+r)^m - 1) / r`, clamped at zero so rounding
/// residue in the final month never shows as a negative balance.
fn outstanding_balance(
    principal: Money,
    emi: Money,
    r: Rate,
    growth: Decimal,
    month: u32,
) -> FinCalcResult<Money> {
    let balance = if r.is_zero() {
        principal - checked_mul(emi, Decimal::from(month), "outstanding balance")?
    } else {
        let accrued = checked_mul(principal, growth, "outstanding balance")?;
        let repaid = checked_div(
            checked_mul(emi, growth - Decimal::ONE, "outstanding balance")?,
            r,
            "outstanding balance",
        )?;
        accrued - repaid
    };
    Ok(balance.max(Decimal::ZERO))
}

fn validate_emi_input(input: &EmiInput) -> FinCalcResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(FinCalcError::invalid("principal", "loan amount must be > 0"));
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(FinCalcError::invalid(
            "annual_rate_pct",
            "interest rate must be >= 0",
        ));
    }
    if input.years == 0 {
        return Err(FinCalcError::invalid("years", "tenure must be > 0 years"));
    }
    if input.years > MAX_HORIZON_YEARS {
        return Err(FinCalcError::invalid(
            "years",
            format!("tenure must be at most {MAX_HORIZON_YEARS} years"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn home_loan() -> EmiInput {
        EmiInput {
            principal: dec!(1_000_000),
            annual_rate_pct: dec!(10),
            years: 20,
        }
    }

    #[test]
    fn test_emi_known_answer() {
        // 10L at 10% for 20 years ≈ 9,650.22 / month
        let out = amortize_loan(&home_loan()).unwrap().result;
        assert!((out.emi - dec!(9650.22)).abs() < dec!(0.01), "got {}", out.emi);
        assert_eq!(out.months, 240);
    }

    #[test]
    fn test_totals_reconcile_exactly() {
        let out = amortize_loan(&home_loan()).unwrap().result;
        assert_eq!(out.total_payment, out.emi * dec!(240));
        assert_eq!(out.total_payment, out.principal + out.total_interest);
        assert!(out.total_interest > Decimal::ZERO);
    }

    #[test]
    fn test_balance_reaches_zero_at_maturity() {
        let out = amortize_loan(&home_loan()).unwrap().result;
        let last = out.balance_series.last().unwrap();
        assert_eq!(last.month, 240);
        assert!(last.balance < dec!(0.01), "residual balance {}", last.balance);
    }

    #[test]
    fn test_balance_is_non_increasing() {
        let out = amortize_loan(&home_loan()).unwrap().result;
        assert!(out.balance_series[0].balance < dec!(1_000_000));
        for pair in out.balance_series.windows(2) {
            assert!(pair[1].balance <= pair[0].balance);
        }
    }

    #[test]
    fn test_first_month_balance() {
        // After month 1: 1,000,000 * (1 + 0.1/12) - EMI
        let out = amortize_loan(&home_loan()).unwrap().result;
        let expected = dec!(1_000_000) + dec!(1_000_000) * dec!(0.10) / dec!(12) - out.emi;
        assert!((out.balance_series[0].balance - expected).abs() < dec!(0.000001));
    }

    #[test]
    fn test_zero_rate_falls_back_to_straight_line() {
        let input = EmiInput {
            principal: dec!(120_000),
            annual_rate_pct: Decimal::ZERO,
            years: 1,
        };
        let result = amortize_loan(&input).unwrap();
        let out = &result.result;
        assert_eq!(out.emi, dec!(10_000));
        assert_eq!(out.total_interest, Decimal::ZERO);
        assert_eq!(out.balance_series[5].balance, dec!(60_000));
        assert_eq!(out.balance_series[11].balance, Decimal::ZERO);
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_rejects_non_positive_principal() {
        let mut input = home_loan();
        input.principal = Decimal::ZERO;
        assert!(amortize_loan(&input).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_rejects_zero_tenure() {
        let mut input = home_loan();
        input.years = 0;
        assert!(amortize_loan(&input).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_extreme_rate_overflow_is_an_error() {
        // 10L at 150% p.a. over 40 years
        let input = EmiInput {
            principal: dec!(1_000_000),
            annual_rate_pct: dec!(150),
            years: 40,
        };
        let err = amortize_loan(&input).unwrap_err();
        assert!(matches!(err, FinCalcError::Overflow { .. }), "got {err:?}");
    }

    #[test]
    fn test_rejects_tenure_beyond_limit() {
        let mut input = home_loan();
        input.years = u32::MAX;
        assert!(amortize_loan(&input).unwrap_err().is_invalid_input());
    }
}
