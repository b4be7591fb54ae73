use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::FinCalcError;
use crate::types::{Money, Rate};
use crate::FinCalcResult;

const HUNDRED: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Annual percentage (10 = 10%) to an annual fraction.
pub fn annual_rate(pct: Decimal) -> Rate {
    pct / HUNDRED
}

/// Annual percentage to a monthly fraction: `pct / 100 / 12`.
pub fn monthly_rate(pct: Decimal) -> Rate {
    pct / HUNDRED / MONTHS_PER_YEAR
}

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
///
/// Fails with [`FinCalcError::Overflow`] instead of panicking when the factor
/// leaves the 96-bit decimal range.
pub fn compound(rate: Rate, n: u32) -> FinCalcResult<Decimal> {
    let factor = Decimal::ONE + rate;
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = result.checked_mul(factor).ok_or_else(|| FinCalcError::Overflow {
            context: format!("compounding {rate} over {n} periods"),
        })?;
    }
    Ok(result)
}

/// Cumulative growth factors `[(1+r)^1, (1+r)^2, .., (1+r)^n]`.
///
/// Every element is produced by the same multiplication chain as
/// [`compound`], so `factors[m - 1] == compound(rate, m)` exactly.
pub fn growth_factors(rate: Rate, n: u32) -> FinCalcResult<Vec<Decimal>> {
    let factor = Decimal::ONE + rate;
    let mut factors = Vec::with_capacity(n as usize);
    let mut running = Decimal::ONE;
    for period in 1..=n {
        running = running.checked_mul(factor).ok_or_else(|| FinCalcError::Overflow {
            context: format!("growth factor at period {period}"),
        })?;
        factors.push(running);
    }
    Ok(factors)
}

/// Longest SIP or loan horizon accepted, in years.
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Whole years to months. Callers validate `years <= MAX_HORIZON_YEARS`
/// first; the check here still refuses to wrap.
pub fn months_in(years: u32) -> FinCalcResult<u32> {
    years.checked_mul(12).ok_or_else(|| FinCalcError::Overflow {
        context: format!("{years} years in months"),
    })
}

/// `a * b`, or [`FinCalcError::Overflow`] naming `context`.
pub fn checked_mul(a: Decimal, b: Decimal, context: &str) -> FinCalcResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflow(context))
}

/// `a / b`, or [`FinCalcError::Overflow`] naming `context`. A zero divisor
/// is reported the same way.
pub fn checked_div(a: Decimal, b: Decimal, context: &str) -> FinCalcResult<Decimal> {
    a.checked_div(b).ok_or_else(|| overflow(context))
}

fn overflow(context: &str) -> FinCalcError {
    FinCalcError::Overflow {
        context: context.to_string(),
    }
}

/// Future value of one unit paid at the start of each period for `n`
/// periods, given the precomputed `growth = (1+r)^n`.
///
/// `((1+r)^n - 1) / r * (1+r)`, or `n` when `r = 0`.
pub fn annuity_due_factor(rate: Rate, growth: Decimal, n: u32) -> FinCalcResult<Decimal> {
    if rate.is_zero() {
        return Ok(Decimal::from(n));
    }
    let ordinary = checked_div(growth - Decimal::ONE, rate, "annuity factor")?;
    checked_mul(ordinary, Decimal::ONE + rate, "annuity factor")
}

/// Present value of one unit paid at the end of each period for `n` periods.
///
/// `(1 - (1+r)^-n) / r`, or `n` when `r = 0`. Requires `r > -1`.
pub fn pv_annuity_factor(rate: Rate, n: u32) -> FinCalcResult<Decimal> {
    if rate <= dec!(-1) {
        return Err(FinCalcError::invalid(
            "rate",
            "periodic rate must be greater than -100%",
        ));
    }
    if rate.is_zero() {
        return Ok(Decimal::from(n));
    }
    let growth = compound(rate, n)?;
    let discount = checked_div(Decimal::ONE, growth, "discount factor")?;
    checked_div(Decimal::ONE - discount, rate, "present value factor")
}

/// Level installment repaying `principal` over `n` periods at `rate`,
/// given the precomputed `growth = (1+r)^n`.
///
/// `P r (1+r)^n / ((1+r)^n - 1)`, or `P / n` when `r = 0`.
pub fn installment(principal: Money, rate: Rate, growth: Decimal, n: u32) -> FinCalcResult<Money> {
    if rate.is_zero() {
        return checked_div(principal, Decimal::from(n), "installment");
    }
    let interest = checked_mul(principal, rate, "installment")?;
    let scaled = checked_mul(interest, growth, "installment")?;
    checked_div(scaled, growth - Decimal::ONE, "installment")
}
