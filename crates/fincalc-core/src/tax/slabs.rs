//! Progressive slab tables and the marginal-rate walk over them.
//!
//! Slab bounds are inclusive whole-rupee figures as published: the slab
//! `250001–500000` starts right after `0–250000` ends, so both are 250000
//! wide. A slab's lower edge is therefore `min - 1` (or zero for the first).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{AgeBand, AssessmentYear, Regime};
use crate::error::FinCalcError;
use crate::types::{Money, Rate};
use crate::FinCalcResult;

/// One income bracket taxed at a single marginal rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub min: Money,
    /// `None` for the unbounded top slab.
    pub max: Option<Money>,
    pub rate: Rate,
}

impl TaxSlab {
    /// Income already consumed by lower slabs when this one starts.
    pub fn floor(&self) -> Money {
        (self.min - Decimal::ONE).max(Decimal::ZERO)
    }

    /// Amount of income this slab can absorb, `None` if unbounded.
    pub fn width(&self) -> Option<Money> {
        self.max.map(|max| max - self.floor())
    }
}

/// Tax attributed to one slab for a given income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdownEntry {
    pub min: Money,
    pub max: Option<Money>,
    pub taxable: Money,
    pub rate: Rate,
    pub tax: Money,
}

/// Base tax (before cess and rebate) plus the per-slab breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeResult {
    pub tax: Money,
    pub breakdown: Vec<TaxBreakdownEntry>,
}

const fn slab(min: Money, max: Option<Money>, rate: Rate) -> TaxSlab {
    TaxSlab { min, max, rate }
}

pub static OLD_REGIME_UNDER_60: [TaxSlab; 4] = [
    slab(dec!(0), Some(dec!(250000)), dec!(0)),
    slab(dec!(250001), Some(dec!(500000)), dec!(0.05)),
    slab(dec!(500001), Some(dec!(1000000)), dec!(0.20)),
    slab(dec!(1000001), None, dec!(0.30)),
];

pub static OLD_REGIME_60_TO_79: [TaxSlab; 4] = [
    slab(dec!(0), Some(dec!(300000)), dec!(0)),
    slab(dec!(300001), Some(dec!(500000)), dec!(0.05)),
    slab(dec!(500001), Some(dec!(1000000)), dec!(0.20)),
    slab(dec!(1000001), None, dec!(0.30)),
];

pub static OLD_REGIME_80_PLUS: [TaxSlab; 3] = [
    slab(dec!(0), Some(dec!(500000)), dec!(0)),
    slab(dec!(500001), Some(dec!(1000000)), dec!(0.20)),
    slab(dec!(1000001), None, dec!(0.30)),
];

pub static NEW_REGIME_AY_2025_26: [TaxSlab; 6] = [
    slab(dec!(0), Some(dec!(300000)), dec!(0)),
    slab(dec!(300001), Some(dec!(700000)), dec!(0.05)),
    slab(dec!(700001), Some(dec!(1000000)), dec!(0.10)),
    slab(dec!(1000001), Some(dec!(1200000)), dec!(0.15)),
    slab(dec!(1200001), Some(dec!(1500000)), dec!(0.20)),
    slab(dec!(1500001), None, dec!(0.30)),
];

pub static NEW_REGIME_AY_2026_27: [TaxSlab; 7] = [
    slab(dec!(0), Some(dec!(400000)), dec!(0)),
    slab(dec!(400001), Some(dec!(800000)), dec!(0.05)),
    slab(dec!(800001), Some(dec!(1200000)), dec!(0.10)),
    slab(dec!(1200001), Some(dec!(1600000)), dec!(0.15)),
    slab(dec!(1600001), Some(dec!(2000000)), dec!(0.20)),
    slab(dec!(2000001), Some(dec!(2400000)), dec!(0.25)),
    slab(dec!(2400001), None, dec!(0.30)),
];

/// Slab table for a regime. Age only matters under the old regime; the new
/// regime's table depends on the assessment year alone.
pub fn slab_table(regime: Regime, year: AssessmentYear, age: AgeBand) -> &'static [TaxSlab] {
    match regime {
        Regime::Old => match age {
            AgeBand::Under60 => &OLD_REGIME_UNDER_60,
            AgeBand::From60To79 => &OLD_REGIME_60_TO_79,
            AgeBand::Over80 => &OLD_REGIME_80_PLUS,
        },
        Regime::New => match year {
            AssessmentYear::Ay2025_26 => &NEW_REGIME_AY_2025_26,
            AssessmentYear::Ay2026_27 => &NEW_REGIME_AY_2026_27,
        },
    }
}

/// Walk `slabs` in ascending order, taxing each slice of `income` at its
/// slab's rate. Only slabs that absorb a non-zero amount appear in the
/// breakdown, so zero income yields an empty breakdown.
pub fn tax_with_breakdown(income: Money, slabs: &[TaxSlab]) -> RegimeResult {
    let mut remaining = income.max(Decimal::ZERO);
    let mut tax = Decimal::ZERO;
    let mut breakdown = Vec::new();

    for s in slabs {
        if remaining <= Decimal::ZERO {
            break;
        }
        let taxable = match s.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        let slab_tax = taxable * s.rate;
        tax += slab_tax;
        breakdown.push(TaxBreakdownEntry {
            min: s.min,
            max: s.max,
            taxable,
            rate: s.rate,
            tax: slab_tax,
        });
        remaining -= taxable;
    }

    RegimeResult { tax, breakdown }
}

/// Check that `slabs` partition `[0, ∞)`: starts at zero, each slab begins
/// one unit after the previous ends, only the last is unbounded, and rates
/// never decrease.
pub fn validate_slab_table(slabs: &[TaxSlab]) -> FinCalcResult<()> {
    let first = slabs
        .first()
        .ok_or_else(|| FinCalcError::invalid("slabs", "slab table is empty"))?;
    if !first.min.is_zero() {
        return Err(FinCalcError::invalid(
            "slabs",
            format!("first slab starts at {} instead of 0", first.min),
        ));
    }

    for (i, pair) in slabs.windows(2).enumerate() {
        let (lower, upper) = (&pair[0], &pair[1]);
        let Some(max) = lower.max else {
            return Err(FinCalcError::invalid(
                "slabs",
                format!("slab {i} is unbounded but is not the last slab"),
            ));
        };
        if max < lower.min {
            return Err(FinCalcError::invalid(
                "slabs",
                format!("slab {i} ends at {max} before it starts at {}", lower.min),
            ));
        }
        if upper.min != max + Decimal::ONE {
            return Err(FinCalcError::invalid(
                "slabs",
                format!(
                    "slab {} starts at {} but slab {i} ends at {max}",
                    i + 1,
                    upper.min
                ),
            ));
        }
        if upper.rate < lower.rate {
            return Err(FinCalcError::invalid(
                "slabs",
                format!("rate drops from {} to {} at slab {}", lower.rate, upper.rate, i + 1),
            ));
        }
    }

    if slabs.last().and_then(|s| s.max).is_some() {
        return Err(FinCalcError::invalid("slabs", "top slab must be unbounded"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn all_tables() -> [&'static [TaxSlab]; 5] {
        [
            &OLD_REGIME_UNDER_60,
            &OLD_REGIME_60_TO_79,
            &OLD_REGIME_80_PLUS,
            &NEW_REGIME_AY_2025_26,
            &NEW_REGIME_AY_2026_27,
        ]
    }

    #[test]
    fn test_every_table_partitions_income() {
        for table in all_tables() {
            validate_slab_table(table).unwrap();
        }
    }

    #[test]
    fn test_widths_reconstruct_boundaries() {
        for table in all_tables() {
            let mut next_min = Decimal::ZERO;
            for s in table {
                assert_eq!(s.min, next_min);
                match s.max {
                    Some(max) => next_min += max - s.min + Decimal::ONE,
                    None => break,
                }
            }
        }
    }

    #[test]
    fn test_zero_income_has_empty_breakdown() {
        for table in all_tables() {
            let result = tax_with_breakdown(Decimal::ZERO, table);
            assert_eq!(result.tax, Decimal::ZERO);
            assert!(result.breakdown.is_empty());
        }
    }

    #[test]
    fn test_old_regime_at_five_lakh_stops_in_five_percent_slab() {
        let result = tax_with_breakdown(dec!(500000), &OLD_REGIME_UNDER_60);
        assert_eq!(result.tax, dec!(12500));
        assert_eq!(result.breakdown.len(), 2);
        assert_eq!(
            result.breakdown[1],
            TaxBreakdownEntry {
                min: dec!(250001),
                max: Some(dec!(500000)),
                taxable: dec!(250000),
                rate: dec!(0.05),
                tax: dec!(12500),
            }
        );
    }

    #[test]
    fn test_top_slab_takes_remainder() {
        // 2.5L@0 + 2.5L@5% + 5L@20% + 5L@30%
        let result = tax_with_breakdown(dec!(1500000), &OLD_REGIME_UNDER_60);
        assert_eq!(result.tax, dec!(262500));
        let top = result.breakdown.last().unwrap();
        assert_eq!(top.max, None);
        assert_eq!(top.taxable, dec!(500000));
        assert_eq!(top.tax, dec!(150000));
    }

    #[test]
    fn test_breakdown_taxable_sums_to_income() {
        let income = dec!(1873456.78);
        for table in all_tables() {
            let result = tax_with_breakdown(income, table);
            let total: Decimal = result.breakdown.iter().map(|e| e.taxable).sum();
            assert_eq!(total, income);
            let tax: Decimal = result.breakdown.iter().map(|e| e.tax).sum();
            assert_eq!(tax, result.tax);
        }
    }

    #[test]
    fn test_super_senior_has_no_five_percent_slab() {
        let result = tax_with_breakdown(dec!(600000), &OLD_REGIME_80_PLUS);
        assert_eq!(result.tax, dec!(20000));
    }

    #[test]
    fn test_slab_table_dispatch() {
        assert_eq!(
            slab_table(Regime::Old, AssessmentYear::Ay2026_27, AgeBand::From60To79).len(),
            4
        );
        assert_eq!(
            slab_table(Regime::New, AssessmentYear::Ay2025_26, AgeBand::Over80),
            &NEW_REGIME_AY_2025_26[..]
        );
    }

    #[test]
    fn test_validate_rejects_gap() {
        let broken = [
            slab(dec!(0), Some(dec!(100)), dec!(0)),
            slab(dec!(150), None, dec!(0.1)),
        ];
        assert!(validate_slab_table(&broken).is_err());
    }

    #[test]
    fn test_validate_rejects_bounded_top() {
        let broken = [slab(dec!(0), Some(dec!(100)), dec!(0))];
        assert!(validate_slab_table(&broken).is_err());
    }

    #[test]
    fn test_validate_rejects_falling_rate() {
        let broken = [
            slab(dec!(0), Some(dec!(100)), dec!(0.2)),
            slab(dec!(101), None, dec!(0.1)),
        ];
        assert!(validate_slab_table(&broken).is_err());
    }
}
