//! Section 87A-style rebate rules, one per `(Regime, AssessmentYear)`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{AssessmentYear, Regime};
use crate::types::Money;

/// A capped credit available when taxable income does not exceed a ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebateRule {
    /// Inclusive upper bound on taxable income.
    pub income_ceiling: Money,
    pub max_rebate: Money,
}

impl RebateRule {
    /// Rebate against `base_tax` for `taxable_income`; never exceeds the tax.
    pub fn apply(&self, base_tax: Money, taxable_income: Money) -> Money {
        if taxable_income <= self.income_ceiling {
            base_tax.min(self.max_rebate).max(Decimal::ZERO)
        } else {
            Decimal::ZERO
        }
    }
}

const OLD_REGIME: RebateRule = RebateRule {
    income_ceiling: dec!(500000),
    max_rebate: dec!(12500),
};

const NEW_REGIME_AY_2025_26: RebateRule = RebateRule {
    income_ceiling: dec!(700000),
    max_rebate: dec!(25000),
};

const NEW_REGIME_AY_2026_27: RebateRule = RebateRule {
    income_ceiling: dec!(1200000),
    max_rebate: dec!(60000),
};

pub fn rebate_rule(regime: Regime, year: AssessmentYear) -> RebateRule {
    match (regime, year) {
        (Regime::Old, _) => OLD_REGIME,
        (Regime::New, AssessmentYear::Ay2025_26) => NEW_REGIME_AY_2025_26,
        (Regime::New, AssessmentYear::Ay2026_27) => NEW_REGIME_AY_2026_27,
    }
}
