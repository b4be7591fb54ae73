use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::TaxInput;
use crate::time_value::annual_rate;
use crate::types::Money;

const STANDARD_DEDUCTION_OLD: Money = dec!(50000);
const STANDARD_DEDUCTION_NEW: Money = dec!(75000);
const SECTION_80C_LIMIT: Money = dec!(150000);

/// Rent in excess of this share of basic counts towards the HRA exemption.
const HRA_RENT_OFFSET: Decimal = dec!(0.10);
/// The HRA exemption never exceeds this share of basic.
const HRA_BASIC_CAP: Decimal = dec!(0.50);
/// Employer NPS is deductible under the new regime up to this share of basic.
const NPS_BASIC_CAP: Decimal = dec!(0.10);

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Annual salary figures derived from CTC, shared by both regimes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakup {
    pub basic_salary: Money,
    pub employee_pf: Money,
    pub employer_pf: Money,
    pub gross_salary: Money,
    pub hra_exemption: Money,
    pub section_80c: Money,
    pub old_regime_deductions: Money,
    pub new_regime_deductions: Money,
}

pub fn salary_breakup(input: &TaxInput) -> SalaryBreakup {
    let basic_salary = input.ctc * annual_rate(input.basic_pct);
    let employee_pf = input.employee_pf_monthly * MONTHS_PER_YEAR;
    let employer_pf = input.employer_pf_monthly * MONTHS_PER_YEAR;
    let gross_salary = input.ctc - employer_pf - input.retirals;

    let hra_exemption = hra_exemption(input.hra_received, input.rent_paid, basic_salary);
    let section_80c = (input.elss + employee_pf).min(SECTION_80C_LIMIT);

    let old_regime_deductions = section_80c
        + input.other_deductions
        + input.lta
        + hra_exemption
        + STANDARD_DEDUCTION_OLD;
    let new_regime_deductions =
        input.employer_nps.min(basic_salary * NPS_BASIC_CAP) + STANDARD_DEDUCTION_NEW;

    SalaryBreakup {
        basic_salary,
        employee_pf,
        employer_pf,
        gross_salary,
        hra_exemption,
        section_80c,
        old_regime_deductions,
        new_regime_deductions,
    }
}

/// Least of HRA received, rent over 10% of basic and half of basic,
/// floored at zero when rent is below the offset.
pub fn hra_exemption(hra_received: Money, rent_paid: Money, basic_salary: Money) -> Money {
    hra_received
        .min(rent_paid - basic_salary * HRA_RENT_OFFSET)
        .min(basic_salary * HRA_BASIC_CAP)
        .max(Decimal::ZERO)
}

/// `gross - deductions`, never negative.
pub fn taxable_income(gross_salary: Money, deductions: Money) -> Money {
    (gross_salary - deductions).max(Decimal::ZERO)
}
