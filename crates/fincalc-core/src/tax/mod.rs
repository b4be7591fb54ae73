//! Income-tax comparison between the old and new regimes.
//!
//! Salary components are reduced to a taxable income per regime
//! ([`deductions`]), taxed through a progressive slab table ([`slabs`]),
//! then cess and the 87A rebate ([`rebate`]) are applied.

pub mod deductions;
pub mod rebate;
pub mod slabs;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use tracing::debug;

use crate::error::FinCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinCalcResult;

pub use deductions::{salary_breakup, SalaryBreakup};
pub use rebate::{rebate_rule, RebateRule};
pub use slabs::{slab_table, tax_with_breakdown, RegimeResult, TaxBreakdownEntry, TaxSlab};

/// Health and education cess. Charged on slab tax net of the 87A rebate, so
/// the reported `cess` is post-rebate and is zero for a fully rebated income.
pub const CESS_RATE: Rate = dec!(0.04);

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Old,
    New,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBand {
    #[default]
    #[serde(rename = "under60")]
    Under60,
    #[serde(rename = "60-79")]
    From60To79,
    #[serde(rename = "80+")]
    Over80,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssessmentYear {
    #[serde(rename = "2025-26")]
    Ay2025_26,
    #[serde(rename = "2026-27")]
    Ay2026_27,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }
}

impl AgeBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Under60 => "under60",
            Self::From60To79 => "60-79",
            Self::Over80 => "80+",
        }
    }
}

impl AssessmentYear {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ay2025_26 => "2025-26",
            Self::Ay2026_27 => "2026-27",
        }
    }
}

impl FromStr for Regime {
    type Err = FinCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "old" => Ok(Self::Old),
            "new" => Ok(Self::New),
            other => Err(FinCalcError::invalid(
                "regime",
                format!("unknown regime '{other}' (expected old or new)"),
            )),
        }
    }
}

impl FromStr for AgeBand {
    type Err = FinCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "under60" => Ok(Self::Under60),
            "60-79" => Ok(Self::From60To79),
            "80+" => Ok(Self::Over80),
            other => Err(FinCalcError::invalid(
                "age_band",
                format!("unknown age band '{other}' (expected under60, 60-79 or 80+)"),
            )),
        }
    }
}

impl FromStr for AssessmentYear {
    type Err = FinCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "2025-26" => Ok(Self::Ay2025_26),
            "2026-27" => Ok(Self::Ay2026_27),
            other => Err(FinCalcError::invalid(
                "assessment_year",
                format!("unsupported assessment year '{other}' (expected 2025-26 or 2026-27)"),
            )),
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AssessmentYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Input / output
// ---------------------------------------------------------------------------

/// Annual salary structure. Components left out of a JSON payload count
/// as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxInput {
    /// Cost to company, annual.
    pub ctc: Money,
    /// Basic salary as a percentage of CTC (40 = 40%).
    #[serde(default)]
    pub basic_pct: Decimal,
    #[serde(default)]
    pub employee_pf_monthly: Money,
    #[serde(default)]
    pub employer_pf_monthly: Money,
    /// Other employer retirals (gratuity, superannuation) inside CTC.
    #[serde(default)]
    pub retirals: Money,
    #[serde(default)]
    pub hra_received: Money,
    #[serde(default)]
    pub rent_paid: Money,
    #[serde(default)]
    pub lta: Money,
    #[serde(default)]
    pub elss: Money,
    #[serde(default)]
    pub employer_nps: Money,
    /// Any further old-regime deductions (80D, 80G, ...).
    #[serde(default)]
    pub other_deductions: Money,
    pub assessment_year: AssessmentYear,
    #[serde(default)]
    pub age_band: AgeBand,
}

/// Tax position under one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeAssessment {
    pub regime: Regime,
    pub taxable_income: Money,
    pub slab_tax: RegimeResult,
    pub rebate: Money,
    /// `(slab tax - rebate) * CESS_RATE`, not 4% of the slab tax.
    pub cess: Money,
    pub total_tax: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxComparisonOutput {
    pub assessment_year: AssessmentYear,
    pub age_band: AgeBand,
    pub salary: SalaryBreakup,
    pub taxable_old: Money,
    pub taxable_new: Money,
    pub old_regime: RegimeResult,
    pub new_regime: RegimeResult,
    /// Post-rebate cess, see [`CESS_RATE`].
    pub cess_old: Money,
    pub cess_new: Money,
    pub rebate_old: Money,
    pub rebate_new: Money,
    pub total_old: Money,
    pub total_new: Money,
    /// `None` when both regimes cost the same.
    pub better_regime: Option<Regime>,
    pub savings: Money,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Tax `taxable_income` under one regime: slab tax, then rebate, then cess
/// on what remains. The returned `cess` is therefore computed after the
/// rebate, which keeps a fully rebated income at zero total tax.
pub fn assess_regime(
    regime: Regime,
    taxable_income: Money,
    year: AssessmentYear,
    age: AgeBand,
) -> RegimeAssessment {
    let slab_tax = tax_with_breakdown(taxable_income, slab_table(regime, year, age));
    let rebate = rebate_rule(regime, year).apply(slab_tax.tax, taxable_income);
    let cess = (slab_tax.tax - rebate) * CESS_RATE;
    let total_tax = (slab_tax.tax + cess - rebate).max(Decimal::ZERO);

    debug!(
        regime = regime.as_str(),
        %taxable_income,
        base = %slab_tax.tax,
        %rebate,
        %total_tax,
        "assessed regime"
    );

    RegimeAssessment {
        regime,
        taxable_income,
        slab_tax,
        rebate,
        cess,
        total_tax,
    }
}

/// Compare the old and new regimes for one salary structure.
pub fn compare_regimes(input: &TaxInput) -> FinCalcResult<ComputationOutput<TaxComparisonOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_tax_input(input)?;

    let salary = salary_breakup(input);
    if salary.gross_salary <= Decimal::ZERO {
        warnings.push("Employer PF and retirals consume the whole CTC; no taxable salary".into());
    }

    let taxable_old =
        deductions::taxable_income(salary.gross_salary, salary.old_regime_deductions);
    let taxable_new =
        deductions::taxable_income(salary.gross_salary, salary.new_regime_deductions);

    let old = assess_regime(Regime::Old, taxable_old, input.assessment_year, input.age_band);
    let new = assess_regime(Regime::New, taxable_new, input.assessment_year, input.age_band);

    let better_regime = match old.total_tax.cmp(&new.total_tax) {
        std::cmp::Ordering::Less => Some(Regime::Old),
        std::cmp::Ordering::Greater => Some(Regime::New),
        std::cmp::Ordering::Equal => None,
    };
    let savings = (old.total_tax - new.total_tax).abs();

    let output = TaxComparisonOutput {
        assessment_year: input.assessment_year,
        age_band: input.age_band,
        salary,
        taxable_old,
        taxable_new,
        cess_old: old.cess,
        cess_new: new.cess,
        rebate_old: old.rebate,
        rebate_new: new.rebate,
        total_old: old.total_tax,
        total_new: new.total_tax,
        old_regime: old.slab_tax,
        new_regime: new.slab_tax,
        better_regime,
        savings,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Income tax: old vs new regime (progressive slabs, 87A rebate, 4% cess)",
        &serde_json::json!({
            "ctc": input.ctc.to_string(),
            "assessment_year": input.assessment_year.as_str(),
            "age_band": input.age_band.as_str(),
            "cess_rate": CESS_RATE.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn validate_tax_input(input: &TaxInput) -> FinCalcResult<()> {
    if input.ctc <= Decimal::ZERO {
        return Err(FinCalcError::invalid("ctc", "enter a valid CTC (must be > 0)"));
    }
    if input.basic_pct < Decimal::ZERO || input.basic_pct > dec!(100) {
        return Err(FinCalcError::invalid(
            "basic_pct",
            "basic salary share must be between 0 and 100 percent",
        ));
    }

    let components = [
        ("employee_pf_monthly", input.employee_pf_monthly),
        ("employer_pf_monthly", input.employer_pf_monthly),
        ("retirals", input.retirals),
        ("hra_received", input.hra_received),
        ("rent_paid", input.rent_paid),
        ("lta", input.lta),
        ("elss", input.elss),
        ("employer_nps", input.employer_nps),
        ("other_deductions", input.other_deductions),
    ];
    for (field, value) in components {
        if value < Decimal::ZERO {
            return Err(FinCalcError::invalid(field, "amount must be >= 0"));
        }
    }
    Ok(())
}
