use fincalc_core::tax::{self, AgeBand, AssessmentYear, Regime, TaxInput};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Salaried employee with HRA, PF and ELSS
// ===========================================================================

fn salaried(year: AssessmentYear) -> TaxInput {
    TaxInput {
        ctc: dec!(1_500_000),
        basic_pct: dec!(40),
        employee_pf_monthly: dec!(1_800),
        employer_pf_monthly: dec!(1_800),
        retirals: Decimal::ZERO,
        hra_received: dec!(240_000),
        rent_paid: dec!(300_000),
        lta: Decimal::ZERO,
        elss: dec!(100_000),
        employer_nps: Decimal::ZERO,
        other_deductions: Decimal::ZERO,
        assessment_year: year,
        age_band: AgeBand::Under60,
    }
}

#[test]
fn test_salary_breakup_figures() {
    let out = tax::compare_regimes(&salaried(AssessmentYear::Ay2025_26))
        .unwrap()
        .result;
    let s = &out.salary;
    assert_eq!(s.basic_salary, dec!(600_000));
    assert_eq!(s.employee_pf, dec!(21_600));
    assert_eq!(s.gross_salary, dec!(1_478_400));
    assert_eq!(s.hra_exemption, dec!(240_000));
    assert_eq!(s.section_80c, dec!(121_600));
    assert_eq!(s.old_regime_deductions, dec!(411_600));
    assert_eq!(s.new_regime_deductions, dec!(75_000));
}

#[test]
fn test_old_regime_known_answer() {
    let out = tax::compare_regimes(&salaried(AssessmentYear::Ay2025_26))
        .unwrap()
        .result;
    // 2.5L@0 + 2.5L@5% + 5L@20% + 66,800@30%
    assert_eq!(out.taxable_old, dec!(1_066_800));
    assert_eq!(out.old_regime.tax, dec!(132_540));
    assert_eq!(out.old_regime.breakdown.len(), 4);
    assert_eq!(out.rebate_old, Decimal::ZERO);
    assert_eq!(out.cess_old, dec!(5_301.6));
    assert_eq!(out.total_old, dec!(137_841.6));
}

#[test]
fn test_new_regime_2025_26_known_answer() {
    let out = tax::compare_regimes(&salaried(AssessmentYear::Ay2025_26))
        .unwrap()
        .result;
    assert_eq!(out.taxable_new, dec!(1_403_400));
    assert_eq!(out.new_regime.tax, dec!(120_680));
    assert_eq!(out.cess_new, dec!(4_827.2));
    assert_eq!(out.total_new, dec!(125_507.2));
    assert_eq!(out.better_regime, Some(Regime::New));
    assert_eq!(out.savings, dec!(12_334.4));
}

#[test]
fn test_new_regime_2026_27_known_answer() {
    let out = tax::compare_regimes(&salaried(AssessmentYear::Ay2026_27))
        .unwrap()
        .result;
    // 4L@0 + 4L@5% + 4L@10% + 2,03,400@15%
    assert_eq!(out.new_regime.tax, dec!(90_510));
    assert_eq!(out.total_new, dec!(94_130.4));
    // Old regime does not depend on the assessment year
    assert_eq!(out.total_old, dec!(137_841.6));
}

#[test]
fn test_employer_nps_capped_at_ten_percent_of_basic() {
    let mut input = salaried(AssessmentYear::Ay2026_27);
    input.employer_nps = dec!(100_000);
    let out = tax::compare_regimes(&input).unwrap().result;
    assert_eq!(out.salary.new_regime_deductions, dec!(135_000));
}

// ===========================================================================
// Boundaries
// ===========================================================================

#[test]
fn test_old_regime_five_lakh_is_tax_free_after_cess() {
    // 5.5L CTC - 50k standard deduction = 5L taxable
    let input = TaxInput {
        ctc: dec!(550_000),
        ..salaried(AssessmentYear::Ay2025_26)
    };
    let input = TaxInput {
        basic_pct: Decimal::ZERO,
        employee_pf_monthly: Decimal::ZERO,
        employer_pf_monthly: Decimal::ZERO,
        hra_received: Decimal::ZERO,
        rent_paid: Decimal::ZERO,
        elss: Decimal::ZERO,
        ..input
    };
    let out = tax::compare_regimes(&input).unwrap().result;
    assert_eq!(out.taxable_old, dec!(500_000));
    assert_eq!(out.old_regime.tax, dec!(12_500));
    assert_eq!(out.rebate_old, dec!(12_500));
    assert_eq!(out.total_old, Decimal::ZERO);
}

#[test]
fn test_senior_bands_pay_less_under_old_regime() {
    let mut totals = Vec::new();
    for age in [AgeBand::Under60, AgeBand::From60To79, AgeBand::Over80] {
        let input = TaxInput {
            age_band: age,
            ..salaried(AssessmentYear::Ay2025_26)
        };
        totals.push(tax::compare_regimes(&input).unwrap().result.total_old);
    }
    assert!(totals[0] > totals[1]);
    assert!(totals[1] > totals[2]);
}

#[test]
fn test_new_regime_2026_27_twelve_lakh_fully_rebated() {
    let a = tax::assess_regime(
        Regime::New,
        dec!(1_200_000),
        AssessmentYear::Ay2026_27,
        AgeBand::Under60,
    );
    assert_eq!(a.slab_tax.tax, dec!(60_000));
    assert_eq!(a.rebate, dec!(60_000));
    assert_eq!(a.total_tax, Decimal::ZERO);
}

// ===========================================================================
// JSON boundary
// ===========================================================================

#[test]
fn test_missing_components_default_to_zero() {
    let input: TaxInput = serde_json::from_str(
        r#"{ "ctc": "1000000", "assessment_year": "2026-27", "age_band": "60-79" }"#,
    )
    .unwrap();
    assert_eq!(input.rent_paid, Decimal::ZERO);
    assert_eq!(input.age_band, AgeBand::From60To79);

    let out = tax::compare_regimes(&input).unwrap().result;
    // 10L - 75k = 9.25L under the new regime: within the 12L rebate ceiling
    assert_eq!(out.taxable_new, dec!(925_000));
    assert_eq!(out.total_new, Decimal::ZERO);
}

#[test]
fn test_unknown_age_band_is_rejected_at_parse() {
    let parsed: Result<TaxInput, _> = serde_json::from_str(
        r#"{ "ctc": "1000000", "assessment_year": "2026-27", "age_band": "senior" }"#,
    );
    assert!(parsed.is_err());
}

#[test]
fn test_reported_cess_is_on_tax_after_rebate() {
    let rebated = tax::assess_regime(
        Regime::New,
        dec!(1_200_000),
        AssessmentYear::Ay2026_27,
        AgeBand::Under60,
    );
    assert_eq!(rebated.slab_tax.tax, dec!(60_000));
    assert_eq!(rebated.rebate, dec!(60_000));
    // 4% of the pre-rebate 60,000 would be 2,400
    assert_eq!(rebated.cess, Decimal::ZERO);

    let out = tax::compare_regimes(&salaried(AssessmentYear::Ay2025_26))
        .unwrap()
        .result;
    assert_eq!(out.cess_old, (out.old_regime.tax - out.rebate_old) * tax::CESS_RATE);
    assert_eq!(out.cess_new, (out.new_regime.tax - out.rebate_new) * tax::CESS_RATE);
}
