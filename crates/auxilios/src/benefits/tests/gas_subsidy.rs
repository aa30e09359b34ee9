use super::common::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const VALID_NIS: &str = "12345678901";

#[test]
fn low_income_household_with_valid_nis_is_eligible() {
    let profile = household(dec!(2000), 4).with_national_id(VALID_NIS);

    let result = calculator().gas_subsidy(&profile);

    assert!(result.eligible);
    assert_eq!(result.monthly_amount, dec!(102));
    assert!(result.explanation.contains("a cada 2 meses"));
}

#[test]
fn short_nis_is_malformed_regardless_of_income() {
    let profile = household(dec!(2000), 4).with_national_id("123");

    let result = calculator().gas_subsidy(&profile);

    assert!(!result.eligible);
    assert_eq!(result.monthly_amount, Decimal::ZERO);
    assert!(result.is_malformed());
    assert!(result.explanation.contains("11 dígitos"));
    assert!(!result.explanation.contains("R$"));
}

#[test]
fn missing_or_non_numeric_nis_is_malformed() {
    let calculator = calculator();

    let missing = calculator.gas_subsidy(&household(dec!(100), 1));
    assert!(missing.explanation.contains("11 dígitos"));

    let letters = calculator.gas_subsidy(&household(dec!(100), 1).with_national_id("1234567890a"));
    assert!(letters.is_malformed());
}

#[test]
fn income_above_half_minimum_wage_is_ineligible() {
    let profile = household(dec!(3000), 4).with_national_id(VALID_NIS);

    let result = calculator().gas_subsidy(&profile);

    assert!(!result.eligible);
    assert!(!result.is_malformed());
    assert!(result.explanation.contains("R$ 750,00"));
    assert!(result.explanation.contains("R$ 706,00"));
}

#[test]
fn threshold_is_inclusive() {
    let calculator = calculator();
    let at_limit = household(dec!(1412), 2).with_national_id(VALID_NIS);
    let above_limit = household(dec!(1412.02), 2).with_national_id(VALID_NIS);

    assert!(calculator.gas_subsidy(&at_limit).eligible);
    assert!(!calculator.gas_subsidy(&above_limit).eligible);
}

#[test]
fn empty_household_uses_the_fill_all_fields_message() {
    let profile = household(dec!(100), 0).with_national_id(VALID_NIS);

    let result = calculator().gas_subsidy(&profile);

    assert!(result.is_malformed());
    assert!(result.explanation.contains("11 dígitos"));
}
