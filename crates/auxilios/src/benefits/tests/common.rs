use axum::response::Response;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::benefits::domain::{HouseholdProfile, PensionProfile};
use crate::benefits::intake::CalculatorForm;
use crate::benefits::policy::PolicyTable;
use crate::benefits::EligibilityCalculator;

pub(super) fn calculator() -> EligibilityCalculator {
    EligibilityCalculator::new(PolicyTable::standard())
}

pub(super) fn household(total_income: Decimal, member_count: u32) -> HouseholdProfile {
    HouseholdProfile::new(total_income, member_count)
}

pub(super) fn pension_profile(
    age: Decimal,
    average_salary: Decimal,
    contribution_years: Decimal,
) -> PensionProfile {
    PensionProfile {
        age,
        average_salary,
        contribution_years,
    }
}

pub(super) fn household_form(total_income: &str, member_count: &str) -> CalculatorForm {
    CalculatorForm {
        total_income: Some(total_income.to_string()),
        member_count: Some(member_count.to_string()),
        ..CalculatorForm::default()
    }
}

pub(super) fn pension_form(age: &str, salary: &str, years: &str) -> CalculatorForm {
    CalculatorForm {
        age: Some(age.to_string()),
        average_salary: Some(salary.to_string()),
        contribution_years: Some(years.to_string()),
        ..CalculatorForm::default()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
