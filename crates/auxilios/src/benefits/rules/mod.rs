pub(crate) mod continuous_cash;
pub(crate) mod gas_subsidy;
pub(crate) mod income_transfer;
pub(crate) mod pension;

use rust_decimal::Decimal;

use super::domain::EligibilityResult;
use super::money::format_brl;

/// Negative income is well-formed but sits outside every bracket.
pub(crate) fn negative_income(per_capita: Decimal) -> EligibilityResult {
    EligibilityResult::ineligible(format!(
        "Renda per capita ({}) negativa está fora de todas as faixas do programa.",
        format_brl(per_capita)
    ))
}
