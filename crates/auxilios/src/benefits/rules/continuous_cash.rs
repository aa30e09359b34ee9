use rust_decimal::Decimal;

use super::negative_income;
use crate::benefits::domain::{EligibilityResult, HouseholdProfile};
use crate::benefits::money::format_brl;
use crate::benefits::policy::ContinuousCashPolicy;

pub(crate) fn evaluate(
    profile: &HouseholdProfile,
    policy: &ContinuousCashPolicy,
) -> EligibilityResult {
    let Some(per_capita) = profile.per_capita_income() else {
        return EligibilityResult::malformed();
    };

    // The disability/age requirement is reported even when income also fails.
    if !profile.has_disability_or_age_65_plus {
        return EligibilityResult::ineligible(
            "É necessário comprovar deficiência ou ter 65 anos ou mais para o BPC LOAS.",
        );
    }
    if per_capita < Decimal::ZERO {
        return negative_income(per_capita);
    }

    let limit = policy.income_limit();
    if per_capita <= limit {
        EligibilityResult::eligible(
            policy.monthly_amount(),
            format!(
                "Você é elegível ao BPC LOAS! Renda per capita de {} <= limite de {} (1/{} do salário mínimo). Benefício mensal: {}.",
                format_brl(per_capita),
                format_brl(limit),
                policy.income_limit_divisor,
                format_brl(policy.monthly_amount())
            ),
        )
    } else {
        EligibilityResult::ineligible(format!(
            "Renda per capita de {} excede o limite de {} (1/{} do salário mínimo).",
            format_brl(per_capita),
            format_brl(limit),
            policy.income_limit_divisor
        ))
    }
}
