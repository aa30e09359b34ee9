use rust_decimal::Decimal;

use super::negative_income;
use crate::benefits::domain::{EligibilityResult, HouseholdProfile};
use crate::benefits::money::format_brl;
use crate::benefits::policy::GasSubsidyPolicy;

pub(crate) fn evaluate(profile: &HouseholdProfile, policy: &GasSubsidyPolicy) -> EligibilityResult {
    let id_valid = profile
        .national_id
        .as_deref()
        .map(|id| is_valid_national_id(id, policy.national_id_digits))
        .unwrap_or(false);
    if !id_valid {
        return malformed(policy);
    }

    let Some(per_capita) = profile.per_capita_income() else {
        return malformed(policy);
    };
    if per_capita < Decimal::ZERO {
        return negative_income(per_capita);
    }

    if per_capita <= policy.per_capita_threshold {
        EligibilityResult::eligible(
            policy.amount,
            format!(
                "Você é elegível! Receberá {} a cada 2 meses. Renda per capita ({}) <= limite de {}.",
                format_brl(policy.amount),
                format_brl(per_capita),
                format_brl(policy.per_capita_threshold)
            ),
        )
    } else {
        EligibilityResult::ineligible(format!(
            "Renda per capita ({}) excede o limite de {} (meio salário mínimo).",
            format_brl(per_capita),
            format_brl(policy.per_capita_threshold)
        ))
    }
}

/// The gas subsidy reports every malformed field with the NIS length reminder.
pub(crate) fn malformed(policy: &GasSubsidyPolicy) -> EligibilityResult {
    EligibilityResult::malformed_with_hint(&format!(
        "O NIS deve ter {} dígitos.",
        policy.national_id_digits
    ))
}

fn is_valid_national_id(id: &str, digits: usize) -> bool {
    id.len() == digits && id.bytes().all(|byte| byte.is_ascii_digit())
}
