use rust_decimal::Decimal;

use crate::benefits::domain::{PensionEstimate, PensionProfile};
use crate::benefits::money::{format_brl, percent};
use crate::benefits::policy::PensionPolicy;

/// Replacement rate, optional age/tenure bonus, then the floor/ceiling clamp.
///
/// The bonus is applied before the clamp, so a bonused benefit above the ceiling
/// is reported as `maximum_benefit`.
pub(crate) fn estimate(profile: &PensionProfile, policy: &PensionPolicy) -> PensionEstimate {
    let extra_years = profile
        .contribution_years
        .checked_sub(policy.baseline_contribution_years)
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO);
    let uncapped_rate = policy
        .rate_per_extra_year
        .checked_mul(extra_years)
        .and_then(|extra| policy.base_replacement_rate.checked_add(extra))
        .unwrap_or(policy.max_replacement_rate);
    let replacement_rate = uncapped_rate.min(policy.max_replacement_rate);

    let mut benefit = profile
        .average_salary
        .checked_mul(replacement_rate)
        .unwrap_or(Decimal::MAX);

    let bonus_applied = profile.age >= policy.bonus_min_age
        && profile.contribution_years >= policy.bonus_min_contribution_years;
    if bonus_applied {
        benefit = benefit
            .checked_mul(policy.bonus_multiplier)
            .unwrap_or(Decimal::MAX);
    }

    let amount = benefit
        .max(policy.minimum_benefit)
        .min(policy.maximum_benefit);

    let mut explanation = format!(
        "Fator de {}% sobre salário médio de {} ({} ano(s) acima de {}).",
        percent(replacement_rate),
        format_brl(profile.average_salary),
        extra_years.normalize(),
        policy.baseline_contribution_years.normalize()
    );
    if bonus_applied {
        explanation.push_str(&format!(
            " Bônus de idade e contribuição aplicado (x{}).",
            policy.bonus_multiplier.normalize()
        ));
    }
    if amount != benefit {
        explanation.push_str(&format!(
            " Valor ajustado ao intervalo de {} a {}.",
            format_brl(policy.minimum_benefit),
            format_brl(policy.maximum_benefit)
        ));
    }
    explanation.push_str(&format!(" Estimativa mensal: {}.", format_brl(amount)));

    PensionEstimate {
        amount,
        replacement_rate,
        bonus_applied,
        explanation,
    }
}
