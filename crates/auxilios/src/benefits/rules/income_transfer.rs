use rust_decimal::Decimal;

use super::negative_income;
use crate::benefits::domain::{EligibilityResult, HouseholdProfile};
use crate::benefits::money::format_brl;
use crate::benefits::policy::IncomeTransferPolicy;

/// Whether per-member supplements are added on top of the bracket base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Supplements {
    Excluded,
    Itemized,
}

pub(crate) fn evaluate(
    profile: &HouseholdProfile,
    policy: &IncomeTransferPolicy,
    supplements: Supplements,
) -> EligibilityResult {
    let Some(per_capita) = profile.per_capita_income() else {
        return EligibilityResult::malformed();
    };
    if per_capita < Decimal::ZERO {
        return negative_income(per_capita);
    }

    let (bracket, threshold, base) = if per_capita <= policy.extreme_poverty_threshold {
        (
            "extrema pobreza",
            policy.extreme_poverty_threshold,
            policy.extreme_poverty_base,
        )
    } else if per_capita <= policy.poverty_threshold {
        ("pobreza", policy.poverty_threshold, policy.poverty_base)
    } else {
        return EligibilityResult::ineligible(format!(
            "Renda per capita ({}) acima do limite de {}. Família não elegível ao Bolsa Família.",
            format_brl(per_capita),
            format_brl(policy.poverty_threshold)
        ));
    };

    let mut explanation = format!(
        "Família em situação de {bracket} (renda per capita {} <= {}). Valor base: {}.",
        format_brl(per_capita),
        format_brl(threshold),
        format_brl(base)
    );
    let mut amount = base;

    if supplements == Supplements::Itemized {
        let mut itemized = false;

        if profile.children_under_7 > 0 {
            let extra = supplement(policy.per_child_supplement, profile.children_under_7);
            amount = amount.checked_add(extra).unwrap_or(Decimal::MAX);
            itemized = true;
            explanation.push_str(&format!(
                " + {} ({} criança(s) de 0 a 6 anos).",
                format_brl(extra),
                profile.children_under_7
            ));
        }

        if profile.pregnant_or_nursing > 0 {
            let extra = supplement(policy.per_pregnant_supplement, profile.pregnant_or_nursing);
            amount = amount.checked_add(extra).unwrap_or(Decimal::MAX);
            itemized = true;
            explanation.push_str(&format!(
                " + {} ({} gestante(s) ou nutriz(es)).",
                format_brl(extra),
                profile.pregnant_or_nursing
            ));
        }

        if itemized {
            explanation.push_str(&format!(" Total: {}.", format_brl(amount)));
        }
    }

    EligibilityResult::eligible(amount, explanation)
}

fn supplement(per_member: Decimal, members: u32) -> Decimal {
    per_member
        .checked_mul(Decimal::from(members))
        .unwrap_or(Decimal::MAX)
}
