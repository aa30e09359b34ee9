use tracing::debug;

use super::domain::{
    BenefitProgram, CalculationOutcome, EligibilityResult, HouseholdProfile, PensionEstimate,
    PensionProfile,
};
use super::intake::{self, CalculatorForm, MalformedInput};
use super::policy::PolicyTable;
use super::rules::income_transfer::Supplements;
use super::rules::{continuous_cash, gas_subsidy, income_transfer, pension};

/// Stateless calculator applying one policy year to household inputs.
#[derive(Debug, Clone, Default)]
pub struct EligibilityCalculator {
    policy: PolicyTable,
}

impl EligibilityCalculator {
    pub fn new(policy: PolicyTable) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PolicyTable {
        &self.policy
    }

    pub fn income_transfer(&self, profile: &HouseholdProfile) -> EligibilityResult {
        income_transfer::evaluate(
            profile,
            &self.policy.income_transfer,
            Supplements::Excluded,
        )
    }

    pub fn income_transfer_extended(&self, profile: &HouseholdProfile) -> EligibilityResult {
        income_transfer::evaluate(
            profile,
            &self.policy.income_transfer,
            Supplements::Itemized,
        )
    }

    pub fn gas_subsidy(&self, profile: &HouseholdProfile) -> EligibilityResult {
        gas_subsidy::evaluate(profile, &self.policy.gas_subsidy)
    }

    pub fn continuous_cash(&self, profile: &HouseholdProfile) -> EligibilityResult {
        continuous_cash::evaluate(profile, &self.policy.continuous_cash)
    }

    pub fn pension(&self, profile: &PensionProfile) -> PensionEstimate {
        pension::estimate(profile, &self.policy.pension)
    }

    /// Run a yes/no program against a typed household.
    ///
    /// [`BenefitProgram::Pension`] needs a [`PensionProfile`]; asking for it here
    /// yields the malformed-input result.
    pub fn evaluate(&self, program: BenefitProgram, profile: &HouseholdProfile) -> EligibilityResult {
        match program {
            BenefitProgram::IncomeTransfer => self.income_transfer(profile),
            BenefitProgram::IncomeTransferExtended => self.income_transfer_extended(profile),
            BenefitProgram::GasSubsidy => self.gas_subsidy(profile),
            BenefitProgram::ContinuousCash => self.continuous_cash(profile),
            BenefitProgram::Pension => EligibilityResult::malformed(),
        }
    }

    /// Parse a raw form and run the requested program. Never fails.
    pub fn calculate(&self, program: BenefitProgram, form: &CalculatorForm) -> CalculationOutcome {
        let outcome = if program.is_estimate() {
            match intake::pension_from_form(form) {
                Ok(profile) => CalculationOutcome::Estimate(self.pension(&profile)),
                Err(err) => CalculationOutcome::Eligibility(self.reject(program, &err)),
            }
        } else {
            match intake::household_from_form(form) {
                Ok(profile) => CalculationOutcome::Eligibility(self.evaluate(program, &profile)),
                Err(err) => CalculationOutcome::Eligibility(self.reject(program, &err)),
            }
        };

        debug!(
            program = program.slug(),
            policy_year = self.policy.year,
            eligible = ?outcome.eligible(),
            amount = %outcome.amount(),
            "benefit calculated"
        );
        outcome
    }

    fn reject(&self, program: BenefitProgram, err: &MalformedInput) -> EligibilityResult {
        debug!(program = program.slug(), error = %err, "malformed calculator input");
        match program {
            BenefitProgram::GasSubsidy => gas_subsidy::malformed(&self.policy.gas_subsidy),
            _ => EligibilityResult::malformed(),
        }
    }
}
