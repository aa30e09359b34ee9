//! Benefit eligibility calculators.
//!
//! Each program is a pure function of a household profile and the constants of
//! one policy year. Malformed input never raises; it comes back as an ineligible
//! result whose explanation asks the caller to fix the form.

mod calculator;
pub mod domain;
pub mod intake;
pub mod money;
pub mod policy;
pub mod router;
mod rules;

#[cfg(test)]
mod tests;

pub use calculator::EligibilityCalculator;
pub use domain::{
    BenefitProgram, CalculationOutcome, EligibilityResult, HouseholdProfile, PensionEstimate,
    PensionProfile, UnknownProgram, MALFORMED_INPUT_MESSAGE,
};
pub use intake::{CalculatorForm, MalformedInput};
pub use policy::{
    ContinuousCashPolicy, GasSubsidyPolicy, IncomeTransferPolicy, PensionPolicy, PolicyLoadError,
    PolicyTable,
};
pub use router::benefit_router;
