use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Explanation shown whenever the calculator could not trust its inputs.
pub const MALFORMED_INPUT_MESSAGE: &str =
    "Por favor, preencha todos os campos obrigatórios corretamente.";

/// Benefit programs supported by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitProgram {
    IncomeTransfer,
    IncomeTransferExtended,
    GasSubsidy,
    ContinuousCash,
    Pension,
}

impl BenefitProgram {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::IncomeTransfer,
            Self::IncomeTransferExtended,
            Self::GasSubsidy,
            Self::ContinuousCash,
            Self::Pension,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::IncomeTransfer => "Bolsa Família",
            Self::IncomeTransferExtended => "Bolsa Família (com adicionais)",
            Self::GasSubsidy => "Auxílio Gás",
            Self::ContinuousCash => "BPC LOAS",
            Self::Pension => "Aposentadoria INSS",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::IncomeTransfer => "income-transfer",
            Self::IncomeTransferExtended => "income-transfer-extended",
            Self::GasSubsidy => "gas-subsidy",
            Self::ContinuousCash => "continuous-cash",
            Self::Pension => "pension",
        }
    }

    /// Pension produces a point estimate; every other program a yes/no verdict.
    pub const fn is_estimate(self) -> bool {
        matches!(self, Self::Pension)
    }
}

impl fmt::Display for BenefitProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for BenefitProgram {
    type Err = UnknownProgram;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('_', "-");
        let program = match normalized.as_str() {
            "income-transfer" | "bolsa-familia" => Self::IncomeTransfer,
            "income-transfer-extended" | "bolsa-familia-2026" | "simulador-bolsa-familia" => {
                Self::IncomeTransferExtended
            }
            "gas-subsidy" | "auxilio-gas" | "vale-gas" => Self::GasSubsidy,
            "continuous-cash" | "bpc" | "bpc-loas" => Self::ContinuousCash,
            "pension" | "inss" | "aposentadoria" => Self::Pension,
            _ => return Err(UnknownProgram(raw.trim().to_string())),
        };
        Ok(program)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown benefit program '{0}'")]
pub struct UnknownProgram(pub String);

/// Household snapshot collected from a calculator form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdProfile {
    pub total_income: Decimal,
    pub member_count: u32,
    #[serde(default)]
    pub children_under_7: u32,
    #[serde(default)]
    pub pregnant_or_nursing: u32,
    #[serde(default)]
    pub national_id: Option<String>,
    #[serde(default)]
    pub has_disability_or_age_65_plus: bool,
}

impl HouseholdProfile {
    pub fn new(total_income: Decimal, member_count: u32) -> Self {
        Self {
            total_income,
            member_count,
            children_under_7: 0,
            pregnant_or_nursing: 0,
            national_id: None,
            has_disability_or_age_65_plus: false,
        }
    }

    pub fn with_children_under_7(mut self, count: u32) -> Self {
        self.children_under_7 = count;
        self
    }

    pub fn with_pregnant_or_nursing(mut self, count: u32) -> Self {
        self.pregnant_or_nursing = count;
        self
    }

    pub fn with_national_id(mut self, national_id: impl Into<String>) -> Self {
        self.national_id = Some(national_id.into());
        self
    }

    pub fn with_disability_or_age_65_plus(mut self, flag: bool) -> Self {
        self.has_disability_or_age_65_plus = flag;
        self
    }

    /// Household income divided by member count; `None` for an empty household.
    pub fn per_capita_income(&self) -> Option<Decimal> {
        if self.member_count == 0 {
            return None;
        }

        self.total_income
            .checked_div(Decimal::from(self.member_count))
    }
}

/// Inputs of the retirement estimator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionProfile {
    pub age: Decimal,
    pub average_salary: Decimal,
    pub contribution_years: Decimal,
}

/// Verdict of a yes/no benefit program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub eligible: bool,
    pub monthly_amount: Decimal,
    pub explanation: String,
}

impl EligibilityResult {
    pub fn eligible(monthly_amount: Decimal, explanation: impl Into<String>) -> Self {
        Self {
            eligible: true,
            monthly_amount,
            explanation: explanation.into(),
        }
    }

    pub fn ineligible(explanation: impl Into<String>) -> Self {
        Self {
            eligible: false,
            monthly_amount: Decimal::ZERO,
            explanation: explanation.into(),
        }
    }

    pub fn malformed() -> Self {
        Self::ineligible(MALFORMED_INPUT_MESSAGE)
    }

    pub fn malformed_with_hint(hint: &str) -> Self {
        Self::ineligible(format!("{MALFORMED_INPUT_MESSAGE} {hint}"))
    }

    pub fn is_malformed(&self) -> bool {
        !self.eligible && self.explanation.starts_with(MALFORMED_INPUT_MESSAGE)
    }
}

/// Point estimate produced by the retirement estimator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionEstimate {
    pub amount: Decimal,
    pub replacement_rate: Decimal,
    pub bonus_applied: bool,
    pub explanation: String,
}

/// Result of any calculator, tagged by shape so callers handle both exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculationOutcome {
    Eligibility(EligibilityResult),
    Estimate(PensionEstimate),
}

impl CalculationOutcome {
    pub fn amount(&self) -> Decimal {
        match self {
            Self::Eligibility(result) => result.monthly_amount,
            Self::Estimate(estimate) => estimate.amount,
        }
    }

    pub fn explanation(&self) -> &str {
        match self {
            Self::Eligibility(result) => &result.explanation,
            Self::Estimate(estimate) => &estimate.explanation,
        }
    }

    /// `None` for estimates, which carry no verdict.
    pub fn eligible(&self) -> Option<bool> {
        match self {
            Self::Eligibility(result) => Some(result.eligible),
            Self::Estimate(_) => None,
        }
    }
}
