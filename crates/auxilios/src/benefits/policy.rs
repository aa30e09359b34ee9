use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Constants of every benefit program for one policy year.
///
/// The rule functions only ever read thresholds and amounts from this table, so a
/// new year is a new table (code or JSON file) rather than a code change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyTable {
    pub year: u16,
    pub income_transfer: IncomeTransferPolicy,
    pub gas_subsidy: GasSubsidyPolicy,
    pub continuous_cash: ContinuousCashPolicy,
    pub pension: PensionPolicy,
}

/// Bolsa Família brackets and supplements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTransferPolicy {
    pub extreme_poverty_threshold: Decimal,
    pub poverty_threshold: Decimal,
    pub extreme_poverty_base: Decimal,
    pub poverty_base: Decimal,
    pub per_child_supplement: Decimal,
    pub per_pregnant_supplement: Decimal,
}

/// Auxílio Gás limit and bimonthly payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasSubsidyPolicy {
    pub per_capita_threshold: Decimal,
    pub amount: Decimal,
    pub national_id_digits: usize,
}

/// BPC LOAS reference wage; the income limit is a fraction of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinuousCashPolicy {
    pub reference_minimum_wage: Decimal,
    pub income_limit_divisor: u32,
}

impl ContinuousCashPolicy {
    pub fn income_limit(&self) -> Decimal {
        self.reference_minimum_wage
            .checked_div(Decimal::from(self.income_limit_divisor))
            .unwrap_or(Decimal::ZERO)
    }

    pub fn monthly_amount(&self) -> Decimal {
        self.reference_minimum_wage
    }
}

/// INSS retirement formula dials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionPolicy {
    pub base_replacement_rate: Decimal,
    pub rate_per_extra_year: Decimal,
    pub baseline_contribution_years: Decimal,
    pub max_replacement_rate: Decimal,
    pub bonus_min_age: Decimal,
    pub bonus_min_contribution_years: Decimal,
    pub bonus_multiplier: Decimal,
    pub minimum_benefit: Decimal,
    pub maximum_benefit: Decimal,
}

impl PolicyTable {
    /// Values published on the site for 2026.
    pub fn standard() -> Self {
        Self {
            year: 2026,
            income_transfer: IncomeTransferPolicy {
                extreme_poverty_threshold: dec!(218),
                poverty_threshold: dec!(300),
                extreme_poverty_base: dec!(700),
                poverty_base: dec!(500),
                per_child_supplement: dec!(150),
                per_pregnant_supplement: dec!(150),
            },
            gas_subsidy: GasSubsidyPolicy {
                per_capita_threshold: dec!(706),
                amount: dec!(102),
                national_id_digits: 11,
            },
            continuous_cash: ContinuousCashPolicy {
                reference_minimum_wage: dec!(1412),
                income_limit_divisor: 4,
            },
            pension: PensionPolicy {
                base_replacement_rate: dec!(0.6),
                rate_per_extra_year: dec!(0.02),
                baseline_contribution_years: dec!(20),
                max_replacement_rate: dec!(1.0),
                bonus_min_age: dec!(62),
                bonus_min_contribution_years: dec!(15),
                bonus_multiplier: dec!(1.10),
                minimum_benefit: dec!(1412),
                maximum_benefit: dec!(7786.02),
            },
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PolicyLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PolicyLoadError> {
        let table: Self = serde_json::from_reader(reader)?;
        table.validate()?;
        Ok(table)
    }

    /// Reject tables whose brackets would make the rules contradict themselves.
    pub fn validate(&self) -> Result<(), PolicyLoadError> {
        let income = &self.income_transfer;
        if income.extreme_poverty_threshold > income.poverty_threshold {
            return Err(PolicyLoadError::Invalid(
                "extreme poverty threshold exceeds poverty threshold".to_string(),
            ));
        }
        if income.extreme_poverty_base < income.poverty_base {
            return Err(PolicyLoadError::Invalid(
                "extreme poverty base is lower than poverty base".to_string(),
            ));
        }
        if self.gas_subsidy.national_id_digits == 0 {
            return Err(PolicyLoadError::Invalid(
                "national id length must be positive".to_string(),
            ));
        }
        if self.continuous_cash.income_limit_divisor == 0 {
            return Err(PolicyLoadError::Invalid(
                "continuous cash income divisor must be positive".to_string(),
            ));
        }
        if self.pension.minimum_benefit > self.pension.maximum_benefit {
            return Err(PolicyLoadError::Invalid(
                "pension minimum exceeds maximum".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PolicyLoadError {
    #[error("failed to read policy table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid policy table JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("inconsistent policy table: {0}")]
    Invalid(String),
}
