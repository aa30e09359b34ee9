//! Conversion of raw calculator form fields into typed profiles.
//!
//! Forms submit text; anything that does not parse as a finite, non-negative number
//! becomes a [`MalformedInput`], which the calculator turns into its malformed-input
//! result instead of propagating a fault.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::domain::{HouseholdProfile, PensionProfile};

/// Raw calculator form as submitted by the browser or the CLI.
///
/// Numeric fields accept JSON strings or numbers so both form posts and typed
/// clients work. The disability flag takes booleans as well as checkbox values
/// such as `"on"`; leaving it out means `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorForm {
    #[serde(deserialize_with = "lenient_text")]
    pub total_income: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub member_count: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub children_under_7: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub pregnant_or_nursing: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub national_id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub has_disability_or_age_65_plus: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub age: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub average_salary: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub contribution_years: Option<String>,
}

/// Reasons a form could not be turned into a profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedInput {
    #[error("field `{field}` is required")]
    Missing { field: &'static str },
    #[error("field `{field}` is not a valid number: '{value}'")]
    NotNumeric { field: &'static str, value: String },
    #[error("field `{field}` must not be negative")]
    Negative { field: &'static str },
    #[error("field `{field}` is not a yes/no value: '{value}'")]
    NotAFlag { field: &'static str, value: String },
    #[error("household must have at least one member")]
    EmptyHousehold,
}

pub fn household_from_form(form: &CalculatorForm) -> Result<HouseholdProfile, MalformedInput> {
    let total_income = parse_money("total_income", form.total_income.as_deref())?;
    let member_count = parse_count("member_count", form.member_count.as_deref())?;
    if member_count == 0 {
        return Err(MalformedInput::EmptyHousehold);
    }

    let children_under_7 = parse_optional_count("children_under_7", &form.children_under_7)?;
    let pregnant_or_nursing =
        parse_optional_count("pregnant_or_nursing", &form.pregnant_or_nursing)?;
    let has_disability_or_age_65_plus = parse_flag(
        "has_disability_or_age_65_plus",
        form.has_disability_or_age_65_plus.as_deref(),
    )?;

    Ok(HouseholdProfile {
        total_income,
        member_count,
        children_under_7,
        pregnant_or_nursing,
        national_id: form.national_id.as_deref().and_then(normalize_national_id),
        has_disability_or_age_65_plus,
    })
}

pub fn pension_from_form(form: &CalculatorForm) -> Result<PensionProfile, MalformedInput> {
    Ok(PensionProfile {
        age: parse_money("age", form.age.as_deref())?,
        average_salary: parse_money("average_salary", form.average_salary.as_deref())?,
        contribution_years: parse_money(
            "contribution_years",
            form.contribution_years.as_deref(),
        )?,
    })
}

/// Parse a decimal written either as `1412.50` or `1.412,50`.
pub fn parse_money(field: &'static str, raw: Option<&str>) -> Result<Decimal, MalformedInput> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    let trimmed = trimmed.strip_prefix("R$").unwrap_or(trimmed).trim();
    if trimmed.is_empty() {
        return Err(MalformedInput::Missing { field });
    }

    let normalized = normalize_decimal_separators(trimmed);
    let value = Decimal::from_str(&normalized).map_err(|_| MalformedInput::NotNumeric {
        field,
        value: trimmed.to_string(),
    })?;

    if value < Decimal::ZERO {
        return Err(MalformedInput::Negative { field });
    }

    Ok(value)
}

fn parse_count(field: &'static str, raw: Option<&str>) -> Result<u32, MalformedInput> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(MalformedInput::Missing { field });
    }

    trimmed.parse::<u32>().map_err(|_| {
        if trimmed.starts_with('-') {
            MalformedInput::Negative { field }
        } else {
            MalformedInput::NotNumeric {
                field,
                value: trimmed.to_string(),
            }
        }
    })
}

fn parse_optional_count(
    field: &'static str,
    raw: &Option<String>,
) -> Result<u32, MalformedInput> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(0),
        Some(value) => parse_count(field, Some(value)),
    }
}

/// Read a checkbox or boolean field. Blank or absent means `false`.
pub fn parse_flag(field: &'static str, raw: Option<&str>) -> Result<bool, MalformedInput> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    match trimmed.to_lowercase().as_str() {
        "" | "false" | "off" | "0" | "no" | "nao" | "não" => Ok(false),
        "true" | "on" | "1" | "yes" | "sim" => Ok(true),
        _ => Err(MalformedInput::NotAFlag {
            field,
            value: trimmed.to_string(),
        }),
    }
}

/// Strip the separators people type into a NIS (`123.45678.90-1`).
///
/// Length is left to the rule so a short NIS still gets the dedicated message.
pub fn normalize_national_id(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|ch| !matches!(ch, '.' | '-' | ' ' | '/'))
        .collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

fn normalize_decimal_separators(value: &str) -> String {
    match (value.rfind(','), value.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => value.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => value.replace(',', ""),
        (Some(_), None) => value.replace(',', "."),
        _ => value.to_string(),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_accepts_both_separator_styles() {
        assert_eq!(parse_money("x", Some("1412.50")), Ok(dec!(1412.50)));
        assert_eq!(parse_money("x", Some("1.412,50")), Ok(dec!(1412.50)));
        assert_eq!(parse_money("x", Some("1,412.50")), Ok(dec!(1412.50)));
        assert_eq!(parse_money("x", Some("R$ 800")), Ok(dec!(800)));
        assert_eq!(parse_money("x", Some(" 218,00 ")), Ok(dec!(218)));
    }

    #[test]
    fn money_rejects_garbage_and_negatives() {
        assert_eq!(
            parse_money("total_income", Some("")),
            Err(MalformedInput::Missing {
                field: "total_income"
            })
        );
        assert!(matches!(
            parse_money("total_income", Some("abc")),
            Err(MalformedInput::NotNumeric { .. })
        ));
        assert!(matches!(
            parse_money("total_income", Some("NaN")),
            Err(MalformedInput::NotNumeric { .. })
        ));
        assert_eq!(
            parse_money("total_income", Some("-10")),
            Err(MalformedInput::Negative {
                field: "total_income"
            })
        );
    }

    #[test]
    fn zero_members_is_an_empty_household() {
        let form = CalculatorForm {
            total_income: Some("800".to_string()),
            member_count: Some("0".to_string()),
            ..CalculatorForm::default()
        };

        assert_eq!(
            household_from_form(&form),
            Err(MalformedInput::EmptyHousehold)
        );
    }

    #[test]
    fn optional_counts_default_to_zero() {
        let form = CalculatorForm {
            total_income: Some("800".to_string()),
            member_count: Some("4".to_string()),
            children_under_7: Some("  ".to_string()),
            ..CalculatorForm::default()
        };

        let profile = household_from_form(&form).expect("profile parses");
        assert_eq!(profile.children_under_7, 0);
        assert_eq!(profile.pregnant_or_nursing, 0);
        assert_eq!(profile.national_id, None);
    }

    #[test]
    fn national_id_separators_are_stripped() {
        assert_eq!(
            normalize_national_id("123.45678.90-1"),
            Some("12345678901".to_string())
        );
        assert_eq!(normalize_national_id(" - "), None);
    }

    #[test]
    fn flags_accept_booleans_and_checkbox_values() {
        for raw in ["true", "TRUE", "on", "1", "sim", " Sim "] {
            assert_eq!(parse_flag("x", Some(raw)), Ok(true), "{raw}");
        }
        for raw in ["false", "off", "0", "não", ""] {
            assert_eq!(parse_flag("x", Some(raw)), Ok(false), "{raw}");
        }
        assert_eq!(parse_flag("x", None), Ok(false));
        assert_eq!(
            parse_flag("x", Some("maybe")),
            Err(MalformedInput::NotAFlag {
                field: "x",
                value: "maybe".to_string()
            })
        );
    }

    #[test]
    fn disability_flag_deserializes_from_any_form_shape() {
        for (body, expected) in [
            (r#"{ "has_disability_or_age_65_plus": true }"#, true),
            (r#"{ "has_disability_or_age_65_plus": "on" }"#, true),
            (r#"{ "has_disability_or_age_65_plus": "false" }"#, false),
            (r#"{ "has_disability_or_age_65_plus": null }"#, false),
            (r#"{}"#, false),
        ] {
            let mut form: CalculatorForm = serde_json::from_str(body).expect("form deserializes");
            form.total_income = Some("800".to_string());
            form.member_count = Some("1".to_string());

            let profile = household_from_form(&form).expect("profile parses");
            assert_eq!(profile.has_disability_or_age_65_plus, expected, "{body}");
        }
    }

    #[test]
    fn form_accepts_json_numbers() {
        let form: CalculatorForm = serde_json::from_str(
            r#"{ "total_income": 800, "member_count": "4", "national_id": null }"#,
        )
        .expect("form deserializes");

        assert_eq!(form.total_income.as_deref(), Some("800"));
        assert_eq!(form.member_count.as_deref(), Some("4"));
        assert!(form.national_id.is_none());
    }
}
