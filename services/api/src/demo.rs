use crate::infra::{build_ad_service, demo_creatives, load_creatives};
use auxilios::ads::{AdContentSanitizer, AdPosition};
use auxilios::benefits::money::{format_brl, percent};
use auxilios::benefits::{BenefitProgram, CalculationOutcome, CalculatorForm, EligibilityCalculator};
use auxilios::config::AppConfig;
use auxilios::error::AppError;
use clap::Args;
use std::io::Read;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct CalculateArgs {
    /// Program identifier (income-transfer, income-transfer-extended, gas-subsidy, continuous-cash, pension)
    #[arg(value_parser = crate::infra::parse_program)]
    pub(crate) program: BenefitProgram,
    /// Monthly household income in BRL (1412.50 or 1.412,50)
    #[arg(long)]
    pub(crate) income: Option<String>,
    /// Number of people in the household
    #[arg(long)]
    pub(crate) members: Option<String>,
    /// Children aged 0 to 6
    #[arg(long)]
    pub(crate) children: Option<String>,
    /// Pregnant or nursing members
    #[arg(long)]
    pub(crate) pregnant: Option<String>,
    /// NIS number (11 digits)
    #[arg(long)]
    pub(crate) nis: Option<String>,
    /// Household member has a disability or is 65 or older
    #[arg(long)]
    pub(crate) disability_or_65_plus: bool,
    /// Age in years (pension only)
    #[arg(long)]
    pub(crate) age: Option<String>,
    /// Average contribution salary in BRL (pension only)
    #[arg(long)]
    pub(crate) salary: Option<String>,
    /// Years of contribution (pension only)
    #[arg(long)]
    pub(crate) years: Option<String>,
    /// Print the outcome as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

impl CalculateArgs {
    fn form(&self) -> CalculatorForm {
        CalculatorForm {
            total_income: self.income.clone(),
            member_count: self.members.clone(),
            children_under_7: self.children.clone(),
            pregnant_or_nursing: self.pregnant.clone(),
            national_id: self.nis.clone(),
            has_disability_or_age_65_plus: self.disability_or_65_plus.then(|| "true".to_string()),
            age: self.age.clone(),
            average_salary: self.salary.clone(),
            contribution_years: self.years.clone(),
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct SanitizeArgs {
    /// Read markup from this file instead of stdin
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// CSV export of ad creatives to render instead of the built-in samples
    #[arg(long)]
    pub(crate) ads_csv: Option<PathBuf>,
    /// Page whose slots are rendered
    #[arg(long, default_value = "home")]
    pub(crate) page: String,
}

pub(crate) fn run_calculate(args: CalculateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let calculator = EligibilityCalculator::new(config.policy.load_table()?);

    let outcome = calculator.calculate(args.program, &args.form());
    if args.json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Outcome payload unavailable: {err}"),
        }
    } else {
        println!("{}", render_outcome(args.program, &outcome));
    }

    Ok(())
}

pub(crate) fn run_sanitize(args: SanitizeArgs) -> Result<(), AppError> {
    let raw = match args.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let config = AppConfig::load()?;
    let sanitizer = AdContentSanitizer::new(config.ads.markup_policy());
    println!("{}", sanitizer.sanitize(&raw));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let calculator = EligibilityCalculator::new(config.policy.load_table()?);

    println!(
        "Auxílios BR demo (policy year {})",
        calculator.policy().year
    );
    println!("\nReference households");
    for scenario in reference_scenarios() {
        let outcome = calculator.calculate(scenario.program, &scenario.form);
        println!("\n[{}] {}", scenario.key, scenario.summary);
        println!("{}", render_outcome(scenario.program, &outcome));
    }

    let creatives = match args.ads_csv.as_deref() {
        Some(path) => load_creatives(Some(path))?,
        None => demo_creatives(),
    };
    let service = build_ad_service(&config.ads, creatives);

    println!("\nAd slots for page '{}'", args.page);
    for position in AdPosition::ordered() {
        match service.render_slot(&args.page, position) {
            Ok(slot) if slot.is_empty() => println!("- {position}: (empty)"),
            Ok(slot) => println!("- {position}: {}", slot.to_html()),
            Err(err) => println!("- {position}: unavailable ({err})"),
        }
    }

    Ok(())
}

pub(crate) struct Scenario {
    pub(crate) key: &'static str,
    pub(crate) summary: &'static str,
    pub(crate) program: BenefitProgram,
    pub(crate) form: CalculatorForm,
}

fn household_form(income: &str, members: &str) -> CalculatorForm {
    CalculatorForm {
        total_income: Some(income.to_string()),
        member_count: Some(members.to_string()),
        ..CalculatorForm::default()
    }
}

pub(crate) fn reference_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            key: "A",
            summary: "Renda de R$ 800,00 para 4 pessoas",
            program: BenefitProgram::IncomeTransfer,
            form: household_form("800", "4"),
        },
        Scenario {
            key: "B",
            summary: "Renda de R$ 1.000,00 para 4 pessoas",
            program: BenefitProgram::IncomeTransfer,
            form: household_form("1000", "4"),
        },
        Scenario {
            key: "C",
            summary: "Renda de R$ 2.000,00 para 4 pessoas",
            program: BenefitProgram::IncomeTransfer,
            form: household_form("2000", "4"),
        },
        Scenario {
            key: "D",
            summary: "BPC sem deficiência ou idade mínima",
            program: BenefitProgram::ContinuousCash,
            form: household_form("1200", "4"),
        },
        Scenario {
            key: "E",
            summary: "Auxílio Gás com NIS incompleto",
            program: BenefitProgram::GasSubsidy,
            form: CalculatorForm {
                national_id: Some("123".to_string()),
                ..household_form("2000", "4")
            },
        },
        Scenario {
            key: "F",
            summary: "Aposentadoria aos 62 anos com 25 anos de contribuição",
            program: BenefitProgram::Pension,
            form: CalculatorForm {
                age: Some("62".to_string()),
                average_salary: Some("3500".to_string()),
                contribution_years: Some("25".to_string()),
                ..CalculatorForm::default()
            },
        },
    ]
}

pub(crate) fn render_outcome(program: BenefitProgram, outcome: &CalculationOutcome) -> String {
    let headline = match outcome {
        CalculationOutcome::Eligibility(result) if result.eligible => format!(
            "{}: elegível, {} por mês",
            program.label(),
            format_brl(result.monthly_amount)
        ),
        CalculationOutcome::Eligibility(_) => format!("{}: não elegível", program.label()),
        CalculationOutcome::Estimate(estimate) => format!(
            "{}: estimativa de {} (fator {}%)",
            program.label(),
            format_brl(estimate.amount),
            percent(estimate.replacement_rate)
        ),
    };

    format!("{headline}\n  {}", outcome.explanation())
}
