use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use super::calculator::EligibilityCalculator;
use super::domain::BenefitProgram;
use super::intake::CalculatorForm;

/// Router exposing the calculators over HTTP.
pub fn benefit_router(calculator: Arc<EligibilityCalculator>) -> Router {
    Router::new()
        .route("/api/v1/benefits", get(programs_handler))
        .route("/api/v1/benefits/:program", post(calculate_handler))
        .with_state(calculator)
}

#[derive(Debug, Serialize)]
pub(crate) struct ProgramView {
    program: &'static str,
    label: &'static str,
    kind: &'static str,
}

pub(crate) async fn programs_handler(
    State(calculator): State<Arc<EligibilityCalculator>>,
) -> Response {
    let programs: Vec<ProgramView> = BenefitProgram::ordered()
        .into_iter()
        .map(|program| ProgramView {
            program: program.slug(),
            label: program.label(),
            kind: if program.is_estimate() {
                "estimate"
            } else {
                "eligibility"
            },
        })
        .collect();

    let payload = json!({
        "policy_year": calculator.policy().year,
        "programs": programs,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn calculate_handler(
    State(calculator): State<Arc<EligibilityCalculator>>,
    Path(program): Path<String>,
    Json(form): Json<CalculatorForm>,
) -> Response {
    match program.parse::<BenefitProgram>() {
        Ok(program) => {
            let outcome = calculator.calculate(program, &form);
            (StatusCode::OK, Json(outcome)).into_response()
        }
        Err(err) => {
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}
