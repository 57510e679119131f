use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AppError;

use super::catalog::{CoverageCatalog, CoverageOption};
use super::domain::{Applicant, HouseholdMember};
use super::eligibility::{
    derive_facts, effective_household_members, DerivedFacts, DocumentRequirement,
    EligibilityEngine, EligibilityResult, ExcludedPersons, ExclusionCandidate,
};
use super::summary::EligibilitySummary;
use super::wizard::{can_advance, missing_answers, reduce, FormState, WizardAction};

/// Questionnaire answers as posted by a front end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionnaireRequest {
    pub applicant: Applicant,
    pub household: Vec<HouseholdMember>,
    pub all_same_health: Option<bool>,
    pub selected_option: Option<CoverageOption>,
    pub excluded_persons: ExcludedPersons,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityResponse {
    pub facts: DerivedFacts,
    pub effective_household: Vec<HouseholdMember>,
    pub results: EligibilityResult,
    pub qualifying_exclusions: Vec<ExclusionCandidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsResponse {
    pub selected_option: Option<CoverageOption>,
    pub documents: Vec<DocumentRequirement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WizardRequest {
    #[serde(default)]
    pub state: FormState,
    pub action: WizardAction,
}

#[derive(Debug, Clone, Serialize)]
pub struct WizardResponse {
    pub state: FormState,
    pub can_advance: bool,
    pub missing_answers: Vec<String>,
}

/// Router exposing the eligibility engine and wizard reducer over HTTP.
pub fn pip_router(engine: Arc<EligibilityEngine>) -> Router {
    Router::new()
        .route("/api/v1/pip/options", get(options_handler))
        .route("/api/v1/pip/eligibility", post(eligibility_handler))
        .route("/api/v1/pip/documents", post(documents_handler))
        .route("/api/v1/pip/summary", post(summary_handler))
        .route("/api/v1/pip/wizard", post(wizard_handler))
        .with_state(engine)
}

pub(crate) async fn options_handler() -> Json<CoverageCatalog> {
    Json(CoverageCatalog::standard())
}

pub(crate) async fn eligibility_handler(
    State(engine): State<Arc<EligibilityEngine>>,
    Json(request): Json<QuestionnaireRequest>,
) -> Json<EligibilityResponse> {
    let QuestionnaireRequest {
        applicant,
        household,
        all_same_health,
        ..
    } = request;

    Json(EligibilityResponse {
        facts: derive_facts(&applicant),
        effective_household: effective_household_members(&household, &applicant, all_same_health),
        results: engine.evaluate_eligibility(&applicant, &household, all_same_health),
        qualifying_exclusions: engine.qualifying_exclusions(
            &applicant,
            &household,
            all_same_health,
        ),
    })
}

pub(crate) async fn documents_handler(
    State(engine): State<Arc<EligibilityEngine>>,
    Json(request): Json<QuestionnaireRequest>,
) -> Json<DocumentsResponse> {
    let documents = engine.required_documents(
        request.selected_option,
        &request.applicant,
        &request.household,
        request.all_same_health,
        &request.excluded_persons,
    );

    Json(DocumentsResponse {
        selected_option: request.selected_option,
        documents,
    })
}

pub(crate) async fn summary_handler(
    State(engine): State<Arc<EligibilityEngine>>,
    Json(request): Json<QuestionnaireRequest>,
) -> Json<EligibilitySummary> {
    Json(EligibilitySummary::build(
        &engine,
        &request.applicant,
        &request.household,
        request.all_same_health,
        request.selected_option,
        &request.excluded_persons,
    ))
}

pub(crate) async fn wizard_handler(
    State(engine): State<Arc<EligibilityEngine>>,
    Json(request): Json<WizardRequest>,
) -> Result<Json<WizardResponse>, AppError> {
    let state = reduce(request.state, request.action, &engine).map_err(|error| {
        warn!(%error, "wizard action rejected");
        AppError::from(error)
    })?;

    Ok(Json(WizardResponse {
        can_advance: can_advance(&state),
        missing_answers: missing_answers(&state),
        state,
    }))
}
