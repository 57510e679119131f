use metrics_exporter_prometheus::PrometheusHandle;
use pip_choice::config::AppConfig;
use pip_choice::error::AppError;
use pip_choice::workflows::pip::{EligibilityEngine, QuestionnaireRequest};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Engine built from `AppConfig`, so CLI output honours the same overrides as the service.
pub(crate) fn configured_engine() -> Result<EligibilityEngine, AppError> {
    let config = AppConfig::load()?;
    Ok(EligibilityEngine::new(config.eligibility))
}

pub(crate) fn load_questionnaire(path: &Path) -> Result<QuestionnaireRequest, AppError> {
    let raw = std::fs::read_to_string(path)?;
    parse_questionnaire(&raw)
}

pub(crate) fn parse_questionnaire(raw: &str) -> Result<QuestionnaireRequest, AppError> {
    Ok(serde_json::from_str(raw)?)
}
