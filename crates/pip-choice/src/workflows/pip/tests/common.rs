use axum::body::to_bytes;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::pip::domain::{
    Applicant, DeductibleBand, HealthCoverage, HouseholdMember, MemberId, QhcAnswer,
    Relationship, YesNo,
};
use crate::workflows::pip::eligibility::EligibilityEngine;

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::default()
}

pub(super) fn no_coverage() -> HealthCoverage {
    HealthCoverage {
        has_medicare_a: Some(YesNo::No),
        has_medicare_b: None,
        has_medicaid: Some(YesNo::No),
        has_other_health: Some(YesNo::No),
        other_health_is_qhc: None,
        other_health_deductible: None,
    }
}

pub(super) fn qhc_coverage() -> HealthCoverage {
    HealthCoverage {
        has_other_health: Some(YesNo::Yes),
        other_health_is_qhc: Some(QhcAnswer::Yes),
        other_health_deductible: Some(DeductibleBand::Under),
        ..no_coverage()
    }
}

pub(super) fn medicare_coverage() -> HealthCoverage {
    HealthCoverage {
        has_medicare_a: Some(YesNo::Yes),
        has_medicare_b: Some(YesNo::Yes),
        ..no_coverage()
    }
}

pub(super) fn medicaid_coverage() -> HealthCoverage {
    HealthCoverage {
        has_medicaid: Some(YesNo::Yes),
        ..no_coverage()
    }
}

pub(super) fn applicant(name: &str, health: HealthCoverage) -> Applicant {
    Applicant {
        name: name.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1961, 3, 14),
        health,
        medicaid_plan: String::new(),
        wants_coordinated: None,
    }
}

pub(super) fn member(
    id: &str,
    name: &str,
    relationship: Relationship,
    health: HealthCoverage,
    has_auto_policy: YesNo,
) -> HouseholdMember {
    HouseholdMember {
        id: MemberId(id.to_string()),
        name: name.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 7, 1),
        relationship: Some(relationship),
        health,
        has_auto_policy: Some(has_auto_policy),
    }
}

pub(super) async fn response_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
