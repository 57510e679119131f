use super::common::*;
use crate::workflows::pip::catalog::CoverageOption;
use crate::workflows::pip::domain::{
    Applicant, DeductibleBand, HealthCoverage, HouseholdMember, QhcAnswer, Relationship, YesNo,
};
use crate::workflows::pip::eligibility::{derive_facts, effective_household_members};

#[test]
fn medicare_part_a_alone_is_not_medicare() {
    let health = HealthCoverage {
        has_medicare_a: Some(YesNo::Yes),
        has_medicare_b: Some(YesNo::No),
        ..no_coverage()
    };

    let facts = derive_facts(&applicant("Ada", health));

    assert!(!facts.has_medicare);
}

#[test]
fn qhc_requires_plan_answer_and_low_deductible() {
    assert!(derive_facts(&applicant("Ada", qhc_coverage())).has_qhc);

    let variants = [
        HealthCoverage {
            has_other_health: Some(YesNo::No),
            ..qhc_coverage()
        },
        HealthCoverage {
            other_health_is_qhc: Some(QhcAnswer::Unsure),
            ..qhc_coverage()
        },
        HealthCoverage {
            other_health_is_qhc: Some(QhcAnswer::No),
            ..qhc_coverage()
        },
        HealthCoverage {
            other_health_deductible: Some(DeductibleBand::Over),
            ..qhc_coverage()
        },
        HealthCoverage {
            other_health_deductible: None,
            ..qhc_coverage()
        },
    ];

    for health in variants {
        let facts = derive_facts(&applicant("Ada", health.clone()));
        assert!(!facts.has_qhc, "{health:?} must not count as QHC");
    }
}

#[test]
fn unanswered_applicant_still_gets_baseline_options() {
    let engine = engine();

    let result = engine.evaluate_eligibility(&Applicant::default(), &[], None);

    for option in [
        CoverageOption::Unlimited,
        CoverageOption::UpTo500k,
        CoverageOption::UpTo250k,
    ] {
        assert!(result.is_eligible(option), "{option} should be available");
        assert!(result.reasons(option).is_empty());
    }
    assert!(!result.is_eligible(CoverageOption::UpTo250kWithExclusions));
    assert!(!result.is_eligible(CoverageOption::Medicaid50k));
    assert!(!result.is_eligible(CoverageOption::MedicareOptOut));
    assert_eq!(
        result.reasons(CoverageOption::UpTo250kWithExclusions),
        ["You do not have Qualified Health Coverage".to_string()]
    );
    assert_eq!(
        result.reasons(CoverageOption::MedicareOptOut),
        ["You do not have Medicare Parts A and B".to_string()]
    );
}

#[test]
fn medicare_applicant_without_household_can_opt_out() {
    let engine = engine();
    let insured = applicant("Walt", medicare_coverage());

    let result = engine.evaluate_eligibility(&insured, &[], None);

    assert!(result.is_eligible(CoverageOption::MedicareOptOut));
    assert_eq!(
        result.reasons(CoverageOption::MedicareOptOut),
        [
            "You have Medicare Parts A and B".to_string(),
            "No other household members need qualifying coverage".to_string(),
        ]
    );
    assert!(!result.is_eligible(CoverageOption::UpTo250kWithExclusions));
    assert_eq!(
        result.reasons(CoverageOption::UpTo250kWithExclusions),
        ["Medicare cannot be used as Qualified Health Coverage for Option 4".to_string()]
    );
    assert!(!result.is_eligible(CoverageOption::Medicaid50k));
    assert_eq!(
        result.reasons(CoverageOption::Medicaid50k),
        ["You are not enrolled in Medicaid".to_string()]
    );
}

#[test]
fn medicare_reason_outranks_deductible_reason() {
    let engine = engine();
    let health = HealthCoverage {
        has_other_health: Some(YesNo::Yes),
        other_health_is_qhc: Some(QhcAnswer::Yes),
        other_health_deductible: Some(DeductibleBand::Over),
        ..medicare_coverage()
    };

    let result = engine.evaluate_eligibility(&applicant("Walt", health), &[], None);

    assert_eq!(
        result.reasons(CoverageOption::UpTo250kWithExclusions),
        ["Medicare cannot be used as Qualified Health Coverage for Option 4".to_string()]
    );
}

#[test]
fn high_deductible_reason_outranks_missing_qhc() {
    let engine = engine();
    let health = HealthCoverage {
        other_health_deductible: Some(DeductibleBand::Over),
        ..qhc_coverage()
    };

    let result = engine.evaluate_eligibility(&applicant("Ada", health), &[], None);

    assert!(!result.is_eligible(CoverageOption::UpTo250kWithExclusions));
    assert_eq!(
        result.reasons(CoverageOption::UpTo250kWithExclusions),
        ["Your health plan deductible is above $6,000, so it is not Qualified Health Coverage"
            .to_string()]
    );
}

#[test]
fn qhc_applicant_without_medicare_qualifies_for_exclusions() {
    let engine = engine();

    let result = engine.evaluate_eligibility(&applicant("Ada", qhc_coverage()), &[], None);

    assert!(result.is_eligible(CoverageOption::UpTo250kWithExclusions));
    assert_eq!(
        result.reasons(CoverageOption::UpTo250kWithExclusions),
        [
            "You have Qualified Health Coverage that covers auto accident injuries".to_string(),
            "Your health plan deductible is at or below $6,000".to_string(),
            "Household members with their own Qualified Health Coverage may also be excluded"
                .to_string(),
        ]
    );
}

#[test]
fn medicare_part_a_only_explains_missing_part_b() {
    let engine = engine();
    let health = HealthCoverage {
        has_medicare_a: Some(YesNo::Yes),
        has_medicare_b: Some(YesNo::No),
        ..no_coverage()
    };

    let result = engine.evaluate_eligibility(&applicant("Walt", health), &[], None);

    assert_eq!(
        result.reasons(CoverageOption::MedicareOptOut),
        ["Medicare Part A alone does not qualify; Parts A and B are both required".to_string()]
    );
}

#[test]
fn medicaid_option_requires_every_member_to_qualify() {
    let engine = engine();
    let mut insured = applicant("Maria", medicaid_coverage());
    insured.medicaid_plan = "Meridian".to_string();
    let household = vec![
        member("m1", "Luis", Relationship::Spouse, no_coverage(), YesNo::Yes),
        member("m2", "Ana", Relationship::Child, no_coverage(), YesNo::No),
        member("m3", "", Relationship::Child, medicaid_coverage(), YesNo::No),
        member("m4", "Rita", Relationship::Parent, no_coverage(), YesNo::No),
    ];

    let result = engine.evaluate_eligibility(&insured, &household, Some(false));

    assert!(!result.is_eligible(CoverageOption::Medicaid50k));
    assert_eq!(
        result.reasons(CoverageOption::Medicaid50k),
        [
            "You are enrolled in Medicaid through Meridian, which allows the $50,000 limit"
                .to_string(),
            "Household members without Medicaid, Qualified Health Coverage, Medicare Parts A and B, or their own auto policy: Ana, Rita"
                .to_string(),
        ]
    );
}

#[test]
fn medicaid_option_passes_when_members_have_any_qualifying_coverage() {
    let engine = engine();
    let insured = applicant("Maria", medicaid_coverage());
    let household = vec![
        member("m1", "Luis", Relationship::Spouse, no_coverage(), YesNo::Yes),
        member("m2", "Ana", Relationship::Child, qhc_coverage(), YesNo::No),
        member("m3", "Rita", Relationship::Parent, medicare_coverage(), YesNo::No),
        member("m4", "Teo", Relationship::Child, medicaid_coverage(), YesNo::No),
    ];

    let result = engine.evaluate_eligibility(&insured, &household, Some(false));

    assert!(result.is_eligible(CoverageOption::Medicaid50k));
    assert_eq!(
        result.reasons(CoverageOption::Medicaid50k)[1],
        "Every household member has Medicaid, Qualified Health Coverage, Medicare Parts A and B, or their own auto policy"
    );
}

#[test]
fn opt_out_rejects_member_with_only_medicaid() {
    let engine = engine();
    let insured = applicant("Walt", medicare_coverage());
    let household = vec![member(
        "m1",
        "Sue",
        Relationship::Spouse,
        medicaid_coverage(),
        YesNo::No,
    )];

    let result = engine.evaluate_eligibility(&insured, &household, Some(false));

    assert!(!result.is_eligible(CoverageOption::MedicareOptOut));
    assert_eq!(
        result.reasons(CoverageOption::MedicareOptOut)[1],
        "Household members without Medicare Parts A and B, Qualified Health Coverage, or their own auto policy: Sue"
    );
}

#[test]
fn shared_health_overrides_member_answers_and_auto_policy() {
    let insured = applicant("Walt", medicare_coverage());
    let stored = vec![member(
        "m1",
        "Sue",
        Relationship::Spouse,
        no_coverage(),
        YesNo::Yes,
    )];

    let effective = effective_household_members(&stored, &insured, Some(true));

    assert_eq!(effective.len(), 1);
    assert_eq!(effective[0].has_auto_policy, Some(YesNo::No));
    assert_eq!(effective[0].health, insured.health);
    assert_eq!(effective[0].name, "Sue");
    assert_eq!(stored[0].has_auto_policy, Some(YesNo::Yes), "stored record untouched");

    let untouched = effective_household_members(&stored, &insured, None);
    assert_eq!(untouched, stored);
}

#[test]
fn shared_health_drives_household_rules() {
    let engine = engine();
    let insured = applicant("Walt", medicare_coverage());
    let household = vec![member(
        "m1",
        "Sue",
        Relationship::Spouse,
        no_coverage(),
        YesNo::No,
    )];

    let separate = engine.evaluate_eligibility(&insured, &household, Some(false));
    let shared = engine.evaluate_eligibility(&insured, &household, Some(true));

    assert!(!separate.is_eligible(CoverageOption::MedicareOptOut));
    assert!(shared.is_eligible(CoverageOption::MedicareOptOut));
}

#[test]
fn medicare_part_a_only_does_not_block_exclusion_option() {
    let engine = engine();
    let health = HealthCoverage {
        has_medicare_a: Some(YesNo::Yes),
        has_medicare_b: Some(YesNo::No),
        ..qhc_coverage()
    };

    let result = engine.evaluate_eligibility(&applicant("Ada", health), &[], None);

    assert!(result.is_eligible(CoverageOption::UpTo250kWithExclusions));
    assert!(!result.is_eligible(CoverageOption::MedicareOptOut));
}

#[test]
fn evaluation_is_idempotent() {
    let engine = engine();
    let insured = applicant("Maria", medicaid_coverage());
    let household: Vec<HouseholdMember> = vec![member(
        "m1",
        "Luis",
        Relationship::Spouse,
        qhc_coverage(),
        YesNo::No,
    )];

    let first = engine.evaluate_eligibility(&insured, &household, Some(false));
    let second = engine.evaluate_eligibility(&insured, &household, Some(false));

    assert_eq!(first, second);
    assert_eq!(first.eligible_options().len(), 4);
}

#[test]
fn result_serializes_keyed_by_option_number() {
    let engine = engine();

    let result = engine.evaluate_eligibility(&applicant("Walt", medicare_coverage()), &[], None);
    let json = serde_json::to_value(&result).expect("serializes");

    assert_eq!(json["6"]["eligible"], true);
    assert_eq!(json["4"]["eligible"], false);
    assert_eq!(json["1"]["reasons"].as_array().map(Vec::len), Some(0));
}
