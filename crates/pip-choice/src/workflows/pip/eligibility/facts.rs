use super::super::domain::{Applicant, HouseholdMember, YesNo};
use serde::{Deserialize, Serialize};

/// Boolean facts derived from the named insured's raw answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedFacts {
    pub has_medicare: bool,
    pub has_medicaid: bool,
    pub has_qhc: bool,
}

/// Unanswered fields count as `false`.
pub fn derive_facts(applicant: &Applicant) -> DerivedFacts {
    DerivedFacts {
        has_medicare: applicant.health.has_full_medicare(),
        has_medicaid: applicant.health.has_medicaid(),
        has_qhc: applicant.health.has_qhc(),
    }
}

/// Household members as the rules see them.
///
/// With `all_same_health == Some(true)` every member takes the applicant's health answers and
/// loses any own auto policy. The stored records are never touched; a fresh list is returned
/// either way.
pub fn effective_household_members(
    members: &[HouseholdMember],
    applicant: &Applicant,
    all_same_health: Option<bool>,
) -> Vec<HouseholdMember> {
    if all_same_health != Some(true) {
        return members.to_vec();
    }

    members
        .iter()
        .map(|member| HouseholdMember {
            health: applicant.health.clone(),
            has_auto_policy: Some(YesNo::No),
            ..member.clone()
        })
        .collect()
}

pub(crate) fn qualifies_for_medicaid_household(member: &HouseholdMember) -> bool {
    member.has_own_auto_policy()
        || member.health.has_medicaid()
        || member.health.has_qhc()
        || member.health.has_full_medicare()
}

pub(crate) fn qualifies_for_opt_out_household(member: &HouseholdMember) -> bool {
    member.has_own_auto_policy() || member.health.has_full_medicare() || member.health.has_qhc()
}
