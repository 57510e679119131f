use super::super::catalog::CoverageOption;
use super::super::domain::{
    is_yes, member_display_name, Applicant, HouseholdMember, PersonRef,
};
use super::config::{dollars, EligibilityConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Proof the insurer needs before the chosen option can be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRequirement {
    pub doc: String,
    pub desc: String,
    pub person: String,
}

/// People excluded from PIP medical coverage under Option 4.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExcludedPersons(BTreeSet<PersonRef>);

impl ExcludedPersons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, person: &PersonRef) -> bool {
        self.0.contains(person)
    }

    pub fn insert(&mut self, person: PersonRef) -> bool {
        self.0.insert(person)
    }

    pub fn remove(&mut self, person: &PersonRef) -> bool {
        self.0.remove(person)
    }

    /// Returns `true` when the person is excluded after the toggle.
    pub fn toggle(&mut self, person: &PersonRef) -> bool {
        if self.0.remove(person) {
            false
        } else {
            self.0.insert(person.clone());
            true
        }
    }

    pub fn retain(&mut self, keep: impl FnMut(&PersonRef) -> bool) {
        self.0.retain(keep);
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonRef> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<PersonRef> for ExcludedPersons {
    fn from_iter<I: IntoIterator<Item = PersonRef>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Someone who holds Qualified Health Coverage in their own right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionCandidate {
    pub person: PersonRef,
    pub name: String,
}

/// People who may be excluded under Option 4, applicant first.
///
/// `household` must already be the effective member list.
pub(crate) fn qualifying_exclusions(
    applicant: &Applicant,
    household: &[HouseholdMember],
) -> Vec<ExclusionCandidate> {
    let mut candidates = Vec::new();
    if applicant.health.has_qhc() && !applicant.health.has_full_medicare() {
        candidates.push(ExclusionCandidate {
            person: PersonRef::NamedInsured,
            name: applicant.display_name(),
        });
    }
    candidates.extend(
        household
            .iter()
            .enumerate()
            .filter(|(_, member)| member.health.has_qhc())
            .map(|(index, member)| ExclusionCandidate {
                person: PersonRef::Member(member.id.clone()),
                name: member_display_name(member, index),
            }),
    );
    candidates
}

fn qhc_letter(person: String, config: &EligibilityConfig) -> DocumentRequirement {
    DocumentRequirement {
        doc: "Qualified Health Coverage letter".to_string(),
        desc: format!(
            "Letter from the health insurer confirming the plan covers auto accident injuries and has an individual deductible of {} or less",
            dollars(config.qhc_deductible_limit)
        ),
        person,
    }
}

fn medicare_card(person: String) -> DocumentRequirement {
    DocumentRequirement {
        doc: "Medicare card".to_string(),
        desc: "Copy of the Medicare card showing enrollment in both Part A and Part B".to_string(),
        person,
    }
}

fn medicaid_proof(applicant: &Applicant, config: &EligibilityConfig) -> DocumentRequirement {
    let plan = applicant.medicaid_plan.trim();
    let source = if plan.is_empty() {
        String::new()
    } else {
        format!(" from {plan}")
    };
    DocumentRequirement {
        doc: "Proof of Medicaid enrollment".to_string(),
        desc: format!(
            "Medicaid card or enrollment letter{source} supporting the {} limit",
            dollars(config.medicaid_limit)
        ),
        person: applicant.display_name(),
    }
}

fn coordination_letter(person: String) -> DocumentRequirement {
    DocumentRequirement {
        doc: "Coordination of benefits letter".to_string(),
        desc: "Health insurance card or letter confirming the plan pays first for auto accident injuries".to_string(),
        person,
    }
}

/// `household` must already be the effective member list.
pub(crate) fn build_requirements(
    selected: Option<CoverageOption>,
    applicant: &Applicant,
    household: &[HouseholdMember],
    excluded: &ExcludedPersons,
    config: &EligibilityConfig,
) -> Vec<DocumentRequirement> {
    let Some(option) = selected else {
        return Vec::new();
    };

    let applicant_name = applicant.display_name();
    let mut documents = Vec::new();

    match option {
        CoverageOption::UpTo250kWithExclusions => {
            documents.push(qhc_letter(applicant_name.clone(), config));
            for (index, member) in household.iter().enumerate() {
                let person = PersonRef::Member(member.id.clone());
                if excluded.contains(&person) && member.health.has_qhc() {
                    documents.push(qhc_letter(member_display_name(member, index), config));
                }
            }
        }
        CoverageOption::Medicaid50k => {
            documents.push(medicaid_proof(applicant, config));
        }
        CoverageOption::MedicareOptOut => {
            documents.push(medicare_card(applicant_name.clone()));
            for (index, member) in household.iter().enumerate() {
                let name = member_display_name(member, index);
                // A member holding both QHC and Medicare gets both entries.
                if member.health.has_qhc() {
                    documents.push(qhc_letter(name.clone(), config));
                }
                if member.health.has_full_medicare() {
                    documents.push(medicare_card(name));
                }
            }
        }
        CoverageOption::Unlimited | CoverageOption::UpTo500k | CoverageOption::UpTo250k => {}
    }

    if option.allows_coordination() && is_yes(applicant.wants_coordinated) {
        documents.push(coordination_letter(applicant_name));
    }

    documents
}
