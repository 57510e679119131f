//! Pure eligibility rules for the six PIP medical coverage options.
//!
//! Every call is a function of its inputs only: unanswered questions lower eligibility instead
//! of raising errors, and repeated calls with the same answers yield equal results.

mod config;
mod documents;
mod facts;
mod rules;

pub use config::EligibilityConfig;
pub use documents::{DocumentRequirement, ExcludedPersons, ExclusionCandidate};
pub use facts::{derive_facts, effective_household_members, DerivedFacts};

pub(crate) use config::dollars;

use super::catalog::CoverageOption;
use super::domain::{Applicant, HouseholdMember};
use rules::RuleContext;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Verdict for a single option together with its ordered explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEligibility {
    pub eligible: bool,
    pub reasons: Vec<String>,
}

/// Eligibility keyed by option number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EligibilityResult {
    options: BTreeMap<CoverageOption, OptionEligibility>,
}

impl EligibilityResult {
    pub fn get(&self, option: CoverageOption) -> Option<&OptionEligibility> {
        self.options.get(&option)
    }

    pub fn is_eligible(&self, option: CoverageOption) -> bool {
        self.options
            .get(&option)
            .map(|entry| entry.eligible)
            .unwrap_or(false)
    }

    pub fn reasons(&self, option: CoverageOption) -> &[String] {
        self.options
            .get(&option)
            .map(|entry| entry.reasons.as_slice())
            .unwrap_or(&[])
    }

    pub fn eligible_options(&self) -> Vec<CoverageOption> {
        self.options
            .iter()
            .filter(|(_, entry)| entry.eligible)
            .map(|(option, _)| *option)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CoverageOption, &OptionEligibility)> {
        self.options.iter().map(|(option, entry)| (*option, entry))
    }
}

/// Stateless evaluator applying the eligibility rules to questionnaire answers.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    config: EligibilityConfig,
}

impl EligibilityEngine {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    pub fn evaluate_eligibility(
        &self,
        applicant: &Applicant,
        members: &[HouseholdMember],
        all_same_health: Option<bool>,
    ) -> EligibilityResult {
        let household = effective_household_members(members, applicant, all_same_health);
        let ctx = RuleContext {
            applicant,
            facts: derive_facts(applicant),
            household: &household,
            config: &self.config,
        };

        let mut options = BTreeMap::new();
        for option in CoverageOption::ordered() {
            let entry = match option {
                CoverageOption::Unlimited
                | CoverageOption::UpTo500k
                | CoverageOption::UpTo250k => rules::baseline(),
                CoverageOption::UpTo250kWithExclusions => rules::exclusion_option(&ctx),
                CoverageOption::Medicaid50k => rules::medicaid_option(&ctx),
                CoverageOption::MedicareOptOut => rules::opt_out_option(&ctx),
            };
            options.insert(option, entry);
        }

        let result = EligibilityResult { options };
        debug!(
            household = household.len(),
            facts = ?ctx.facts,
            eligible = ?result.eligible_options(),
            "evaluated PIP coverage eligibility"
        );
        result
    }

    /// People who may be excluded under Option 4, applicant first.
    pub fn qualifying_exclusions(
        &self,
        applicant: &Applicant,
        members: &[HouseholdMember],
        all_same_health: Option<bool>,
    ) -> Vec<ExclusionCandidate> {
        let household = effective_household_members(members, applicant, all_same_health);
        documents::qualifying_exclusions(applicant, &household)
    }

    /// Exclusions of anyone without their own QHC are ignored.
    pub fn required_documents(
        &self,
        selected: Option<CoverageOption>,
        applicant: &Applicant,
        members: &[HouseholdMember],
        all_same_health: Option<bool>,
        excluded: &ExcludedPersons,
    ) -> Vec<DocumentRequirement> {
        let household = effective_household_members(members, applicant, all_same_health);
        documents::build_requirements(selected, applicant, &household, excluded, &self.config)
    }
}
