//! Michigan PIP medical coverage choice: questionnaire model, eligibility rules, and the
//! step-by-step wizard that drives them.

pub mod catalog;
pub mod domain;
pub mod eligibility;
pub mod router;
pub mod summary;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use catalog::{
    coverage_options, tooltip_for, CoverageCatalog, CoverageOption, CoverageOptionDetails,
    PremiumTier, UnknownCoverageOption, MEDICAID_PLANS,
};
pub use domain::{
    Applicant, DeductibleBand, HealthCoverage, HouseholdMember, MemberId, PersonRef, QhcAnswer,
    Relationship, YesNo,
};
pub use eligibility::{
    derive_facts, effective_household_members, DerivedFacts, DocumentRequirement,
    EligibilityConfig, EligibilityEngine, EligibilityResult, ExcludedPersons, ExclusionCandidate,
    OptionEligibility,
};
pub use router::{pip_router, QuestionnaireRequest};
pub use summary::EligibilitySummary;
pub use wizard::{
    can_advance, missing_answers, reduce, FormState, MedicareNotice, Step, WizardAction,
    WizardError,
};
