use super::catalog::CoverageOption;
use super::domain::{
    is_yes, member_display_name, Applicant, HealthCoverage, HouseholdMember, MemberId, PersonRef,
};
use super::eligibility::{
    effective_household_members, DocumentRequirement, EligibilityEngine, EligibilityResult,
    ExcludedPersons, ExclusionCandidate,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Questionnaire screens in the order they are visited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    Insured,
    Household,
    Eligibility,
    Selection,
    Summary,
}

impl Step {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Insured,
            Self::Household,
            Self::Eligibility,
            Self::Selection,
            Self::Summary,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Insured => "Named Insured",
            Self::Household => "Household",
            Self::Eligibility => "Eligibility",
            Self::Selection => "Coverage Selection",
            Self::Summary => "Summary",
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Insured => Some(Self::Household),
            Self::Household => Some(Self::Eligibility),
            Self::Eligibility => Some(Self::Selection),
            Self::Selection => Some(Self::Summary),
            Self::Summary => None,
        }
    }

    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Insured => None,
            Self::Household => Some(Self::Insured),
            Self::Eligibility => Some(Self::Household),
            Self::Selection => Some(Self::Eligibility),
            Self::Summary => Some(Self::Selection),
        }
    }
}

/// One-shot notice shown between the insured and household steps to Medicare A & B holders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedicareNotice {
    #[default]
    NotShown,
    Pending,
    Acknowledged,
}

/// Complete questionnaire state. Only [`reduce`] produces new values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
    pub step: Step,
    pub applicant: Applicant,
    pub household: Vec<HouseholdMember>,
    pub all_same_health: Option<bool>,
    pub selected_option: Option<CoverageOption>,
    pub excluded_persons: ExcludedPersons,
    pub medicare_notice: MedicareNotice,
    pub member_seq: u32,
}

impl FormState {
    pub fn effective_household(&self) -> Vec<HouseholdMember> {
        effective_household_members(&self.household, &self.applicant, self.all_same_health)
    }

    pub fn eligibility(&self, engine: &EligibilityEngine) -> EligibilityResult {
        engine.evaluate_eligibility(&self.applicant, &self.household, self.all_same_health)
    }

    pub fn required_documents(&self, engine: &EligibilityEngine) -> Vec<DocumentRequirement> {
        engine.required_documents(
            self.selected_option,
            &self.applicant,
            &self.household,
            self.all_same_health,
            &self.excluded_persons,
        )
    }

    pub fn qualifying_exclusions(&self, engine: &EligibilityEngine) -> Vec<ExclusionCandidate> {
        engine.qualifying_exclusions(&self.applicant, &self.household, self.all_same_health)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum WizardAction {
    UpdateApplicant(Applicant),
    /// The supplied id is replaced by a generated one.
    AddMember(HouseholdMember),
    UpdateMember(HouseholdMember),
    RemoveMember(MemberId),
    SetAllSameHealth(Option<bool>),
    SelectOption(Option<CoverageOption>),
    ToggleExclusion(PersonRef),
    Next,
    Back,
    AcknowledgeMedicare,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("{} step is incomplete: {}", .step.label(), .missing.join(", "))]
    IncompleteStep { step: Step, missing: Vec<String> },
    #[error("the Medicare notice must be acknowledged before continuing")]
    MedicareNoticePending,
    #[error("no Medicare notice is waiting for acknowledgment")]
    NoMedicareNotice,
    #[error("already at the first step")]
    AtFirstStep,
    #[error("already at the final step")]
    AtFinalStep,
    #[error("household member {0} not found")]
    UnknownMember(MemberId),
    #[error("{0} is not available for this household")]
    OptionNotEligible(CoverageOption),
    #[error("exclusions can only be chosen under Option 4")]
    ExclusionRequiresExclusionOption,
    #[error("{0} does not have their own Qualified Health Coverage and cannot be excluded")]
    ExclusionNotPermitted(PersonRef),
}

/// Applies one action, returning the next state or the reason the action was refused.
pub fn reduce(
    state: FormState,
    action: WizardAction,
    engine: &EligibilityEngine,
) -> Result<FormState, WizardError> {
    debug!(step = ?state.step, ?action, "applying wizard action");
    let mut next = state;

    match action {
        WizardAction::UpdateApplicant(applicant) => {
            next.applicant = applicant;
            Ok(normalize(next, engine))
        }
        WizardAction::AddMember(member) => {
            next.member_seq += 1;
            let id = MemberId(format!("member-{}", next.member_seq));
            next.household.push(HouseholdMember { id, ..member });
            Ok(normalize(next, engine))
        }
        WizardAction::UpdateMember(member) => {
            let slot = next
                .household
                .iter_mut()
                .find(|existing| existing.id == member.id)
                .ok_or_else(|| WizardError::UnknownMember(member.id.clone()))?;
            *slot = member;
            Ok(normalize(next, engine))
        }
        WizardAction::RemoveMember(id) => {
            let before = next.household.len();
            next.household.retain(|member| member.id != id);
            if next.household.len() == before {
                return Err(WizardError::UnknownMember(id));
            }
            Ok(normalize(next, engine))
        }
        WizardAction::SetAllSameHealth(flag) => {
            next.all_same_health = flag;
            Ok(normalize(next, engine))
        }
        WizardAction::SelectOption(None) => {
            next.selected_option = None;
            next.excluded_persons = ExcludedPersons::new();
            Ok(next)
        }
        WizardAction::SelectOption(Some(option)) => {
            if !next.eligibility(engine).is_eligible(option) {
                return Err(WizardError::OptionNotEligible(option));
            }
            next.selected_option = Some(option);
            if option != CoverageOption::UpTo250kWithExclusions {
                next.excluded_persons = ExcludedPersons::new();
            }
            Ok(next)
        }
        WizardAction::ToggleExclusion(person) => {
            if next.selected_option != Some(CoverageOption::UpTo250kWithExclusions) {
                return Err(WizardError::ExclusionRequiresExclusionOption);
            }
            let qualifies = next
                .qualifying_exclusions(engine)
                .iter()
                .any(|candidate| candidate.person == person);
            if !qualifies {
                return Err(WizardError::ExclusionNotPermitted(person));
            }
            next.excluded_persons.toggle(&person);
            Ok(next)
        }
        WizardAction::Next => advance(next),
        WizardAction::Back => retreat(next),
        WizardAction::AcknowledgeMedicare => {
            if next.medicare_notice != MedicareNotice::Pending {
                return Err(WizardError::NoMedicareNotice);
            }
            let missing = missing_answers(&next);
            if !missing.is_empty() {
                return Err(WizardError::IncompleteStep {
                    step: next.step,
                    missing,
                });
            }
            next.medicare_notice = MedicareNotice::Acknowledged;
            next.step = Step::Household;
            Ok(next)
        }
        WizardAction::Reset => Ok(FormState::default()),
    }
}

fn advance(mut state: FormState) -> Result<FormState, WizardError> {
    if state.medicare_notice == MedicareNotice::Pending {
        return Err(WizardError::MedicareNoticePending);
    }
    let target = state.step.next().ok_or(WizardError::AtFinalStep)?;

    let missing = missing_answers(&state);
    if !missing.is_empty() {
        return Err(WizardError::IncompleteStep {
            step: state.step,
            missing,
        });
    }

    if state.step == Step::Insured
        && state.applicant.health.has_full_medicare()
        && state.medicare_notice != MedicareNotice::Acknowledged
    {
        state.medicare_notice = MedicareNotice::Pending;
        return Ok(state);
    }

    state.step = target;
    Ok(state)
}

fn retreat(mut state: FormState) -> Result<FormState, WizardError> {
    if state.medicare_notice == MedicareNotice::Pending {
        state.medicare_notice = MedicareNotice::NotShown;
        return Ok(state);
    }
    state.step = state.step.previous().ok_or(WizardError::AtFirstStep)?;
    Ok(state)
}

/// Drops a selection, exclusions or a pending Medicare notice the current answers no longer
/// support.
fn normalize(mut state: FormState, engine: &EligibilityEngine) -> FormState {
    if state.medicare_notice == MedicareNotice::Pending
        && !state.applicant.health.has_full_medicare()
    {
        state.medicare_notice = MedicareNotice::NotShown;
    }

    if let Some(option) = state.selected_option {
        if !state.eligibility(engine).is_eligible(option) {
            state.selected_option = None;
        }
    }

    if state.selected_option == Some(CoverageOption::UpTo250kWithExclusions) {
        let allowed = state.qualifying_exclusions(engine);
        state
            .excluded_persons
            .retain(|person| allowed.iter().any(|candidate| &candidate.person == person));
    } else {
        state.excluded_persons = ExcludedPersons::new();
    }

    state
}

/// Labels of answers still required before the current step can be left.
pub fn missing_answers(state: &FormState) -> Vec<String> {
    let mut missing = Vec::new();

    match state.step {
        Step::Insured => {
            let applicant = &state.applicant;
            if applicant.name.trim().is_empty() {
                missing.push("Name".to_string());
            }
            if applicant.date_of_birth.is_none() {
                missing.push("Date of birth".to_string());
            }
            missing_coverage_answers(&applicant.health, "", &mut missing);
            if applicant.health.has_medicaid() && applicant.medicaid_plan.trim().is_empty() {
                missing.push("Medicaid plan".to_string());
            }
            if is_yes(applicant.health.has_other_health) && applicant.wants_coordinated.is_none() {
                missing.push("Coordinated benefits".to_string());
            }
        }
        Step::Household => {
            if !state.household.is_empty() && state.all_same_health.is_none() {
                missing.push("Same health coverage as named insured".to_string());
            }
            let sharing = state.all_same_health == Some(true);
            for (index, member) in state.household.iter().enumerate() {
                let prefix = format!("{}: ", member_display_name(member, index));
                if member.name.trim().is_empty() {
                    missing.push(format!("{prefix}Name"));
                }
                if member.relationship.is_none() {
                    missing.push(format!("{prefix}Relationship"));
                }
                if !sharing {
                    missing_coverage_answers(&member.health, &prefix, &mut missing);
                    if member.has_auto_policy.is_none() {
                        missing.push(format!("{prefix}Own auto policy"));
                    }
                }
            }
        }
        Step::Eligibility | Step::Summary => {}
        Step::Selection => {
            if state.selected_option.is_none() {
                missing.push("Coverage option".to_string());
            }
        }
    }

    missing
}

fn missing_coverage_answers(health: &HealthCoverage, prefix: &str, missing: &mut Vec<String>) {
    if health.has_medicare_a.is_none() {
        missing.push(format!("{prefix}Medicare Part A"));
    }
    if is_yes(health.has_medicare_a) && health.has_medicare_b.is_none() {
        missing.push(format!("{prefix}Medicare Part B"));
    }
    if health.has_medicaid.is_none() {
        missing.push(format!("{prefix}Medicaid"));
    }
    if health.has_other_health.is_none() {
        missing.push(format!("{prefix}Other health insurance"));
    }
    if is_yes(health.has_other_health) {
        if health.other_health_is_qhc.is_none() {
            missing.push(format!("{prefix}Qualified Health Coverage"));
        }
        if health.other_health_deductible.is_none() {
            missing.push(format!("{prefix}Health plan deductible"));
        }
    }
}

pub fn can_advance(state: &FormState) -> bool {
    state.step.next().is_some()
        && state.medicare_notice != MedicareNotice::Pending
        && missing_answers(state).is_empty()
}
