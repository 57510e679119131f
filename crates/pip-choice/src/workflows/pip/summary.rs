use super::catalog::{CoverageOption, PremiumTier};
use super::domain::{member_display_name, Applicant, HouseholdMember, Relationship};
use super::eligibility::{
    derive_facts, dollars, effective_household_members, DerivedFacts, DocumentRequirement,
    EligibilityEngine, ExcludedPersons,
};
use super::wizard::FormState;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct HouseholdMemberView {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<Relationship>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_label: Option<&'static str>,
    pub has_medicare: bool,
    pub has_medicaid: bool,
    pub has_qhc: bool,
    pub has_auto_policy: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionSummaryView {
    pub option: CoverageOption,
    pub limit: &'static str,
    pub description: &'static str,
    pub premium: PremiumTier,
    pub premium_label: &'static str,
    pub eligible: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
}

/// Printable outcome of the questionnaire.
#[derive(Debug, Clone, Serialize)]
pub struct EligibilitySummary {
    pub named_insured: String,
    pub facts: DerivedFacts,
    pub qhc_deductible_limit: String,
    pub household: Vec<HouseholdMemberView>,
    pub options: Vec<OptionSummaryView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_option: Option<CoverageOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_persons: Vec<String>,
    pub documents: Vec<DocumentRequirement>,
}

impl EligibilitySummary {
    pub fn build(
        engine: &EligibilityEngine,
        applicant: &Applicant,
        members: &[HouseholdMember],
        all_same_health: Option<bool>,
        selected_option: Option<CoverageOption>,
        excluded: &ExcludedPersons,
    ) -> Self {
        let result = engine.evaluate_eligibility(applicant, members, all_same_health);
        let household = effective_household_members(members, applicant, all_same_health)
            .iter()
            .enumerate()
            .map(|(index, member)| HouseholdMemberView {
                name: member_display_name(member, index),
                relationship: member.relationship,
                relationship_label: member.relationship.map(Relationship::label),
                has_medicare: member.health.has_full_medicare(),
                has_medicaid: member.health.has_medicaid(),
                has_qhc: member.health.has_qhc(),
                has_auto_policy: member.has_own_auto_policy(),
            })
            .collect();

        let options = result
            .iter()
            .map(|(option, entry)| {
                let details = option.details();
                OptionSummaryView {
                    option,
                    limit: details.limit,
                    description: details.description,
                    premium: details.premium,
                    premium_label: details.premium.label(),
                    eligible: entry.eligible,
                    reasons: entry.reasons.clone(),
                }
            })
            .collect();

        let excluded_persons = if selected_option == Some(CoverageOption::UpTo250kWithExclusions)
        {
            engine
                .qualifying_exclusions(applicant, members, all_same_health)
                .into_iter()
                .filter(|candidate| excluded.contains(&candidate.person))
                .map(|candidate| candidate.name)
                .collect()
        } else {
            Vec::new()
        };

        Self {
            named_insured: applicant.display_name(),
            facts: derive_facts(applicant),
            qhc_deductible_limit: dollars(engine.config().qhc_deductible_limit),
            household,
            options,
            selected_option,
            excluded_persons,
            documents: engine.required_documents(
                selected_option,
                applicant,
                members,
                all_same_health,
                excluded,
            ),
        }
    }

    pub fn from_state(engine: &EligibilityEngine, state: &FormState) -> Self {
        Self::build(
            engine,
            &state.applicant,
            &state.household,
            state.all_same_health,
            state.selected_option,
            &state.excluded_persons,
        )
    }

    /// Plain-text printable summary.
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EligibilitySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PIP medical coverage summary for {}", self.named_insured)?;
        writeln!(
            f,
            "- Medicare Parts A & B: {} | Medicaid: {} | Qualified Health Coverage (deductible <= {}): {}",
            yes_no(self.facts.has_medicare),
            yes_no(self.facts.has_medicaid),
            self.qhc_deductible_limit,
            yes_no(self.facts.has_qhc)
        )?;

        if self.household.is_empty() {
            writeln!(f, "- Household: no other resident relatives")?;
        } else {
            writeln!(f, "Household:")?;
            for member in &self.household {
                writeln!(
                    f,
                    "  - {} ({}): Medicare {} | Medicaid {} | QHC {} | own auto policy {}",
                    member.name,
                    member.relationship_label.unwrap_or("relationship not given"),
                    yes_no(member.has_medicare),
                    yes_no(member.has_medicaid),
                    yes_no(member.has_qhc),
                    yes_no(member.has_auto_policy)
                )?;
            }
        }

        writeln!(f, "Coverage options:")?;
        for option in &self.options {
            let marker = if option.eligible { "available" } else { "not available" };
            let selected = if self.selected_option == Some(option.option) {
                " [selected]"
            } else {
                ""
            };
            writeln!(
                f,
                "  {}. {} ({}) - {}{}",
                option.option.number(),
                option.limit,
                option.premium_label,
                marker,
                selected
            )?;
            for reason in &option.reasons {
                writeln!(f, "       * {}", reason)?;
            }
        }

        if !self.excluded_persons.is_empty() {
            writeln!(
                f,
                "Excluded from PIP medical: {}",
                self.excluded_persons.join(", ")
            )?;
        }

        match self.selected_option {
            None => {
                writeln!(f, "No coverage option selected yet.")?;
            }
            Some(_) if self.documents.is_empty() => {
                writeln!(f, "Required documents: none")?;
            }
            Some(_) => {
                writeln!(f, "Required documents:")?;
                for document in &self.documents {
                    writeln!(
                        f,
                        "  - {} for {}: {}",
                        document.doc, document.person, document.desc
                    )?;
                }
            }
        }

        Ok(())
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::pip::domain::{
        DeductibleBand, HealthCoverage, MemberId, PersonRef, QhcAnswer, YesNo,
    };

    fn medicare_applicant() -> Applicant {
        Applicant {
            name: "Walt Kowalski".to_string(),
            health: HealthCoverage {
                has_medicare_a: Some(YesNo::Yes),
                has_medicare_b: Some(YesNo::Yes),
                has_medicaid: Some(YesNo::No),
                has_other_health: Some(YesNo::No),
                ..HealthCoverage::default()
            },
            ..Applicant::default()
        }
    }

    #[test]
    fn summary_lists_every_option_and_selected_documents() {
        let engine = EligibilityEngine::default();
        let summary = EligibilitySummary::build(
            &engine,
            &medicare_applicant(),
            &[],
            None,
            Some(CoverageOption::MedicareOptOut),
            &ExcludedPersons::new(),
        );

        assert_eq!(summary.options.len(), 6);
        assert!(summary.options[5].eligible);
        assert_eq!(summary.documents.len(), 1);
        assert_eq!(summary.documents[0].doc, "Medicare card");

        let text = summary.render_text();
        assert!(text.contains("PIP medical coverage summary for Walt Kowalski"));
        assert!(text.contains("6. Opt out of PIP medical coverage (Lowest premium) - available [selected]"));
        assert!(text.contains("Medicare card for Walt Kowalski"));
    }

    #[test]
    fn text_rendering_matches_display() {
        let engine = EligibilityEngine::default();
        let summary = EligibilitySummary::build(
            &engine,
            &medicare_applicant(),
            &[],
            None,
            None,
            &ExcludedPersons::new(),
        );

        let text = summary.render_text();
        assert_eq!(text, format!("{summary}"));
        assert!(text.ends_with("No coverage option selected yet.\n"));
        assert!(text.contains("- Household: no other resident relatives\n"));
    }

    #[test]
    fn summary_reports_only_qualifying_exclusions() {
        let engine = EligibilityEngine::default();
        let applicant = Applicant {
            name: "Rosa Diaz".to_string(),
            health: HealthCoverage {
                has_medicare_a: Some(YesNo::No),
                has_medicaid: Some(YesNo::No),
                has_other_health: Some(YesNo::Yes),
                other_health_is_qhc: Some(QhcAnswer::Yes),
                other_health_deductible: Some(DeductibleBand::Under),
                ..HealthCoverage::default()
            },
            ..Applicant::default()
        };
        let uninsured = HouseholdMember {
            id: MemberId("member-1".to_string()),
            name: "Nico".to_string(),
            ..HouseholdMember::default()
        };
        let excluded: ExcludedPersons = [
            PersonRef::NamedInsured,
            PersonRef::Member(MemberId("member-1".to_string())),
        ]
        .into_iter()
        .collect();

        let summary = EligibilitySummary::build(
            &engine,
            &applicant,
            &[uninsured],
            Some(false),
            Some(CoverageOption::UpTo250kWithExclusions),
            &excluded,
        );

        assert_eq!(summary.excluded_persons, vec!["Rosa Diaz".to_string()]);
        assert_eq!(summary.documents.len(), 1);
        assert!(summary
            .render_text()
            .contains("Excluded from PIP medical: Rosa Diaz"));
    }
}
