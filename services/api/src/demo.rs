use crate::infra::{configured_engine, load_questionnaire};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use pip_choice::error::AppError;
use pip_choice::workflows::pip::{
    can_advance, coverage_options, missing_answers, reduce, Applicant, CoverageCatalog,
    CoverageOption, DeductibleBand, EligibilityEngine, EligibilitySummary, FormState,
    HealthCoverage, HouseholdMember, MedicareNotice, MemberId, PersonRef, QhcAnswer, Relationship,
    WizardAction, YesNo, MEDICAID_PLANS,
};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct OptionsArgs {
    /// Print the catalog as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Questionnaire answers as JSON (same shape as the HTTP request body)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the summary as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Household to walk through the questionnaire
    #[arg(long, value_enum, default_value_t = DemoScenario::Medicare)]
    pub(crate) scenario: DemoScenario,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum DemoScenario {
    /// Retired couple on Medicare opting out of PIP medical
    #[default]
    Medicare,
    /// Medicaid enrollee choosing the $50,000 limit
    Medicaid,
    /// Employer-plan family excluding themselves under Option 4
    Qhc,
}

pub(crate) fn run_options(args: OptionsArgs) -> Result<(), AppError> {
    if args.json {
        let rendered = serde_json::to_string_pretty(&CoverageCatalog::standard())?;
        println!("{rendered}");
        return Ok(());
    }

    println!("Michigan PIP medical coverage options");
    for details in coverage_options() {
        println!(
            "  {}. {} ({})",
            details.option.number(),
            details.limit,
            details.premium.label()
        );
        println!("     {}", details.description);
    }
    println!("\nMedicaid health plans:");
    for plan in MEDICAID_PLANS {
        println!("  - {plan}");
    }
    Ok(())
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let engine = configured_engine()?;
    let request = load_questionnaire(&args.input)?;

    let summary = EligibilitySummary::build(
        &engine,
        &request.applicant,
        &request.household,
        request.all_same_health,
        request.selected_option,
        &request.excluded_persons,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary.render_text());
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let engine = configured_engine()?;

    println!("PIP coverage questionnaire demo ({:?} household)", args.scenario);
    let state = walk_through(&engine, scripted_actions(args.scenario));

    println!();
    print!("{}", EligibilitySummary::from_state(&engine, &state).render_text());
    Ok(())
}

/// Applies each action in turn, printing the outcome. Rejected actions leave the state unchanged.
fn walk_through(engine: &EligibilityEngine, actions: Vec<WizardAction>) -> FormState {
    let mut state = FormState::default();

    for action in actions {
        let label = describe(&action);
        match reduce(state.clone(), action, engine) {
            Ok(next) => {
                state = next;
                println!("- {label} -> {}", state.step.label());
                if state.medicare_notice == MedicareNotice::Pending {
                    println!("    Medicare notice shown: PIP medical may be opted out with Parts A and B");
                }
            }
            Err(err) => println!("- {label} -> blocked: {err}"),
        }
        if !can_advance(&state) {
            let missing = missing_answers(&state);
            if !missing.is_empty() {
                println!("    still needed: {}", missing.join(", "));
            }
        }
    }

    state
}

fn describe(action: &WizardAction) -> String {
    match action {
        WizardAction::UpdateApplicant(applicant) => {
            format!("Answer named insured questions for {}", applicant.display_name())
        }
        WizardAction::AddMember(member) => format!("Add household member {}", member.name),
        WizardAction::UpdateMember(member) => format!("Update household member {}", member.name),
        WizardAction::RemoveMember(id) => format!("Remove household member {id}"),
        WizardAction::SetAllSameHealth(flag) => format!("Same health coverage for household: {flag:?}"),
        WizardAction::SelectOption(Some(option)) => format!("Select {option}"),
        WizardAction::SelectOption(None) => "Clear selection".to_string(),
        WizardAction::ToggleExclusion(person) => format!("Toggle exclusion for {person}"),
        WizardAction::Next => "Continue".to_string(),
        WizardAction::Back => "Back".to_string(),
        WizardAction::AcknowledgeMedicare => "Acknowledge Medicare notice".to_string(),
        WizardAction::Reset => "Start over".to_string(),
    }
}

fn scripted_actions(scenario: DemoScenario) -> Vec<WizardAction> {
    match scenario {
        DemoScenario::Medicare => {
            let insured = person(
                "Walt Kowalski",
                1948,
                HealthCoverage {
                    has_medicare_a: Some(YesNo::Yes),
                    has_medicare_b: Some(YesNo::Yes),
                    has_medicaid: Some(YesNo::No),
                    has_other_health: Some(YesNo::No),
                    ..HealthCoverage::default()
                },
            );
            let spouse = HouseholdMember {
                name: "Dorothy Kowalski".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1950, 5, 9),
                relationship: Some(Relationship::Spouse),
                health: insured.health.clone(),
                has_auto_policy: Some(YesNo::No),
                ..HouseholdMember::default()
            };
            vec![
                WizardAction::Next,
                WizardAction::UpdateApplicant(insured),
                WizardAction::Next,
                WizardAction::AcknowledgeMedicare,
                WizardAction::AddMember(spouse),
                WizardAction::SetAllSameHealth(Some(false)),
                WizardAction::Next,
                WizardAction::Next,
                WizardAction::SelectOption(Some(CoverageOption::MedicareOptOut)),
                WizardAction::Next,
            ]
        }
        DemoScenario::Medicaid => {
            let mut insured = person(
                "Maria Lopez",
                1987,
                HealthCoverage {
                    has_medicare_a: Some(YesNo::No),
                    has_medicaid: Some(YesNo::Yes),
                    has_other_health: Some(YesNo::No),
                    ..HealthCoverage::default()
                },
            );
            insured.medicaid_plan = "Meridian".to_string();
            let brother = HouseholdMember {
                name: "Luis Lopez".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1991, 2, 17),
                relationship: Some(Relationship::Sibling),
                health: HealthCoverage {
                    has_medicare_a: Some(YesNo::No),
                    has_medicaid: Some(YesNo::No),
                    has_other_health: Some(YesNo::No),
                    ..HealthCoverage::default()
                },
                has_auto_policy: Some(YesNo::Yes),
                ..HouseholdMember::default()
            };
            vec![
                WizardAction::UpdateApplicant(insured),
                WizardAction::Next,
                WizardAction::AddMember(brother),
                WizardAction::SetAllSameHealth(Some(false)),
                WizardAction::Next,
                WizardAction::Next,
                WizardAction::SelectOption(Some(CoverageOption::MedicareOptOut)),
                WizardAction::SelectOption(Some(CoverageOption::Medicaid50k)),
                WizardAction::Next,
            ]
        }
        DemoScenario::Qhc => {
            let health = HealthCoverage {
                has_medicare_a: Some(YesNo::No),
                has_medicaid: Some(YesNo::No),
                has_other_health: Some(YesNo::Yes),
                other_health_is_qhc: Some(QhcAnswer::Yes),
                other_health_deductible: Some(DeductibleBand::Under),
                ..HealthCoverage::default()
            };
            let mut insured = person("Ada Brooks", 1979, health.clone());
            insured.wants_coordinated = Some(YesNo::Yes);
            let spouse = HouseholdMember {
                name: "Ben Brooks".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1980, 8, 23),
                relationship: Some(Relationship::Spouse),
                ..HouseholdMember::default()
            };
            vec![
                WizardAction::UpdateApplicant(insured),
                WizardAction::Next,
                WizardAction::AddMember(spouse),
                WizardAction::Next,
                WizardAction::SetAllSameHealth(Some(true)),
                WizardAction::Next,
                WizardAction::Next,
                WizardAction::SelectOption(Some(CoverageOption::UpTo250kWithExclusions)),
                WizardAction::ToggleExclusion(PersonRef::NamedInsured),
                WizardAction::ToggleExclusion(PersonRef::Member(MemberId("member-1".to_string()))),
                WizardAction::Next,
            ]
        }
    }
}

fn person(name: &str, birth_year: i32, health: HealthCoverage) -> Applicant {
    Applicant {
        name: name.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(birth_year, 1, 15),
        health,
        ..Applicant::default()
    }
}
