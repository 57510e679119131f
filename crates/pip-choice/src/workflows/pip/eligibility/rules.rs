use super::super::domain::{member_display_name, Applicant, HouseholdMember};
use super::config::{dollars, EligibilityConfig};
use super::facts::{
    qualifies_for_medicaid_household, qualifies_for_opt_out_household, DerivedFacts,
};
use super::OptionEligibility;

pub(crate) struct RuleContext<'a> {
    pub applicant: &'a Applicant,
    pub facts: DerivedFacts,
    pub household: &'a [HouseholdMember],
    pub config: &'a EligibilityConfig,
}

/// One step of a prioritized explanation chain.
struct ReasonRule {
    applies: fn(&RuleContext<'_>) -> bool,
    reason: fn(&RuleContext<'_>) -> String,
}

fn first_matching_reason(rules: &[ReasonRule], ctx: &RuleContext<'_>) -> Option<String> {
    rules
        .iter()
        .find(|rule| (rule.applies)(ctx))
        .map(|rule| (rule.reason)(ctx))
}

fn always(_: &RuleContext<'_>) -> bool {
    true
}

fn ineligible(rules: &[ReasonRule], ctx: &RuleContext<'_>) -> OptionEligibility {
    OptionEligibility {
        eligible: false,
        reasons: first_matching_reason(rules, ctx).into_iter().collect(),
    }
}

pub(crate) fn baseline() -> OptionEligibility {
    OptionEligibility {
        eligible: true,
        reasons: Vec::new(),
    }
}

fn exclusion_blockers() -> [ReasonRule; 3] {
    [
        ReasonRule {
            applies: |ctx| ctx.facts.has_medicare,
            reason: |_| "Medicare cannot be used as Qualified Health Coverage for Option 4".to_string(),
        },
        ReasonRule {
            applies: |ctx| ctx.applicant.health.has_deductible_over_limit(),
            reason: |ctx| {
                format!(
                    "Your health plan deductible is above {}, so it is not Qualified Health Coverage",
                    dollars(ctx.config.qhc_deductible_limit)
                )
            },
        },
        ReasonRule {
            applies: always,
            reason: |_| "You do not have Qualified Health Coverage".to_string(),
        },
    ]
}

pub(crate) fn exclusion_option(ctx: &RuleContext<'_>) -> OptionEligibility {
    if !(ctx.facts.has_qhc && !ctx.facts.has_medicare) {
        return ineligible(&exclusion_blockers(), ctx);
    }

    OptionEligibility {
        eligible: true,
        reasons: vec![
            "You have Qualified Health Coverage that covers auto accident injuries".to_string(),
            format!(
                "Your health plan deductible is at or below {}",
                dollars(ctx.config.qhc_deductible_limit)
            ),
            "Household members with their own Qualified Health Coverage may also be excluded"
                .to_string(),
        ],
    }
}

fn medicaid_blockers() -> [ReasonRule; 1] {
    [ReasonRule {
        applies: always,
        reason: |_| "You are not enrolled in Medicaid".to_string(),
    }]
}

pub(crate) fn medicaid_option(ctx: &RuleContext<'_>) -> OptionEligibility {
    if !ctx.facts.has_medicaid {
        return ineligible(&medicaid_blockers(), ctx);
    }

    let plan = ctx.applicant.medicaid_plan.trim();
    let enrolled = if plan.is_empty() {
        format!(
            "You are enrolled in Medicaid, which allows the {} limit",
            dollars(ctx.config.medicaid_limit)
        )
    } else {
        format!(
            "You are enrolled in Medicaid through {plan}, which allows the {} limit",
            dollars(ctx.config.medicaid_limit)
        )
    };

    let (eligible, household_line) = household_check(
        ctx.household,
        qualifies_for_medicaid_household,
        "Medicaid, Qualified Health Coverage, Medicare Parts A and B, or their own auto policy",
    );

    OptionEligibility {
        eligible,
        reasons: vec![enrolled, household_line],
    }
}

fn opt_out_blockers() -> [ReasonRule; 2] {
    [
        ReasonRule {
            applies: |ctx| ctx.applicant.health.has_medicare_part_a_only(),
            reason: |_| {
                "Medicare Part A alone does not qualify; Parts A and B are both required"
                    .to_string()
            },
        },
        ReasonRule {
            applies: always,
            reason: |_| "You do not have Medicare Parts A and B".to_string(),
        },
    ]
}

pub(crate) fn opt_out_option(ctx: &RuleContext<'_>) -> OptionEligibility {
    if !ctx.facts.has_medicare {
        return ineligible(&opt_out_blockers(), ctx);
    }

    let (eligible, household_line) = household_check(
        ctx.household,
        qualifies_for_opt_out_household,
        "Medicare Parts A and B, Qualified Health Coverage, or their own auto policy",
    );

    OptionEligibility {
        eligible,
        reasons: vec!["You have Medicare Parts A and B".to_string(), household_line],
    }
}

/// Every member must qualify; an empty household passes.
fn household_check(
    household: &[HouseholdMember],
    qualifies: fn(&HouseholdMember) -> bool,
    coverage_list: &str,
) -> (bool, String) {
    if household.is_empty() {
        return (
            true,
            "No other household members need qualifying coverage".to_string(),
        );
    }

    let missing: Vec<String> = household
        .iter()
        .enumerate()
        .filter(|(_, member)| !qualifies(member))
        .map(|(index, member)| member_display_name(member, index))
        .collect();

    if missing.is_empty() {
        (true, format!("Every household member has {coverage_list}"))
    } else {
        (
            false,
            format!(
                "Household members without {coverage_list}: {}",
                missing.join(", ")
            ),
        )
    }
}
