use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Plain yes/no answer. `None` at the use site means "not answered yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

/// Whether the other health plan is Qualified Health Coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QhcAnswer {
    Yes,
    No,
    Unsure,
}

impl QhcAnswer {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Unsure => "Not sure",
        }
    }
}

/// Deductible of the other health plan relative to the QHC threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductibleBand {
    Under,
    Over,
}

impl DeductibleBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Under => "At or below the limit",
            Self::Over => "Above the limit",
        }
    }
}

pub(crate) fn is_yes(answer: Option<YesNo>) -> bool {
    answer == Some(YesNo::Yes)
}

/// Health-coverage answers shared by the named insured and each household member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCoverage {
    pub has_medicare_a: Option<YesNo>,
    pub has_medicare_b: Option<YesNo>,
    pub has_medicaid: Option<YesNo>,
    pub has_other_health: Option<YesNo>,
    pub other_health_is_qhc: Option<QhcAnswer>,
    pub other_health_deductible: Option<DeductibleBand>,
}

impl HealthCoverage {
    /// Medicare counts only when both Part A and Part B are held.
    pub fn has_full_medicare(&self) -> bool {
        is_yes(self.has_medicare_a) && is_yes(self.has_medicare_b)
    }

    pub fn has_medicare_part_a_only(&self) -> bool {
        is_yes(self.has_medicare_a) && !is_yes(self.has_medicare_b)
    }

    pub fn has_medicaid(&self) -> bool {
        is_yes(self.has_medicaid)
    }

    /// QHC needs an answered "yes" on the plan itself and a deductible under the limit.
    /// `Unsure` never qualifies.
    pub fn has_qhc(&self) -> bool {
        is_yes(self.has_other_health)
            && self.other_health_is_qhc == Some(QhcAnswer::Yes)
            && self.other_health_deductible == Some(DeductibleBand::Under)
    }

    pub fn has_deductible_over_limit(&self) -> bool {
        is_yes(self.has_other_health) && self.other_health_deductible == Some(DeductibleBand::Over)
    }
}

/// The named insured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Applicant {
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    #[serde(flatten)]
    pub health: HealthCoverage,
    pub medicaid_plan: String,
    pub wants_coordinated: Option<YesNo>,
}

impl Applicant {
    pub fn display_name(&self) -> String {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            "Named Insured".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// Identifier wrapper for household members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(pub String);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Refers to one person on the form: the named insured or a household member by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonRef {
    NamedInsured,
    Member(MemberId),
}

impl fmt::Display for PersonRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonRef::NamedInsured => f.write_str("named insured"),
            PersonRef::Member(id) => write!(f, "household member {id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Spouse,
    Child,
    Parent,
    Sibling,
    OtherRelative,
}

impl Relationship {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Spouse => "Spouse",
            Self::Child => "Child",
            Self::Parent => "Parent",
            Self::Sibling => "Sibling",
            Self::OtherRelative => "Other resident relative",
        }
    }
}

/// A resident relative of the named insured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseholdMember {
    pub id: MemberId,
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub relationship: Option<Relationship>,
    #[serde(flatten)]
    pub health: HealthCoverage,
    pub has_auto_policy: Option<YesNo>,
}

impl HouseholdMember {
    pub fn has_own_auto_policy(&self) -> bool {
        is_yes(self.has_auto_policy)
    }
}

/// Display name for the member at zero-based `index` of the household list.
pub(crate) fn member_display_name(member: &HouseholdMember, index: usize) -> String {
    let trimmed = member.name.trim();
    if trimmed.is_empty() {
        format!("Household member {}", index + 1)
    } else {
        trimmed.to_string()
    }
}
