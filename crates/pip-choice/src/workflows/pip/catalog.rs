use serde::{Deserialize, Serialize};
use std::fmt;

/// The six PIP medical coverage levels a named insured may choose from.
///
/// Encoded on the wire as the option number (1..=6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CoverageOption {
    Unlimited,
    UpTo500k,
    UpTo250k,
    UpTo250kWithExclusions,
    Medicaid50k,
    MedicareOptOut,
}

impl CoverageOption {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Unlimited,
            Self::UpTo500k,
            Self::UpTo250k,
            Self::UpTo250kWithExclusions,
            Self::Medicaid50k,
            Self::MedicareOptOut,
        ]
    }

    pub const fn number(self) -> u8 {
        match self {
            Self::Unlimited => 1,
            Self::UpTo500k => 2,
            Self::UpTo250k => 3,
            Self::UpTo250kWithExclusions => 4,
            Self::Medicaid50k => 5,
            Self::MedicareOptOut => 6,
        }
    }

    /// Options under which the insured may ask health insurance to pay first.
    pub const fn allows_coordination(self) -> bool {
        matches!(
            self,
            Self::UpTo500k | Self::UpTo250k | Self::UpTo250kWithExclusions
        )
    }

    pub fn details(self) -> &'static CoverageOptionDetails {
        &COVERAGE_OPTIONS[usize::from(self.number() - 1)]
    }
}

impl TryFrom<u8> for CoverageOption {
    type Error = UnknownCoverageOption;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ordered()
            .into_iter()
            .find(|option| option.number() == value)
            .ok_or(UnknownCoverageOption(value))
    }
}

impl From<CoverageOption> for u8 {
    fn from(option: CoverageOption) -> Self {
        option.number()
    }
}

impl fmt::Display for CoverageOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Option {}", self.number())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("coverage option must be between 1 and 6 (found {0})")]
pub struct UnknownCoverageOption(pub u8);

/// Relative premium cost of a coverage option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PremiumTier {
    Highest,
    Higher,
    Moderate,
    Lower,
    Low,
    Lowest,
}

impl PremiumTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Highest => "Highest premium",
            Self::Higher => "Higher premium",
            Self::Moderate => "Moderate premium",
            Self::Lower => "Lower premium",
            Self::Low => "Low premium",
            Self::Lowest => "Lowest premium",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverageOptionDetails {
    pub option: CoverageOption,
    pub limit: &'static str,
    pub description: &'static str,
    pub premium: PremiumTier,
}

static COVERAGE_OPTIONS: [CoverageOptionDetails; 6] = [
    CoverageOptionDetails {
        option: CoverageOption::Unlimited,
        limit: "Unlimited PIP medical coverage",
        description: "Lifetime allowable expenses for accident-related medical care with no dollar cap.",
        premium: PremiumTier::Highest,
    },
    CoverageOptionDetails {
        option: CoverageOption::UpTo500k,
        limit: "Up to $500,000 per person per accident",
        description: "Allowable expenses for each injured person are paid up to $500,000.",
        premium: PremiumTier::Higher,
    },
    CoverageOptionDetails {
        option: CoverageOption::UpTo250k,
        limit: "Up to $250,000 per person per accident",
        description: "Allowable expenses for each injured person are paid up to $250,000.",
        premium: PremiumTier::Moderate,
    },
    CoverageOptionDetails {
        option: CoverageOption::UpTo250kWithExclusions,
        limit: "Up to $250,000 with exclusions",
        description: "Up to $250,000 per person, and people with Qualified Health Coverage may be excluded from PIP medical coverage entirely.",
        premium: PremiumTier::Lower,
    },
    CoverageOptionDetails {
        option: CoverageOption::Medicaid50k,
        limit: "Up to $50,000 per person per accident",
        description: "Available when the named insured is enrolled in Medicaid and everyone else in the household has other qualifying coverage.",
        premium: PremiumTier::Low,
    },
    CoverageOptionDetails {
        option: CoverageOption::MedicareOptOut,
        limit: "Opt out of PIP medical coverage",
        description: "Available when the named insured has Medicare Parts A and B and everyone else in the household has other qualifying coverage.",
        premium: PremiumTier::Lowest,
    },
];

pub fn coverage_options() -> &'static [CoverageOptionDetails] {
    &COVERAGE_OPTIONS
}

/// Regional Medicaid health plans offered in the questionnaire's plan picker.
pub const MEDICAID_PLANS: [&str; 10] = [
    "Aetna Better Health of Michigan",
    "Blue Cross Complete of Michigan",
    "HAP CareSource",
    "McLaren Health Plan",
    "Meridian",
    "Molina Healthcare of Michigan",
    "Priority Health",
    "UnitedHealthcare Community Plan",
    "Upper Peninsula Health Plan",
    "Other / Fee-for-service Medicaid",
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldTooltip {
    pub field: &'static str,
    pub text: &'static str,
}

pub const FIELD_TOOLTIPS: [FieldTooltip; 7] = [
    FieldTooltip {
        field: "has_medicare_a",
        text: "Medicare Part A is hospital insurance. Most people 65 or older have it automatically.",
    },
    FieldTooltip {
        field: "has_medicare_b",
        text: "Medicare Part B is medical insurance for doctor visits and outpatient care. Opting out of PIP medical requires both Part A and Part B.",
    },
    FieldTooltip {
        field: "has_medicaid",
        text: "Medicaid is state health coverage based on income. Medicare and Medicaid are different programs.",
    },
    FieldTooltip {
        field: "has_other_health",
        text: "Any other health insurance, such as an employer plan, a Marketplace plan, or a retiree plan.",
    },
    FieldTooltip {
        field: "other_health_is_qhc",
        text: "Qualified Health Coverage does not exclude or limit coverage for auto accident injuries. Your insurer can confirm this in writing.",
    },
    FieldTooltip {
        field: "other_health_deductible",
        text: "The individual deductible must be at or below the statutory limit for the plan to count as Qualified Health Coverage.",
    },
    FieldTooltip {
        field: "wants_coordinated",
        text: "Coordinated benefits make your health insurance pay first for accident injuries, which usually lowers your premium.",
    },
];

pub fn tooltip_for(field: &str) -> Option<&'static str> {
    FIELD_TOOLTIPS
        .iter()
        .find(|tooltip| tooltip.field == field)
        .map(|tooltip| tooltip.text)
}

/// Static reference data served to questionnaire front ends.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageCatalog {
    pub options: &'static [CoverageOptionDetails],
    pub medicaid_plans: &'static [&'static str],
    pub tooltips: &'static [FieldTooltip],
}

impl CoverageCatalog {
    pub fn standard() -> Self {
        Self {
            options: coverage_options(),
            medicaid_plans: &MEDICAID_PLANS,
            tooltips: &FIELD_TOOLTIPS,
        }
    }
}
