use serde::{Deserialize, Serialize};

/// Statutory amounts quoted in reasons and document descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub qhc_deductible_limit: u32,
    pub medicaid_limit: u32,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            qhc_deductible_limit: 6_000,
            medicaid_limit: 50_000,
        }
    }
}

/// Formats a whole-dollar amount with thousands separators, e.g. `$6,000`.
pub(crate) fn dollars(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}

#[cfg(test)]
mod tests {
    use super::dollars;

    #[test]
    fn dollars_groups_thousands() {
        assert_eq!(dollars(0), "$0");
        assert_eq!(dollars(950), "$950");
        assert_eq!(dollars(6_000), "$6,000");
        assert_eq!(dollars(1_250_000), "$1,250,000");
    }
}
