//! Payment methods in the processor's vocabulary.

use serde::{Deserialize, Serialize};

/// Payment method as understood by the payment processor.
///
/// `Unspecified` is a legitimate value on the wire: callers that cannot
/// map their own method onto this set send it instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Unspecified,
    Card,
    Sbp,
    CreditCard,
    InvestorMoney,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Unspecified => "UNSPECIFIED",
            PaymentMethod::Card => "CARD",
            PaymentMethod::Sbp => "SBP",
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::InvestorMoney => "INVESTOR_MONEY",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unspecified() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::Unspecified);
    }

    #[test]
    fn test_wire_names_match_display() {
        for method in [
            PaymentMethod::Unspecified,
            PaymentMethod::Card,
            PaymentMethod::Sbp,
            PaymentMethod::CreditCard,
            PaymentMethod::InvestorMoney,
        ] {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{method}\""));
        }
    }
}
