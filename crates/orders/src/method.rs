//! Payment methods as requested by the buyer.

use serde::{Deserialize, Serialize};

use payment::PaymentMethod as ProcessorMethod;

/// The payment method a caller asked for.
///
/// Parsing never fails: strings outside the known set are kept in `Other`
/// and forwarded to the processor as `UNSPECIFIED`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    Card,
    Sbp,
    CreditCard,
    InvestorMoney,
    Other(String),
}

impl PaymentMethod {
    /// Returns the wire name, or the raw text for `Other`.
    pub fn as_str(&self) -> &str {
        match self {
            PaymentMethod::Card => "CARD",
            PaymentMethod::Sbp => "SBP",
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::InvestorMoney => "INVESTOR_MONEY",
            PaymentMethod::Other(raw) => raw,
        }
    }

    /// Maps the method onto the payment processor's vocabulary.
    pub fn normalize(&self) -> ProcessorMethod {
        match self {
            PaymentMethod::Card => ProcessorMethod::Card,
            PaymentMethod::Sbp => ProcessorMethod::Sbp,
            PaymentMethod::CreditCard => ProcessorMethod::CreditCard,
            PaymentMethod::InvestorMoney => ProcessorMethod::InvestorMoney,
            PaymentMethod::Other(_) => ProcessorMethod::Unspecified,
        }
    }
}

impl From<&str> for PaymentMethod {
    fn from(value: &str) -> Self {
        const KNOWN: [(&str, PaymentMethod); 4] = [
            ("CARD", PaymentMethod::Card),
            ("SBP", PaymentMethod::Sbp),
            ("CREDIT_CARD", PaymentMethod::CreditCard),
            ("INVESTOR_MONEY", PaymentMethod::InvestorMoney),
        ];

        KNOWN
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(value.trim()))
            .map(|(_, method)| method)
            .unwrap_or_else(|| PaymentMethod::Other(value.to_string()))
    }
}

impl From<String> for PaymentMethod {
    fn from(value: String) -> Self {
        PaymentMethod::from(value.as_str())
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        method.as_str().to_string()
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
