//! Payment method enumeration.
//!
//! A closed tag set with a fixed attribute table (display name,
//! discount percentage, processor name) rather than per-variant types.

use serde::{Deserialize, Serialize};

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Credit card. No discount.
    CreditCard,
    /// Debit card.
    DebitCard,
    /// Physical cash.
    Cash,
    /// Digital wallet (PayPal, Apple Pay).
    DigitalWallet,
    /// Direct bank transfer.
    BankTransfer,
}

impl PaymentMethod {
    /// All payment methods, in declaration order.
    pub fn all() -> [PaymentMethod; 5] {
        [
            PaymentMethod::CreditCard,
            PaymentMethod::DebitCard,
            PaymentMethod::Cash,
            PaymentMethod::DigitalWallet,
            PaymentMethod::BankTransfer,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::DebitCard => "DEBIT_CARD",
            PaymentMethod::Cash => "CASH",
            PaymentMethod::DigitalWallet => "DIGITAL_WALLET",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::DigitalWallet => "Digital Wallet",
            PaymentMethod::BankTransfer => "Bank Transfer",
        }
    }

    /// Discount percentage granted for paying with this method.
    pub fn discount_percentage(&self) -> f64 {
        match self {
            PaymentMethod::CreditCard => 0.0,
            PaymentMethod::DebitCard => 10.0,
            PaymentMethod::Cash => 5.0,
            PaymentMethod::DigitalWallet => 3.0,
            PaymentMethod::BankTransfer => 7.0,
        }
    }

    /// Name of the processor that would handle this method.
    pub fn processor_name(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Visa/MasterCard Processor",
            PaymentMethod::DebitCard => "Bank Debit Processor",
            PaymentMethod::Cash => "Cash Register",
            PaymentMethod::DigitalWallet => "PayPal/Apple Pay",
            PaymentMethod::BankTransfer => "ACH Processor",
        }
    }

    /// Static attribute dump for informational endpoints.
    pub fn info(&self) -> PaymentMethodInfo {
        PaymentMethodInfo {
            name: self.as_str(),
            display_name: self.display_name(),
            discount_percentage: self.discount_percentage(),
        }
    }
}

/// Payment method attributes for enumeration dumps. Serialize-only;
/// the table is fixed and never read back in.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentMethodInfo {
    /// Variant name (e.g., "CREDIT_CARD").
    pub name: &'static str,
    /// Display name (e.g., "Credit Card").
    pub display_name: &'static str,
    /// Discount percentage for this method.
    pub discount_percentage: f64,
}
