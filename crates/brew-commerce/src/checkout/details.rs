//! Form data collected at each checkout step.

use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// Where the order goes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub zip: String,
}

impl ShippingDetails {
    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// Format the address as a single line.
    pub fn one_line(&self) -> String {
        format!("{}, {} {}", self.street.trim(), self.city.trim(), self.zip.trim())
    }

    /// Names of required fields that are blank or malformed.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let fields = [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("email", &self.email),
            ("street address", &self.street),
            ("city", &self.city),
            ("zip code", &self.zip),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                missing.push(name);
            }
        }
        if !self.email.trim().is_empty() && !looks_like_email(&self.email) {
            missing.push("valid email");
        }
        missing
    }

    pub fn validate(&self) -> Result<(), CommerceError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::CheckoutIncomplete(missing.join(", ")))
        }
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
        None => false,
    }
}

/// Card details for settlement.
///
/// Only the last four digits survive past settlement.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PaymentDetails {
    pub card_number: String,
    /// `MM/YY`.
    pub expiry: String,
    pub cvc: String,
}

impl std::fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentDetails")
            .field("card", &format!("**** {}", self.last4()))
            .finish_non_exhaustive()
    }
}

impl PaymentDetails {
    pub fn new(
        card_number: impl Into<String>,
        expiry: impl Into<String>,
        cvc: impl Into<String>,
    ) -> Self {
        Self {
            card_number: card_number.into(),
            expiry: expiry.into(),
            cvc: cvc.into(),
        }
    }

    fn card_digits(&self) -> String {
        self.card_number
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect()
    }

    /// Last four digits of the card number.
    pub fn last4(&self) -> String {
        let digits: Vec<char> = self.card_digits().chars().collect();
        let start = digits.len().saturating_sub(4);
        digits[start..].iter().collect()
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        let digits = self.card_digits();
        if !(12..=19).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
            missing.push("card number");
        }
        if !valid_expiry(self.expiry.trim()) {
            missing.push("expiry (MM/YY)");
        }
        let cvc = self.cvc.trim();
        if !(3..=4).contains(&cvc.len()) || !cvc.chars().all(|c| c.is_ascii_digit()) {
            missing.push("CVC");
        }
        missing
    }

    pub fn validate(&self) -> Result<(), CommerceError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::CheckoutIncomplete(missing.join(", ")))
        }
    }
}

fn valid_expiry(expiry: &str) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };
    let month_ok = month.len() == 2 && matches!(month.parse::<u8>(), Ok(1..=12));
    let year_ok = year.len() == 2 && year.chars().all(|c| c.is_ascii_digit());
    month_ok && year_ok
}
