use crate::error::{PaymentOrderError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Maximum number of characters allowed in an account holder name.
pub const MAX_NAME_LENGTH: usize = 140;

static IBAN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{2}[0-9]{2}[A-Z0-9]+$").expect("IBAN pattern is a valid regex")
});

static BIC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{6}[A-Z0-9]{2}([A-Z0-9]{3})?$").expect("BIC pattern is a valid regex")
});

/// Identifies one side of a payment: an IBAN, the holder's name and an optional BIC.
///
/// Two references are the same party only if all three fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountReference {
    identification: String,
    name: String,
    institution_code: Option<String>,
}

impl AccountReference {
    pub fn new(
        identification: impl Into<String>,
        name: impl Into<String>,
        institution_code: Option<String>,
    ) -> Self {
        Self {
            identification: identification.into(),
            name: name.into(),
            institution_code,
        }
    }

    /// The account identifier (IBAN).
    pub fn identification(&self) -> &str {
        &self.identification
    }

    /// The account holder name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The BIC/SWIFT code of the servicing institution.
    pub fn institution_code(&self) -> Option<&str> {
        self.institution_code.as_deref()
    }
}

/// Checks the IBAN shape, the holder name and, when present, the BIC shape.
pub fn validate_account_reference(account: &AccountReference) -> Result<()> {
    if account.identification.trim().is_empty() {
        return Err(invalid("Account identification is required"));
    }

    if !IBAN_PATTERN.is_match(&account.identification) {
        return Err(invalid("Invalid IBAN format"));
    }

    if account.name.trim().is_empty() {
        return Err(invalid("Account holder name is required"));
    }

    if account.name.chars().count() > MAX_NAME_LENGTH {
        return Err(invalid("Account holder name must not exceed 140 characters"));
    }

    if let Some(code) = &account.institution_code
        && !BIC_PATTERN.is_match(code)
    {
        return Err(invalid("Invalid BIC/SWIFT format"));
    }

    Ok(())
}

fn invalid(reason: &str) -> PaymentOrderError {
    PaymentOrderError::InvalidAccount(reason.to_string())
}
