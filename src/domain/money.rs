use crate::error::{PaymentOrderError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest value a payment order may move.
pub const MINIMUM_VALUE: Decimal = dec!(0.01);

// Active ISO 4217 alphabetic codes, grouped by number of minor units.
// XTS (testing) and XXX (no currency) are registered but never valid for a payment.
const ZERO_MINOR_UNITS: &[&str] = &[
    "BIF", "CLP", "DJF", "GNF", "ISK", "JPY", "KMF", "KRW", "PYG", "RWF", "UGX", "UYI", "VND",
    "VUV", "XAF", "XOF", "XPF",
];

const THREE_MINOR_UNITS: &[&str] = &["BHD", "IQD", "JOD", "KWD", "LYD", "OMR", "TND"];

const FOUR_MINOR_UNITS: &[&str] = &["CLF", "UYW"];

const TWO_MINOR_UNITS: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN", "BAM", "BBD", "BDT",
    "BGN", "BMD", "BND", "BOB", "BOV", "BRL", "BSD", "BTN", "BWP", "BYN", "BZD", "CAD", "CDF",
    "CHE", "CHF", "CHW", "CNY", "COP", "COU", "CRC", "CUP", "CVE", "CZK", "DKK", "DOP", "DZD",
    "EGP", "ERN", "ETB", "EUR", "FJD", "FKP", "GBP", "GEL", "GHS", "GIP", "GMD", "GTQ", "GYD",
    "HKD", "HNL", "HTG", "HUF", "IDR", "ILS", "INR", "IRR", "JMD", "KES", "KGS", "KHR", "KPW",
    "KYD", "KZT", "LAK", "LBP", "LKR", "LRD", "LSL", "MAD", "MDL", "MGA", "MKD", "MMK", "MNT",
    "MOP", "MRU", "MUR", "MVR", "MWK", "MXN", "MXV", "MYR", "MZN", "NAD", "NGN", "NIO", "NOK",
    "NPR", "NZD", "PAB", "PEN", "PGK", "PHP", "PKR", "PLN", "QAR", "RON", "RSD", "RUB", "SAR",
    "SBD", "SCR", "SDG", "SEK", "SGD", "SHP", "SLE", "SOS", "SRD", "SSP", "STN", "SVC", "SYP",
    "SZL", "THB", "TJS", "TMT", "TOP", "TRY", "TTD", "TWD", "TZS", "UAH", "USD", "USN", "UYU",
    "UZS", "VED", "VES", "WST", "XCD", "XCG", "YER", "ZAR", "ZMW", "ZWG",
];

// Precious metals and supranational units: registered, no minor unit.
const NO_MINOR_UNITS: &[&str] = &[
    "XAG", "XAU", "XBA", "XBB", "XBC", "XBD", "XDR", "XPD", "XPT", "XSU", "XUA",
];

/// Returns whether `code` is a recognized ISO 4217 alphabetic currency code.
///
/// Codes are matched exactly, so lower-case input is not recognized.
pub fn is_recognized_currency(code: &str) -> bool {
    minor_units(code).is_some() || NO_MINOR_UNITS.contains(&code)
}

/// Number of decimal places the currency is quoted in, if it defines one.
pub fn minor_units(code: &str) -> Option<u32> {
    if TWO_MINOR_UNITS.contains(&code) {
        Some(2)
    } else if ZERO_MINOR_UNITS.contains(&code) {
        Some(0)
    } else if THREE_MINOR_UNITS.contains(&code) {
        Some(3)
    } else if FOUR_MINOR_UNITS.contains(&code) {
        Some(4)
    } else {
        None
    }
}

/// A decimal value in a given ISO 4217 currency.
///
/// Construction does not validate; see [`validate_amount`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonetaryAmount {
    value: Decimal,
    currency: String,
}

impl MonetaryAmount {
    pub fn new(value: Decimal, currency: impl Into<String>) -> Self {
        Self {
            value,
            currency: currency.into(),
        }
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}

impl fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}

/// Checks the amount is at least [`MINIMUM_VALUE`] and carries a recognized currency.
pub fn validate_amount(amount: &MonetaryAmount) -> Result<()> {
    if amount.value < MINIMUM_VALUE {
        let reason = format!("Amount must be at least {MINIMUM_VALUE}");
        return Err(PaymentOrderError::InvalidAmount(reason));
    }

    if amount.currency.trim().is_empty() {
        return Err(PaymentOrderError::InvalidAmount("Currency is required".to_string()));
    }

    if !is_recognized_currency(&amount.currency) {
        return Err(PaymentOrderError::InvalidAmount(format!(
            "Invalid ISO 4217 currency code: {}",
            amount.currency
        )));
    }

    Ok(())
}
