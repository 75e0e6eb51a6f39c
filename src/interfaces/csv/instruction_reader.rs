use crate::domain::account::AccountReference;
use crate::domain::command::InitiatePaymentOrderCommand;
use crate::domain::money::MonetaryAmount;
use crate::domain::payment_order::PaymentPriority;
use crate::error::{PaymentOrderError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::str::FromStr;

/// One CSV row of a payment instruction file.
///
/// Empty cells deserialize to `None`; field-level validation is left to the
/// use case so that every problem surfaces with its domain error kind.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct InstructionRecord {
    pub debtor_iban: Option<String>,
    pub debtor_name: Option<String>,
    pub debtor_bic: Option<String>,
    pub creditor_iban: Option<String>,
    pub creditor_name: Option<String>,
    pub creditor_bic: Option<String>,
    pub amount: Option<String>,
    pub currency: Option<String>,
    pub execution_date: NaiveDate,
    pub remittance_information: Option<String>,
    pub end_to_end_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_priority")]
    pub priority: Option<PaymentPriority>,
}

/// Accepts priorities in any letter case, like the command line does.
fn deserialize_priority<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<PaymentPriority>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.filter(|value| !value.trim().is_empty())
        .map(|value| value.parse().map_err(serde::de::Error::custom))
        .transpose()
}

impl TryFrom<InstructionRecord> for InitiatePaymentOrderCommand {
    type Error = PaymentOrderError;

    fn try_from(record: InstructionRecord) -> Result<Self> {
        let text = record.amount.ok_or_else(|| {
            PaymentOrderError::InvalidAmount("Amount value is required".to_string())
        })?;
        // Parsed from text so the scale written by the client is kept.
        let value = Decimal::from_str(&text).map_err(|_| {
            PaymentOrderError::InvalidAmount(format!("Invalid amount value: {}", text))
        })?;

        Ok(Self {
            debtor: AccountReference::new(
                record.debtor_iban.unwrap_or_default(),
                record.debtor_name.unwrap_or_default(),
                record.debtor_bic,
            ),
            creditor: AccountReference::new(
                record.creditor_iban.unwrap_or_default(),
                record.creditor_name.unwrap_or_default(),
                record.creditor_bic,
            ),
            amount: MonetaryAmount::new(value, record.currency.unwrap_or_default()),
            execution_date: record.execution_date,
            remittance_information: record.remittance_information,
            end_to_end_id: record.end_to_end_id,
            priority: record.priority,
        })
    }
}

/// Reads payment instructions from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over
/// `Result<InitiatePaymentOrderCommand>`. It trims whitespace and accepts
/// rows with missing trailing fields.
pub struct InstructionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> InstructionReader<R> {
    /// Creates a new `InstructionReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and converts instructions.
    pub fn commands(self) -> impl Iterator<Item = Result<InitiatePaymentOrderCommand>> {
        self.reader
            .into_deserialize::<InstructionRecord>()
            .map(|result| -> Result<InitiatePaymentOrderCommand> { result?.try_into() })
    }
}
