use super::account::AccountReference;
use super::money::MonetaryAmount;
use super::payment_order::PaymentPriority;
use chrono::NaiveDate;

/// A client's payment instruction, as handed to the initiation use case.
#[derive(Debug, Clone, PartialEq)]
pub struct InitiatePaymentOrderCommand {
    pub debtor: AccountReference,
    pub creditor: AccountReference,
    pub amount: MonetaryAmount,
    pub execution_date: NaiveDate,
    pub remittance_information: Option<String>,
    /// Client-supplied idempotency token. Blank values disable duplicate detection.
    pub end_to_end_id: Option<String>,
    pub priority: Option<PaymentPriority>,
}

impl InitiatePaymentOrderCommand {
    /// The end-to-end token, if it is present and not blank.
    pub fn idempotency_token(&self) -> Option<&str> {
        non_blank(self.end_to_end_id.as_deref())
    }
}

pub(crate) fn non_blank(token: Option<&str>) -> Option<&str> {
    token.filter(|t| !t.trim().is_empty())
}
