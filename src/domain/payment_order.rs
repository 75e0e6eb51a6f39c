use super::account::{AccountReference, validate_account_reference};
use super::command::{InitiatePaymentOrderCommand, non_blank};
use super::money::{MonetaryAmount, validate_amount};
use crate::error::{PaymentOrderError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a payment order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentOrderStatus {
    /// Received, awaiting processing.
    Pending,
    /// Being executed.
    Processing,
    Completed,
    Failed,
    /// Rejected by the system or the bank.
    Rejected,
    /// Cancelled by the client.
    Cancelled,
}

impl PaymentOrderStatus {
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Processing,
        Self::Completed,
        Self::Failed,
        Self::Rejected,
        Self::Cancelled,
    ];

    /// Statuses reachable from `self` in a single step.
    pub fn allowed_transitions(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Processing, Self::Rejected, Self::Cancelled],
            Self::Processing => &[Self::Completed, Self::Failed],
            Self::Completed | Self::Failed | Self::Rejected | Self::Cancelled => &[],
        }
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Processing => "PROCESSING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for PaymentOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentOrderStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown payment order status: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentPriority {
    #[default]
    Normal,
    High,
    Urgent,
}

impl PaymentPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }
}

impl fmt::Display for PaymentPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentPriority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        [Self::Normal, Self::High, Self::Urgent]
            .into_iter()
            .find(|priority| priority.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown payment priority: {}", s))
    }
}

/// The payment order aggregate.
///
/// Values are never mutated after construction. A status change produces a
/// successor through [`PaymentOrder::transition`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOrder {
    payment_order_id: String,
    debtor: AccountReference,
    creditor: AccountReference,
    amount: MonetaryAmount,
    execution_date: NaiveDate,
    remittance_information: Option<String>,
    end_to_end_id: Option<String>,
    priority: PaymentPriority,
    status: PaymentOrderStatus,
    status_reason: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PaymentOrder {
    /// Builds a new order in `PENDING` status.
    ///
    /// Accounts and amount are validated first, then the aggregate rules
    /// (distinct parties, positive amount, execution date not in the past).
    /// The first violation is returned.
    pub fn create(
        payment_order_id: impl Into<String>,
        command: InitiatePaymentOrderCommand,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        validate_account_reference(&command.debtor)?;
        validate_account_reference(&command.creditor)?;
        validate_amount(&command.amount)?;

        if command.debtor == command.creditor {
            return Err(PaymentOrderError::SameParty);
        }

        if command.amount.value() <= Decimal::ZERO {
            return Err(PaymentOrderError::NonPositiveAmount);
        }

        let today = now.date_naive();
        if command.execution_date < today {
            return Err(PaymentOrderError::PastExecutionDate {
                execution_date: command.execution_date,
                today,
            });
        }

        Ok(Self {
            payment_order_id: payment_order_id.into(),
            debtor: command.debtor,
            creditor: command.creditor,
            amount: command.amount,
            execution_date: command.execution_date,
            remittance_information: command.remittance_information,
            end_to_end_id: command.end_to_end_id,
            priority: command.priority.unwrap_or_default(),
            status: PaymentOrderStatus::Pending,
            status_reason: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns the successor of this order in `next` status.
    ///
    /// Fails with `InvalidTransition` if the move is not in the transition table.
    pub fn transition(
        &self,
        next: PaymentOrderStatus,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        if !self.status.can_transition_to(next) {
            return Err(PaymentOrderError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }

        Ok(Self {
            status: next,
            status_reason: reason,
            updated_at: now,
            ..self.clone()
        })
    }

    pub fn payment_order_id(&self) -> &str {
        &self.payment_order_id
    }

    pub fn debtor(&self) -> &AccountReference {
        &self.debtor
    }

    pub fn creditor(&self) -> &AccountReference {
        &self.creditor
    }

    pub fn amount(&self) -> &MonetaryAmount {
        &self.amount
    }

    pub fn execution_date(&self) -> NaiveDate {
        self.execution_date
    }

    pub fn remittance_information(&self) -> Option<&str> {
        self.remittance_information.as_deref()
    }

    pub fn end_to_end_id(&self) -> Option<&str> {
        self.end_to_end_id.as_deref()
    }

    /// The end-to-end token used for duplicate detection, if not blank.
    pub fn idempotency_token(&self) -> Option<&str> {
        non_blank(self.end_to_end_id.as_deref())
    }

    pub fn priority(&self) -> PaymentPriority {
        self.priority
    }

    pub fn status(&self) -> PaymentOrderStatus {
        self.status
    }

    pub fn status_reason(&self) -> Option<&str> {
        self.status_reason.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
