use super::payment_order::PaymentOrder;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Persistence port for payment orders, keyed by payment order id.
///
/// Implementations must keep writes to different ids independent and must
/// reject a write whose non-blank end-to-end id already belongs to another
/// order with `PaymentOrderError::DuplicateOrder`. An order and its end-to-end
/// id index entry are written atomically.
#[async_trait]
pub trait PaymentOrderStore: Send + Sync {
    /// Stores a new order. Fails with `PaymentOrderError::PaymentOrderIdTaken`
    /// when an order is already stored under the same id; nothing is overwritten.
    async fn insert(&self, order: PaymentOrder) -> Result<PaymentOrder>;
    /// Inserts or replaces the order and returns the stored value.
    async fn save(&self, order: PaymentOrder) -> Result<PaymentOrder>;
    async fn find_by_id(&self, payment_order_id: &str) -> Result<Option<PaymentOrder>>;
    async fn exists_by_end_to_end_id(&self, end_to_end_id: &str) -> Result<bool>;
}

pub type PaymentOrderStoreBox = Box<dyn PaymentOrderStore>;

/// Source of payment order identifiers.
pub trait IdGenerator: Send + Sync {
    fn generate_id(&self) -> String;
}

pub type IdGeneratorBox = Box<dyn IdGenerator>;

/// Supplies the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub type ClockRef = Arc<dyn Clock>;
