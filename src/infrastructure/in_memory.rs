use crate::domain::payment_order::PaymentOrder;
use crate::domain::ports::PaymentOrderStore;
use crate::error::{PaymentOrderError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    orders: HashMap<String, PaymentOrder>,
    /// end-to-end id -> payment order id
    end_to_end_ids: HashMap<String, String>,
}

/// A thread-safe in-memory store for payment orders.
///
/// Orders and the end-to-end id index live behind one `RwLock`, so the
/// uniqueness check and the write happen atomically.
/// Ideal for testing or deployments where persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryPaymentOrderStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryPaymentOrderStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders.
    pub async fn len(&self) -> usize {
        self.tables.read().await.orders.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl PaymentOrderStore for InMemoryPaymentOrderStore {
    async fn insert(&self, order: PaymentOrder) -> Result<PaymentOrder> {
        let mut tables = self.tables.write().await;
        let id = order.payment_order_id();

        if tables.orders.contains_key(id) {
            return Err(PaymentOrderError::PaymentOrderIdTaken(id.to_string()));
        }
        if let Some(token) = order.idempotency_token() {
            if tables.end_to_end_ids.contains_key(token) {
                return Err(PaymentOrderError::DuplicateOrder(token.to_string()));
            }
            tables
                .end_to_end_ids
                .insert(token.to_string(), id.to_string());
        }

        tables.orders.insert(id.to_string(), order.clone());
        tracing::debug!(payment_order_id = id, "Inserted payment order");
        Ok(order)
    }

    async fn save(&self, order: PaymentOrder) -> Result<PaymentOrder> {
        let mut tables = self.tables.write().await;
        let id = order.payment_order_id().to_string();

        if let Some(token) = order.idempotency_token() {
            match tables.end_to_end_ids.get(token).cloned() {
                Some(owner) if owner != id => {
                    return Err(PaymentOrderError::DuplicateOrder(token.to_string()));
                }
                Some(_) => {}
                None => {
                    tables.end_to_end_ids.insert(token.to_string(), id.clone());
                }
            }
        }

        tables.orders.insert(id, order.clone());
        tracing::debug!(payment_order_id = order.payment_order_id(), "Stored payment order");
        Ok(order)
    }

    async fn find_by_id(&self, payment_order_id: &str) -> Result<Option<PaymentOrder>> {
        let tables = self.tables.read().await;
        Ok(tables.orders.get(payment_order_id).cloned())
    }

    async fn exists_by_end_to_end_id(&self, end_to_end_id: &str) -> Result<bool> {
        let tables = self.tables.read().await;
        Ok(tables.end_to_end_ids.contains_key(end_to_end_id))
    }
}
