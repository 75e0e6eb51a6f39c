use crate::domain::payment_order::PaymentOrder;
use crate::domain::ports::PaymentOrderStore;
use crate::error::{PaymentOrderError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Options, WriteBatch};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for storing payment orders, keyed by payment order id.
pub const CF_PAYMENT_ORDERS: &str = "payment_orders";
/// Column Family mapping end-to-end ids to the payment order id that owns them.
pub const CF_END_TO_END_IDS: &str = "end_to_end_ids";

/// A persistent payment order store backed by RocksDB.
///
/// Orders are stored as JSON in one column family; a second column family
/// indexes end-to-end ids. An order and its index entry land in one
/// `WriteBatch`, and writes go through a single mutex so the uniqueness checks
/// and the batch are atomic within the process.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    write_lock: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_orders = ColumnFamilyDescriptor::new(CF_PAYMENT_ORDERS, Options::default());
        let cf_tokens = ColumnFamilyDescriptor::new(CF_END_TO_END_IDS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_orders, cf_tokens])?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            PaymentOrderError::InternalError(Box::new(std::io::Error::other(format!(
                "{} column family not found",
                name
            ))))
        })
    }

    /// Writes the order, and the token index entry when one is claimed, in one batch.
    fn write_order(&self, order: &PaymentOrder, claim_token: Option<&str>) -> Result<()> {
        let orders = self.cf(CF_PAYMENT_ORDERS)?;
        let tokens = self.cf(CF_END_TO_END_IDS)?;
        let id = order.payment_order_id();

        let mut batch = WriteBatch::default();
        batch.put_cf(orders, id.as_bytes(), serde_json::to_vec(order)?);
        if let Some(token) = claim_token {
            batch.put_cf(tokens, token.as_bytes(), id.as_bytes());
        }
        self.db.write(batch)?;
        Ok(())
    }
}

#[async_trait]
impl PaymentOrderStore for RocksDBStore {
    async fn insert(&self, order: PaymentOrder) -> Result<PaymentOrder> {
        let _guard = self.write_lock.lock().await;
        let orders = self.cf(CF_PAYMENT_ORDERS)?;
        let tokens = self.cf(CF_END_TO_END_IDS)?;
        let id = order.payment_order_id();

        if self.db.get_pinned_cf(orders, id.as_bytes())?.is_some() {
            return Err(PaymentOrderError::PaymentOrderIdTaken(id.to_string()));
        }
        let token = order.idempotency_token();
        if let Some(token) = token
            && self.db.get_pinned_cf(tokens, token.as_bytes())?.is_some()
        {
            return Err(PaymentOrderError::DuplicateOrder(token.to_string()));
        }

        self.write_order(&order, token)?;
        tracing::debug!(payment_order_id = id, "Inserted payment order into RocksDB");
        Ok(order)
    }

    async fn save(&self, order: PaymentOrder) -> Result<PaymentOrder> {
        let _guard = self.write_lock.lock().await;
        let tokens = self.cf(CF_END_TO_END_IDS)?;
        let id = order.payment_order_id();

        let mut claim_token = None;
        if let Some(token) = order.idempotency_token() {
            match self.db.get_cf(tokens, token.as_bytes())? {
                Some(owner) if owner != id.as_bytes() => {
                    return Err(PaymentOrderError::DuplicateOrder(token.to_string()));
                }
                Some(_) => {}
                None => claim_token = Some(token),
            }
        }

        self.write_order(&order, claim_token)?;

        tracing::debug!(payment_order_id = id, "Stored payment order in RocksDB");
        Ok(order)
    }

    async fn find_by_id(&self, payment_order_id: &str) -> Result<Option<PaymentOrder>> {
        let orders = self.cf(CF_PAYMENT_ORDERS)?;

        match self.db.get_cf(orders, payment_order_id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn exists_by_end_to_end_id(&self, end_to_end_id: &str) -> Result<bool> {
        let tokens = self.cf(CF_END_TO_END_IDS)?;
        // Just check if the key exists without copying the value
        let result = self.db.get_pinned_cf(tokens, end_to_end_id.as_bytes())?;
        Ok(result.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::AccountReference;
    use crate::domain::command::InitiatePaymentOrderCommand;
    use crate::domain::money::MonetaryAmount;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn order(id: &str, token: &str) -> PaymentOrder {
        let now = Utc.with_ymd_and_hms(2025, 11, 3, 9, 0, 0).unwrap();
        let command = InitiatePaymentOrderCommand {
            debtor: AccountReference::new("ES9121000418450200051332", "John Doe", None),
            creditor: AccountReference::new("ES7921000813610123456789", "Jane Smith", None),
            amount: MonetaryAmount::new(dec!(1500.50), "EUR"),
            execution_date: now.date_naive() + Duration::days(1),
            remittance_information: Some("Invoice".to_string()),
            end_to_end_id: Some(token.to_string()),
            priority: None,
        };
        PaymentOrder::create(id, command, now).unwrap()
    }

    #[tokio::test]
    async fn test_rocksdb_open_cf() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).expect("Failed to open RocksDB");

        assert!(store.db.cf_handle(CF_PAYMENT_ORDERS).is_some());
        assert!(store.db.cf_handle(CF_END_TO_END_IDS).is_some());
    }

    #[tokio::test]
    async fn test_rocksdb_round_trip_and_token_index() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).unwrap();

        let saved = store.save(order("PO-1", "E2E-001")).await.unwrap();
        let found = store.find_by_id("PO-1").await.unwrap().unwrap();
        assert_eq!(found, saved);

        assert!(store.exists_by_end_to_end_id("E2E-001").await.unwrap());
        assert!(store.find_by_id("PO-2").await.unwrap().is_none());

        let conflict = store.save(order("PO-2", "E2E-001")).await;
        assert!(matches!(conflict, Err(PaymentOrderError::DuplicateOrder(_))));
        assert!(store.find_by_id("PO-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rocksdb_insert_never_overwrites_an_id() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).unwrap();

        let first = store.insert(order("PO-1", "E2E-A")).await.unwrap();
        let result = store.insert(order("PO-1", "E2E-B")).await;
        assert!(matches!(result, Err(PaymentOrderError::PaymentOrderIdTaken(id)) if id == "PO-1"));

        assert_eq!(store.find_by_id("PO-1").await.unwrap().unwrap(), first);
        assert!(!store.exists_by_end_to_end_id("E2E-B").await.unwrap());

        let conflict = store.insert(order("PO-2", "E2E-A")).await;
        assert!(matches!(conflict, Err(PaymentOrderError::DuplicateOrder(_))));
        assert!(store.find_by_id("PO-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rocksdb_insert_writes_order_and_token_together() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).unwrap();
        store.insert(order("PO-1", "E2E-001")).await.unwrap();

        let tokens = store.cf(CF_END_TO_END_IDS).unwrap();
        let owner = store.db.get_cf(tokens, b"E2E-001").unwrap().unwrap();
        assert_eq!(owner, b"PO-1");
        assert!(store.find_by_id("PO-1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_rocksdb_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = RocksDBStore::open(dir.path()).unwrap();
            store.save(order("PO-1", "E2E-001")).await.unwrap();
        }

        let store = RocksDBStore::open(dir.path()).unwrap();
        assert!(store.find_by_id("PO-1").await.unwrap().is_some());
        assert!(store.exists_by_end_to_end_id("E2E-001").await.unwrap());
    }
}
