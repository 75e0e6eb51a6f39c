use crate::domain::account::validate_account_reference;
use crate::domain::command::InitiatePaymentOrderCommand;
use crate::domain::money::validate_amount;
use crate::domain::payment_order::{PaymentOrder, PaymentOrderStatus};
use crate::domain::ports::{ClockRef, IdGeneratorBox, PaymentOrderStoreBox};
use crate::error::{PaymentOrderError, Result};
use tracing::{debug, info, warn};

/// Upper bound on ids tried for one order when the store reports the id as taken.
const MAX_ID_ATTEMPTS: usize = 100_000;

/// Use cases for initiating payment orders and following their lifecycle.
///
/// `PaymentOrderService` owns its store, id generator and clock. It holds no
/// other mutable state, so it can be shared behind an `Arc` by concurrent tasks.
///
/// Duplicate detection is strict: the pre-check on the end-to-end id rejects
/// resubmissions early, and the store rejects a conflicting `save` for the case
/// where two requests with the same token race past the pre-check.
///
/// New orders are inserted, never upserted. An id already held by another
/// order (e.g. one written by an earlier process in the same second) is
/// skipped and a fresh id is drawn.
pub struct PaymentOrderService {
    store: PaymentOrderStoreBox,
    id_generator: IdGeneratorBox,
    clock: ClockRef,
}

impl PaymentOrderService {
    /// Creates a new `PaymentOrderService` instance.
    ///
    /// # Arguments
    ///
    /// * `store` - The payment order store.
    /// * `id_generator` - Source of new payment order ids.
    /// * `clock` - Supplies creation and update timestamps.
    pub fn new(store: PaymentOrderStoreBox, id_generator: IdGeneratorBox, clock: ClockRef) -> Self {
        Self {
            store,
            id_generator,
            clock,
        }
    }

    /// Validates, deduplicates and persists a new payment order.
    ///
    /// Returns the order as stored. Nothing is persisted unless every check passes.
    pub async fn initiate(&self, command: InitiatePaymentOrderCommand) -> Result<PaymentOrder> {
        info!(
            debtor_iban = command.debtor.identification(),
            creditor_iban = command.creditor.identification(),
            amount = %command.amount,
            "Initiating payment order"
        );

        validate_account_reference(&command.debtor)?;
        validate_account_reference(&command.creditor)?;
        validate_amount(&command.amount)?;

        self.check_for_duplicates(command.idempotency_token()).await?;

        let now = self.clock.now();
        let mut attempts = 0;
        loop {
            attempts += 1;
            let payment_order_id = self.id_generator.generate_id();
            let order = PaymentOrder::create(payment_order_id, command.clone(), now)?;

            match self.store.insert(order).await {
                Ok(saved) => {
                    info!(
                        payment_order_id = saved.payment_order_id(),
                        "Payment order created successfully"
                    );
                    return Ok(saved);
                }
                Err(PaymentOrderError::PaymentOrderIdTaken(id)) if attempts < MAX_ID_ATTEMPTS => {
                    debug!(payment_order_id = %id, "Payment order id taken, drawing another");
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub async fn retrieve(&self, payment_order_id: &str) -> Result<PaymentOrder> {
        info!(payment_order_id, "Retrieving payment order");
        let order = self.find(payment_order_id).await?;
        info!(
            payment_order_id,
            status = %order.status(),
            "Payment order found"
        );
        Ok(order)
    }

    /// Same lookup as [`retrieve`](Self::retrieve); callers project the status fields.
    pub async fn retrieve_status(&self, payment_order_id: &str) -> Result<PaymentOrder> {
        info!(payment_order_id, "Retrieving payment order status");
        let order = self.find(payment_order_id).await?;
        info!(
            payment_order_id,
            status = %order.status(),
            "Payment order status retrieved"
        );
        Ok(order)
    }

    /// Records a status change reported by an external collaborator.
    ///
    /// Concurrent updates to the same order are last-writer-wins at the store.
    pub async fn update_status(
        &self,
        payment_order_id: &str,
        next: PaymentOrderStatus,
        reason: Option<String>,
    ) -> Result<PaymentOrder> {
        let current = self.find(payment_order_id).await?;
        let updated = current.transition(next, reason, self.clock.now())?;
        let saved = self.store.save(updated).await?;
        info!(
            payment_order_id,
            from = %current.status(),
            to = %saved.status(),
            "Payment order status updated"
        );
        Ok(saved)
    }

    async fn find(&self, payment_order_id: &str) -> Result<PaymentOrder> {
        self.store
            .find_by_id(payment_order_id)
            .await?
            .ok_or_else(|| PaymentOrderError::OrderNotFound(payment_order_id.to_string()))
    }

    async fn check_for_duplicates(&self, token: Option<&str>) -> Result<()> {
        let Some(token) = token else {
            return Ok(());
        };

        if self.store.exists_by_end_to_end_id(token).await? {
            warn!(end_to_end_id = token, "Duplicate payment order rejected");
            return Err(PaymentOrderError::DuplicateOrder(token.to_string()));
        }
        Ok(())
    }
}
