//! Application layer containing the payment order use cases.
//!
//! This module defines the `PaymentOrderService`, which sequences validation,
//! duplicate detection, id generation and persistence for new orders, and
//! serves lookups and status updates for existing ones.

pub mod service;
