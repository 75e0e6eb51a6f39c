//! Domain layer: value objects, the payment order aggregate and the ports the
//! application layer depends on.

pub mod account;
pub mod command;
pub mod money;
pub mod payment_order;
pub mod ports;
