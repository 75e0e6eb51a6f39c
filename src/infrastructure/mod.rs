//! Adapters for the domain ports: stores, id generation and clocks.

pub mod clock;
pub mod id_generator;
pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
