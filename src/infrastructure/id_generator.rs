use crate::domain::ports::{ClockRef, IdGenerator};
use std::sync::atomic::{AtomicU64, Ordering};

pub const ID_PREFIX: &str = "PO-";

/// Width of the zero-padded sequence suffix.
const SEQUENCE_WIDTH: usize = 5;
const SEQUENCE_MODULUS: u64 = 100_000;

/// Generates ids shaped `PO-{yyyyMMddHHmmss}{sequence}`, e.g. `PO-2025110312345600001`.
///
/// The sequence is owned by the instance and wraps at 100000, so ids are unique
/// as long as one generator hands out fewer than 100000 ids per second.
/// Uniqueness across generators or restarts relies on the store keying orders by id.
pub struct SequentialIdGenerator {
    clock: ClockRef,
    sequence: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(clock: ClockRef) -> Self {
        Self {
            clock,
            sequence: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate_id(&self) -> String {
        let timestamp = self.clock.now().format("%Y%m%d%H%M%S");
        let seq = (self.sequence.fetch_add(1, Ordering::Relaxed) + 1) % SEQUENCE_MODULUS;
        format!("{ID_PREFIX}{timestamp}{seq:0width$}", width = SEQUENCE_WIDTH)
    }
}
