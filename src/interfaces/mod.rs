//! Presentation adapters that translate external formats into use case calls.

pub mod csv;
