//! Adapter implementations of the version ports.

pub mod memory;
pub mod postgres;
