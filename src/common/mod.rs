//! Common utilities shared across the part writers.

pub mod unit;
pub mod xml;

pub use unit::{px_to_emu, px_to_emu_96};
