#![doc(test(attr(deny(warnings))))]

//! Yen Tracker records yen-denominated expenses in a sheet-backed ledger,
//! turns AI receipt readings into confirmable entries and compares monthly
//! spend against a budget.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod receipt;
pub mod storage;
pub mod utils;

pub use crate::core::Tracker;
pub use errors::LedgerError;

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    utils::init_tracing();
    tracing::info!("yen_tracker tracing initialized");
}
