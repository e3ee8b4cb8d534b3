//! The expense ledger, its sheet schema, and monthly aggregation.

pub mod aggregate;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod schema;

pub use aggregate::{aggregate, aggregate_records, MonthlyAggregate, MonthlyTotal};
pub use ledger::{Ledger, LoadReport, SkippedRecord};
pub use schema::{Column, RowSchema};
