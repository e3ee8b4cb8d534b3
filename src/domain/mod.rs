pub mod budget;
pub mod category;
pub mod common;
pub mod row;

pub use budget::{BudgetSetting, DEFAULT_MONTHLY_BUDGET};
pub use category::Category;
pub use common::YearMonth;
pub use row::{LedgerRow, RawRecord};
