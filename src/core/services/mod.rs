pub mod budget_service;
pub mod entry_service;
pub mod receipt_service;
pub mod summary_service;

pub use budget_service::{BudgetReading, BudgetService, BudgetSource};
pub use entry_service::EntryService;
pub use receipt_service::ReceiptService;
pub use summary_service::SummaryService;

use crate::errors::{AnalyzerError, LedgerError, ParseFailure, StoreError, ValidationFailure};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Invalid(String),
}

impl ServiceError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            ServiceError::Ledger(err) => err.is_recoverable(),
            ServiceError::Invalid(_) => true,
        }
    }
}

impl From<ValidationFailure> for ServiceError {
    fn from(err: ValidationFailure) -> Self {
        ServiceError::Ledger(err.into())
    }
}

impl From<ParseFailure> for ServiceError {
    fn from(err: ParseFailure) -> Self {
        ServiceError::Ledger(err.into())
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::Ledger(err.into())
    }
}

impl From<AnalyzerError> for ServiceError {
    fn from(err: AnalyzerError) -> Self {
        ServiceError::Ledger(err.into())
    }
}
