mod errors;
mod loan_service;

pub use errors::{LoanError, Result};
pub use loan_service::{MAX_LOANS_PER_MEMBER, ServiceDependencies, borrow_book, return_book};
