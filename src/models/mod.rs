mod errors;
mod summary;
mod transaction;

pub use errors::CoercionError;
pub use summary::ProductRevenueSummary;
pub use transaction::{CleanTransaction, RawTransaction};

/// Column names every input file must carry.
pub const INPUT_COLUMNS: [&str; 5] = ["transaction_id", "product_id", "date", "amount", "category"];
