mod amount;
mod date;
mod errors;

pub use amount::{is_null_marker, parse_amount};
pub use date::parse_date;
pub use errors::AmountError;

pub type TransactionId = u64;
pub type ProductId = String;
