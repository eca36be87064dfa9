use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmountError {
    #[error("Amount error: Value is an empty string")]
    Empty,
    #[error("Amount error: Value [{value}] is not a decimal number: {reason}")]
    InvalidFormat {
        value: String,
        reason: String
    }
}
