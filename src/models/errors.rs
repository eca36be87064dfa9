use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::CleanTransaction;
use crate::types::{AmountError, TransactionId};

/// A record that passed filtering could not be normalized or summed.
///
/// Apart from `Overflow`, filtering should make these unreachable: seeing one
/// means the filters and the coercion rules disagree.
#[derive(Debug, Error)]
pub enum CoercionError {
    #[error("Transaction [{transaction_id:?}] reached coercion with a missing value")]
    MissingValue {
        transaction_id: Option<TransactionId>
    },
    #[error("Transaction [{transaction_id}] has a non-numeric amount: {source}")]
    InvalidAmount {
        transaction_id: TransactionId,
        #[source]
        source: AmountError
    },
    #[error("Transaction [{transaction_id}] reached coercion with non-positive amount [{amount}]")]
    NonPositiveAmount {
        transaction_id: TransactionId,
        amount: Decimal
    },
    #[error("Transaction [{transaction_id}] has an invalid date [{value}]")]
    InvalidDate {
        transaction_id: TransactionId,
        value: String
    },
    #[error("Total revenue for product [{product_id}] overflowed at transaction [{transaction_id}]")]
    Overflow {
        product_id: String,
        transaction_id: TransactionId
    }
}

impl CoercionError {
    pub fn non_positive_amount(transaction_id: TransactionId, amount: Decimal) -> Self {
        Self::NonPositiveAmount { transaction_id, amount }
    }

    pub fn invalid_date(transaction_id: TransactionId, value: &str) -> Self {
        Self::InvalidDate { transaction_id, value: value.to_string() }
    }

    pub fn overflow(transaction: &CleanTransaction) -> Self {
        Self::Overflow {
            product_id: transaction.product_id.clone(),
            transaction_id: transaction.transaction_id
        }
    }
}
