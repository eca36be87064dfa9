use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::errors::CoercionError;
use crate::types::{is_null_marker, parse_amount, parse_date, ProductId, TransactionId};

/// Represents a single row from the input CSV file.
///
/// Nothing is validated at this point: every cell except the transaction ID is
/// kept as raw text, and any cell may be missing.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawTransaction {
    pub transaction_id: Option<TransactionId>,
    pub product_id: Option<String>,
    pub date: Option<String>,
    pub amount: Option<String>,
    pub category: Option<String>
}

impl RawTransaction {
    /// Returns `true` when the amount cell carries a value.
    pub fn has_amount(&self) -> bool {
        has_value(&self.amount)
    }

    /// Returns `true` when every column carries a value.
    pub fn is_complete(&self) -> bool {
        self.transaction_id.is_some()
            && has_value(&self.product_id)
            && has_value(&self.date)
            && self.has_amount()
            && has_value(&self.category)
    }

    /// Returns `true` when the amount parses and is zero or negative.
    ///
    /// Unparsable amounts return `false`; they are rejected later by coercion.
    pub fn has_non_positive_amount(&self) -> bool {
        self.amount.as_deref()
            .and_then(|amount| parse_amount(amount).ok())
            .is_some_and(|amount| amount <= Decimal::ZERO)
    }
}

fn has_value(cell: &Option<String>) -> bool {
    cell.as_deref().is_some_and(|value| !is_null_marker(value))
}

fn present(cell: Option<String>) -> Option<String> {
    cell.filter(|value| !is_null_marker(value))
}

/// A transaction that passed filtering and type normalization.
///
/// `amount` is strictly positive and `date` is a valid calendar date. The
/// category must be present to get here but plays no part in aggregation, so
/// it is not carried.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanTransaction {
    pub transaction_id: TransactionId,
    pub product_id: ProductId,
    pub date: NaiveDate,
    pub amount: Decimal
}

impl TryFrom<RawTransaction> for CleanTransaction {
    type Error = CoercionError;

    fn try_from(raw: RawTransaction) -> Result<Self, Self::Error> {
        let RawTransaction { transaction_id, product_id, date, amount, category } = raw;

        let (Some(transaction_id), Some(product_id), Some(date), Some(amount), Some(_category)) =
            (transaction_id, present(product_id), present(date), present(amount), present(category)) else {
            return Err(CoercionError::MissingValue { transaction_id });
        };

        let amount = parse_amount(&amount)
            .map_err(|source| CoercionError::InvalidAmount { transaction_id, source })?;

        if amount <= Decimal::ZERO {
            return Err(CoercionError::non_positive_amount(transaction_id, amount));
        }

        let parsed_date = parse_date(&date)
            .ok_or_else(|| CoercionError::invalid_date(transaction_id, &date))?;

        Ok(Self {
            transaction_id,
            product_id,
            date: parsed_date,
            amount
        })
    }
}
