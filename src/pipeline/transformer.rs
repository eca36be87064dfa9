use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};

use crate::models::{CleanTransaction, CoercionError, ProductRevenueSummary, RawTransaction};

/// Row counts observed at each transform step.
///
/// `clean_rows == input_rows - dropped_missing_values - dropped_non_positive_amounts`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformReport {
    pub input_rows: usize,
    /// Rows with a missing amount or any other missing column.
    pub dropped_missing_values: usize,
    /// Rows whose amount is zero or negative.
    pub dropped_non_positive_amounts: usize,
    pub clean_rows: usize,
    /// Distinct products in the summary.
    pub products: usize,
    /// Earliest and latest date among clean rows.
    pub date_range: Option<(NaiveDate, NaiveDate)>
}

/// Output of a transform: the per-product summary plus what was dropped on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    pub summaries: Vec<ProductRevenueSummary>,
    pub report: TransformReport
}

/// Cleans raw transactions and aggregates them into per-product revenue.
pub struct Transformer;

impl Transformer {
    /// Transforms `records`, stamping every row with the current time.
    pub fn transform(records: Vec<RawTransaction>) -> Result<Transformed, CoercionError> {
        //NOTE: Microsecond precision is what survives a round trip through the store unchanged
        Self::transform_at(records, Utc::now().trunc_subsecs(6))
    }

    /// Transforms `records`, stamping every row with `processed_at`.
    ///
    /// Steps run in a fixed order: missing-value filter, sign filter, type
    /// normalization, grouping by product in first-appearance order.
    ///
    /// # Errors
    /// Returns `CoercionError` if a record that passed both filters has a
    /// non-numeric amount or an invalid date, or if a product total overflows.
    pub fn transform_at(records: Vec<RawTransaction>, processed_at: DateTime<Utc>) -> Result<Transformed, CoercionError> {
        let input_rows = records.len();

        let complete: Vec<RawTransaction> = records.into_iter()
            .filter(RawTransaction::is_complete)
            .collect();
        let dropped_missing_values = input_rows - complete.len();

        let positive: Vec<RawTransaction> = complete.into_iter()
            .filter(|record| !record.has_non_positive_amount())
            .collect();
        let dropped_non_positive_amounts = input_rows - dropped_missing_values - positive.len();

        let clean = positive.into_iter()
            .map(CleanTransaction::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let summaries = aggregate(&clean, processed_at)?;

        let report = TransformReport {
            input_rows,
            dropped_missing_values,
            dropped_non_positive_amounts,
            clean_rows: clean.len(),
            products: summaries.len(),
            date_range: date_range(&clean)
        };

        Ok(Transformed { summaries, report })
    }
}

fn aggregate(clean: &[CleanTransaction], processed_at: DateTime<Utc>) -> Result<Vec<ProductRevenueSummary>, CoercionError> {
    let mut positions = HashMap::<&str, usize>::new();
    let mut summaries = Vec::<ProductRevenueSummary>::new();

    for transaction in clean {
        match positions.get(transaction.product_id.as_str()) {
            Some(&position) => {
                let summary = &mut summaries[position];

                summary.total_revenue_usd = summary.total_revenue_usd.checked_add(transaction.amount)
                    .ok_or_else(|| CoercionError::overflow(transaction))?;
            }
            None => {
                positions.insert(&transaction.product_id, summaries.len());
                summaries.push(ProductRevenueSummary {
                    product_id: transaction.product_id.clone(),
                    total_revenue_usd: transaction.amount,
                    processed_at
                });
            }
        }
    }

    Ok(summaries)
}

fn date_range(clean: &[CleanTransaction]) -> Option<(NaiveDate, NaiveDate)> {
    let first = clean.iter().map(|transaction| transaction.date).min()?;
    let last = clean.iter().map(|transaction| transaction.date).max()?;

    Some((first, last))
}
