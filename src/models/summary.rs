use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::types::ProductId;

/// Total revenue of one product for a single pipeline run.
///
/// Every row produced by one run shares the same `processed_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRevenueSummary {
    /// Unique per output row.
    pub product_id: ProductId,
    /// Exact sum of the product's clean transaction amounts.
    pub total_revenue_usd: Decimal,
    /// When the run that produced this row started transforming.
    pub processed_at: DateTime<Utc>
}
