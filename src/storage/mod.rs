mod errors;
mod sqlite_store;
#[cfg(test)]
mod tests;

use crate::models::ProductRevenueSummary;

pub use errors::LoadError;
pub use sqlite_store::SqliteStore;

/// A relational store holding one summary table per name.
pub trait SummaryStore {
    /// Replaces the whole table with `rows`, returning the number written.
    ///
    /// Either every row is written or the table keeps its previous contents.
    fn replace(&self, table_name: &str, rows: &[ProductRevenueSummary]) -> Result<usize, LoadError>;

    /// Reads the table back in the order the rows were written.
    fn read(&self, table_name: &str) -> Result<Vec<ProductRevenueSummary>, LoadError>;
}
