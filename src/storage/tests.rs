use super::{LoadError, SqliteStore, SummaryStore};
use crate::models::ProductRevenueSummary;
use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;
use tempfile::tempdir;

fn processed_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 6, 12, 30, 0).single().unwrap_or_default()
}

fn create_summary(product_id: &str, total: &str) -> Result<ProductRevenueSummary> {
    Ok(ProductRevenueSummary {
        product_id: product_id.to_string(),
        total_revenue_usd: Decimal::from_str(total)?,
        processed_at: processed_at()
    })
}

#[test]
fn test_store_replace_then_read_returns_identical_rows() -> Result<()> {
    let directory = tempdir()?;
    let store = SqliteStore::new(directory.path().join("analytics.sqlite"));
    let rows = vec![
        create_summary("P101", "31.00")?,
        create_summary("P102", "60.00")?,
        create_summary("P103", "101.98")?,
    ];

    assert_eq!(store.replace("product_monthly_revenue", &rows)?, 3);

    let read_back = store.read("product_monthly_revenue")?;

    assert_eq!(read_back, rows);
    assert_eq!(read_back[0].total_revenue_usd, Decimal::from_str("31")?);
    assert_eq!(read_back[2].total_revenue_usd.to_string(), "101.98");

    Ok(())
}

#[test]
fn test_store_loading_twice_matches_loading_once() -> Result<()> {
    let directory = tempdir()?;
    let store = SqliteStore::new(directory.path().join("analytics.sqlite"));
    let rows = vec![create_summary("P101", "31.00")?, create_summary("P105", "5.00")?];

    store.replace("revenue", &rows)?;
    store.replace("revenue", &rows)?;

    assert_eq!(store.read("revenue")?, rows);

    Ok(())
}

#[test]
fn test_store_replace_discards_previous_contents() -> Result<()> {
    let directory = tempdir()?;
    let store = SqliteStore::new(directory.path().join("analytics.sqlite"));

    store.replace("revenue", &[create_summary("OLD1", "1.00")?, create_summary("OLD2", "2.00")?])?;

    let rows = vec![create_summary("P101", "31.00")?];
    store.replace("revenue", &rows)?;

    assert_eq!(store.read("revenue")?, rows);

    Ok(())
}

#[test]
fn test_store_writes_an_empty_table_for_an_empty_summary() -> Result<()> {
    let directory = tempdir()?;
    let store = SqliteStore::new(directory.path().join("analytics.sqlite"));

    assert_eq!(store.replace("revenue", &[])?, 0);
    assert!(store.read("revenue")?.is_empty());

    Ok(())
}

#[test]
fn test_store_failed_replace_keeps_previous_table() -> Result<()> {
    let directory = tempdir()?;
    let store = SqliteStore::new(directory.path().join("analytics.sqlite"));
    let previous = vec![create_summary("P101", "31.00")?];

    store.replace("revenue", &previous)?;

    // Duplicate product IDs violate the primary key halfway through the write.
    let duplicated = vec![create_summary("P102", "1.00")?, create_summary("P102", "2.00")?];
    let result = store.replace("revenue", &duplicated);

    assert!(matches!(result, Err(LoadError::Sqlite { .. })));
    assert_eq!(store.read("revenue")?, previous);

    Ok(())
}

#[test]
fn test_store_rejects_invalid_table_names() -> Result<()> {
    let directory = tempdir()?;
    let store = SqliteStore::new(directory.path().join("analytics.sqlite"));
    let rows = vec![create_summary("P101", "31.00")?];

    for table_name in ["", "1revenue", "revenue; DROP TABLE x", "rev\"enue", "rev-enue"] {
        assert!(matches!(store.replace(table_name, &rows), Err(LoadError::InvalidTableName { .. })));
    }

    Ok(())
}

#[test]
fn test_store_read_of_missing_table_fails() -> Result<()> {
    let directory = tempdir()?;
    let store = SqliteStore::new(directory.path().join("analytics.sqlite"));

    store.replace("revenue", &[])?;

    assert!(matches!(store.read("other_table"), Err(LoadError::Sqlite { .. })));

    Ok(())
}

#[test]
fn test_store_read_of_missing_database_does_not_create_it() -> Result<()> {
    let directory = tempdir()?;
    let location = directory.path().join("missing.sqlite");
    let store = SqliteStore::new(&location);

    assert!(matches!(store.read("revenue"), Err(LoadError::Sqlite { .. })));
    assert!(!location.exists());

    Ok(())
}

#[test]
fn test_store_creates_missing_parent_directories() -> Result<()> {
    let directory = tempdir()?;
    let location = directory.path().join("nested").join("analytics.sqlite");
    let store = SqliteStore::new(&location);

    store.replace("revenue", &[create_summary("P101", "31.00")?])?;

    assert!(location.exists());

    Ok(())
}

#[test]
fn test_store_reports_corrupt_revenue_values() -> Result<()> {
    let directory = tempdir()?;
    let location = directory.path().join("analytics.sqlite");
    let store = SqliteStore::new(&location);

    store.replace("revenue", &[create_summary("P101", "31.00")?])?;

    let connection = Connection::open(&location)?;
    connection.execute("UPDATE revenue SET total_revenue_usd = 'lots' WHERE product_id = 'P101'", [])?;
    drop(connection);

    assert!(matches!(store.read("revenue"), Err(LoadError::CorruptValue { column: "total_revenue_usd", .. })));

    Ok(())
}

#[test]
fn test_store_keeps_revenue_numeric_for_queries() -> Result<()> {
    let directory = tempdir()?;
    let location = directory.path().join("analytics.sqlite");
    let store = SqliteStore::new(&location);

    store.replace("revenue", &[
        create_summary("P101", "31.00")?,
        create_summary("P102", "60.00")?,
        create_summary("P103", "101.98")?,
        create_summary("P105", "5.00")?,
    ])?;

    let connection = Connection::open(&location)?;

    let text_cells: i64 = connection.query_row(
        "SELECT COUNT(*) FROM revenue WHERE typeof(total_revenue_usd) = 'text'", [], |row| row.get(0)
    )?;

    let mut statement = connection.prepare("SELECT product_id FROM revenue WHERE total_revenue_usd > 50 ORDER BY total_revenue_usd DESC")?;
    let above_fifty = statement
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    let total: f64 = connection.query_row("SELECT SUM(total_revenue_usd) FROM revenue", [], |row| row.get(0))?;

    assert_eq!(text_cells, 0);
    assert_eq!(above_fifty, vec!["P103".to_string(), "P102".to_string()]);
    assert!((total - 197.98).abs() < 1e-9);

    Ok(())
}

#[test]
fn test_store_reads_back_fractional_revenue_exactly() -> Result<()> {
    let directory = tempdir()?;
    let store = SqliteStore::new(directory.path().join("analytics.sqlite"));
    let rows = vec![
        create_summary("P101", "0.1")?,
        create_summary("P102", "0.30")?,
        create_summary("P103", "1234567890.12345")?,
    ];

    store.replace("revenue", &rows)?;

    assert_eq!(store.read("revenue")?, rows);

    Ok(())
}
