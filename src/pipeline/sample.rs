use std::path::Path;

use csv::Writer;

use crate::models::RawTransaction;

const SAMPLE_ROWS: [(u64, &str, &str, Option<&str>, &str); 10] = [
    (1, "P101", "2024-09-01", Some("15.50"), "Gadget"),
    (2, "P102", "2024-09-01", Some("20.00"), "Food"),
    (3, "P101", "2024-09-02", Some("15.50"), "Gadget"),
    (4, "P103", "2024-09-02", Some("50.99"), "Service"),
    (5, "P102", "2024-09-03", Some("20.00"), "Food"),
    (6, "P104", "2024-09-03", Some("-10.00"), "Refund"),
    (7, "P101", "2024-09-04", None, "Gadget"),
    (8, "P103", "2024-09-04", Some("50.99"), "Service"),
    (9, "P105", "2024-09-05", Some("5.00"), "Book"),
    (10, "P102", "2024-09-05", Some("20.00"), "Food")
];

/// Ten sales rows including one refund and one row without an amount.
pub fn sample_transactions() -> Vec<RawTransaction> {
    SAMPLE_ROWS.iter()
        .map(|(transaction_id, product_id, date, amount, category)| RawTransaction {
            transaction_id: Some(*transaction_id),
            product_id: Some(product_id.to_string()),
            date: Some(date.to_string()),
            amount: amount.map(str::to_string),
            category: Some(category.to_string())
        })
        .collect()
}

/// Writes the sample transactions to `path` as CSV, returning the row count.
pub fn write_sample_data(path: &Path) -> Result<usize, csv::Error> {
    let mut writer = Writer::from_path(path)?;
    let records = sample_transactions();

    for record in &records {
        writer.serialize(record)?;
    }

    writer.flush()?;

    Ok(records.len())
}
