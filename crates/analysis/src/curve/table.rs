use std::io::Read;

use thiserror::Error;

use super::Sample;

/// Errors that can occur when reading samples from a CSV table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("row {row}: column {column} is not a number: {value:?}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads an `(x, y)` sample per row from two named columns of a CSV table.
///
/// Rows where either cell is blank are skipped. Samples come back in file
/// order; sorting is left to the caller.
///
/// # Errors
///
/// Returns an error if a column is missing, a non-blank cell is not a
/// number, or the CSV itself is malformed.
pub fn read_samples<R: Read>(
    reader: R,
    x_column: &str,
    y_column: &str,
) -> Result<Vec<Sample>, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let position = |name: &str| {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
    };
    let x_index = position(x_column)?;
    let y_index = position(y_column)?;

    let mut samples = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let x_cell = record.get(x_index).unwrap_or_default();
        let y_cell = record.get(y_index).unwrap_or_default();

        if x_cell.is_empty() || y_cell.is_empty() {
            tracing::warn!(row, "skipping row with a blank cell");
            continue;
        }

        let parse = |cell: &str, column: &str| {
            cell.parse::<f64>().map_err(|_| TableError::InvalidNumber {
                row,
                column: column.to_string(),
                value: cell.to_string(),
            })
        };
        samples.push(Sample::new(parse(x_cell, x_column)?, parse(y_cell, y_column)?));
    }

    Ok(samples)
}
