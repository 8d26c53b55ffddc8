// Text codec: "1,2; 3,4" -> Grid -> "1\t2\n3\t4"

use crate::error::MatrixError;
use crate::grid::Grid;

/// Row separators. Wider than the `;`/`,` input grammar on purpose: newline
/// rows and tab values (below) let rendered output be read back.
const ROW_SEPARATORS: [char; 2] = [';', '\n'];
const VALUE_SEPARATOR: char = ',';
/// Used when a row has no `,` (rendered output).
const FALLBACK_VALUE_SEPARATOR: char = '\t';

/// Parse a single numeric token.
///
/// Accepts decimal literals with optional sign, fraction and exponent, and the
/// infinities. Rejects empty tokens and NaN.
pub fn parse_number(token: &str) -> Option<f64> {
    if token.is_empty() {
        return None;
    }
    match token.parse::<f64>() {
        Ok(n) if !n.is_nan() => Some(n),
        _ => None,
    }
}

/// Decode delimited text into a rectangular grid.
///
/// Validation order is fail-fast: empty input, then row count, then each row
/// in turn (numbers before column count).
pub fn decode(
    text: &str,
    expected_rows: Option<usize>,
    expected_cols: Option<usize>,
) -> Result<Grid, MatrixError> {
    if text.trim().is_empty() {
        return Err(MatrixError::EmptyInput);
    }

    let rows: Vec<&str> = text
        .split(&ROW_SEPARATORS[..])
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .collect();

    if let Some(expected) = expected_rows {
        if rows.len() != expected {
            return Err(MatrixError::RowCountMismatch { expected, found: rows.len() });
        }
    }
    if rows.is_empty() {
        return Err(MatrixError::EmptyInput);
    }

    let mut data = Vec::new();
    let mut width: Option<usize> = None;

    for (i, row) in rows.iter().enumerate() {
        let row_num = i + 1;
        let values = parse_row(row, row_num)?;

        match (expected_cols, width) {
            (Some(expected), _) if values.len() != expected => {
                return Err(MatrixError::ColCountMismatch {
                    row: row_num,
                    expected,
                    found: values.len(),
                });
            }
            (None, Some(first)) if values.len() != first => {
                return Err(MatrixError::RaggedRow {
                    row: row_num,
                    expected: first,
                    found: values.len(),
                });
            }
            _ => {}
        }

        width.get_or_insert(values.len());
        data.extend(values);
    }

    let cols = width.unwrap_or(0);
    log::trace!("decoded {}x{} grid", rows.len(), cols);

    // Every row was checked against `cols` above
    Grid::from_flat(rows.len(), cols, data).ok_or(MatrixError::EmptyInput)
}

fn parse_row(row: &str, row_num: usize) -> Result<Vec<f64>, MatrixError> {
    let separator = if row.contains(VALUE_SEPARATOR) {
        VALUE_SEPARATOR
    } else {
        FALLBACK_VALUE_SEPARATOR
    };

    row.split(separator)
        .map(str::trim)
        .map(|token| {
            parse_number(token).ok_or_else(|| MatrixError::InvalidNumber {
                row: row_num,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Render a grid as tab-separated values, one row per line.
pub fn encode(grid: &Grid) -> String {
    grid.iter_rows()
        .map(|row| {
            row.iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
