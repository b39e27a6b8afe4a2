use log::warn;

use crate::distribution::Distribution;
use crate::error::{Error, Result};
use crate::table::{Table, Value};

fn bounds_of(table: &Table, row: usize, col: usize) -> Result<(f64, f64)> {
    let value = table.value(row, col);
    value
        .bounds()
        .ok_or_else(|| Error::NonNumeric(value.to_string()))
}

fn numeric_of(table: &Table, row: usize, col: usize) -> Result<f64> {
    let value = table.value(row, col);
    value
        .numeric_key()
        .ok_or_else(|| Error::NonNumeric(value.to_string()))
}

/// Residual-information loss of a generalized categorical column, in bits.
///
/// For every row whose transformed cell is a generalization set, each
/// original value covered by the set contributes `-p * log2(p)` with
/// `p = P(original value) / P(set value)`, the probabilities estimated on
/// the original and transformed tables independently. Rows whose
/// transformed cell is not a set contribute nothing.
///
/// Tables of different lengths yield 0 rather than an error.
pub fn entropy_loss(original: &Table, transformed: &Table, col: usize) -> Result<f64> {
    original.check_column(col)?;
    transformed.check_column(col)?;
    if original.n_rows() != transformed.n_rows() {
        warn!(
            "row count mismatch ({} vs {}), reporting zero entropy loss",
            original.n_rows(),
            transformed.n_rows()
        );
        return Ok(0.0);
    }
    if original.is_empty() {
        return Ok(0.0);
    }

    let original_dist = Distribution::from_table(original, col)?;
    let transformed_dist = Distribution::from_table(transformed, col)?;

    let mut loss = 0.0;
    for row in 0..transformed.n_rows() {
        let value = transformed.value(row, col);
        if let Value::Set(members) = value {
            let set_prob = transformed_dist.prob(value).unwrap_or(0.0);
            for member in members {
                let p = original_dist
                    .prob(&Value::Text(member.clone()))
                    .unwrap_or(0.0)
                    / set_prob;
                if p > 0.0 {
                    loss -= p * p.log2();
                }
            }
        }
    }
    Ok(loss)
}

/// Interval-based loss of generalized numeric columns.
///
/// Per targeted column, the transformed interval width is normalized by the
/// column's global range in the original table; rows whose interval did not
/// change contribute 0. The total is divided by `row_count * REPLICATES`.
///
/// Tables of different lengths yield 0 rather than an error.
pub fn interval_loss(original: &Table, transformed: &Table, cols: &[usize]) -> Result<f64> {
    original.check_columns(cols)?;
    transformed.check_columns(cols)?;
    if original.n_rows() != transformed.n_rows() {
        warn!(
            "row count mismatch ({} vs {}), reporting zero interval loss",
            original.n_rows(),
            transformed.n_rows()
        );
        return Ok(0.0);
    }
    let n = transformed.n_rows();
    if n == 0 {
        return Ok(0.0);
    }

    // One replicate of the column selection; the divisor is not the number
    // of targeted columns.
    const REPLICATES: f64 = 1.0;

    let mut total = 0.0;
    for &col in cols {
        let mut col_min = f64::INFINITY;
        let mut col_max = f64::NEG_INFINITY;
        for row in 0..n {
            let (lower, upper) = bounds_of(original, row, col)?;
            col_min = col_min.min(lower);
            col_max = col_max.max(upper);
        }
        for row in 0..n {
            let (lower_t, upper_t) = bounds_of(transformed, row, col)?;
            let (lower_o, upper_o) = bounds_of(original, row, col)?;
            if lower_o == lower_t && upper_o == upper_t {
                continue;
            }
            total += (upper_t - lower_t) / (col_max - col_min);
        }
    }
    Ok(total / (n as f64 * REPLICATES))
}

/// Euclidean loss: the mean, over rows, of the Euclidean distance between
/// the original and transformed values of the targeted columns, with
/// intervals reduced to their midpoint.
///
/// Tables of different lengths yield 0 rather than an error.
pub fn euclidean_loss(original: &Table, transformed: &Table, cols: &[usize]) -> Result<f64> {
    original.check_columns(cols)?;
    transformed.check_columns(cols)?;
    if original.n_rows() != transformed.n_rows() {
        warn!(
            "row count mismatch ({} vs {}), reporting zero euclidean loss",
            original.n_rows(),
            transformed.n_rows()
        );
        return Ok(0.0);
    }
    let n = original.n_rows();
    if n == 0 {
        return Ok(0.0);
    }

    let mut total = 0.0;
    for row in 0..n {
        let mut sum_of_squares = 0.0;
        for &col in cols {
            let x = numeric_of(original, row, col)?;
            let y = numeric_of(transformed, row, col)?;
            sum_of_squares += (x - y).powi(2);
        }
        total += sum_of_squares.sqrt();
    }
    Ok(total / n as f64)
}
