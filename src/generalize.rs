use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::table::{Table, Value};

/// Replace every cell of a numeric column by the fixed-width closed
/// interval containing it: `x` becomes
/// `(floor(x / width) * width, floor(x / width) * width + width - 1)`.
///
/// The whole column is validated before the first cell is rewritten, so a
/// non-numeric cell leaves the table untouched.
pub fn discretize(table: &mut Table, col: usize, width: f64) -> Result<()> {
    table.check_column(col)?;
    if width <= 0.0 {
        return Err(Error::NonPositiveWidth(width));
    }
    let keys = (0..table.n_rows())
        .map(|row| {
            let value = table.value(row, col);
            value
                .numeric_key()
                .ok_or_else(|| Error::NonNumeric(value.to_string()))
        })
        .collect::<Result<Vec<f64>>>()?;
    for (row, key) in keys.into_iter().enumerate() {
        let lower = (key / width).floor() * width;
        table.set_value(row, col, Value::Interval(lower, lower + width - 1.0));
    }
    Ok(())
}

/// Replace, in each listed column, every text cell whose content appears in
/// `values` by the generalization set of `values`.
pub fn generalize_categorical(table: &mut Table, cols: &[usize], values: &[&str]) -> Result<()> {
    table.check_columns(cols)?;
    let members: BTreeSet<String> = values.iter().map(|v| v.to_string()).collect();
    for &col in cols {
        for row in 0..table.n_rows() {
            if let Value::Text(text) = table.value(row, col) {
                if members.contains(text) {
                    table.set_value(row, col, Value::Set(members.clone()));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_k_anonymity;

    #[test]
    fn test_discretize() {
        let mut table = Table::new(vec![
            vec![1.into(), 1.5.into()],
            vec![2.into(), 4.3.into()],
            vec![3.into(), 7.9.into()],
            vec![4.into(), 15.8.into()],
            vec![5.into(), 30.0.into()],
        ])
        .unwrap();
        assert_eq!(compute_k_anonymity(&table, &[0]).unwrap(), 1);
        discretize(&mut table, 1, 5.0).unwrap();
        let expected = [
            Value::Interval(0.0, 4.0),
            Value::Interval(0.0, 4.0),
            Value::Interval(5.0, 9.0),
            Value::Interval(15.0, 19.0),
            Value::Interval(30.0, 34.0),
        ];
        for (row, value) in expected.iter().enumerate() {
            assert_eq!(table.value(row, 1), value);
        }
    }

    #[test]
    fn test_discretize_rejects_non_positive_width() {
        let mut table = Table::new(vec![vec![1.into()]]).unwrap();
        assert_eq!(
            discretize(&mut table, 0, 0.0).unwrap_err(),
            Error::NonPositiveWidth(0.0)
        );
    }

    #[test]
    fn test_discretize_leaves_table_untouched_on_error() {
        let mut table = Table::new(vec![vec![1.into()], vec!["x".into()]]).unwrap();
        let before = table.clone();
        assert!(discretize(&mut table, 0, 5.0).is_err());
        assert_eq!(table, before);
    }

    #[test]
    fn test_generalize_categorical_raises_k() {
        let mut table = Table::new(vec![
            vec![1.into(), "foo".into(), "foo".into()],
            vec![2.into(), "bar".into(), "bar".into()],
            vec![3.into(), "cat".into(), "cat".into()],
            vec![4.into(), "dog".into(), "dog".into()],
            vec![5.into(), "eagle".into(), "bird".into()],
        ])
        .unwrap();
        assert_eq!(compute_k_anonymity(&table, &[1, 2]).unwrap(), 1);
        generalize_categorical(&mut table, &[1, 2], &["cat", "dog", "bird", "eagle"]).unwrap();
        generalize_categorical(&mut table, &[1, 2], &["foo", "bar"]).unwrap();
        assert_eq!(compute_k_anonymity(&table, &[1, 2]).unwrap(), 2);
    }

    #[test]
    fn test_generalize_categorical_leaves_other_values() {
        let mut table = Table::new(vec![
            vec!["cat".into()],
            vec!["dog".into()],
            vec!["fish".into()],
        ])
        .unwrap();
        generalize_categorical(&mut table, &[0], &["cat", "dog"]).unwrap();
        assert_eq!(table.value(0, 0), &Value::set(["cat", "dog"]));
        assert_eq!(table.value(1, 0), &Value::set(["cat", "dog"]));
        assert_eq!(table.value(2, 0), &Value::from("fish"));
    }
}
