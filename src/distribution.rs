use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::table::{Table, Value};

/// Empirical probability distribution of one attribute: distinct value to
/// relative frequency. Frequencies sum to 1 over the rows it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    probs: BTreeMap<Value, f64>,
}

impl Distribution {
    /// Distribution of a column over the whole table.
    pub fn from_table(table: &Table, col: usize) -> Result<Self> {
        let rows: Vec<usize> = (0..table.n_rows()).collect();
        Self::from_rows(table, &rows, col)
    }

    /// Distribution of a column over a subset of rows.
    pub fn from_rows(table: &Table, rows: &[usize], col: usize) -> Result<Self> {
        table.check_column(col)?;
        if rows.is_empty() {
            return Err(Error::EmptyTable);
        }
        let mut counts: BTreeMap<Value, usize> = BTreeMap::new();
        for &row in rows {
            *counts.entry(table.value(row, col).clone()).or_insert(0) += 1;
        }
        let total = rows.len() as f64;
        let probs = counts
            .into_iter()
            .map(|(value, count)| (value, count as f64 / total))
            .collect();
        Ok(Self { probs })
    }

    /// Number of distinct values in the support.
    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    pub fn prob(&self, value: &Value) -> Option<f64> {
        self.probs.get(value).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, f64)> {
        self.probs.iter().map(|(value, prob)| (value, *prob))
    }

    pub fn support(&self) -> impl Iterator<Item = &Value> {
        self.probs.keys()
    }

    /// Re-express this distribution over a reference support, zero-filling
    /// values absent locally. Values outside the reference support are a
    /// caller error: the reference must be a superset, normally the
    /// whole-dataset distribution.
    pub fn project_onto(&self, reference: &Distribution) -> Result<Distribution> {
        for value in self.support() {
            if reference.prob(value).is_none() {
                return Err(Error::MismatchedSupport);
            }
        }
        let probs = reference
            .support()
            .map(|value| (value.clone(), self.prob(value).unwrap_or(0.0)))
            .collect();
        Ok(Distribution { probs })
    }

    /// True when the two supports are identical.
    pub fn same_support(&self, other: &Distribution) -> bool {
        self.probs.keys().eq(other.probs.keys())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::new(vec![
            vec!["a".into(), 1.into()],
            vec!["a".into(), 2.into()],
            vec!["b".into(), 3.into()],
            vec!["c".into(), 4.into()],
        ])
        .unwrap()
    }

    #[test]
    fn test_frequencies_sum_to_one() {
        let table = sample_table();
        let dist = Distribution::from_table(&table, 0).unwrap();
        assert_eq!(dist.len(), 3);
        assert_eq!(dist.prob(&"a".into()), Some(0.5));
        assert_eq!(dist.prob(&"b".into()), Some(0.25));
        let total: f64 = dist.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_rows_error() {
        let table = sample_table();
        assert_eq!(
            Distribution::from_rows(&table, &[], 0).unwrap_err(),
            Error::EmptyTable
        );
        assert_eq!(
            Distribution::from_table(&Table::empty(1), 0).unwrap_err(),
            Error::EmptyTable
        );
    }

    #[test]
    fn test_project_zero_fills() {
        let table = sample_table();
        let global = Distribution::from_table(&table, 0).unwrap();
        let local = Distribution::from_rows(&table, &[0, 1], 0).unwrap();
        let projected = local.project_onto(&global).unwrap();
        assert!(projected.same_support(&global));
        assert_eq!(projected.prob(&"a".into()), Some(1.0));
        assert_eq!(projected.prob(&"b".into()), Some(0.0));
        assert_eq!(projected.prob(&"c".into()), Some(0.0));
    }

    #[test]
    fn test_project_rejects_foreign_values() {
        let table = sample_table();
        let global = Distribution::from_rows(&table, &[0, 1, 2], 0).unwrap();
        let local = Distribution::from_rows(&table, &[2, 3], 0).unwrap();
        assert_eq!(
            local.project_onto(&global).unwrap_err(),
            Error::MismatchedSupport
        );
    }
}
