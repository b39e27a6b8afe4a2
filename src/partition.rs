use std::collections::BTreeMap;

use crate::error::Result;
use crate::table::{Table, Value};

/// Split a table into equivalence classes over the given quasi-identifier
/// columns. Each group is a list of row positions; groups are disjoint,
/// cover the whole table, and come back sorted by grouping key.
pub fn partition(table: &Table, qi: &[usize]) -> Result<Vec<Vec<usize>>> {
    table.check_columns(qi)?;
    let mut groups: BTreeMap<Vec<Value>, Vec<usize>> = BTreeMap::new();
    for row in 0..table.n_rows() {
        let key: Vec<Value> = qi.iter().map(|&col| table.value(row, col).clone()).collect();
        groups.entry(key).or_default().push(row);
    }
    Ok(groups.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::generalize::generalize_categorical;

    fn sample_table() -> Table {
        Table::new(vec![
            vec![30.into(), "M".into(), 10001.into(), 50000.into(), 1.into(), 1.into()],
            vec![30.into(), "M".into(), 10001.into(), 60000.into(), 1.into(), 1.into()],
            vec![40.into(), "F".into(), 10002.into(), 70000.into(), 1.into(), 1.into()],
            vec![40.into(), "F".into(), 10002.into(), 80000.into(), 3.into(), 1.into()],
            vec![50.into(), "M".into(), 10003.into(), 90000.into(), 3.into(), 1.into()],
            vec![50.into(), "M".into(), 10003.into(), 100000.into(), 3.into(), 1.into()],
        ])
        .unwrap()
    }

    #[test]
    fn test_partition_group_counts() {
        let table = sample_table();
        assert_eq!(partition(&table, &[0, 1, 2, 3, 4, 5]).unwrap().len(), 6);
        assert_eq!(partition(&table, &[0, 1]).unwrap().len(), 3);
        assert_eq!(partition(&table, &[5]).unwrap().len(), 1);
    }

    #[test]
    fn test_partition_covers_table_disjointly() {
        let table = sample_table();
        let groups = partition(&table, &[0, 1]).unwrap();
        let total: usize = groups.iter().map(Vec::len).sum();
        assert_eq!(total, table.n_rows());
        let mut seen: Vec<usize> = groups.concat();
        seen.sort_unstable();
        assert_eq!(seen, (0..table.n_rows()).collect::<Vec<_>>());
    }

    #[test]
    fn test_partition_after_generalization() {
        let mut table = sample_table();
        generalize_categorical(&mut table, &[1], &["M", "F"]).unwrap();
        assert_eq!(partition(&table, &[0, 1]).unwrap().len(), 3);
    }

    #[test]
    fn test_partition_empty_selection() {
        let table = sample_table();
        assert_eq!(
            partition(&table, &[]).unwrap_err(),
            Error::EmptyColumnSelection
        );
    }

    #[test]
    fn test_partition_out_of_bounds() {
        let table = sample_table();
        assert_eq!(
            partition(&table, &[0, 6]).unwrap_err(),
            Error::ColumnIndexOutOfBounds { index: 6, width: 6 }
        );
    }

    #[test]
    fn test_partition_empty_table() {
        let table = Table::empty(2);
        assert_eq!(partition(&table, &[0]).unwrap(), Vec::<Vec<usize>>::new());
    }
}
