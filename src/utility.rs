use crate::error::{Error, Result};
use crate::table::Table;

/// Mean equivalence-class size of a partition.
pub fn average_group_size(groups: &[Vec<usize>]) -> Result<f64> {
    if groups.is_empty() {
        return Err(Error::EmptyTable);
    }
    let total: usize = groups.iter().map(Vec::len).sum();
    Ok(total as f64 / groups.len() as f64)
}

/// The C_avg metric: table size over `|groups| * k` for a target
/// k-anonymity `k`.
pub fn normalized_average_group_size(table: &Table, groups: &[Vec<usize>], k: usize) -> Result<f64> {
    if groups.is_empty() {
        return Err(Error::EmptyTable);
    }
    Ok(table.n_rows() as f64 / (groups.len() * k) as f64)
}

/// The discernibility metric C_DM: the sum of squared class sizes.
pub fn discernibility_metric(groups: &[Vec<usize>]) -> usize {
    groups.iter().map(|group| group.len() * group.len()).sum()
}
