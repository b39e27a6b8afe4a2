use std::collections::{BTreeSet, HashSet};

use log::info;

use crate::error::{Error, Result};
use crate::metrics::{closenesses, distinct_min};
use crate::partition::partition;
use crate::table::{Table, Value};

/// Suppress a numeric column by replacing every cell with the column mean.
/// Interval cells contribute their midpoint.
pub fn suppress_numeric(table: &mut Table, col: usize) -> Result<()> {
    table.check_column(col)?;
    if table.is_empty() {
        return Err(Error::EmptyTable);
    }
    let keys = (0..table.n_rows())
        .map(|row| {
            let value = table.value(row, col);
            value
                .numeric_key()
                .ok_or_else(|| Error::NonNumeric(value.to_string()))
        })
        .collect::<Result<Vec<f64>>>()?;
    let mean = keys.iter().sum::<f64>() / keys.len() as f64;
    for row in 0..table.n_rows() {
        table.set_value(row, col, Value::Number(mean));
    }
    Ok(())
}

/// Suppress one categorical value: cells equal to `value` are replaced by
/// the column's generalization set — the set already present in the column
/// if there is one, otherwise the set of the column's distinct non-set
/// values.
pub fn suppress_categorical(table: &mut Table, col: usize, value: &str) -> Result<()> {
    table.check_column(col)?;
    let existing = (0..table.n_rows()).find_map(|row| match table.value(row, col) {
        Value::Set(members) => Some(members.clone()),
        _ => None,
    });
    let replacement: BTreeSet<String> = existing.unwrap_or_else(|| {
        (0..table.n_rows())
            .filter_map(|row| match table.value(row, col) {
                Value::Set(_) => None,
                other => Some(other.to_string()),
            })
            .collect()
    });
    let target = Value::Text(value.to_string());
    for row in 0..table.n_rows() {
        if table.value(row, col) == &target {
            table.set_value(row, col, Value::Set(replacement.clone()));
        }
    }
    Ok(())
}

/// Drop every row belonging to an equivalence class smaller than `k`.
/// Returns the number of rows removed.
pub fn remove_groups(table: &mut Table, qi: &[usize], k: usize) -> Result<usize> {
    let groups = partition(table, qi)?;
    let doomed: HashSet<usize> = groups
        .iter()
        .filter(|group| group.len() < k)
        .flatten()
        .copied()
        .collect();
    table.remove_rows(&doomed);
    info!("removed {} rows in groups smaller than {}", doomed.len(), k);
    Ok(doomed.len())
}

/// Drop every row belonging to an equivalence class whose distinct
/// l-diversity over the sensitive columns is below `l`. Returns the number
/// of rows removed.
pub fn remove_groups_by_diversity(
    table: &mut Table,
    qi: &[usize],
    sa: &[usize],
    l: usize,
) -> Result<usize> {
    table.check_columns(sa)?;
    let groups = partition(table, qi)?;
    let doomed: HashSet<usize> = groups
        .iter()
        .filter(|group| distinct_min(table, group, sa) < l)
        .flatten()
        .copied()
        .collect();
    table.remove_rows(&doomed);
    info!("removed {} rows in groups less diverse than {}", doomed.len(), l);
    Ok(doomed.len())
}

/// Drop every row belonging to an equivalence class whose categorical
/// distance to the whole-table distribution of the sensitive column
/// exceeds `t`. The categorical variant is used whatever the attribute
/// type. Returns the number of rows removed.
///
/// Every group distance is computed before the first deletion, so a failed
/// metric leaves the table unmodified.
pub fn remove_groups_by_closeness(
    table: &mut Table,
    qi: &[usize],
    sa: usize,
    t: f64,
) -> Result<usize> {
    let groups = partition(table, qi)?;
    let distances = closenesses(table, qi, sa)?;
    let doomed: HashSet<usize> = groups
        .iter()
        .zip(&distances)
        .filter(|(_, &distance)| distance > t)
        .flat_map(|(group, _)| group.iter().copied())
        .collect();
    table.remove_rows(&doomed);
    info!(
        "removed {} rows in groups farther than {} from the overall distribution",
        doomed.len(),
        t
    );
    Ok(doomed.len())
}
