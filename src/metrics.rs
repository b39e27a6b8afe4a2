use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use rayon::prelude::*;

use crate::distance::{emd_categorical, emd_numerical};
use crate::distribution::Distribution;
use crate::error::{Error, Result};
use crate::partition::partition;
use crate::table::Table;

/// k-anonymity: the minimum equivalence-class size over the partition by
/// the quasi-identifier columns.
pub fn compute_k_anonymity(table: &Table, qi: &[usize]) -> Result<usize> {
    let groups = partition(table, qi)?;
    groups.iter().map(Vec::len).min().ok_or(Error::EmptyTable)
}

/// Distinct l-diversity: the minimum number of distinct sensitive values
/// over every (equivalence class, sensitive column) pair.
pub fn compute_l_diversity(table: &Table, qi: &[usize], sa: &[usize]) -> Result<usize> {
    table.check_columns(sa)?;
    let groups = partition(table, qi)?;
    groups
        .iter()
        .map(|group| distinct_min(table, group, sa))
        .min()
        .ok_or(Error::EmptyTable)
}

// Minimum distinct-value count across the sensitive columns of one group.
// Callers have validated that the group and the column set are non-empty.
pub(crate) fn distinct_min(table: &Table, rows: &[usize], sa: &[usize]) -> usize {
    sa.iter()
        .map(|&col| {
            rows.iter()
                .map(|&row| table.value(row, col))
                .collect::<BTreeSet<_>>()
                .len()
        })
        .min()
        .unwrap()
}

/// t-closeness: the maximum earth mover's distance between any equivalence
/// class's sensitive-attribute distribution and the whole-table
/// distribution. Numerical EMD when every value of the column is numeric
/// (scalars and intervals), categorical EMD otherwise.
///
/// Groups are disjoint and the maximum is associative, so the per-group
/// distances are computed in parallel.
pub fn compute_t_closeness(table: &Table, qi: &[usize], sa: usize) -> Result<f64> {
    let global = Distribution::from_table(table, sa)?;
    let groups = partition(table, qi)?;
    let numeric = table.column_is_numeric(sa);
    groups
        .par_iter()
        .map(|group| {
            let local = Distribution::from_rows(table, group, sa)?.project_onto(&global)?;
            if numeric {
                emd_numerical(&local, &global)
            } else {
                emd_categorical(&local, &global)
            }
        })
        .try_reduce(|| 0.0, |a, b| Ok(a.max(b)))
}

/// Sizes of the equivalence classes, in grouping-key order.
pub fn group_sizes(table: &Table, qi: &[usize]) -> Result<Vec<usize>> {
    Ok(partition(table, qi)?.iter().map(Vec::len).collect())
}

/// Per-group distinct l-diversity values, in grouping-key order.
pub fn diversities(table: &Table, qi: &[usize], sa: &[usize]) -> Result<Vec<usize>> {
    table.check_columns(sa)?;
    let groups = partition(table, qi)?;
    Ok(groups
        .iter()
        .map(|group| distinct_min(table, group, sa))
        .collect())
}

/// Per-group categorical earth mover's distance to the whole-table
/// distribution of the sensitive column, in grouping-key order. Always the
/// categorical variant, whatever the attribute type.
pub fn closenesses(table: &Table, qi: &[usize], sa: usize) -> Result<Vec<f64>> {
    let global = Distribution::from_table(table, sa)?;
    let groups = partition(table, qi)?;
    let progress = ProgressBar::new(groups.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos:>7}/{len:7} ({eta})",
        )
        .unwrap()
        .with_key("eta", |state: &ProgressState, w: &mut dyn Write| {
            write!(w, "{:.1}s", state.eta().as_secs_f64()).unwrap()
        })
        .progress_chars("#>-"),
    );
    let mut distances = Vec::with_capacity(groups.len());
    for group in &groups {
        let local = Distribution::from_rows(table, group, sa)?.project_onto(&global)?;
        distances.push(emd_categorical(&local, &global)?);
        progress.inc(1);
    }
    progress.finish_and_clear();
    Ok(distances)
}

/// Size-weighted group-size buckets: index `s` holds `s * number of groups
/// of size s`, for sizes 0 through the maximum observed size + 1. Buckets
/// weight by rows affected, not by group count.
pub fn count_per_group_size(table: &Table, qi: &[usize]) -> Result<Vec<usize>> {
    let sizes = group_sizes(table, qi)?;
    let mut counter: BTreeMap<usize, usize> = BTreeMap::new();
    for size in sizes {
        *counter.entry(size).or_insert(0) += 1;
    }
    let max = *counter.keys().next_back().ok_or(Error::EmptyTable)?;
    let mut counts = vec![0; max + 2];
    for (size, groups_of_size) in counter {
        counts[size] = size * groups_of_size;
    }
    Ok(counts)
}
