use std::ops::AddAssign;

use itertools::Itertools;
use num::Float;

use crate::distribution::Distribution;
use crate::error::{Error, Result};

/// Earth mover's distance between two aligned distributions of an ordered
/// (numerical) attribute. Values are placed at their numeric key (a scalar,
/// or an interval's midpoint) and the cumulative-difference form of the
/// metric is taken over the sorted support.
///
/// See https://www.cs.purdue.edu/homes/ninghui/papers/t_closeness_icde07.pdf, S.6
pub fn emd_numerical(p: &Distribution, q: &Distribution) -> Result<f64> {
    if !p.same_support(q) {
        return Err(Error::MismatchedSupport);
    }
    let mut keyed = p
        .iter()
        .zip(q.iter())
        .map(|((value, vp), (_, vq))| {
            let key = value
                .numeric_key()
                .ok_or_else(|| Error::NonNumeric(value.to_string()))?;
            Ok((key, vp, vq))
        })
        .collect::<Result<Vec<_>>>()?;
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    let pv: Vec<f64> = keyed.iter().map(|entry| entry.1).collect();
    let qv: Vec<f64> = keyed.iter().map(|entry| entry.2).collect();
    Ok(ordered_emd(&pv, &qv))
}

/// Earth mover's distance between two aligned distributions of an unordered
/// (categorical) attribute: half the total variation over the support in
/// canonical string order.
///
/// See https://www.cs.purdue.edu/homes/ninghui/papers/t_closeness_icde07.pdf, S.6
pub fn emd_categorical(p: &Distribution, q: &Distribution) -> Result<f64> {
    if !p.same_support(q) {
        return Err(Error::MismatchedSupport);
    }
    let keyed: Vec<(String, f64, f64)> = p
        .iter()
        .zip(q.iter())
        .map(|((value, vp), (_, vq))| (value.to_string(), vp, vq))
        .sorted_by(|a, b| a.0.cmp(&b.0))
        .collect();
    let pv: Vec<f64> = keyed.iter().map(|entry| entry.1).collect();
    let qv: Vec<f64> = keyed.iter().map(|entry| entry.2).collect();
    Ok(total_variation(&pv, &qv))
}

// (1/(m-1)) * sum_i |sum_{j<=i} (p_j - q_j)| over the ordered support.
fn ordered_emd<T: Float + AddAssign>(p: &[T], q: &[T]) -> T {
    let m = p.len();
    if m <= 1 {
        return T::zero();
    }
    let mut cumulative = T::zero();
    let mut total = T::zero();
    for i in 0..m {
        cumulative += p[i] - q[i];
        total += cumulative.abs();
    }
    total / T::from(m - 1).unwrap()
}

// 0.5 * sum_i |p_i - q_i|
fn total_variation<T: Float + AddAssign>(p: &[T], q: &[T]) -> T {
    let mut total = T::zero();
    for i in 0..p.len() {
        total += (p[i] - q[i]).abs();
    }
    T::from(0.5).unwrap() * total
}
