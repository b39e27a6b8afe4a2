use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

use itertools::Itertools;

use crate::error::{Error, Result};

/// A single cell of a table.
///
/// Generalized values carry the shape produced by suppression and
/// generalization: a closed numeric interval, or the set of original
/// categorical values a cell now stands in for.
#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    Text(String),
    Interval(f64, f64),
    Set(BTreeSet<String>),
}

impl Value {
    pub fn set<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::Set(members.into_iter().map(Into::into).collect())
    }

    /// Numeric position of the value: the number itself, or an interval's
    /// midpoint. Text and sets have none.
    pub fn numeric_key(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            Value::Interval(lower, upper) => Some((lower + upper) / 2.0),
            _ => None,
        }
    }

    /// Closed numeric bounds: a scalar is its own lower and upper bound.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self {
            Value::Number(v) => Some((*v, *v)),
            Value::Interval(lower, upper) => Some((*lower, *upper)),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Number(_) | Value::Interval(_, _))
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Number(_) => 0,
            Value::Interval(_, _) => 1,
            Value::Text(_) => 2,
            Value::Set(_) => 3,
        }
    }
}

// Exact comparison, so equal-looking floats group together and grouping
// keys have a stable total order.
impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::Interval(a0, a1), Value::Interval(b0, b1)) => {
                a0.total_cmp(b0).then(a1.total_cmp(b1))
            }
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Set(a), Value::Set(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(v as f64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

fn fmt_number(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        write!(f, "{}", v as i64)
    } else {
        write!(f, "{}", v)
    }
}

// The display form doubles as the canonical categorical key.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) => fmt_number(f, *v),
            Value::Text(v) => write!(f, "{}", v),
            Value::Interval(lower, upper) => {
                fmt_number(f, *lower)?;
                write!(f, " - ")?;
                fmt_number(f, *upper)
            }
            Value::Set(members) => write!(f, "{}", members.iter().join(", ")),
        }
    }
}

/// An in-memory table: uniform-width rows of [`Value`] with a stable
/// identity per row. Row removal keeps the surviving ids unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    width: usize,
    ids: Vec<usize>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<Value>>) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(Error::RaggedRow {
                    row,
                    got: values.len(),
                    expected: width,
                });
            }
        }
        let ids = (0..rows.len()).collect();
        Ok(Self { width, ids, rows })
    }

    /// A zero-row table with a declared width.
    pub fn empty(width: usize) -> Self {
        Self {
            width,
            ids: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn value(&self, row: usize, col: usize) -> &Value {
        &self.rows[row][col]
    }

    pub fn set_value(&mut self, row: usize, col: usize, value: Value) {
        self.rows[row][col] = value;
    }

    pub fn row(&self, row: usize) -> &[Value] {
        &self.rows[row]
    }

    /// Identity of the row at the given position.
    pub fn row_id(&self, row: usize) -> usize {
        self.ids[row]
    }

    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    pub fn check_column(&self, col: usize) -> Result<()> {
        if col >= self.width {
            return Err(Error::ColumnIndexOutOfBounds {
                index: col,
                width: self.width,
            });
        }
        Ok(())
    }

    /// Validate a column selection that must name at least one column.
    pub fn check_columns(&self, cols: &[usize]) -> Result<()> {
        if cols.is_empty() {
            return Err(Error::EmptyColumnSelection);
        }
        for &col in cols {
            self.check_column(col)?;
        }
        Ok(())
    }

    /// True when every cell of the column is a number or an interval.
    /// An empty table has no numeric evidence and reports false.
    pub fn column_is_numeric(&self, col: usize) -> bool {
        !self.is_empty() && self.rows.iter().all(|row| row[col].is_numeric())
    }

    /// Drop the rows at the given positions in one pass. Ids of the
    /// surviving rows are preserved.
    pub fn remove_rows(&mut self, positions: &HashSet<usize>) {
        let mut row = 0;
        self.ids.retain(|_| {
            let keep = !positions.contains(&row);
            row += 1;
            keep
        });
        let mut row = 0;
        self.rows.retain(|_| {
            let keep = !positions.contains(&row);
            row += 1;
            keep
        });
    }

    /// Renumber row ids to 0..n.
    pub fn reset_ids(&mut self) {
        self.ids = (0..self.rows.len()).collect();
    }
}
