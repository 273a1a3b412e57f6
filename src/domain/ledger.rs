//! Time-indexed columnar store of a market's history.
//!
//! Each row is one snapshot flattened into `(variable, group)` columns where
//! the group is either an outcome id or the market itself. Once a column has
//! been promoted to the index (normally elapsed seconds), rows are kept
//! sorted by it and a second write for the same index value merges into the
//! existing row, later values winning column by column.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::error::DomainError;
use super::id::OutcomeId;

/// A ledger variable. Declaration order is column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variable {
    ElapsedSeconds,
    ClosedIndicator,
    MarketBackSize,
    RemovalDate,
    SpBackPrice,
    SpBackSize,
    SpLayPrice,
    SpLaySize,
    ExAverageBackPrice,
    ExBackSize,
    ExAverageLayPrice,
    ExLaySize,
    ExOfferedBackPrice,
    ExOfferedLayPrice,
    CombinedBackSize,
    CompositionalSpProbability,
    CompositionalSpBackPrice,
    CompositionalExAverageProbability,
    CompositionalExAverageBackPrice,
}

impl Variable {
    /// Column name as written in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ElapsedSeconds => "elapsed_seconds",
            Self::ClosedIndicator => "closed_indicator",
            Self::MarketBackSize => "market_back_size",
            Self::RemovalDate => "removal_date",
            Self::SpBackPrice => "sp_back_price",
            Self::SpBackSize => "sp_back_size",
            Self::SpLayPrice => "sp_lay_price",
            Self::SpLaySize => "sp_lay_size",
            Self::ExAverageBackPrice => "ex_average_back_price",
            Self::ExBackSize => "ex_back_size",
            Self::ExAverageLayPrice => "ex_average_lay_price",
            Self::ExLaySize => "ex_lay_size",
            Self::ExOfferedBackPrice => "ex_offered_back_price",
            Self::ExOfferedLayPrice => "ex_offered_lay_price",
            Self::CombinedBackSize => "combined_back_size",
            Self::CompositionalSpProbability => "compositional_sp_probability",
            Self::CompositionalSpBackPrice => "compositional_sp_back_price",
            Self::CompositionalExAverageProbability => "compositional_ex_average_probability",
            Self::CompositionalExAverageBackPrice => "compositional_ex_average_back_price",
        }
    }
}

/// Who a column belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColumnGroup {
    /// Market-wide meta column.
    Market,
    /// Per-outcome column.
    Outcome(OutcomeId),
}

/// A `(variable, group)` column key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnKey {
    /// The variable.
    pub variable: Variable,
    /// The owning group.
    pub group: ColumnGroup,
}

impl ColumnKey {
    /// Market-wide column.
    #[must_use]
    pub const fn market(variable: Variable) -> Self {
        Self {
            variable,
            group: ColumnGroup::Market,
        }
    }

    /// Per-outcome column.
    #[must_use]
    pub const fn outcome(variable: Variable, id: OutcomeId) -> Self {
        Self {
            variable,
            group: ColumnGroup::Outcome(id),
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.group {
            ColumnGroup::Market => write!(f, "({}, market)", self.variable.name()),
            ColumnGroup::Outcome(id) => write!(f, "({}, {id})", self.variable.name()),
        }
    }
}

/// One ledger row.
pub type Row = BTreeMap<ColumnKey, f64>;

/// Append-only, time-indexed columnar store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketLedger {
    index: Option<ColumnKey>,
    rows: BTreeMap<i64, Row>,
    columns: BTreeSet<ColumnKey>,
    next_position: i64,
}

impl MarketLedger {
    /// Create an empty, unindexed ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty ledger indexed by `column`.
    #[must_use]
    pub fn with_index(column: ColumnKey) -> Self {
        Self {
            index: Some(column),
            ..Self::default()
        }
    }

    /// Create a one-row ledger.
    #[must_use]
    pub fn from_row(row: Row) -> Self {
        let mut ledger = Self::new();
        ledger.push_positional(row);
        ledger
    }

    /// Promote `column` to the row index.
    ///
    /// Rows sharing an index value collapse into one, later rows winning per
    /// column. Works on an empty ledger too, fixing the index for later rows.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidIndexColumn`] if any row lacks a finite
    /// value for `column`; the ledger is left unchanged.
    pub fn set_index(&mut self, column: ColumnKey) -> Result<(), DomainError> {
        let mut rows = BTreeMap::new();
        for (position, row) in self.rows.values().enumerate() {
            let key = index_value(row, column, position)?;
            merge_row(&mut rows, key, row.clone());
        }
        self.rows = rows;
        self.index = Some(column);
        Ok(())
    }

    /// The index column, if one has been set.
    #[must_use]
    pub const fn index_column(&self) -> Option<ColumnKey> {
        self.index
    }

    /// Append every row of `other`, outer-joining columns.
    ///
    /// # Errors
    ///
    /// When this ledger is indexed, every incoming row must carry a finite
    /// value for the index column; otherwise nothing is added.
    pub fn add_rows(&mut self, other: &Self) -> Result<(), DomainError> {
        match self.index {
            Some(index) => {
                let mut keyed = Vec::with_capacity(other.rows.len());
                for (position, row) in other.rows.values().enumerate() {
                    keyed.push((index_value(row, index, self.rows.len() + position)?, row));
                }
                for (key, row) in keyed {
                    self.columns.extend(row.keys().copied());
                    merge_row(&mut self.rows, key, row.clone());
                }
            }
            None => {
                for row in other.rows.values() {
                    self.push_positional(row.clone());
                }
            }
        }
        Ok(())
    }

    /// Write `out` as the sum of `columns` in every row, missing values
    /// counting as zero.
    pub fn sum_columns(&mut self, out: ColumnKey, columns: &[ColumnKey]) {
        for row in self.rows.values_mut() {
            let total: f64 = columns
                .iter()
                .filter_map(|c| row.get(c))
                .filter(|v| !v.is_nan())
                .sum();
            row.insert(out, total);
        }
        self.columns.insert(out);
    }

    /// Most recent non-NaN value of `column`, NaN when there is none.
    #[must_use]
    pub fn last_entry(&self, column: ColumnKey) -> f64 {
        self.rows
            .values()
            .rev()
            .filter_map(|row| row.get(&column))
            .find(|v| !v.is_nan())
            .copied()
            .unwrap_or(f64::NAN)
    }

    /// Full series of `column`, one value per row, NaN where absent.
    #[must_use]
    pub fn column(&self, column: ColumnKey) -> Vec<f64> {
        self.rows
            .values()
            .map(|row| row.get(&column).copied().unwrap_or(f64::NAN))
            .collect()
    }

    /// Index values in row order.
    #[must_use]
    pub fn index(&self) -> Vec<i64> {
        self.rows.keys().copied().collect()
    }

    /// Distinct outcome ids appearing in column keys. Meta columns are skipped.
    #[must_use]
    pub fn column_group_values(&self) -> Vec<OutcomeId> {
        let ids: BTreeSet<OutcomeId> = self
            .columns
            .iter()
            .filter_map(|c| match c.group {
                ColumnGroup::Outcome(id) => Some(id),
                ColumnGroup::Market => None,
            })
            .collect();
        ids.into_iter().collect()
    }

    /// Whether `column` has ever been written.
    #[must_use]
    pub fn has_column(&self, column: ColumnKey) -> bool {
        self.columns.contains(&column)
    }

    /// Carry the last seen value of `column` forward over absent or NaN cells.
    pub fn forward_fill(&mut self, column: ColumnKey) {
        let mut last = None;
        for row in self.rows.values_mut() {
            match row.get(&column) {
                Some(v) if !v.is_nan() => last = Some(*v),
                _ => {
                    if let Some(v) = last {
                        row.insert(column, v);
                    }
                }
            }
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of distinct columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when the ledger holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn push_positional(&mut self, row: Row) {
        self.columns.extend(row.keys().copied());
        self.rows.insert(self.next_position, row);
        self.next_position += 1;
    }
}

fn index_value(row: &Row, column: ColumnKey, position: usize) -> Result<i64, DomainError> {
    match row.get(&column) {
        Some(v) if v.is_finite() => Ok(v.floor() as i64),
        _ => Err(DomainError::InvalidIndexColumn {
            column: column.to_string(),
            row: position,
        }),
    }
}

fn merge_row(rows: &mut BTreeMap<i64, Row>, key: i64, row: Row) {
    rows.entry(key).or_default().extend(row);
}
