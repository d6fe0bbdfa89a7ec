//! Row tracking and per-operation planning
//!
//! The tracker mirrors how many rows each table holds so that updates are
//! only ever planned against rows that exist.

use rand::Rng;

use crate::errors::Result;
use crate::sql::{self, StatementShape};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Insert,
    Update,
}

impl OpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::Insert => "insert",
            OpKind::Update => "update",
        }
    }
}

impl std::fmt::Display for OpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One planned mutation: which table, which kind, and its 0-based position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub index: usize,
    pub table: usize,
    pub kind: OpKind,
}

impl Operation {
    /// Commit message recorded for this operation
    pub fn commit_message(&self) -> String {
        format!(
            "Operation #{}: {} table #{}",
            self.index, self.kind, self.table
        )
    }
}

/// Commit message for the schema-only database
pub const INITIAL_COMMIT_MESSAGE: &str = "Commit empty database";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowTracker {
    rows: Vec<u64>,
    next_index: usize,
}

impl RowTracker {
    /// Tracker for `tables` empty tables
    pub fn new(tables: usize) -> Self {
        Self {
            rows: vec![0; tables],
            next_index: 0,
        }
    }

    pub fn tables(&self) -> usize {
        self.rows.len()
    }

    /// Rows inserted so far into `table`
    pub fn rows(&self, table: usize) -> u64 {
        self.rows.get(table).copied().unwrap_or(0)
    }

    pub fn row_counts(&self) -> &[u64] {
        &self.rows
    }

    pub fn total_rows(&self) -> u64 {
        self.rows.iter().sum()
    }

    /// Pick the next operation
    ///
    /// The table is uniform over all tables. An empty table always gets an
    /// insert; otherwise insert and update are equally likely.
    pub fn plan<R: Rng + ?Sized>(&self, rng: &mut R) -> Operation {
        let table = rng.random_range(0..self.rows.len());
        let kind = if self.rows[table] == 0 || rng.random_bool(0.5) {
            OpKind::Insert
        } else {
            OpKind::Update
        };
        Operation {
            index: self.next_index,
            table,
            kind,
        }
    }

    /// Build the SQL statement for a planned operation
    ///
    /// # Errors
    ///
    /// Propagates `NoRowsToUpdate` for an update planned against an empty
    /// table, which `plan` never produces.
    pub fn statement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        op: &Operation,
        shape: &StatementShape,
    ) -> Result<String> {
        match op.kind {
            OpKind::Insert => Ok(sql::random_insert(rng, op.table, shape)),
            OpKind::Update => sql::random_update(rng, op.table, self.rows(op.table), shape),
        }
    }

    /// Account for an operation that has been applied to the database
    pub fn record(&mut self, op: &Operation) {
        if op.kind == OpKind::Insert {
            self.rows[op.table] += 1;
        }
        self.next_index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_first_op_on_any_table_is_insert() {
        let tracker = RowTracker::new(3);
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let op = tracker.plan(&mut rng);
            assert_eq!(op.kind, OpKind::Insert);
            assert_eq!(op.index, 0);
            assert!(op.table < 3);
        }
    }

    #[test]
    fn test_record_counts_inserts_only() {
        let mut tracker = RowTracker::new(2);
        tracker.record(&Operation {
            index: 0,
            table: 1,
            kind: OpKind::Insert,
        });
        tracker.record(&Operation {
            index: 1,
            table: 1,
            kind: OpKind::Update,
        });

        assert_eq!(tracker.row_counts(), &[0, 1]);
        assert_eq!(tracker.total_rows(), 1);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(tracker.plan(&mut rng).index, 2);
    }

    #[test]
    fn test_commit_messages() {
        let op = Operation {
            index: 17,
            table: 1,
            kind: OpKind::Update,
        };
        assert_eq!(op.commit_message(), "Operation #17: update table #1");
        assert_eq!(INITIAL_COMMIT_MESSAGE, "Commit empty database");
    }

    #[test]
    fn test_both_kinds_appear_once_rows_exist() {
        let mut tracker = RowTracker::new(1);
        tracker.record(&Operation {
            index: 0,
            table: 0,
            kind: OpKind::Insert,
        });

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let kinds: Vec<OpKind> = (0..200).map(|_| tracker.plan(&mut rng).kind).collect();
        assert!(kinds.contains(&OpKind::Insert));
        assert!(kinds.contains(&OpKind::Update));
    }
}
