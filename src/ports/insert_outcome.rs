//! Result of an idempotent insert.

/// Outcome of an insert guarded by a uniqueness constraint.
///
/// Storage resolves a conflicting insert by reading back the row that won,
/// so callers always get a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome<T> {
    /// A new row was written.
    Inserted(T),
    /// A row with the same unique key already existed; this is it.
    AlreadyExists(T),
}

impl<T> InsertOutcome<T> {
    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted(_))
    }

    pub fn record(&self) -> &T {
        match self {
            InsertOutcome::Inserted(r) | InsertOutcome::AlreadyExists(r) => r,
        }
    }

    pub fn into_record(self) -> T {
        match self {
            InsertOutcome::Inserted(r) | InsertOutcome::AlreadyExists(r) => r,
        }
    }
}
