use crate::{Executor, Result};

/// An open database session able to start transactions.
pub trait Connection: Executor {
    type Transaction<'c>: Transaction
    where
        Self: 'c;

    /// Opens an explicit transaction scope borrowing this connection.
    fn begin(&mut self) -> Result<Self::Transaction<'_>>;
}

/// Scoped transaction handle.
///
/// Implementations roll back from `Drop` when neither finalizer consumed the
/// handle, so an early return inside a transaction never leaves one open.
pub trait Transaction: Executor {
    fn commit(self) -> Result<()>;
    fn rollback(self) -> Result<()>;
}
