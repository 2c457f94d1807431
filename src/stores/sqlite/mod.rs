//! SQLite backed implementations of the store traits, plus a convenience
//! bundle of both stores over one [Database].

mod expense;
mod trip;

pub use expense::{SQLiteExpenseStore, create_expense_table};
pub use trip::{SQLiteTripStore, create_trip_table};

use crate::Database;

/// The trip and expense stores for a single database.
#[derive(Debug, Clone)]
pub struct SQLiteStores {
    /// The trip store. Deleting a trip also deletes its expenses.
    pub trips: SQLiteTripStore,
    /// The expense store.
    pub expenses: SQLiteExpenseStore,
}

impl SQLiteStores {
    /// Create both stores over `database`.
    ///
    /// The database is not opened until the first store operation.
    pub fn new(database: Database) -> Self {
        Self {
            trips: SQLiteTripStore::new(database.clone()),
            expenses: SQLiteExpenseStore::new(database),
        }
    }
}
