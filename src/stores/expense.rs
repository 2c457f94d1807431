//! Defines the expense store trait.

use time::Date;

use crate::{Error, Expense, TripId};

/// The secondary indexes on expenses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseIndex {
    /// Expenses belonging to the given trip.
    ByTrip(TripId),
    /// Expenses made on the given date.
    ByDate(Date),
}

impl ExpenseIndex {
    /// The name of the index.
    pub fn name(&self) -> &'static str {
        match self {
            ExpenseIndex::ByTrip(_) => "by-trip",
            ExpenseIndex::ByDate(_) => "by-date",
        }
    }
}

/// Handles the storage and retrieval of expenses.
///
/// Stores do not validate expenses and do not check that an expense's trip
/// exists, that is left to the caller.
pub trait ExpenseStore {
    /// Insert `expense`, or replace the stored expense with the same ID.
    fn put(&self, expense: &Expense) -> Result<(), Error>;

    /// Insert `expense`, failing with [Error::DuplicateId] if its ID is taken.
    fn add(&self, expense: &Expense) -> Result<(), Error>;

    /// Retrieve an expense by its ID, `None` if there is no such expense.
    fn get(&self, id: &str) -> Result<Option<Expense>, Error>;

    /// Retrieve every expense, in no particular order.
    fn get_all(&self) -> Result<Vec<Expense>, Error>;

    /// Retrieve the expenses matching `index`, in no particular order.
    fn get_all_by_index(&self, index: ExpenseIndex) -> Result<Vec<Expense>, Error>;

    /// Delete an expense. Deleting an expense that does not exist is not an error.
    fn delete(&self, id: &str) -> Result<(), Error>;
}
