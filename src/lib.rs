//! Trip Ledger is a personal travel-expense tracker.
//!
//! Trips have a budget and a date range, expenses are logged against a trip,
//! and the [summary] module compares what was spent against the budget.
//! Everything is kept in a local SQLite file managed by [Database] and
//! accessed through the [stores] traits.
//!
//! The [cli] module is the front end used by the `trip_ledger` binary and the
//! [report] module renders a trip as text, HTML or CSV.

#![warn(missing_docs)]

use time::Date;

mod category;
pub mod cli;
mod currency;
mod database;
mod expense;
mod logging;
mod record_id;
pub mod report;
pub mod stores;
pub mod summary;
mod trip;

#[cfg(test)]
mod test_utils;

pub use category::ExpenseCategory;
pub use currency::format_currency;
pub use database::{DB_NAME, DB_VERSION, Database, initialize};
pub use expense::{Expense, ExpenseBuilder};
pub use logging::init_logging;
pub use record_id::{ExpenseId, TripId, new_record_id};
pub use summary::{
    BudgetComparison, BudgetStatus, CategoryTotals, ExpenseSummary, compute_summary,
};
pub use trip::{Trip, TripBuilder, TripStatus};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The underlying SQLite file could not be opened or prepared for use.
    ///
    /// Every store operation returns this error until a later call manages to
    /// open the file.
    #[error("the local store could not be opened: {0}")]
    StorageUnavailable(rusqlite::Error),

    /// The store file was written by a newer version of the application.
    #[error("the local store has schema version {0}, which this version does not understand")]
    UnsupportedSchemaVersion(i64),

    /// Deleting one of a trip's expenses failed after the trip itself was
    /// deleted.
    ///
    /// The trip and the first `deleted` expenses stay deleted. The remaining
    /// expenses are left in the store with a dangling trip ID.
    #[error("deleted trip {trip_id} but only {deleted} of its expenses: {source}")]
    PartialCascadeFailure {
        /// The trip that was deleted.
        trip_id: TripId,
        /// How many expenses were deleted before the failure.
        deleted: usize,
        /// The error from the failed expense delete.
        source: Box<Error>,
    },

    /// A strict insert used an ID that already exists in the store.
    #[error("a record with the ID \"{0}\" already exists")]
    DuplicateId(String),

    /// No trip has the given ID.
    #[error("could not find a trip with the ID \"{0}\"")]
    TripNotFound(TripId),

    /// No expense has the given ID.
    #[error("could not find an expense with the ID \"{0}\"")]
    ExpenseNotFound(ExpenseId),

    /// An empty string was used for a trip name.
    #[error("trip name cannot be empty")]
    EmptyName,

    /// An empty string was used for an expense description.
    #[error("expense description cannot be empty")]
    EmptyDescription,

    /// A budget or expense amount was below zero.
    #[error("{0} is negative, amounts must be zero or greater")]
    NegativeAmount(f64),

    /// A trip's end date falls before its start date.
    #[error("the trip ends on {end}, before it starts on {start}")]
    InvalidDateRange {
        /// The first day of the trip.
        start: Date,
        /// The last day of the trip.
        end: Date,
    },

    /// A string did not name one of the expense categories.
    #[error("\"{0}\" is not an expense category")]
    InvalidCategory(String),

    /// A string did not name a trip status.
    #[error("\"{0}\" is not a trip status, expected \"active\" or \"completed\"")]
    InvalidStatus(String),

    /// A date string could not be parsed as `YYYY-MM-DD`.
    #[error("could not parse \"{0}\" as a date, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// A report could not be written.
    #[error("could not write the report: {0}")]
    Io(String),

    /// The CSV export failed.
    #[error("could not write CSV: {0}")]
    Csv(String),

    /// An error occurred while serializing a struct as JSON.
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::Csv(value.to_string())
    }
}
