//! Record ID type definitions.

use uuid::Uuid;

/// The primary key of a [Trip](crate::Trip).
pub type TripId = String;

/// The primary key of an [Expense](crate::Expense).
pub type ExpenseId = String;

/// Generate a fresh, unique record ID.
///
/// IDs are opaque to the store, so records created elsewhere may use any
/// string as their ID.
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}
