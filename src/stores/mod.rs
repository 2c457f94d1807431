//! Contains traits and implementations for objects that store trips and expenses.

mod expense;
mod trip;

pub mod sqlite;

pub use expense::{ExpenseIndex, ExpenseStore};
pub use trip::{TripIndex, TripStore};
