//! Expenses: a single dated spend logged against a trip.

mod domain;

pub use domain::{Expense, ExpenseBuilder};
