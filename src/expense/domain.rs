//! Core expense domain types.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{Error, ExpenseCategory, ExpenseId, TripId, new_record_id};

/// Money spent during a trip.
///
/// To create a new `Expense`, use [Expense::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// The ID of the trip the expense belongs to.
    ///
    /// The store does not check that the trip exists.
    pub trip_id: TripId,
    /// When the money was spent.
    pub date: Date,
    /// What the money was spent on.
    pub category: ExpenseCategory,
    /// How much was spent.
    pub amount: f64,
    /// A text description of what the expense was for.
    pub description: String,
    /// A photo of the receipt, usually a `data:` URL.
    ///
    /// The contents are never interpreted, only stored and handed back.
    pub receipt: Option<String>,
    /// When the expense was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Expense {
    /// Create a new expense for the trip `trip_id`.
    ///
    /// Shortcut for [ExpenseBuilder] for discoverability.
    pub fn build(
        trip_id: &str,
        date: Date,
        category: ExpenseCategory,
        amount: f64,
        description: &str,
    ) -> ExpenseBuilder {
        ExpenseBuilder {
            trip_id: trip_id.to_owned(),
            date,
            category,
            amount,
            description: description.to_owned(),
            receipt: None,
        }
    }

    /// Check the fields that the store itself does not check.
    ///
    /// # Errors
    ///
    /// Returns an:
    /// - [Error::EmptyDescription] if the description is empty or just whitespace,
    /// - [Error::NegativeAmount] if the amount is negative or not a number.
    pub fn validate(&self) -> Result<(), Error> {
        if self.description.trim().is_empty() {
            return Err(Error::EmptyDescription);
        }

        if self.amount < 0.0 || self.amount.is_nan() {
            return Err(Error::NegativeAmount(self.amount));
        }

        Ok(())
    }
}

/// A builder for creating [Expense] instances.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseBuilder {
    trip_id: TripId,
    date: Date,
    category: ExpenseCategory,
    amount: f64,
    description: String,
    receipt: Option<String>,
}

impl ExpenseBuilder {
    /// Attach a receipt image. Empty strings are dropped.
    pub fn receipt(mut self, receipt: Option<String>) -> Self {
        self.receipt = receipt.filter(|receipt| !receipt.is_empty());
        self
    }

    /// Validate the builder and create an expense with a fresh ID, created now.
    ///
    /// # Errors
    ///
    /// See [Expense::validate].
    pub fn finalize(self) -> Result<Expense, Error> {
        self.finalize_with(new_record_id(), OffsetDateTime::now_utc())
    }

    /// Validate the builder and create an expense with the given ID and creation time.
    ///
    /// # Errors
    ///
    /// See [Expense::validate].
    pub fn finalize_with(
        self,
        id: ExpenseId,
        created_at: OffsetDateTime,
    ) -> Result<Expense, Error> {
        let expense = Expense {
            id,
            trip_id: self.trip_id,
            date: self.date,
            category: self.category,
            amount: self.amount,
            description: self.description.trim().to_owned(),
            receipt: self.receipt,
            created_at,
        };

        expense.validate()?;

        Ok(expense)
    }
}
