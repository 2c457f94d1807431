#![allow(missing_docs)]

pub(crate) mod html;

pub(crate) use html::{assert_valid_html, parse_html_document};

use time::macros::{date, datetime};

use crate::{Expense, ExpenseCategory, Trip, TripStatus};

/// An active trip from 1 to 10 March 2025 with the ID `id`.
pub(crate) fn sample_trip(id: &str, budget: f64) -> Trip {
    Trip {
        id: id.to_owned(),
        name: "Lisbon".to_owned(),
        start_date: date!(2025 - 03 - 01),
        end_date: date!(2025 - 03 - 10),
        budget,
        description: None,
        status: TripStatus::Active,
        created_at: datetime!(2025-01-01 12:00 UTC),
    }
}

/// An expense on 2 March 2025 without a receipt.
pub(crate) fn sample_expense(
    id: &str,
    trip_id: &str,
    amount: f64,
    category: ExpenseCategory,
) -> Expense {
    Expense {
        id: id.to_owned(),
        trip_id: trip_id.to_owned(),
        date: date!(2025 - 03 - 02),
        category,
        amount,
        description: format!("Expense {id}"),
        receipt: None,
        created_at: datetime!(2025-01-01 12:00 UTC),
    }
}
